//! Caption Data Models
//!
//! Defines the data structures flowing through the engine: recognized words
//! on the way in, captions and caption tracks on the way out.

use serde::{Deserialize, Serialize};

use crate::types::TimeSec;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a caption (ULID)
pub type CaptionId = String;

/// Unique identifier for a caption track (ULID)
pub type CaptionTrackId = String;

// =============================================================================
// Word
// =============================================================================

/// A timestamped unit of recognized speech with a confidence score.
///
/// Words arrive display-ready: trimmed and cleaned of recognizer artifacts
/// by the transcription layer. The engine only borrows them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Word {
    /// Display text
    pub text: String,
    /// Start time in seconds
    pub start_sec: TimeSec,
    /// End time in seconds
    pub end_sec: TimeSec,
    /// Recognition confidence in [0, 1]
    pub confidence: f64,
}

impl Word {
    /// Creates a new word with the given text and timing.
    pub fn new(text: &str, start_sec: TimeSec, end_sec: TimeSec, confidence: f64) -> Self {
        Self {
            text: text.to_string(),
            start_sec,
            end_sec,
            confidence,
        }
    }

    /// Returns the spoken duration of this word in seconds.
    pub fn duration(&self) -> TimeSec {
        self.end_sec - self.start_sec
    }
}

// =============================================================================
// Caption
// =============================================================================

/// A timed block of text intended for simultaneous on-screen display.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Caption {
    /// Unique identifier
    pub id: CaptionId,
    /// Start time in seconds
    pub start_sec: TimeSec,
    /// End time in seconds
    pub end_sec: TimeSec,
    /// Caption text (wrapped into display lines at export time)
    pub text: String,
}

impl Caption {
    /// Creates a new caption with the given text and timing.
    pub fn new(id: &str, start_sec: TimeSec, end_sec: TimeSec, text: &str) -> Self {
        Self {
            id: id.to_string(),
            start_sec,
            end_sec,
            text: text.to_string(),
        }
    }

    /// Creates a caption with an auto-generated ID.
    pub fn create(start_sec: TimeSec, end_sec: TimeSec, text: &str) -> Self {
        Self::new(&ulid::Ulid::new().to_string(), start_sec, end_sec, text)
    }

    /// Returns the duration of this caption in seconds.
    pub fn duration(&self) -> TimeSec {
        self.end_sec - self.start_sec
    }

    /// Returns true if the caption is visible at the given time.
    pub fn is_visible_at(&self, time_sec: TimeSec) -> bool {
        time_sec >= self.start_sec && time_sec < self.end_sec
    }

    /// Returns true if this caption overlaps another in time.
    pub fn overlaps(&self, other: &Caption) -> bool {
        self.start_sec < other.end_sec && self.end_sec > other.start_sec
    }
}

// =============================================================================
// Caption Track
// =============================================================================

/// An ordered collection of captions, kept sorted by start time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionTrack {
    /// Unique identifier
    pub id: CaptionTrackId,
    /// Display name
    pub name: String,
    /// Language code (e.g., "en", "sv")
    pub language: String,
    /// Captions in playback order
    pub captions: Vec<Caption>,
}

impl CaptionTrack {
    /// Creates a new caption track.
    pub fn new(id: &str, name: &str, language: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            language: language.to_string(),
            captions: vec![],
        }
    }

    /// Creates a track with an auto-generated ID.
    pub fn create(name: &str, language: &str) -> Self {
        Self::new(&ulid::Ulid::new().to_string(), name, language)
    }

    /// Adds a caption to this track, keeping the track sorted.
    pub fn add_caption(&mut self, caption: Caption) {
        self.captions.push(caption);
        self.sort_captions();
    }

    /// Removes a caption by ID.
    pub fn remove_caption(&mut self, caption_id: &str) -> Option<Caption> {
        let pos = self.captions.iter().position(|c| c.id == caption_id)?;
        Some(self.captions.remove(pos))
    }

    /// Gets a caption by ID.
    pub fn get_caption(&self, caption_id: &str) -> Option<&Caption> {
        self.captions.iter().find(|c| c.id == caption_id)
    }

    /// Sorts captions by start time.
    pub fn sort_captions(&mut self) {
        self.captions.sort_by(|a, b| {
            a.start_sec
                .partial_cmp(&b.start_sec)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }

    /// Returns the captions visible at the given time.
    pub fn captions_at(&self, time_sec: TimeSec) -> Vec<&Caption> {
        self.captions
            .iter()
            .filter(|c| c.is_visible_at(time_sec))
            .collect()
    }

    /// Returns the total duration spanned by the track's captions.
    pub fn duration(&self) -> TimeSec {
        self.captions.last().map(|c| c.end_sec).unwrap_or(0.0)
    }

    /// Returns the full text of all captions.
    pub fn full_text(&self) -> String {
        self.captions
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Returns the number of captions.
    pub fn len(&self) -> usize {
        self.captions.len()
    }

    /// Returns true if the track has no captions.
    pub fn is_empty(&self) -> bool {
        self.captions.is_empty()
    }
}

impl Default for CaptionTrack {
    fn default() -> Self {
        Self::create("Subtitles", "en")
    }
}

// =============================================================================
// Tests
// =============================================================================
