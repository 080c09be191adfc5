//! Caption Format Utilities
//!
//! Line wrapping, timestamp rendering, SRT/VTT export, and SRT parsing.
//!
//! # SRT Format
//!
//! ```text
//! 1
//! 00:00:01,000 --> 00:00:04,000
//! First caption text
//!
//! 2
//! 00:00:05,500 --> 00:00:08,000
//! Second caption text
//! ```
//!
//! Blocks are separated by a blank line and the document ends with a single
//! newline, so downstream import tools accept it byte-for-byte.

use thiserror::Error;

use crate::models::{Caption, CaptionTrack};

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur during caption parsing
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Invalid timestamp format
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Invalid caption block structure
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Missing required data
    #[error("Missing data: {0}")]
    MissingData(String),

    /// Unexpected end of input
    #[error("Unexpected end of input")]
    UnexpectedEnd,
}

// =============================================================================
// Line Wrapping
// =============================================================================

/// Greedily packs whitespace-delimited tokens into display lines.
///
/// A token joins the current line while the joined length (in characters)
/// stays within `max_chars`; otherwise it starts a new line. A single token
/// longer than `max_chars` is kept whole on its own line, never split
/// mid-token. Re-wrapping already-wrapped text (lines rejoined with spaces)
/// at the same width reproduces the same lines.
pub fn split_into_lines(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for token in text.split_whitespace() {
        let token_len = token.chars().count();
        if current.is_empty() {
            current.push_str(token);
            current_len = token_len;
        } else if current_len + 1 + token_len <= max_chars {
            current.push(' ');
            current.push_str(token);
            current_len += 1 + token_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(token);
            current_len = token_len;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Final display lines for a caption: wrapped at `max_chars`, then truncated
/// (not re-wrapped) at `max_lines`.
fn display_lines(text: &str, max_chars: usize, max_lines: usize) -> Vec<String> {
    let mut lines = split_into_lines(text, max_chars);
    lines.truncate(max_lines);
    lines
}

// =============================================================================
// Timestamp Rendering
// =============================================================================

/// Decomposes non-negative seconds into (hours, minutes, seconds, millis).
///
/// Total milliseconds are rounded first (half away from zero, so half-up for
/// the non-negative inputs this engine produces); a carry out of the
/// millisecond field propagates all the way into hours, keeping the rendered
/// fields well formed.
fn timestamp_parts(seconds: f64) -> (u64, u64, u64, u64) {
    let total_ms = (seconds * 1000.0).round() as u64;
    (
        total_ms / 3_600_000,
        total_ms / 60_000 % 60,
        total_ms / 1000 % 60,
        total_ms % 1000,
    )
}

/// Formats seconds as an SRT timestamp (00:00:00,000)
fn format_srt_timestamp(seconds: f64) -> String {
    let (hours, mins, secs, ms) = timestamp_parts(seconds);
    format!("{:02}:{:02}:{:02},{:03}", hours, mins, secs, ms)
}

/// Formats seconds as a VTT timestamp (00:00:00.000)
fn format_vtt_timestamp(seconds: f64) -> String {
    let (hours, mins, secs, ms) = timestamp_parts(seconds);
    format!("{:02}:{:02}:{:02}.{:03}", hours, mins, secs, ms)
}

// =============================================================================
// SRT Export
// =============================================================================

/// Exports captions as an SRT document.
///
/// Each caption becomes a numbered block: 1-based index line, timestamp line,
/// then the caption text wrapped at `max_chars` and truncated to `max_lines`
/// display lines. An empty caption slice yields an empty string; the caller
/// decides whether "no captions" is an error.
pub fn export_srt(captions: &[Caption], max_chars: usize, max_lines: usize) -> String {
    if captions.is_empty() {
        return String::new();
    }

    let blocks: Vec<String> = captions
        .iter()
        .enumerate()
        .map(|(index, caption)| {
            format!(
                "{}\n{} --> {}\n{}",
                index + 1,
                format_srt_timestamp(caption.start_sec),
                format_srt_timestamp(caption.end_sec),
                display_lines(&caption.text, max_chars, max_lines).join("\n"),
            )
        })
        .collect();

    blocks.join("\n\n") + "\n"
}

// =============================================================================
// VTT Export
// =============================================================================

/// Exports captions as a WebVTT document.
///
/// Same wrapping and truncation rules as [`export_srt`]; VTT uses a `.`
/// millisecond separator and carries no index lines.
pub fn export_vtt(captions: &[Caption], max_chars: usize, max_lines: usize) -> String {
    if captions.is_empty() {
        return String::new();
    }

    let blocks: Vec<String> = captions
        .iter()
        .map(|caption| {
            format!(
                "{} --> {}\n{}",
                format_vtt_timestamp(caption.start_sec),
                format_vtt_timestamp(caption.end_sec),
                display_lines(&caption.text, max_chars, max_lines).join("\n"),
            )
        })
        .collect();

    format!("WEBVTT\n\n{}\n", blocks.join("\n\n"))
}

// =============================================================================
// SRT Parsing
// =============================================================================

/// Parses SRT content into a list of captions.
///
/// Tolerates CRLF line endings and extra blank lines between blocks. Each
/// block must carry a sequence line, a timestamp line, and at least one text
/// line; multi-line text is preserved with embedded newlines.
pub fn parse_srt(content: &str) -> Result<Vec<Caption>, ParseError> {
    let normalized = content.replace("\r\n", "\n");
    let mut captions = Vec::new();

    for block in normalized.split("\n\n").map(str::trim) {
        if block.is_empty() {
            continue;
        }

        let mut lines = block.lines();
        let _seq = lines.next().ok_or(ParseError::UnexpectedEnd)?;
        let timestamp_line = lines.next().ok_or(ParseError::UnexpectedEnd)?;
        let (start_sec, end_sec) = parse_srt_timestamp_line(timestamp_line)?;

        let text: Vec<&str> = lines.collect();
        if text.is_empty() {
            return Err(ParseError::MissingData("caption text".to_string()));
        }

        let id = format!("srt_{}", captions.len());
        captions.push(Caption::new(&id, start_sec, end_sec, &text.join("\n")));
    }

    Ok(captions)
}

/// Parses an SRT timestamp line (e.g., "00:00:01,000 --> 00:00:04,000")
fn parse_srt_timestamp_line(line: &str) -> Result<(f64, f64), ParseError> {
    let (start, end) = line.split_once("-->").ok_or_else(|| {
        ParseError::InvalidFormat(format!("expected 'start --> end': {}", line))
    })?;

    Ok((
        parse_srt_timestamp(start.trim())?,
        parse_srt_timestamp(end.trim())?,
    ))
}

/// Parses an SRT timestamp (e.g., "00:01:23,456") into seconds
fn parse_srt_timestamp(ts: &str) -> Result<f64, ParseError> {
    let normalized = ts.replace(',', ".");
    let mut parts = normalized.split(':');

    let mut field = || -> Result<f64, ParseError> {
        parts
            .next()
            .and_then(|p| p.parse::<f64>().ok())
            .ok_or_else(|| ParseError::InvalidTimestamp(ts.to_string()))
    };

    let (hours, minutes, seconds) = (field()?, field()?, field()?);
    if parts.next().is_some() {
        return Err(ParseError::InvalidTimestamp(ts.to_string()));
    }

    Ok(hours * 3600.0 + minutes * 60.0 + seconds)
}

// =============================================================================
// Track Utilities
// =============================================================================

/// Creates a CaptionTrack from a finished caption sequence.
pub fn captions_to_track(captions: Vec<Caption>, name: &str, language: &str) -> CaptionTrack {
    let mut track = CaptionTrack::create(name, language);
    for caption in captions {
        track.add_caption(caption);
    }
    track
}

/// Exports a CaptionTrack to SRT format.
pub fn track_to_srt(track: &CaptionTrack, max_chars: usize, max_lines: usize) -> String {
    export_srt(&track.captions, max_chars, max_lines)
}

// =============================================================================
// Tests
// =============================================================================
