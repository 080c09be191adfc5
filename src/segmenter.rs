//! Word Segmentation Engine
//!
//! Groups a time-ordered word stream into caption blocks.
//!
//! The scan keeps a single open block. For each incoming word the engine
//! evaluates a set of flush predicates against the candidate (block + word);
//! if any fires, the block is finalized into a [`Caption`] and the word opens
//! a new one. A single left-to-right post-pass then enforces minimum duration
//! and inter-caption gaps.
//!
//! The input must already be sorted by start time. The engine does not
//! re-sort; it fails fast on out-of-order input instead of producing captions
//! with non-monotonic timestamps.

use tracing::{debug, warn};

use crate::config::CaptionConfig;
use crate::error::{CoreError, CoreResult};
use crate::formats::split_into_lines;
use crate::models::{Caption, Word};
use crate::types::TimeSec;

// =============================================================================
// Tuning Constants
// =============================================================================

/// Pause between words treated as a natural break
const PAUSE_THRESHOLD_S: TimeSec = 0.5;

/// Minimum accumulated text length before pause/punctuation breaks apply.
/// Guards against flushing on a pause after only one or two short words.
const MIN_BREAK_TEXT_LEN: usize = 20;

/// Captions squeezed by gap enforcement never drop below this duration
const MIN_CAPTION_FLOOR_S: TimeSec = 0.1;

/// Sentence-ending punctuation that suggests a caption boundary
const SENTENCE_PUNCTUATION: [char; 5] = ['.', '!', '?', ':', ';'];

// =============================================================================
// Low-Confidence Decoration
// =============================================================================

/// Decorates the display text of words below the confidence threshold.
///
/// Decoration is a pure text transform applied per word, independent of line
/// wrapping. Alternate schemes (styling markup, color tags) can be swapped in
/// without touching segmentation logic.
pub trait ConfidenceMarker: Send + Sync {
    /// Wraps a low-confidence word's display text in a visible marker.
    fn mark(&self, text: &str) -> String;
}

/// Default marker: renders a word as `[word?]`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BracketMarker;

impl ConfidenceMarker for BracketMarker {
    fn mark(&self, text: &str) -> String {
        format!("[{}?]", text)
    }
}

// =============================================================================
// Open Block
// =============================================================================

/// The caption block currently being accumulated during a scan.
///
/// Holds the absorbed words plus the space-joined display text (which may
/// carry low-confidence decorations the raw words do not).
#[derive(Debug, Default)]
struct OpenBlock {
    words: Vec<Word>,
    text: String,
}

impl OpenBlock {
    fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Absorbs a word and its (possibly decorated) display text.
    fn push(&mut self, word: Word, display: &str) {
        if !self.text.is_empty() {
            self.text.push(' ');
        }
        self.text.push_str(display);
        self.words.push(word);
    }

    /// The block's text if `display` were appended.
    fn candidate_text(&self, display: &str) -> String {
        if self.text.is_empty() {
            display.to_string()
        } else {
            format!("{} {}", self.text, display)
        }
    }

    /// Finalizes a non-empty block into a caption spanning its words.
    fn finalize(self) -> Caption {
        let start = self.words.first().map(|w| w.start_sec).unwrap_or(0.0);
        let end = self.words.last().map(|w| w.end_sec).unwrap_or(start);
        Caption::create(start, end, &self.text)
    }
}

// =============================================================================
// Segmenter
// =============================================================================

/// Groups timestamped words into captions under line-wrap, duration, and gap
/// policies.
pub struct Segmenter {
    config: CaptionConfig,
    gap_s: TimeSec,
    marker: Box<dyn ConfidenceMarker>,
}

impl Segmenter {
    /// Creates a segmenter, validating the configuration up front.
    pub fn new(config: CaptionConfig) -> CoreResult<Self> {
        config.validate()?;
        let gap_s = config.gap_seconds();
        Ok(Self {
            config,
            gap_s,
            marker: Box::new(BracketMarker),
        })
    }

    /// Replaces the low-confidence marker scheme.
    pub fn with_marker(mut self, marker: Box<dyn ConfidenceMarker>) -> Self {
        self.marker = marker;
        self
    }

    /// Groups `words` into captions.
    ///
    /// Words must be sorted by start time, each ending no earlier than it
    /// starts. Words whose text is empty after trimming are skipped entirely;
    /// they neither open nor extend a block. An empty input yields an empty
    /// caption sequence, not an error.
    pub fn segment(&self, words: &[Word]) -> CoreResult<Vec<Caption>> {
        check_word_order(words)?;

        let mut captions = Vec::new();
        let mut block = OpenBlock::default();

        for word in words {
            if word.text.trim().is_empty() {
                debug!("skipping word with empty display text at {:.3}s", word.start_sec);
                continue;
            }

            let display = self.display_text(word);

            if self.should_flush(&block, word, &display) {
                captions.push(std::mem::take(&mut block).finalize());
            }

            block.push(word.clone(), &display);
        }

        if !block.is_empty() {
            captions.push(block.finalize());
        }

        enforce_timing(&mut captions, self.config.min_duration_s, self.gap_s);

        debug!(
            "segmented {} words into {} captions",
            words.len(),
            captions.len()
        );
        Ok(captions)
    }

    /// Per-word display text, decorated when confidence falls below the
    /// threshold and highlighting is enabled.
    fn display_text(&self, word: &Word) -> String {
        if self.config.highlight_low_confidence
            && word.confidence < self.config.confidence_threshold
        {
            self.marker.mark(&word.text)
        } else {
            word.text.clone()
        }
    }

    /// True when the open block must be finalized before absorbing `word`.
    ///
    /// An empty block is never flushed.
    fn should_flush(&self, block: &OpenBlock, word: &Word, display: &str) -> bool {
        if block.is_empty() {
            return false;
        }

        self.exceeds_line_limit(block, display)
            || self.exceeds_max_duration(block, word)
            || self.natural_pause(block, word)
            || self.sentence_break(block)
            || self.word_cap_reached(block)
    }

    /// The candidate text would wrap to more lines than allowed.
    fn exceeds_line_limit(&self, block: &OpenBlock, display: &str) -> bool {
        let candidate = block.candidate_text(display);
        split_into_lines(&candidate, self.config.max_chars_per_line).len() > self.config.max_lines
    }

    /// Absorbing `word` would stretch the block past the maximum duration.
    fn exceeds_max_duration(&self, block: &OpenBlock, word: &Word) -> bool {
        match block.words.first() {
            Some(first) => word.end_sec - first.start_sec > self.config.max_duration_s,
            None => false,
        }
    }

    /// A pause longer than [`PAUSE_THRESHOLD_S`] precedes `word` and the
    /// block already carries enough text to stand on its own.
    fn natural_pause(&self, block: &OpenBlock, word: &Word) -> bool {
        match block.words.last() {
            Some(prev) => {
                word.start_sec - prev.end_sec > PAUSE_THRESHOLD_S
                    && block.text.chars().count() > MIN_BREAK_TEXT_LEN
            }
            None => false,
        }
    }

    /// The previous word's undecorated text ends a sentence and the block is
    /// long enough to stand on its own.
    fn sentence_break(&self, block: &OpenBlock) -> bool {
        match block.words.last() {
            Some(prev) => {
                prev.text.trim_end().ends_with(SENTENCE_PUNCTUATION)
                    && block.text.chars().count() > MIN_BREAK_TEXT_LEN
            }
            None => false,
        }
    }

    /// The hard word cap is set and the block has reached it.
    fn word_cap_reached(&self, block: &OpenBlock) -> bool {
        self.config.max_words_per_caption > 0
            && block.words.len() >= self.config.max_words_per_caption
    }
}

// =============================================================================
// Timing Post-Pass
// =============================================================================

/// Left-to-right duration and gap enforcement over finalized captions.
///
/// Captions shorter than `min_duration_s` are extended. A caption whose
/// (possibly extended) end would crowd the next caption's start is pulled
/// back to leave `gap_s` of clear space, but never below the
/// [`MIN_CAPTION_FLOOR_S`] duration floor. The pass runs exactly once, in
/// order, without re-checking earlier captions; when the floor wins over the
/// gap a residual overlap can remain.
pub(crate) fn enforce_timing(captions: &mut [Caption], min_duration_s: TimeSec, gap_s: TimeSec) {
    for i in 0..captions.len() {
        if captions[i].duration() < min_duration_s {
            captions[i].end_sec = captions[i].start_sec + min_duration_s;
        }

        if i + 1 < captions.len() {
            let next_start = captions[i + 1].start_sec;
            if captions[i].end_sec + gap_s > next_start {
                let floor = captions[i].start_sec + MIN_CAPTION_FLOOR_S;
                let pulled = next_start - gap_s;
                if pulled < floor {
                    warn!(
                        "caption at {:.3}s squeezed to the {}s duration floor",
                        captions[i].start_sec, MIN_CAPTION_FLOOR_S
                    );
                }
                captions[i].end_sec = pulled.max(floor);
            }
        }
    }
}

/// Fails fast on a word stream that violates the ordering precondition.
fn check_word_order(words: &[Word]) -> CoreResult<()> {
    let mut prev_start: Option<TimeSec> = None;

    for (index, word) in words.iter().enumerate() {
        if word.end_sec < word.start_sec {
            return Err(CoreError::InvalidWordTiming {
                index,
                start: word.start_sec,
                end: word.end_sec,
            });
        }
        if let Some(prev) = prev_start {
            if word.start_sec < prev {
                return Err(CoreError::OutOfOrderWords {
                    index,
                    prev_start: prev,
                    start: word.start_sec,
                });
            }
        }
        prev_start = Some(word.start_sec);
    }

    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
