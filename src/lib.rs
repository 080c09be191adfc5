//! Captionsmith Core Library
//!
//! Turns word-level speech recognition output (timestamped, confidence-scored
//! words) into readable subtitle documents. The engine groups words into
//! caption blocks, wraps text into display lines, enforces duration and gap
//! policies, and serializes the result as SRT or WebVTT.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Caption Engine                           │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  models.rs     - Data structures (Word, Caption, CaptionTrack)  │
//! │  config.rs     - Segmentation and formatting configuration      │
//! │  segmenter.rs  - Word grouping and timing enforcement           │
//! │  formats.rs    - Line wrapping, SRT/VTT export, SRT parsing     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Data flows one way: word stream -> Segmenter -> captions -> Formatter ->
//! document string. The whole computation is a pure, synchronous function of
//! its inputs; independent invocations share no state.
//!
//! Speech recognition, audio handling, file I/O, and any UI live outside this
//! crate. Words arrive already cleaned of recognizer artifacts; the finished
//! document goes back to the caller as a string.
//!
//! # Example Usage
//!
//! ```rust
//! use captionsmith::{words_to_srt, CaptionConfig, Word};
//!
//! let words = vec![
//!     Word::new("Hello", 0.0, 0.5, 0.95),
//!     Word::new("world.", 0.5, 1.0, 0.98),
//! ];
//!
//! let srt = words_to_srt(&words, &CaptionConfig::default()).unwrap();
//! assert!(srt.starts_with("1\n00:00:00,000 --> 00:00:01,000\n"));
//! ```

pub mod config;
pub mod formats;
pub mod models;
pub mod segmenter;

mod error;
pub use error::{CoreError, CoreResult};

mod types;
pub use types::*;

// Re-export the primary surface
pub use config::CaptionConfig;
pub use formats::{
    captions_to_track, export_srt, export_vtt, parse_srt, split_into_lines, track_to_srt,
    ParseError,
};
pub use models::{Caption, CaptionId, CaptionTrack, CaptionTrackId, Word};
pub use segmenter::{BracketMarker, ConfidenceMarker, Segmenter};

/// Segments words and serializes them as an SRT document in one step.
///
/// Validates `config`, groups `words` into captions, and formats the result
/// with the same line limits. An empty word stream yields an empty string;
/// the caller decides whether "no captions" is user-visible failure.
pub fn words_to_srt(words: &[Word], config: &CaptionConfig) -> CoreResult<String> {
    let segmenter = Segmenter::new(config.clone())?;
    let captions = segmenter.segment(words)?;
    Ok(export_srt(
        &captions,
        config.max_chars_per_line,
        config.max_lines,
    ))
}
