//! Error Definitions
//!
//! Defines error types used throughout the engine.

use thiserror::Error;

use crate::types::TimeSec;

/// Core engine error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Word {index} starts at {start:.3}s, before the previous word at {prev_start:.3}s")]
    OutOfOrderWords {
        index: usize,
        prev_start: TimeSec,
        start: TimeSec,
    },

    #[error("Word {index} ends at {end:.3}s, before its own start at {start:.3}s")]
    InvalidWordTiming {
        index: usize,
        start: TimeSec,
        end: TimeSec,
    },
}

/// Core engine result type
pub type CoreResult<T> = Result<T, CoreError>;
