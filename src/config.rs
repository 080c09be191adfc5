//! Caption Configuration
//!
//! Plain-value knobs controlling segmentation and formatting. Validation is
//! strict: bad values fail fast at `Segmenter` construction instead of being
//! clamped to something plausible.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{Frame, TimeSec};

/// Configuration for caption segmentation and SRT formatting.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CaptionConfig {
    /// Maximum characters per display line
    pub max_chars_per_line: usize,

    /// Maximum display lines per caption
    pub max_lines: usize,

    /// Minimum on-screen duration in seconds
    pub min_duration_s: TimeSec,

    /// Maximum caption duration in seconds
    pub max_duration_s: TimeSec,

    /// Minimum gap between consecutive captions, in frames
    pub gap_frames: Frame,

    /// Timeline frame rate, used to convert `gap_frames` to seconds
    pub fps: f64,

    /// Words below this confidence receive the low-confidence marker
    pub confidence_threshold: f64,

    /// Whether to decorate low-confidence words in the output text
    pub highlight_low_confidence: bool,

    /// Hard cap on words per caption (0 = unlimited)
    pub max_words_per_caption: usize,
}

impl Default for CaptionConfig {
    fn default() -> Self {
        Self {
            max_chars_per_line: 42,
            max_lines: 1,
            min_duration_s: 1.0,
            max_duration_s: 7.0,
            gap_frames: 2,
            fps: 24.0,
            confidence_threshold: 0.5,
            highlight_low_confidence: false,
            max_words_per_caption: 0,
        }
    }
}

impl CaptionConfig {
    /// Checks every field against its contract.
    ///
    /// Runs once, at `Segmenter` construction. Out-of-range values are an
    /// error, never silently corrected.
    pub fn validate(&self) -> CoreResult<()> {
        if self.max_chars_per_line == 0 {
            return Err(CoreError::InvalidConfig(
                "max_chars_per_line must be positive".to_string(),
            ));
        }
        if self.max_lines == 0 {
            return Err(CoreError::InvalidConfig(
                "max_lines must be positive".to_string(),
            ));
        }
        if !self.min_duration_s.is_finite() || self.min_duration_s < 0.0 {
            return Err(CoreError::InvalidConfig(format!(
                "min_duration_s must be non-negative, got {}",
                self.min_duration_s
            )));
        }
        if !self.max_duration_s.is_finite() || self.max_duration_s <= 0.0 {
            return Err(CoreError::InvalidConfig(format!(
                "max_duration_s must be positive, got {}",
                self.max_duration_s
            )));
        }
        if self.min_duration_s > self.max_duration_s {
            return Err(CoreError::InvalidConfig(format!(
                "min_duration_s {} exceeds max_duration_s {}",
                self.min_duration_s, self.max_duration_s
            )));
        }
        if !self.fps.is_finite() || self.fps <= 0.0 {
            return Err(CoreError::InvalidConfig(format!(
                "fps must be positive, got {}",
                self.fps
            )));
        }
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(CoreError::InvalidConfig(format!(
                "confidence_threshold must be within [0, 1], got {}",
                self.confidence_threshold
            )));
        }
        Ok(())
    }

    /// Returns the inter-caption gap in seconds.
    pub fn gap_seconds(&self) -> TimeSec {
        self.gap_frames as TimeSec / self.fps
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CaptionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_chars_per_line, 42);
        assert_eq!(config.max_lines, 1);
        assert_eq!(config.min_duration_s, 1.0);
        assert_eq!(config.max_duration_s, 7.0);
        assert_eq!(config.gap_frames, 2);
        assert_eq!(config.fps, 24.0);
        assert_eq!(config.max_words_per_caption, 0);
        assert!(!config.highlight_low_confidence);
    }

    #[test]
    fn test_zero_chars_per_line_rejected() {
        let config = CaptionConfig {
            max_chars_per_line: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(CoreError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_zero_lines_rejected() {
        let config = CaptionConfig {
            max_lines: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_min_duration_rejected() {
        let config = CaptionConfig {
            min_duration_s: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_min_duration_above_max_rejected() {
        let config = CaptionConfig {
            min_duration_s: 8.0,
            max_duration_s: 7.0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("exceeds"));
    }

    #[test]
    fn test_non_positive_fps_rejected() {
        for fps in [0.0, -24.0, f64::NAN] {
            let config = CaptionConfig {
                fps,
                ..Default::default()
            };
            assert!(config.validate().is_err(), "fps {} accepted", fps);
        }
    }

    #[test]
    fn test_confidence_threshold_out_of_range_rejected() {
        for threshold in [-0.1, 1.1] {
            let config = CaptionConfig {
                confidence_threshold: threshold,
                ..Default::default()
            };
            assert!(config.validate().is_err());
        }
    }

    #[test]
    fn test_zero_gap_frames_accepted() {
        let config = CaptionConfig {
            gap_frames: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.gap_seconds(), 0.0);
    }

    #[test]
    fn test_gap_seconds() {
        let config = CaptionConfig::default();
        assert!((config.gap_seconds() - 2.0 / 24.0).abs() < 1e-9);

        let config = CaptionConfig {
            gap_frames: 3,
            fps: 30.0,
            ..Default::default()
        };
        assert!((config.gap_seconds() - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_serialization_round_trip() {
        let config = CaptionConfig {
            max_lines: 2,
            highlight_low_confidence: true,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"maxCharsPerLine\""));

        let parsed: CaptionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let parsed: CaptionConfig = serde_json::from_str(r#"{"maxLines": 2}"#).unwrap();
        assert_eq!(parsed.max_lines, 2);
        assert_eq!(parsed.max_chars_per_line, 42);
        assert_eq!(parsed.fps, 24.0);
    }
}
