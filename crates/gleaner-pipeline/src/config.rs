//! Configuration for an analysis run

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How file insights are folded into the consolidated report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationMode {
    /// Join every file insight with a space; no service call
    #[default]
    Verbatim,
    /// Send the verbatim join through one extra synthesis call
    Synthesized,
}

/// What the synthesis call asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SynthesisKind {
    /// Common themes and insights across all files
    #[default]
    Themes,
    /// One holistic summary
    Summary,
    /// Explicitly labeled sections (summary, segments, pain points, opportunities, insights)
    Sections,
}

/// Configuration for the segmentation-and-aggregation pipeline
///
/// Size constants are configuration with documented defaults; the values
/// observed in practice range from 1000 to 4000 characters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Soft segment threshold (characters): a segment closes once it reaches this length
    pub target_segment_chars: usize,

    /// Hard per-call ceiling (characters) for user content; longer payloads are truncated
    pub max_payload_chars: usize,

    /// Maximum time for a single service call (seconds)
    pub request_timeout_secs: u64,

    /// Segment calls in flight per document (1 = strictly sequential)
    pub max_concurrency: usize,

    /// Default aggregation mode
    pub aggregation: AggregationMode,

    /// Synthesis variant used by [`AggregationMode::Synthesized`]
    pub synthesis: SynthesisKind,

    /// Reuse replies for identical requests within a process
    pub cache_enabled: bool,
}

impl AnalysisConfig {
    /// Get the request timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.target_segment_chars == 0 {
            return Err("target_segment_chars must be greater than 0".to_string());
        }
        if self.max_payload_chars < self.target_segment_chars {
            return Err("max_payload_chars cannot be smaller than target_segment_chars".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than 0".to_string());
        }
        if self.max_concurrency == 0 {
            return Err("max_concurrency must be at least 1".to_string());
        }
        if self.max_concurrency > MAX_CONCURRENCY {
            return Err(format!("max_concurrency cannot exceed {}", MAX_CONCURRENCY));
        }
        Ok(())
    }
}

/// Upper bound on parallel segment calls
pub const MAX_CONCURRENCY: usize = 32;

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            target_segment_chars: 3_000,
            max_payload_chars: 4_000,
            request_timeout_secs: 60,
            max_concurrency: 1,
            aggregation: AggregationMode::Verbatim,
            synthesis: SynthesisKind::Themes,
            cache_enabled: true,
        }
    }
}

impl AnalysisConfig {
    /// Compact preset: small segments for models with short context windows
    pub fn compact() -> Self {
        Self {
            target_segment_chars: 1_000,
            max_payload_chars: 1_500,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(AnalysisConfig::default().validate().is_ok());
    }

    #[test]
    fn test_compact_config_is_valid() {
        let config = AnalysisConfig::compact();
        assert!(config.validate().is_ok());
        assert_eq!(config.target_segment_chars, 1_000);
    }

    #[test]
    fn test_payload_ceiling_below_target_is_invalid() {
        let config = AnalysisConfig {
            target_segment_chars: 2_000,
            max_payload_chars: 1_000,
            ..AnalysisConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_values_are_invalid() {
        let mut config = AnalysisConfig::default();
        config.target_segment_chars = 0;
        assert!(config.validate().is_err());

        let mut config = AnalysisConfig::default();
        config.request_timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = AnalysisConfig::default();
        config.max_concurrency = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = AnalysisConfig::from_toml(
            r#"
            target_segment_chars = 1200
            aggregation = "synthesized"
            synthesis = "sections"
            "#,
        )
        .unwrap();

        assert_eq!(config.target_segment_chars, 1200);
        assert_eq!(config.max_payload_chars, 4_000);
        assert_eq!(config.aggregation, AggregationMode::Synthesized);
        assert_eq!(config.synthesis, SynthesisKind::Sections);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AnalysisConfig::compact();
        let parsed = AnalysisConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        assert!(AnalysisConfig::from_toml(r#"aggregation = "telepathic""#).is_err());
    }
}
