//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use gleaner_domain::Credential;
use gleaner_llm::openai::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use gleaner_pipeline::AnalysisConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable read when a profile names none.
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name
    #[serde(default = "default_profile")]
    pub active_profile: String,

    /// Available profiles
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Segmentation and aggregation defaults
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Text service profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// API base URL
    pub endpoint: String,

    /// Chat model name
    pub model: String,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Optional sampling temperature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".gleaner").join("config.toml"))
    }

    /// Load configuration from the default path or create default.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load configuration from `path`, or defaults when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            config.analysis.validate().map_err(CliError::Config)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the active profile.
    pub fn get_active_profile(&self) -> Result<&Profile> {
        self.profiles
            .get(&self.active_profile)
            .ok_or_else(|| CliError::Config(format!("Profile '{}' not found", self.active_profile)))
    }

    /// Add or update a profile.
    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Switch to a different profile.
    pub fn switch_profile(&mut self, name: String) -> Result<()> {
        if !self.profiles.contains_key(&name) {
            return Err(CliError::Config(format!("Profile '{}' does not exist", name)));
        }
        self.active_profile = name;
        Ok(())
    }
}

impl Profile {
    /// Resolve the credential: an explicit key wins over the profile's variable.
    ///
    /// Returns `None` when neither yields a non-blank value.
    pub fn credential(&self, explicit: Option<&str>) -> Option<Credential> {
        explicit
            .map(str::to_string)
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .map(Credential::new)
            .filter(|credential| !credential.is_blank())
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_env: default_api_key_env(),
            temperature: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut profiles = BTreeMap::new();
        profiles.insert("default".to_string(), Profile::default());

        Self {
            active_profile: "default".to_string(),
            profiles,
            settings: Settings::default(),
            analysis: AnalysisConfig::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_profile() -> String {
    "default".to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

#[cfg(test)]
mod tests {
    use super::*;
    use gleaner_pipeline::AggregationMode;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.active_profile, "default");
        assert_eq!(config.get_active_profile().unwrap().model, DEFAULT_MODEL);
        assert!(config.settings.color);
        assert_eq!(config.analysis, AnalysisConfig::default());
    }

    #[test]
    fn test_profile_management() {
        let mut config = Config::default();

        let profile = Profile {
            endpoint: "http://localhost:11434/v1".to_string(),
            model: "llama3".to_string(),
            api_key_env: "LOCAL_KEY".to_string(),
            temperature: Some(0.2),
        };

        config.set_profile("local".to_string(), profile);
        assert!(config.profiles.contains_key("local"));

        config.switch_profile("local".to_string()).unwrap();
        assert_eq!(config.get_active_profile().unwrap().model, "llama3");
    }

    #[test]
    fn test_switch_to_nonexistent_profile() {
        let mut config = Config::default();
        assert!(config.switch_profile("nonexistent".to_string()).is_err());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.analysis.aggregation = AggregationMode::Synthesized;
        config.analysis.target_segment_chars = 1_200;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.analysis, config.analysis);
        assert_eq!(loaded.profiles, config.profiles);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.active_profile, "default");
    }

    #[test]
    fn test_invalid_analysis_section_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[analysis]\ntarget_segment_chars = 0\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(CliError::Config(_))));
    }

    #[test]
    fn test_explicit_credential_wins() {
        let profile = Profile {
            api_key_env: "GLEANER_TEST_UNSET_VARIABLE".to_string(),
            ..Profile::default()
        };
        assert_eq!(profile.credential(Some("sk-1")).unwrap().expose(), "sk-1");
        assert!(profile.credential(Some("   ")).is_none());
        assert!(profile.credential(None).is_none());
    }

    #[test]
    fn test_credential_read_from_profile_variable() {
        std::env::set_var("GLEANER_TEST_AZURE_KEY", "sk-azure");
        let profile = Profile {
            api_key_env: "GLEANER_TEST_AZURE_KEY".to_string(),
            ..Profile::default()
        };
        assert_eq!(profile.credential(None).unwrap().expose(), "sk-azure");
        assert_eq!(profile.credential(Some("sk-flag")).unwrap().expose(), "sk-flag");
        std::env::remove_var("GLEANER_TEST_AZURE_KEY");
    }
}
