use crate::error::Result;
use crate::paths;
use crate::store::SpecStore;
use llm_client::{ClientOptions, Provider};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Contents of `specgen.yaml`. Every field is optional in the file.
///
/// Credentials are never stored here; they come from the provider's
/// environment variable (`GROQ_API_KEY`, `CLAUDE_API_KEY`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub provider: Provider,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// History directory, relative to the project root unless absolute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

fn default_temperature() -> f32 {
    0.2
}

fn default_max_tokens() -> u32 {
    2048
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            model: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            base_url: None,
            timeout_secs: default_timeout_secs(),
            data_dir: None,
        }
    }
}

impl Config {
    /// Load `specgen.yaml` from `root`, or defaults when the file is absent.
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&paths::config_path(root), data.as_bytes())
    }

    /// Replace the provider when an override (e.g. `SPECGEN_PROVIDER`) is set.
    pub fn with_provider_override(mut self, provider: Option<&str>) -> Result<Self> {
        if let Some(p) = provider.filter(|p| !p.trim().is_empty()) {
            self.provider = p.parse()?;
        }
        Ok(self)
    }

    /// The model identifier that will actually be sent upstream.
    pub fn effective_model(&self) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| self.provider.default_model().to_string())
    }

    pub fn client_options(&self) -> ClientOptions {
        ClientOptions {
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    pub fn specs_path(&self, root: &Path) -> PathBuf {
        match &self.data_dir {
            Some(dir) if dir.is_absolute() => dir.join(paths::SPECS_FILE),
            Some(dir) => root.join(dir).join(paths::SPECS_FILE),
            None => paths::specs_path(root),
        }
    }

    pub fn store(&self, root: &Path) -> SpecStore {
        SpecStore::new(self.specs_path(root))
    }

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if !(0.0..=1.0).contains(&self.temperature) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "temperature {} is outside 0.0..=1.0; replies may not be parseable JSON",
                    self.temperature
                ),
            });
        }

        if self.max_tokens == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "max_tokens must be greater than 0".to_string(),
            });
        }

        if self.timeout_secs == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "timeout_secs must be greater than 0".to_string(),
            });
        }

        if let Some(model) = &self.model {
            if model.trim().is_empty() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: "model is set but empty".to_string(),
                });
            }
        }

        if self.provider.credential_from_env().is_none() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "{} is not set; generation will fail until it is",
                    self.provider.credential_vars().join(" or ")
                ),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = Config::load(dir.path()).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.provider, Provider::Groq);
        assert!((cfg.temperature - 0.2).abs() < f32::EPSILON);
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("specgen.yaml"),
            "provider: anthropic\nmodel: claude-3-5-haiku-latest\n",
        )
        .unwrap();
        let cfg = Config::load(dir.path()).unwrap();
        assert_eq!(cfg.provider, Provider::Anthropic);
        assert_eq!(cfg.effective_model(), "claude-3-5-haiku-latest");
        assert_eq!(cfg.max_tokens, 2048);
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let cfg = Config {
            provider: Provider::Anthropic,
            timeout_secs: 30,
            ..Default::default()
        };
        cfg.save(dir.path()).unwrap();
        assert_eq!(Config::load(dir.path()).unwrap(), cfg);
    }

    #[test]
    fn provider_override() {
        let cfg = Config::default()
            .with_provider_override(Some("anthropic"))
            .unwrap();
        assert_eq!(cfg.provider, Provider::Anthropic);
        assert_eq!(cfg.effective_model(), "claude-3-5-sonnet-20241022");

        let same = Config::default().with_provider_override(None).unwrap();
        assert_eq!(same.provider, Provider::Groq);

        assert!(Config::default().with_provider_override(Some("bogus")).is_err());
    }

    #[test]
    fn specs_path_honours_data_dir() {
        let root = Path::new("/srv/app");
        assert_eq!(
            Config::default().specs_path(root),
            PathBuf::from("/srv/app/data/specs.json")
        );
        let cfg = Config {
            data_dir: Some(PathBuf::from("var/history")),
            ..Default::default()
        };
        assert_eq!(
            cfg.specs_path(root),
            PathBuf::from("/srv/app/var/history/specs.json")
        );
    }

    #[test]
    fn validate_flags_bad_values() {
        let cfg = Config {
            temperature: 1.7,
            max_tokens: 0,
            ..Default::default()
        };
        let warnings = cfg.validate();
        assert!(warnings.iter().any(|w| w.message.contains("temperature")));
        assert!(warnings
            .iter()
            .any(|w| w.level == WarnLevel::Error && w.message.contains("max_tokens")));
    }
}
