use crate::error::{NotaError, Result};
use crate::model::PageId;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";

/// Environment override for the API token, taking precedence over the
/// stored value.
pub const TOKEN_ENV: &str = "NOTION_API_TOKEN";

/// Environment override for the config directory (used by tests and
/// non-standard setups).
pub const CONFIG_DIR_ENV: &str = "NOTA_CONFIG_DIR";

/// Local configuration, stored as JSON in the user config directory.
///
/// The token is kept in plain text; encrypting it locally is explicitly
/// out of scope.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotaConfig {
    /// Integration token for the API.
    #[serde(default)]
    pub api_token: String,

    /// Page opened by `nota page` when no ID is given.
    #[serde(default)]
    pub main_page_id: String,

    /// Page holding the task stack.
    #[serde(default)]
    pub stack_page_id: String,
}

/// Resolve the config directory: `NOTA_CONFIG_DIR` when set, otherwise
/// the platform config dir.
pub fn config_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let proj = directories::ProjectDirs::from("com", "nota", "nota")
        .ok_or_else(|| NotaError::Config("could not determine config directory".into()))?;
    Ok(proj.config_dir().to_path_buf())
}

impl NotaConfig {
    /// Load the config, failing when no config file exists yet.
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let path = config_dir.as_ref().join(CONFIG_FILENAME);
        if !path.exists() {
            return Err(NotaError::Config(format!(
                "no config file at {}; run `nota config` first",
                path.display()
            )));
        }
        let contents = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Load the config, or start from defaults when the file is missing
    /// or unreadable (the `nota config` entry path).
    pub fn load_or_default<P: AsRef<Path>>(config_dir: P) -> Self {
        Self::load(config_dir).unwrap_or_default()
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let dir = config_dir.as_ref();
        fs::create_dir_all(dir)?;
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(dir.join(CONFIG_FILENAME), contents)?;
        Ok(())
    }

    /// The API token, with the environment override applied.
    pub fn token(&self) -> Result<String> {
        if let Ok(tok) = std::env::var(TOKEN_ENV) {
            if !tok.is_empty() {
                return Ok(tok);
            }
        }
        if self.api_token.is_empty() {
            return Err(NotaError::Config(
                "no API token configured; run `nota config`".into(),
            ));
        }
        Ok(self.api_token.clone())
    }

    pub fn main_page(&self) -> Result<PageId> {
        if self.main_page_id.is_empty() {
            return Err(NotaError::Config(
                "no main page configured; run `nota config`".into(),
            ));
        }
        Ok(PageId::new(self.main_page_id.clone()))
    }

    pub fn stack_page(&self) -> Result<PageId> {
        if self.stack_page_id.is_empty() {
            return Err(NotaError::Config(
                "no stack page configured; run `nota config`".into(),
            ));
        }
        Ok(PageId::new(self.stack_page_id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let config = NotaConfig {
            api_token: "secret".into(),
            main_page_id: "m1".into(),
            stack_page_id: "s1".into(),
        };
        config.save(dir.path()).unwrap();
        assert_eq!(NotaConfig::load(dir.path()).unwrap(), config);
    }

    #[test]
    fn missing_file_mentions_config_command() {
        let dir = tempfile::tempdir().unwrap();
        let err = NotaConfig::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("nota config"));
    }

    #[test]
    fn load_or_default_swallows_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(NotaConfig::load_or_default(dir.path()), NotaConfig::default());
    }

    #[test]
    fn empty_page_ids_are_config_errors() {
        let config = NotaConfig::default();
        assert!(matches!(config.main_page(), Err(NotaError::Config(_))));
        assert!(matches!(config.stack_page(), Err(NotaError::Config(_))));
    }
}
