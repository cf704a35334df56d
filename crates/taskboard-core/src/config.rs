use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_CURRENT_USER: &str = "Você";
const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Display name that authors comments and owns edit/delete rights.
    #[serde(default)]
    pub current_user: Option<String>,
    #[serde(default)]
    pub search_debounce_ms: Option<u64>,
    /// When false, moves into the completion column skip the prompt.
    #[serde(default)]
    pub confirm_completion: Option<bool>,
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/taskboard/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("taskboard/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("taskboard\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    /// Board file used when no `--file` is given.
    pub fn default_data_path() -> Option<PathBuf> {
        dirs::data_dir().map(|data| data.join("taskboard").join("board.json"))
    }

    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Reads a config file, falling back to defaults when it is missing or malformed.
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            if let Ok(content) = std::fs::read_to_string(path) {
                if let Ok(config) = toml::from_str(&content) {
                    return config;
                }
            }
        }
        Self::default()
    }

    pub fn effective_current_user(&self) -> &str {
        self.current_user
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(DEFAULT_CURRENT_USER)
    }

    pub fn effective_search_debounce_ms(&self) -> u64 {
        self.search_debounce_ms.unwrap_or(DEFAULT_SEARCH_DEBOUNCE_MS)
    }

    pub fn effective_confirm_completion(&self) -> bool {
        self.confirm_completion.unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.effective_current_user(), "Você");
        assert_eq!(config.effective_search_debounce_ms(), 300);
        assert!(config.effective_confirm_completion());
    }

    #[test]
    fn test_blank_user_falls_back_to_default() {
        let config = AppConfig {
            current_user: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(config.effective_current_user(), "Você");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "current_user = \"Ana\"\nsearch_debounce_ms = 150\nconfirm_completion = false\n",
        )
        .unwrap();

        let config = AppConfig::load_from(&path);
        assert_eq!(config.effective_current_user(), "Ana");
        assert_eq!(config.effective_search_debounce_ms(), 150);
        assert!(!config.effective_confirm_completion());
    }

    #[test]
    fn test_malformed_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "current_user = [not valid").unwrap();

        let config = AppConfig::load_from(&path);
        assert_eq!(config.effective_current_user(), "Você");
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent.toml"));
        assert!(config.current_user.is_none());
    }
}
