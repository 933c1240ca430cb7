use movora_models::{Category, TrendingWindow};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Upper bound accepted for the search debounce window
const MAX_DEBOUNCE_MS: u64 = 10_000;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub images: ImageConfig,
    #[serde(default)]
    pub browse: BrowseConfig,
}

/// Metadata provider endpoint settings. The API key lives in the credential store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
    /// Sent as the `language` query parameter when set (e.g. "en-US")
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    #[serde(default = "default_image_base_url")]
    pub base_url: String,
    #[serde(default = "default_poster_size")]
    pub poster_size: String,
    #[serde(default = "default_detail_poster_size")]
    pub detail_poster_size: String,
    #[serde(default = "default_profile_size")]
    pub profile_size: String,
    #[serde(default = "default_poster_placeholder")]
    pub poster_placeholder: String,
    #[serde(default = "default_profile_placeholder")]
    pub profile_placeholder: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowseConfig {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default)]
    pub default_category: Category,
    #[serde(default)]
    pub default_window: TrendingWindow,
    /// Number of top-billed cast members shown in a detail view
    #[serde(default = "default_cast_limit")]
    pub cast_limit: usize,
}

fn default_api_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p".to_string()
}

fn default_poster_size() -> String {
    "w500".to_string()
}

fn default_detail_poster_size() -> String {
    "w342".to_string()
}

fn default_profile_size() -> String {
    "w185".to_string()
}

fn default_poster_placeholder() -> String {
    "/placeholder-movie.jpg".to_string()
}

fn default_profile_placeholder() -> String {
    "/placeholder-person.jpg".to_string()
}

fn default_debounce_ms() -> u64 {
    800
}

fn default_cast_limit() -> usize {
    8
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            language: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl TmdbConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            base_url: default_image_base_url(),
            poster_size: default_poster_size(),
            detail_poster_size: default_detail_poster_size(),
            profile_size: default_profile_size(),
            poster_placeholder: default_poster_placeholder(),
            profile_placeholder: default_profile_placeholder(),
        }
    }
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            default_category: Category::default(),
            default_window: TrendingWindow::default(),
            cast_limit: default_cast_limit(),
        }
    }
}

impl BrowseConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.tmdb.base_url.trim().is_empty() {
            return Err(anyhow::anyhow!("tmdb.base_url cannot be empty"));
        }
        if !self.tmdb.base_url.starts_with("http://") && !self.tmdb.base_url.starts_with("https://") {
            return Err(anyhow::anyhow!("tmdb.base_url must be an http(s) URL: {}", self.tmdb.base_url));
        }
        if self.tmdb.timeout_secs == 0 {
            return Err(anyhow::anyhow!("tmdb.timeout_secs must be greater than zero"));
        }
        if self.images.base_url.trim().is_empty() {
            return Err(anyhow::anyhow!("images.base_url cannot be empty"));
        }
        if self.browse.debounce_ms > MAX_DEBOUNCE_MS {
            return Err(anyhow::anyhow!(
                "browse.debounce_ms must be at most {} (got {})",
                MAX_DEBOUNCE_MS,
                self.browse.debounce_ms
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.tmdb.language = Some("de-DE".to_string());
        config.browse.default_category = Category::TopRated;
        config.browse.debounce_ms = 500;

        config.save_to_file(file.path()).unwrap();

        let loaded = Config::load_from_file(file.path()).unwrap();
        assert_eq!(loaded.tmdb.language.as_deref(), Some("de-DE"));
        assert_eq!(loaded.browse.default_category, Category::TopRated);
        assert_eq!(loaded.browse.debounce_ms, 500);
        assert_eq!(loaded.images.poster_size, "w500");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [browse]
            default_window = "week"
            "#,
        )
        .unwrap();

        assert_eq!(config.browse.default_window, TrendingWindow::Week);
        assert_eq!(config.browse.debounce_ms, 800);
        assert_eq!(config.browse.cast_limit, 8);
        assert_eq!(config.tmdb.base_url, "https://api.themoviedb.org/3");
        assert_eq!(config.images.base_url, "https://image.tmdb.org/t/p");
        assert_eq!(config.images.profile_placeholder, "/placeholder-person.jpg");
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.browse.debounce(), Duration::from_millis(800));
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.tmdb.timeout_secs = 0;
        assert!(config.validate().is_err());
        config.tmdb.timeout_secs = 30;

        config.tmdb.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
        config.tmdb.base_url = default_api_base_url();

        config.browse.debounce_ms = 60_000;
        assert!(config.validate().is_err());
    }
}
