use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Env vars overriding the config file. The catalog key is public
/// client-side configuration in the source application, so environment
/// injection (not a secret store) is the expected channel.
pub const ENV_TMDB_API_KEY: &str = "CINECIRCLE_TMDB_API_KEY";
pub const ENV_TMDB_ACCESS_TOKEN: &str = "CINECIRCLE_TMDB_ACCESS_TOKEN";

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct TmdbConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub access_token: String,
    /// Override the API base URL (tests, proxies).
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub image_base_url: Option<String>,
    /// Catalog response language; the application default is es-ES.
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct StoreConfig {
    /// Override the document-store directory (defaults to the data dir).
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content)?
        } else {
            Config::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var(ENV_TMDB_API_KEY) {
            if !key.is_empty() {
                self.tmdb.api_key = key;
            }
        }
        if let Ok(token) = std::env::var(ENV_TMDB_ACCESS_TOKEN) {
            if !token.is_empty() {
                self.tmdb.access_token = token;
            }
        }
    }

    pub fn has_catalog_credentials(&self) -> bool {
        !self.tmdb.api_key.is_empty() || !self.tmdb.access_token.is_empty()
    }
}
