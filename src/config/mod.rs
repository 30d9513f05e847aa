//! Configuration and credential storage

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::auth::{StoredToken, TokenStore};

/// Access token override, e.g. for CI. Treated as non-expiring.
pub const ENV_ACCESS_TOKEN: &str = "GRAPH_TEAMS_ACCESS_TOKEN";
/// Graph endpoint override, e.g. `https://graph.microsoft.com/beta`.
pub const ENV_BASE_URL: &str = "GRAPH_TEAMS_BASE_URL";

/// Application configuration
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Graph endpoint, defaults to https://graph.microsoft.com/v1.0
    pub graph_base_url: Option<String>,
    /// Azure AD tenant used for login (defaults to "organizations")
    pub tenant: Option<String>,
    /// OAuth2 public client id used for login
    pub client_id: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: Option<u64>,
    /// Stored AAD refresh token
    pub refresh_token: Option<String>,
    /// Stored Graph access token (audience: graph.microsoft.com)
    pub access_token: Option<StoredToken>,
}

impl Config {
    /// Get config directory path
    fn config_dir() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "graph-teams", "graph-teams")
            .context("Could not determine config directory")?;
        Ok(proj_dirs.config_dir().to_path_buf())
    }

    /// Get config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).context("Failed to read config file")?;
        toml::from_str(&content).context("Failed to parse config file")
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content).context("Failed to write config file")?;

        // Set restrictive permissions on config file (contains tokens)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(0o600);
            fs::set_permissions(path, perms).context("Failed to set config permissions")?;
        }

        Ok(())
    }

    /// Copy of this config with `GRAPH_TEAMS_*` environment overrides applied.
    /// Save the config as loaded, never the copy.
    pub fn with_env(&self) -> Self {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    fn with_env_from<F>(&self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = self.clone();
        if let Some(token) = lookup(ENV_ACCESS_TOKEN).filter(|t| !t.trim().is_empty()) {
            tracing::debug!("Using access token from {}", ENV_ACCESS_TOKEN);
            config.access_token = Some(StoredToken::new(token, None));
        }
        if let Some(base_url) = lookup(ENV_BASE_URL).filter(|u| !u.trim().is_empty()) {
            config.graph_base_url = Some(base_url);
        }
        config
    }
}

impl TokenStore for Config {
    fn get_access_token(&self) -> Option<StoredToken> {
        self.access_token.clone()
    }

    fn set_access_token(&mut self, token: String, expires_in: Option<u64>) {
        self.access_token = Some(StoredToken::new(token, expires_in));
    }

    fn get_refresh_token(&self) -> Option<String> {
        self.refresh_token.clone()
    }

    fn set_refresh_token(&mut self, token: String) {
        self.refresh_token = Some(token);
    }

    fn clear_tokens(&mut self) {
        self.access_token = None;
        self.refresh_token = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config {
            tenant: Some("contoso.onmicrosoft.com".to_string()),
            timeout_secs: Some(30),
            ..Config::default()
        };
        config.set_access_token("tok".to_string(), Some(3600));
        config.set_refresh_token("rt".to_string());
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    fn test_clear_tokens_keeps_settings() {
        let mut config = Config {
            graph_base_url: Some("https://graph.microsoft.com/beta".to_string()),
            ..Config::default()
        };
        config.set_access_token("tok".to_string(), None);
        config.set_refresh_token("rt".to_string());
        config.clear_tokens();

        assert!(config.get_access_token().is_none());
        assert!(config.get_refresh_token().is_none());
        assert!(config.graph_base_url.is_some());
    }

    #[test]
    fn test_env_overrides() {
        let config = Config::default().with_env_from(|key| match key {
            ENV_ACCESS_TOKEN => Some("env-token".to_string()),
            ENV_BASE_URL => Some("http://localhost:8080/v1.0".to_string()),
            _ => None,
        });

        let token = config.get_access_token().unwrap();
        assert_eq!(token.token, "env-token");
        assert!(!token.is_expired());
        assert_eq!(
            config.graph_base_url.as_deref(),
            Some("http://localhost:8080/v1.0")
        );
    }

    #[test]
    fn test_blank_env_values_are_ignored() {
        let config = Config::default().with_env_from(|_| Some("  ".to_string()));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_env_overrides_are_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut stored = Config {
            tenant: Some("contoso.onmicrosoft.com".to_string()),
            ..Config::default()
        };
        stored.set_refresh_token("rt".to_string());
        stored.save_to(&path).unwrap();

        let mut stored = Config::load_from(&path).unwrap();
        let effective = stored.with_env_from(|key| match key {
            ENV_ACCESS_TOKEN => Some("env-token".to_string()),
            ENV_BASE_URL => Some("http://localhost:8080/v1.0".to_string()),
            _ => None,
        });
        assert_eq!(
            effective.graph_base_url.as_deref(),
            Some("http://localhost:8080/v1.0")
        );
        assert!(stored.graph_base_url.is_none());

        // A refresh updates the stored copy only.
        stored.set_access_token("refreshed".to_string(), Some(3600));
        stored.save_to(&path).unwrap();

        let saved = Config::load_from(&path).unwrap();
        assert!(saved.graph_base_url.is_none());
        assert_eq!(saved.get_access_token().unwrap().token, "refreshed");
        assert_eq!(saved.get_refresh_token().as_deref(), Some("rt"));
        assert_eq!(saved.tenant.as_deref(), Some("contoso.onmicrosoft.com"));
    }
}
