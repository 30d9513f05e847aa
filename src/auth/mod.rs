//! Authentication module for Microsoft Graph
//!
//! Implements the OAuth2 device code flow against Azure AD and keeps the
//! resulting Graph token and refresh token in the config file.

pub mod oauth;
pub mod tokens;

pub use oauth::{login, logout, status};
pub use tokens::{StoredToken, TokenStore};

use crate::config::Config;

/// Teams desktop public client, which is pre-consented for Graph in most tenants.
const DEFAULT_CLIENT_ID: &str = "1fec8e78-bce4-4aaf-ab1b-5451cc387264";
const DEFAULT_TENANT: &str = "organizations";
const GRAPH_SCOPE: &str = "https://graph.microsoft.com/.default";
const OFFLINE_SCOPE: &str = "offline_access";

/// Azure AD client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// OAuth2 client ID (public client)
    pub client_id: String,
    /// Azure AD tenant id or alias
    pub tenant: String,
    /// Scopes requested for every grant
    pub scopes: Vec<String>,
}

impl AuthConfig {
    /// Client id and tenant from config, falling back to the defaults.
    pub fn from_config(config: &Config) -> Self {
        Self {
            client_id: config
                .client_id
                .clone()
                .unwrap_or_else(|| DEFAULT_CLIENT_ID.to_string()),
            tenant: config
                .tenant
                .clone()
                .unwrap_or_else(|| DEFAULT_TENANT.to_string()),
            scopes: vec![GRAPH_SCOPE.to_string(), OFFLINE_SCOPE.to_string()],
        }
    }

    fn endpoint(&self, leaf: &str) -> String {
        format!(
            "https://login.microsoftonline.com/{}/oauth2/v2.0/{}",
            self.tenant, leaf
        )
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
