//! OAuth2 device code flow and refresh-token grant for Azure AD

use anyhow::{Context, Result};
use oauth2::{
    basic::BasicClient, AuthUrl, ClientId, DeviceAuthorizationUrl, RefreshToken, Scope,
    StandardDeviceAuthorizationResponse, TokenResponse, TokenUrl,
};

use super::{AuthConfig, TokenStore};
use crate::config::Config;

/// Build the OAuth2 client from an AuthConfig
fn build_client(auth_config: &AuthConfig) -> Result<BasicClient> {
    let auth_url = AuthUrl::new(auth_config.endpoint("authorize"))?;
    let token_url = TokenUrl::new(auth_config.endpoint("token"))?;
    let device_url = DeviceAuthorizationUrl::new(auth_config.endpoint("devicecode"))?;

    Ok(BasicClient::new(
        ClientId::new(auth_config.client_id.clone()),
        None,
        auth_url,
        Some(token_url),
    )
    .set_device_authorization_url(device_url))
}

fn scopes(auth_config: &AuthConfig) -> Vec<Scope> {
    auth_config.scopes.iter().cloned().map(Scope::new).collect()
}

/// Exchange the stored refresh token for a fresh Graph token.
///
/// Updates `config` in place; the caller saves it. Returns Ok(false) when
/// there is no refresh token to use.
pub async fn refresh(config: &mut Config) -> Result<bool> {
    let refresh_token_str = match config.get_refresh_token() {
        Some(rt) => rt,
        None => return Ok(false),
    };

    let auth_config = AuthConfig::from_config(config);
    let client = build_client(&auth_config)?;

    tracing::info!("Refreshing Graph token...");

    let token_response = client
        .exchange_refresh_token(&RefreshToken::new(refresh_token_str))
        .add_scopes(scopes(&auth_config))
        .request_async(oauth2::reqwest::async_http_client)
        .await
        .context("Failed to refresh Graph token")?;

    config.set_access_token(
        token_response.access_token().secret().to_string(),
        token_response.expires_in().map(|d| d.as_secs()),
    );

    if let Some(new_rt) = token_response.refresh_token() {
        config.set_refresh_token(new_rt.secret().to_string());
    }

    tracing::info!("Token refresh complete");
    Ok(true)
}

/// Perform OAuth2 login flow
pub async fn login(force: bool) -> Result<()> {
    let mut config = Config::load()?;

    // Check for existing valid token
    if !force {
        if let Some(token) = config.get_access_token() {
            if !token.is_expired() {
                println!("Already logged in (Graph token valid). Use --force to re-authenticate.");
                return Ok(());
            }
        }
        // Try refresh before falling through to device code
        if config.get_refresh_token().is_some() {
            tracing::info!("Graph token expired, attempting refresh...");
            match refresh(&mut config).await {
                Ok(true) => {
                    config.save()?;
                    println!("Token refreshed successfully.");
                    return Ok(());
                }
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!("Refresh failed, falling back to device code: {:#}", e);
                }
            }
        }
    }

    let auth_config = AuthConfig::from_config(&config);
    let client = build_client(&auth_config)?;

    // Use device code flow for CLI
    tracing::info!("Initiating device code flow...");

    let device_auth_response: StandardDeviceAuthorizationResponse = client
        .exchange_device_code()?
        .add_scopes(scopes(&auth_config))
        .request_async(oauth2::reqwest::async_http_client)
        .await
        .context("Failed to request device code")?;

    let verification_url = device_auth_response.verification_uri().as_str();
    let user_code = device_auth_response.user_code().secret();

    println!();
    println!("To sign in, visit: {}", verification_url);
    println!("Enter code:        {}", user_code);
    println!();

    // Poll for token
    tracing::info!("Waiting for authentication...");

    let token_response = client
        .exchange_device_access_token(&device_auth_response)
        .request_async(oauth2::reqwest::async_http_client, tokio::time::sleep, None)
        .await
        .context("Failed to exchange device code for token")?;

    config.set_access_token(
        token_response.access_token().secret().to_string(),
        token_response.expires_in().map(|d| d.as_secs()),
    );
    if let Some(refresh_token) = token_response.refresh_token() {
        config.set_refresh_token(refresh_token.secret().to_string());
    }

    config.save()?;
    println!("Login successful.");
    Ok(())
}

/// Clear stored credentials
pub async fn logout() -> Result<()> {
    let mut config = Config::load()?;
    config.clear_tokens();
    config.save()?;
    println!("Logged out.");
    Ok(())
}

/// Display current auth status
pub async fn status() -> Result<()> {
    let config = Config::load()?.with_env();

    match config.get_access_token() {
        Some(token) if !token.is_expired() => {
            println!("Graph token: valid");
            if let Some(exp) = token.expires_at {
                println!("  expires_at: {}", exp);
            }
        }
        Some(_) => {
            println!("Graph token: expired");
        }
        None => {
            println!("Graph token: none");
        }
    }

    match config.get_refresh_token() {
        Some(_) => println!("Refresh tok: present"),
        None => println!("Refresh tok: none"),
    }

    let auth_config = AuthConfig::from_config(&config);
    println!("Tenant:      {}", auth_config.tenant);
    println!("Client id:   {}", auth_config.client_id);
    println!(
        "Endpoint:    {}",
        config
            .graph_base_url
            .as_deref()
            .unwrap_or(crate::api::client::GRAPH_BASE)
    );

    if config.get_access_token().is_none() {
        println!("\nRun 'graph-teams login' to authenticate.");
    }

    Ok(())
}
