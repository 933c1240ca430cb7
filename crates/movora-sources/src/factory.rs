//! Build the configured provider from config and stored credentials.

use anyhow::Result;
use movora_config::{Config, CredentialStore};
use std::sync::Arc;
use tracing::debug;

use crate::tmdb::TmdbClient;
use crate::traits::MovieProvider;

/// Create the movie provider described by `config`.
///
/// Fails before any network traffic when the configuration is invalid or no
/// API key is available.
pub fn create_provider(config: &Config, credentials: &CredentialStore) -> Result<Arc<dyn MovieProvider>> {
    config.validate()?;
    let api_key = credentials.require_api_key()?;

    debug!(base_url = %config.tmdb.base_url, language = ?config.tmdb.language, "Creating TMDB provider");

    Ok(Arc::new(TmdbClient::from_config(&config.tmdb, api_key)))
}
