pub mod browse;
pub mod config;
pub mod list;
pub mod progress;
pub mod show;

use color_eyre::Result;
use movora_config::{Config, CredentialStore, PathManager};
use movora_core::ImageResolver;
use movora_sources::{create_provider, MovieProvider};
use std::sync::Arc;

/// Everything a data command needs: validated config, a provider and an image resolver
pub struct AppContext {
    pub config: Config,
    pub provider: Arc<dyn MovieProvider>,
    pub images: ImageResolver,
}

impl AppContext {
    pub fn load() -> Result<Self> {
        let path_manager = PathManager::default();
        let config_file = path_manager.config_file();

        let config = Config::load_or_default(&config_file)
            .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))?;

        let mut credentials = CredentialStore::new(path_manager.credentials_file());
        credentials
            .load()
            .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials: {}", e))?;

        let provider = create_provider(&config, &credentials).map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
        let images = ImageResolver::from_config(&config.images);

        tracing::debug!(
            config = %config_file.display(),
            provider = provider.provider_name(),
            "Loaded application context"
        );

        Ok(Self {
            config,
            provider,
            images,
        })
    }
}
