pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{BrowseConfig, Config, ImageConfig, TmdbConfig};
pub use credentials::{mask_secret, CredentialStore, API_KEY_ENV};
pub use paths::{PathManager, CONFIG_DIR_ENV};
