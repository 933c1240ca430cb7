pub mod error;
pub mod factory;
pub mod tmdb;
pub mod traits;

pub use error::TransportError;
pub use factory::create_provider;
pub use tmdb::TmdbClient;
pub use traits::MovieProvider;
