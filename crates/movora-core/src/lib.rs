pub mod aggregator;
pub mod debounce;
pub mod display;
pub mod error;
pub mod image;
pub mod orchestrator;

#[cfg(test)]
mod test_support;

pub use aggregator::{fetch_aggregate, DetailAggregator, DetailView};
pub use debounce::Debouncer;
pub use display::{list_title, rating_tier, RatingTier};
pub use error::{DetailError, DETAIL_UNAVAILABLE_MESSAGE, LIST_ERROR_MESSAGE};
pub use image::ImageResolver;
pub use orchestrator::{ListView, OrchestratorOptions, QueryOrchestrator};
