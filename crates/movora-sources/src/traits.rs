use async_trait::async_trait;
use movora_models::{Category, Credits, MovieDetail, MovieId, MoviePage, QueryIntent, TrendingWindow};

use crate::error::TransportError;

/// Typed facade over the movie metadata provider.
///
/// One method per logical query. Implementations issue exactly one request per
/// call: no retries, no caching.
#[async_trait]
pub trait MovieProvider: Send + Sync {
    fn provider_name(&self) -> &str;

    // Lists
    async fn search(&self, query: &str, page: u32) -> Result<MoviePage, TransportError>;
    async fn trending(&self, window: TrendingWindow) -> Result<MoviePage, TransportError>;
    async fn popular(&self, page: u32) -> Result<MoviePage, TransportError>;
    async fn top_rated(&self, page: u32) -> Result<MoviePage, TransportError>;
    async fn upcoming(&self, page: u32) -> Result<MoviePage, TransportError>;

    // Single movie
    async fn details(&self, id: MovieId) -> Result<MovieDetail, TransportError>;
    async fn credits(&self, id: MovieId) -> Result<Credits, TransportError>;

    /// First page of whichever list endpoint serves `intent`
    async fn fetch_list(&self, intent: &QueryIntent) -> Result<MoviePage, TransportError> {
        match intent {
            QueryIntent::Search { text } => self.search(text, 1).await,
            QueryIntent::Category { category, window } => match category {
                Category::Trending => self.trending(window.unwrap_or_default()).await,
                Category::Popular => self.popular(1).await,
                Category::TopRated => self.top_rated(1).await,
                Category::Upcoming => self.upcoming(1).await,
            },
        }
    }
}
