use crate::error::TransportError;
use crate::tmdb::api::Endpoint;
use crate::traits::MovieProvider;
use async_trait::async_trait;
use movora_config::TmdbConfig;
use movora_models::{Credits, MovieDetail, MovieId, MoviePage, TrendingWindow};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Build the shared HTTP client used for every provider request
pub fn create_tmdb_client(timeout: Duration) -> Client {
    Client::builder()
        .user_agent(concat!("movora/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| Client::new())
}

#[derive(Clone)]
pub struct TmdbClient {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
    language: Option<String>,
}

impl TmdbClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Arc::new(create_tmdb_client(Duration::from_secs(30))),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            language: None,
        }
    }

    pub fn from_config(config: &TmdbConfig, api_key: impl Into<String>) -> Self {
        Self {
            client: Arc::new(create_tmdb_client(config.timeout())),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            language: config.language.clone().filter(|l| !l.trim().is_empty()),
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: Endpoint<'_>) -> Result<T, TransportError> {
        let path = endpoint.path();
        let url = format!("{}{}", self.base_url, path);

        let mut query = vec![("api_key", self.api_key.clone())];
        if let Some(language) = &self.language {
            query.push(("language", language.clone()));
        }
        query.extend(endpoint.query());

        debug!(endpoint = %path, "Requesting provider endpoint");

        let response = self
            .client
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|source| TransportError::Network { endpoint: path.clone(), source })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(endpoint = %path, status = status.as_u16(), "Provider returned an error status");
            return Err(TransportError::status(path, status.as_u16(), &body));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| TransportError::Network { endpoint: path.clone(), source })?;

        debug!(endpoint = %path, status = status.as_u16(), bytes = bytes.len(), "Provider request completed");

        serde_json::from_slice(&bytes).map_err(|source| TransportError::Decode { endpoint: path, source })
    }
}

#[async_trait]
impl MovieProvider for TmdbClient {
    fn provider_name(&self) -> &str {
        "tmdb"
    }

    async fn search(&self, query: &str, page: u32) -> Result<MoviePage, TransportError> {
        self.get(Endpoint::Search { query, page }).await
    }

    async fn trending(&self, window: TrendingWindow) -> Result<MoviePage, TransportError> {
        self.get(Endpoint::Trending(window)).await
    }

    async fn popular(&self, page: u32) -> Result<MoviePage, TransportError> {
        self.get(Endpoint::Popular { page }).await
    }

    async fn top_rated(&self, page: u32) -> Result<MoviePage, TransportError> {
        self.get(Endpoint::TopRated { page }).await
    }

    async fn upcoming(&self, page: u32) -> Result<MoviePage, TransportError> {
        self.get(Endpoint::Upcoming { page }).await
    }

    async fn details(&self, id: MovieId) -> Result<MovieDetail, TransportError> {
        self.get(Endpoint::Details(id)).await
    }

    async fn credits(&self, id: MovieId) -> Result<Credits, TransportError> {
        self.get(Endpoint::Credits(id)).await
    }
}
