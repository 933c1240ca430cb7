//! In-memory provider with scripted latency and failures, driven by tokio's paused clock.

use async_trait::async_trait;
use movora_models::{
    CastMember, Credits, Movie, MovieDetail, MovieId, MoviePage, TrendingWindow,
};
use movora_sources::{MovieProvider, TransportError};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::{sleep, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Call {
    pub label: String,
    /// Virtual time since the provider was created
    pub at: Duration,
}

pub(crate) struct ScriptedProvider {
    start: Instant,
    calls: Mutex<Vec<Call>>,
    delays: Mutex<HashMap<String, Duration>>,
    failures: Mutex<HashSet<String>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            calls: Mutex::new(Vec::new()),
            delays: Mutex::new(HashMap::new()),
            failures: Mutex::new(HashSet::new()),
        }
    }

    /// Delay every call with this label by `ms` of virtual time
    pub fn delay(&self, label: &str, ms: u64) -> &Self {
        self.delays.lock().unwrap().insert(label.to_string(), Duration::from_millis(ms));
        self
    }

    pub fn fail(&self, label: &str) -> &Self {
        self.failures.lock().unwrap().insert(label.to_string());
        self
    }

    pub fn recover(&self, label: &str) -> &Self {
        self.failures.lock().unwrap().remove(label);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn labels(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.label).collect()
    }

    pub fn count(&self, label: &str) -> usize {
        self.calls().iter().filter(|c| c.label == label).count()
    }

    async fn respond<T>(&self, label: String, value: T) -> Result<T, TransportError> {
        self.calls.lock().unwrap().push(Call {
            label: label.clone(),
            at: self.start.elapsed(),
        });

        let delay = self.delays.lock().unwrap().get(&label).copied();
        if let Some(delay) = delay {
            sleep(delay).await;
        }

        if self.failures.lock().unwrap().contains(&label) {
            return Err(TransportError::status(label, 503, "scripted failure"));
        }
        Ok(value)
    }
}

/// A one-movie page whose title is the label that produced it
pub(crate) fn page_for(label: &str) -> MoviePage {
    MoviePage {
        page: 1,
        results: vec![movie(label_id(label), label)],
        total_pages: 1,
        total_results: 1,
    }
}

pub(crate) fn movie(id: MovieId, title: &str) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        overview: String::new(),
        poster_path: None,
        release_date: String::new(),
        vote_average: 0.0,
        vote_count: 0,
    }
}

fn label_id(label: &str) -> MovieId {
    label.bytes().map(u64::from).sum()
}

#[async_trait]
impl MovieProvider for ScriptedProvider {
    fn provider_name(&self) -> &str {
        "scripted"
    }

    async fn search(&self, query: &str, _page: u32) -> Result<MoviePage, TransportError> {
        let label = format!("search:{}", query);
        let page = page_for(&label);
        self.respond(label, page).await
    }

    async fn trending(&self, window: TrendingWindow) -> Result<MoviePage, TransportError> {
        let label = format!("trending:{}", window);
        let page = page_for(&label);
        self.respond(label, page).await
    }

    async fn popular(&self, _page: u32) -> Result<MoviePage, TransportError> {
        self.respond("popular".to_string(), page_for("popular")).await
    }

    async fn top_rated(&self, _page: u32) -> Result<MoviePage, TransportError> {
        self.respond("top_rated".to_string(), page_for("top_rated")).await
    }

    async fn upcoming(&self, _page: u32) -> Result<MoviePage, TransportError> {
        self.respond("upcoming".to_string(), page_for("upcoming")).await
    }

    async fn details(&self, id: MovieId) -> Result<MovieDetail, TransportError> {
        let detail = MovieDetail {
            movie: movie(id, &format!("Movie {}", id)),
            tagline: None,
            runtime: 100,
            genres: Vec::new(),
            budget: 0,
            revenue: 0,
            status: "Released".to_string(),
            original_language: "en".to_string(),
        };
        self.respond(format!("details:{}", id), detail).await
    }

    async fn credits(&self, id: MovieId) -> Result<Credits, TransportError> {
        let credits = Credits {
            id,
            cast: vec![CastMember {
                id: id * 100,
                name: format!("Actor of {}", id),
                character: "Lead".to_string(),
                profile_path: None,
            }],
        };
        self.respond(format!("credits:{}", id), credits).await
    }
}
