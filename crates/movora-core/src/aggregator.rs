use movora_models::{AggregateDetail, Movie, MovieId};
use movora_sources::MovieProvider;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::error::{DetailError, DETAIL_UNAVAILABLE_MESSAGE};

/// Fetch detail and credits for one movie concurrently and join them.
///
/// Both requests are in flight at the same time; the aggregate is returned
/// only when both succeed. The first failure is returned as
/// [`DetailError::Unavailable`].
pub async fn fetch_aggregate(
    provider: &dyn MovieProvider,
    id: MovieId,
) -> Result<AggregateDetail, DetailError> {
    let (detail, credits) = futures::try_join!(provider.details(id), provider.credits(id))?;
    Ok(AggregateDetail::new(detail, credits))
}

/// Snapshot of the detail panel
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct DetailView {
    /// Summary of the selected movie, shown even while the detail loads or after it fails
    pub movie: Option<Movie>,
    /// Present only once both halves arrived for the selected movie
    pub detail: Option<AggregateDetail>,
    pub loading: bool,
    pub error: Option<String>,
}

impl DetailView {
    pub fn selected_id(&self) -> Option<MovieId> {
        self.movie.as_ref().map(|m| m.id)
    }

    pub fn is_open(&self) -> bool {
        self.movie.is_some()
    }
}

struct DetailCompletion {
    id: MovieId,
    result: Result<AggregateDetail, DetailError>,
}

/// Handle to the detail actor.
///
/// At most one movie is selected at a time. Results that arrive for a movie
/// that is no longer selected are dropped.
#[derive(Clone)]
pub struct DetailAggregator {
    commands: mpsc::UnboundedSender<Option<Movie>>,
    view: watch::Receiver<DetailView>,
}

impl DetailAggregator {
    pub fn spawn(provider: Arc<dyn MovieProvider>) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        let (view_tx, view_rx) = watch::channel(DetailView::default());

        let actor = AggregatorActor {
            provider,
            completions: completion_tx,
            view: view_tx,
        };
        tokio::spawn(actor.run(command_rx, completion_rx));

        Self {
            commands: command_tx,
            view: view_rx,
        }
    }

    /// Open the detail view for `movie`, or close it with `None`
    pub fn select(&self, movie: Option<Movie>) {
        if self.commands.send(movie).is_err() {
            warn!("Detail aggregator is no longer running; selection dropped");
        }
    }

    pub fn close(&self) {
        self.select(None);
    }

    pub fn snapshot(&self) -> DetailView {
        self.view.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DetailView> {
        self.view.clone()
    }
}

struct AggregatorActor {
    provider: Arc<dyn MovieProvider>,
    completions: mpsc::UnboundedSender<DetailCompletion>,
    view: watch::Sender<DetailView>,
}

impl AggregatorActor {
    async fn run(
        self,
        mut commands: mpsc::UnboundedReceiver<Option<Movie>>,
        mut completions: mpsc::UnboundedReceiver<DetailCompletion>,
    ) {
        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(selection) => self.select(selection),
                    None => break,
                },
                Some(completion) = completions.recv() => self.complete(completion),
            }
        }

        debug!("Detail aggregator stopped");
    }

    fn select(&self, selection: Option<Movie>) {
        let Some(movie) = selection else {
            debug!("Detail view closed");
            self.view.send_replace(DetailView::default());
            return;
        };

        let id = movie.id;
        debug!(id, title = %movie.title, "Fetching movie details");

        // No stale-while-revalidate here: the previous movie's cast must not linger
        self.view.send_replace(DetailView {
            movie: Some(movie),
            detail: None,
            loading: true,
            error: None,
        });

        let provider = Arc::clone(&self.provider);
        let completions = self.completions.clone();
        tokio::spawn(async move {
            let result = fetch_aggregate(provider.as_ref(), id).await;
            let _ = completions.send(DetailCompletion { id, result });
        });
    }

    fn complete(&self, completion: DetailCompletion) {
        let DetailCompletion { id, result } = completion;

        let selected = self.view.borrow().selected_id();
        if selected != Some(id) {
            debug!(id, ?selected, "Discarding detail for a movie that is no longer selected");
            return;
        }

        match result {
            Ok(aggregate) => {
                info!(id, cast = aggregate.cast.len(), "Movie details loaded");
                self.view.send_modify(|view| {
                    view.detail = Some(aggregate);
                    view.loading = false;
                });
            }
            Err(err) => {
                warn!(id, error = %err, "Movie details unavailable");
                self.view.send_modify(|view| {
                    view.error = Some(DETAIL_UNAVAILABLE_MESSAGE.to_string());
                    view.loading = false;
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{movie, Call, ScriptedProvider};
    use std::time::Duration;
    use tokio::time::{sleep_until, Instant};

    async fn at(origin: Instant, ms: u64) {
        sleep_until(origin + Duration::from_millis(ms)).await;
    }

    fn cast_names(view: &DetailView) -> Vec<String> {
        view.detail
            .iter()
            .flat_map(|d| d.cast.iter().map(|c| c.name.clone()))
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_aggregate_joins_both_halves() {
        let provider = ScriptedProvider::new();
        let aggregate = fetch_aggregate(&provider, 42).await.unwrap();

        assert_eq!(aggregate.movie_id, 42);
        assert_eq!(aggregate.detail.movie.title, "Movie 42");
        assert_eq!(aggregate.cast.len(), 1);
        assert_eq!(aggregate.cast[0].name, "Actor of 42");
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_aggregate_fails_if_either_half_fails() {
        let provider = ScriptedProvider::new();
        provider.fail("credits:42");

        let err = fetch_aggregate(&provider, 42).await.unwrap_err();
        assert!(matches!(err, DetailError::Unavailable(_)));
        assert!(err.to_string().contains("credits:42"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_requests_run_in_parallel() {
        let provider = Arc::new(ScriptedProvider::new());
        provider.delay("details:10", 300).delay("credits:10", 500);
        let origin = Instant::now();
        let aggregator = DetailAggregator::spawn(provider.clone());

        aggregator.select(Some(movie(10, "Heat")));

        at(origin, 499).await;
        let view = aggregator.snapshot();
        assert!(view.loading);
        assert_eq!(view.detail, None);
        assert_eq!(view.movie.as_ref().map(|m| m.title.as_str()), Some("Heat"));

        // The slower half lands at 500; run one step past it so the join publishes
        at(origin, 501).await;
        let view = aggregator.snapshot();
        assert!(!view.loading);
        assert_eq!(view.detail.as_ref().map(|d| d.movie_id), Some(10));
        assert_eq!(cast_names(&view), vec!["Actor of 10"]);

        assert_eq!(
            provider.calls(),
            vec![
                Call { label: "details:10".to_string(), at: Duration::ZERO },
                Call { label: "credits:10".to_string(), at: Duration::ZERO },
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_keeps_summary() {
        let provider = Arc::new(ScriptedProvider::new());
        provider.fail("details:7");
        let origin = Instant::now();
        let aggregator = DetailAggregator::spawn(provider.clone());

        aggregator.select(Some(movie(7, "Alien")));
        at(origin, 10).await;

        let view = aggregator.snapshot();
        assert!(!view.loading);
        assert_eq!(view.detail, None);
        assert_eq!(view.error.as_deref(), Some(DETAIL_UNAVAILABLE_MESSAGE));
        assert_eq!(view.selected_id(), Some(7));
        assert!(view.is_open());
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_pair_for_previous_movie_is_dropped() {
        let provider = Arc::new(ScriptedProvider::new());
        provider.delay("details:10", 500).delay("credits:10", 500);
        let origin = Instant::now();
        let aggregator = DetailAggregator::spawn(provider.clone());

        aggregator.select(Some(movie(10, "Ten")));
        at(origin, 100).await;
        aggregator.select(Some(movie(20, "Twenty")));

        at(origin, 200).await;
        assert_eq!(cast_names(&aggregator.snapshot()), vec!["Actor of 20"]);

        at(origin, 1000).await;
        let view = aggregator.snapshot();
        assert_eq!(view.selected_id(), Some(20));
        assert_eq!(view.detail.as_ref().map(|d| d.movie_id), Some(20));
        assert_eq!(cast_names(&view), vec!["Actor of 20"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_previous_movie_never_shown_while_next_loads() {
        let provider = Arc::new(ScriptedProvider::new());
        provider
            .delay("details:10", 100)
            .delay("credits:10", 100)
            .delay("details:20", 600)
            .delay("credits:20", 600);
        let origin = Instant::now();
        let aggregator = DetailAggregator::spawn(provider.clone());

        aggregator.select(Some(movie(10, "Ten")));
        at(origin, 50).await;
        aggregator.select(Some(movie(20, "Twenty")));

        // Movie 10's pair landed at 100 while 20 is selected
        at(origin, 300).await;
        let view = aggregator.snapshot();
        assert!(view.loading);
        assert_eq!(view.detail, None);
        assert_eq!(view.selected_id(), Some(20));

        at(origin, 1000).await;
        assert_eq!(cast_names(&aggregator.snapshot()), vec!["Actor of 20"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_switching_movies_clears_previous_detail() {
        let provider = Arc::new(ScriptedProvider::new());
        provider.delay("details:2", 300);
        let origin = Instant::now();
        let aggregator = DetailAggregator::spawn(provider.clone());

        aggregator.select(Some(movie(1, "One")));
        at(origin, 10).await;
        assert!(aggregator.snapshot().detail.is_some());

        aggregator.select(Some(movie(2, "Two")));
        at(origin, 20).await;
        let view = aggregator.snapshot();
        assert_eq!(view.detail, None);
        assert!(view.loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_discards_in_flight_pair() {
        let provider = Arc::new(ScriptedProvider::new());
        provider.delay("details:10", 500).delay("credits:10", 500);
        let origin = Instant::now();
        let aggregator = DetailAggregator::spawn(provider.clone());

        aggregator.select(Some(movie(10, "Ten")));
        at(origin, 100).await;
        aggregator.close();

        at(origin, 1000).await;
        assert_eq!(aggregator.snapshot(), DetailView::default());
    }
}
