//! Decides which list request is authoritative and keeps exactly one current.
//!
//! The orchestrator runs as an actor: one task owns the intent, the request
//! sequence counter and the debounce timer. Handles send commands to it and
//! read snapshots from a `watch` channel. Network calls run in their own
//! tasks and report back through a completion channel; a completion is only
//! applied if its sequence number is still the latest one issued, so the
//! visible list always belongs to the last dispatched request rather than the
//! last one to arrive.

use movora_config::BrowseConfig;
use movora_models::{Category, Movie, MoviePage, QueryIntent, TrendingWindow};
use movora_sources::{MovieProvider, TransportError};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::debounce::Debouncer;
use crate::error::LIST_ERROR_MESSAGE;


/// Snapshot of the list state exposed to presentation code
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ListView {
    /// Results of the latest completed current request, provider order
    pub movies: Vec<Movie>,
    pub loading: bool,
    pub error: Option<String>,
    /// Intent of the latest dispatched request
    pub intent: QueryIntent,
    /// Raw search input, including text still waiting out the debounce window
    pub search_text: String,
    /// Retained category selection, kept while a search is active
    pub category: Category,
    pub trending_window: TrendingWindow,
    /// Sequence number of the latest dispatched request (0 before the first)
    pub sequence: u64,
}

impl ListView {
    fn initial(options: &OrchestratorOptions) -> Self {
        Self {
            movies: Vec::new(),
            loading: false,
            error: None,
            intent: QueryIntent::category(options.category, options.window),
            search_text: options.search_text.clone(),
            category: options.category,
            trending_window: options.window,
            sequence: 0,
        }
    }

    /// Whether a "load more" affordance would be offered. Paging itself is not implemented.
    pub fn can_load_more(&self) -> bool {
        !self.movies.is_empty() && !self.loading && !self.intent.is_search()
    }
}

#[derive(Debug, Clone)]
pub struct OrchestratorOptions {
    pub debounce: Duration,
    pub category: Category,
    pub window: TrendingWindow,
    /// Search text to start with; dispatched immediately, without debounce
    pub search_text: String,
}

impl Default for OrchestratorOptions {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(800),
            category: Category::Trending,
            window: TrendingWindow::Day,
            search_text: String::new(),
        }
    }
}

impl From<&BrowseConfig> for OrchestratorOptions {
    fn from(config: &BrowseConfig) -> Self {
        Self {
            debounce: config.debounce(),
            category: config.default_category,
            window: config.default_window,
            search_text: String::new(),
        }
    }
}

#[derive(Debug)]
enum Command {
    SetSearchText(String),
    SetCategory(Category),
    SetTrendingWindow(TrendingWindow),
    Refetch,
    DismissError,
}

struct ListCompletion {
    sequence: u64,
    intent: QueryIntent,
    result: Result<MoviePage, TransportError>,
}

/// Handle to a running orchestrator.
///
/// Cloning is cheap; all clones talk to the same actor, which stops once the
/// last handle is dropped.
#[derive(Clone)]
pub struct QueryOrchestrator {
    commands: mpsc::UnboundedSender<Command>,
    view: watch::Receiver<ListView>,
}

impl QueryOrchestrator {
    /// Start the actor and dispatch the initial intent.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(provider: Arc<dyn MovieProvider>, options: OrchestratorOptions) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        let (view_tx, view_rx) = watch::channel(ListView::initial(&options));

        let actor = OrchestratorActor {
            provider,
            search_text: options.search_text.clone(),
            committed_search: options.search_text.trim().to_string(),
            category: options.category,
            window: options.window,
            last_dispatched: None,
            sequence: 0,
            debouncer: Debouncer::new(options.debounce),
            completions: completion_tx,
            view: view_tx,
        };
        tokio::spawn(actor.run(command_rx, completion_rx));

        Self {
            commands: command_tx,
            view: view_rx,
        }
    }

    /// Update the free-text query.
    ///
    /// Non-blank text is dispatched once input has been quiet for the debounce
    /// window. Blank text cancels any pending search and switches back to the
    /// retained category immediately.
    pub fn set_search_text(&self, text: impl Into<String>) {
        self.send(Command::SetSearchText(text.into()));
    }

    /// Select a category. Clears the search text and any pending search.
    pub fn set_category(&self, category: Category) {
        self.send(Command::SetCategory(category));
    }

    /// Change the trending window. Only dispatches while trending is the active list.
    pub fn set_trending_window(&self, window: TrendingWindow) {
        self.send(Command::SetTrendingWindow(window));
    }

    /// Re-issue the current intent even if it is already displayed
    pub fn refetch(&self) {
        self.send(Command::Refetch);
    }

    /// Hide the error banner, keeping the list as is
    pub fn dismiss_error(&self) {
        self.send(Command::DismissError);
    }

    pub fn snapshot(&self) -> ListView {
        self.view.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ListView> {
        self.view.clone()
    }

    /// Intent implied by the current inputs: non-blank search text, else the category.
    ///
    /// Reflects operations the actor has already processed. Text still inside
    /// the debounce window counts, even though it has not been dispatched yet.
    pub fn effective_intent(&self) -> QueryIntent {
        let view = self.view.borrow();
        QueryIntent::effective(&view.search_text, view.category, view.trending_window)
    }

    /// Wait until at least one request was dispatched and none is loading
    pub async fn settled(&self) -> ListView {
        let mut view = self.view.clone();
        let settled = view
            .wait_for(|v| v.sequence > 0 && !v.loading)
            .await
            .map(|v| v.clone());
        match settled {
            Ok(v) => v,
            Err(_) => view.borrow().clone(),
        }
    }

    fn send(&self, command: Command) {
        if self.commands.send(command).is_err() {
            warn!("Query orchestrator is no longer running; command dropped");
        }
    }
}

struct OrchestratorActor {
    provider: Arc<dyn MovieProvider>,
    /// Latest raw input
    search_text: String,
    /// Input that survived the debounce window (or was cleared)
    committed_search: String,
    category: Category,
    window: TrendingWindow,
    last_dispatched: Option<QueryIntent>,
    sequence: u64,
    debouncer: Debouncer<String>,
    completions: mpsc::UnboundedSender<ListCompletion>,
    view: watch::Sender<ListView>,
}

impl OrchestratorActor {
    async fn run(
        mut self,
        mut commands: mpsc::UnboundedReceiver<Command>,
        mut completions: mpsc::UnboundedReceiver<ListCompletion>,
    ) {
        self.dispatch(self.effective_intent());

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => self.handle(command),
                    None => break,
                },
                Some(completion) = completions.recv() => self.complete(completion),
                text = self.debouncer.expired() => self.commit_search(text),
            }
        }

        debug!("Query orchestrator stopped");
    }

    fn effective_intent(&self) -> QueryIntent {
        QueryIntent::effective(&self.committed_search, self.category, self.window)
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::SetSearchText(text) => {
                self.search_text = text;
                if self.search_text.trim().is_empty() {
                    self.debouncer.cancel();
                    self.committed_search.clear();
                    self.dispatch_if_changed();
                } else {
                    self.debouncer.arm(self.search_text.clone());
                    self.publish_inputs();
                }
            }
            Command::SetCategory(category) => {
                if let Some(pending) = self.debouncer.cancel() {
                    debug!(text = %pending, "Category selected; pending search cancelled");
                }
                self.search_text.clear();
                self.committed_search.clear();
                self.category = category;
                self.dispatch_if_changed();
            }
            Command::SetTrendingWindow(window) => {
                self.window = window;
                self.dispatch_if_changed();
            }
            Command::Refetch => self.dispatch(self.effective_intent()),
            Command::DismissError => self.view.send_modify(|view| view.error = None),
        }
    }

    fn commit_search(&mut self, text: String) {
        self.committed_search = text.trim().to_string();
        self.dispatch_if_changed();
    }

    fn dispatch_if_changed(&mut self) {
        let intent = self.effective_intent();
        if self.last_dispatched.as_ref() == Some(&intent) {
            debug!(?intent, "Intent unchanged; not dispatching");
            self.publish_inputs();
        } else {
            self.dispatch(intent);
        }
    }

    fn dispatch(&mut self, intent: QueryIntent) {
        self.sequence += 1;
        let sequence = self.sequence;
        self.last_dispatched = Some(intent.clone());

        debug!(sequence, ?intent, "Dispatching list request");

        // Keep showing the previous movies until the new ones arrive
        let (search_text, category, window) = (self.search_text.clone(), self.category, self.window);
        let view_intent = intent.clone();
        self.view.send_modify(move |view| {
            view.loading = true;
            view.error = None;
            view.intent = view_intent;
            view.sequence = sequence;
            view.search_text = search_text;
            view.category = category;
            view.trending_window = window;
        });

        let provider = Arc::clone(&self.provider);
        let completions = self.completions.clone();
        tokio::spawn(async move {
            let result = provider.fetch_list(&intent).await;
            let _ = completions.send(ListCompletion { sequence, intent, result });
        });
    }

    fn complete(&mut self, completion: ListCompletion) {
        let ListCompletion { sequence, intent, result } = completion;

        if sequence != self.sequence {
            debug!(sequence, latest = self.sequence, ?intent, "Discarding stale list result");
            return;
        }

        match result {
            Ok(page) => {
                info!(sequence, ?intent, count = page.results.len(), "List updated");
                self.view.send_modify(|view| {
                    view.movies = page.results;
                    view.loading = false;
                });
            }
            Err(err) => {
                warn!(sequence, ?intent, endpoint = err.endpoint(), error = %err, "List request failed");
                self.view.send_modify(|view| {
                    view.error = Some(LIST_ERROR_MESSAGE.to_string());
                    view.loading = false;
                });
            }
        }
    }

    fn publish_inputs(&self) {
        let (search_text, category, window) = (self.search_text.clone(), self.category, self.window);
        self.view.send_modify(move |view| {
            view.search_text = search_text;
            view.category = category;
            view.trending_window = window;
        });
    }
}
