//! Interactive browsing session.
//!
//! stdin drives the two actors; a separate render task watches their
//! snapshots and prints whenever something the user can see has changed.

use super::AppContext;
use crate::output::Output;
use color_eyre::Result;
use movora_core::{DetailAggregator, DetailView, ImageResolver, ListView, OrchestratorOptions, QueryOrchestrator};
use movora_models::{Category, Movie, TrendingWindow};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing::debug;

const HELP: &str = "\
Type any text to search (dispatched after the debounce window).
  :trending :popular :top-rated :upcoming   switch list
  :day :week                                trending window
  :open <n|id>                              show details for row n or movie id
  :close                                    close the detail view
  :refresh                                  re-run the current list
  :dismiss                                  hide the error banner
  :clear                                    clear the search text
  :help                                     this text
  :quit                                     leave";

#[derive(Debug, Clone, PartialEq)]
enum Input {
    Search(String),
    Category(Category),
    Window(TrendingWindow),
    Open(u64),
    Close,
    Refresh,
    Dismiss,
    Clear,
    Help,
    Quit,
    Unknown(String),
}

fn parse_input(line: &str) -> Input {
    let trimmed = line.trim();
    let Some(command) = trimmed.strip_prefix(':') else {
        return Input::Search(line.trim_end_matches(['\r', '\n']).to_string());
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default().to_lowercase();
    let arg = parts.next();

    match name.as_str() {
        "day" | "today" => Input::Window(TrendingWindow::Day),
        "week" => Input::Window(TrendingWindow::Week),
        "open" | "o" => match arg.and_then(|a| a.parse().ok()) {
            Some(n) => Input::Open(n),
            None => Input::Unknown(trimmed.to_string()),
        },
        "close" => Input::Close,
        "refresh" | "r" => Input::Refresh,
        "dismiss" => Input::Dismiss,
        "clear" => Input::Clear,
        "help" | "h" | "?" => Input::Help,
        "quit" | "q" | "exit" => Input::Quit,
        other => match other.parse::<Category>() {
            Ok(category) => Input::Category(category),
            Err(_) => Input::Unknown(trimmed.to_string()),
        },
    }
}

/// Resolve `:open n` against the visible list: a row number first, then a movie id
fn pick_movie(movies: &[Movie], n: u64) -> Option<Movie> {
    let by_row = usize::try_from(n)
        .ok()
        .filter(|&row| row >= 1 && row <= movies.len())
        .map(|row| movies[row - 1].clone());
    by_row.or_else(|| movies.iter().find(|m| m.id == n).cloned())
}

#[derive(Clone)]
struct Renderer {
    output: Output,
    images: ImageResolver,
    detail_poster_size: String,
    cast_limit: usize,
}

/// What part of a list snapshot is worth a redraw
fn list_changed(previous: &ListView, current: &ListView) -> bool {
    previous.sequence != current.sequence
        || previous.loading != current.loading
        || previous.error != current.error
}

fn detail_changed(previous: &DetailView, current: &DetailView) -> bool {
    previous.selected_id() != current.selected_id()
        || previous.loading != current.loading
        || previous.error != current.error
        || previous.detail.is_some() != current.detail.is_some()
}

impl Renderer {
    async fn run(self, mut lists: watch::Receiver<ListView>, mut details: watch::Receiver<DetailView>) {
        let mut last_list = lists.borrow_and_update().clone();
        let mut last_detail = details.borrow_and_update().clone();

        loop {
            tokio::select! {
                changed = lists.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let view = lists.borrow_and_update().clone();
                    if list_changed(&last_list, &view) {
                        self.list(&view);
                    }
                    last_list = view;
                }
                changed = details.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let view = details.borrow_and_update().clone();
                    if detail_changed(&last_detail, &view) {
                        self.detail(&last_detail, &view);
                    }
                    last_detail = view;
                }
            }
        }
    }

    fn list(&self, view: &ListView) {
        if view.loading {
            self.output.info(format!("Loading {}...", movora_core::list_title(&view.intent)));
            return;
        }
        self.output.movie_list(view, &self.images);
    }

    fn detail(&self, previous: &DetailView, view: &DetailView) {
        if !view.is_open() {
            if previous.is_open() {
                self.output.info("Detail view closed.");
            }
            return;
        }
        self.output
            .movie_detail(view, &self.images, &self.detail_poster_size, self.cast_limit);
    }
}

pub async fn run_browse(output: &Output) -> Result<()> {
    let ctx = AppContext::load()?;

    let orchestrator = QueryOrchestrator::spawn(ctx.provider.clone(), OrchestratorOptions::from(&ctx.config.browse));
    let aggregator = DetailAggregator::spawn(ctx.provider.clone());

    let renderer = Renderer {
        output: *output,
        images: ctx.images.clone(),
        detail_poster_size: ctx.config.images.detail_poster_size.clone(),
        cast_limit: ctx.config.browse.cast_limit,
    };
    let render_task = tokio::spawn(renderer.run(orchestrator.subscribe(), aggregator.subscribe()));

    output.info("Type to search, :help for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = parse_input(&line);
        debug!(?input, "Browse input");

        match input {
            Input::Search(text) => orchestrator.set_search_text(text),
            Input::Category(category) => orchestrator.set_category(category),
            Input::Window(window) => orchestrator.set_trending_window(window),
            Input::Open(n) => match pick_movie(&orchestrator.snapshot().movies, n) {
                Some(movie) => aggregator.select(Some(movie)),
                None => output.warn(format!("No movie #{} in the current list", n)),
            },
            Input::Close => aggregator.close(),
            Input::Refresh => orchestrator.refetch(),
            Input::Dismiss => orchestrator.dismiss_error(),
            Input::Clear => orchestrator.set_search_text(""),
            Input::Help => output.info(HELP),
            Input::Quit => break,
            Input::Unknown(text) => output.warn(format!("Unknown command: {} (try :help)", text)),
        }
    }

    render_task.abort();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: u64) -> Movie {
        Movie {
            id,
            title: format!("Movie {}", id),
            overview: String::new(),
            poster_path: None,
            release_date: String::new(),
            vote_average: 0.0,
            vote_count: 0,
        }
    }

    #[test]
    fn test_plain_text_is_search() {
        assert_eq!(parse_input("dune"), Input::Search("dune".to_string()));
        assert_eq!(parse_input("  the matrix "), Input::Search("  the matrix ".to_string()));
        assert_eq!(parse_input(""), Input::Search(String::new()));
    }

    #[test]
    fn test_commands() {
        assert_eq!(parse_input(":top-rated"), Input::Category(Category::TopRated));
        assert_eq!(parse_input(":Popular"), Input::Category(Category::Popular));
        assert_eq!(parse_input(":week"), Input::Window(TrendingWindow::Week));
        assert_eq!(parse_input(":open 3"), Input::Open(3));
        assert_eq!(parse_input(":open"), Input::Unknown(":open".to_string()));
        assert_eq!(parse_input(":q"), Input::Quit);
        assert_eq!(parse_input(":bogus"), Input::Unknown(":bogus".to_string()));
    }

    #[test]
    fn test_pick_movie_prefers_row_number() {
        let movies = vec![movie(550), movie(2), movie(13)];
        assert_eq!(pick_movie(&movies, 2).map(|m| m.id), Some(2));
        assert_eq!(pick_movie(&movies, 1).map(|m| m.id), Some(550));
        assert_eq!(pick_movie(&movies, 13).map(|m| m.id), Some(13));
        assert_eq!(pick_movie(&movies, 550).map(|m| m.id), Some(550));
        assert_eq!(pick_movie(&movies, 0), None);
        assert_eq!(pick_movie(&movies, 99), None);
    }
}
