use clap::ValueEnum;
use comfy_table::{presets, Attribute, Cell, Color, Table};
use movora_core::display::{
    format_money, format_release_date, format_runtime, list_title, rating_tier, results_found, top_billed,
    RatingTier,
};
use movora_core::{DetailView, ImageResolver, ListView};
use movora_models::{AggregateDetail, Movie};
use owo_colors::OwoColorize;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

#[derive(Debug, Clone, Copy)]
pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => println!("{} {}", "✓".green(), msg.as_ref()),
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({ "type": "success", "message": msg.as_ref() }));
            }
        }
    }

    pub fn error(&self, msg: impl AsRef<str>) {
        // Errors are shown even in quiet mode
        match self.format {
            OutputFormat::Human => eprintln!("{} {}", "✗".red(), msg.as_ref()),
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({ "type": "error", "message": msg.as_ref() }));
            }
        }
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => println!("{}", msg.as_ref()),
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({ "type": "info", "message": msg.as_ref() }));
            }
        }
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        if self.quiet {
            return;
        }

        match self.format {
            OutputFormat::Human => println!("{} {}", "⚠".yellow(), msg.as_ref()),
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({ "type": "warning", "message": msg.as_ref() }));
            }
        }
    }

    pub fn json(&self, data: &serde_json::Value) {
        if self.quiet && self.format != OutputFormat::Human {
            return;
        }

        self.print_json(data);
    }

    fn print_json(&self, data: &serde_json::Value) {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string(data).unwrap_or_default()),
            OutputFormat::JsonPretty => {
                println!("{}", serde_json::to_string_pretty(data).unwrap_or_default())
            }
            OutputFormat::Human => println!("{}", data),
        }
    }

    /// Render the current list: a numbered table, or the view as JSON
    pub fn movie_list(&self, view: &ListView, images: &ImageResolver) {
        if self.format != OutputFormat::Human {
            let movies: Vec<_> = view
                .movies
                .iter()
                .map(|m| movie_json(m, images))
                .collect();
            self.json(&json!({
                "type": "list",
                "title": list_title(&view.intent),
                "intent": view.intent,
                "sequence": view.sequence,
                "error": view.error,
                "can_load_more": view.can_load_more(),
                "count": view.movies.len(),
                "movies": movies,
            }));
            return;
        }
        if self.quiet {
            return;
        }

        println!();
        println!("{}", list_title(&view.intent).bold().bright_cyan());
        if let Some(found) = results_found(view.movies.len(), view.loading) {
            println!("{}", found.dimmed());
        }

        if view.movies.is_empty() {
            println!("{}", "No movies found.".dimmed());
        } else {
            let mut table = Table::new();
            table.load_preset(presets::UTF8_FULL);
            table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
            table.set_header(vec![
                Cell::new("#").add_attribute(Attribute::Bold),
                Cell::new("Title").add_attribute(Attribute::Bold),
                Cell::new("Year").add_attribute(Attribute::Bold),
                Cell::new("Rating").add_attribute(Attribute::Bold),
                Cell::new("ID").add_attribute(Attribute::Bold),
            ]);
            for (idx, movie) in view.movies.iter().enumerate() {
                table.add_row(vec![
                    Cell::new(idx + 1),
                    Cell::new(&movie.title),
                    Cell::new(movie.release_year().map(|y| y.to_string()).unwrap_or_else(|| "-".to_string())),
                    rating_cell(movie.vote_average),
                    Cell::new(movie.id),
                ]);
            }
            println!("{}", table);
        }

        if let Some(error) = &view.error {
            eprintln!("{} {}", "✗".red(), error);
        }
        if view.can_load_more() {
            println!("{}", "Load more is not available yet.".dimmed());
        }
    }

    /// Render the detail panel for the selected movie
    pub fn movie_detail(&self, view: &DetailView, images: &ImageResolver, detail_poster_size: &str, cast_limit: usize) {
        if self.format != OutputFormat::Human {
            self.json(&json!({
                "type": "detail",
                "movie": view.movie.as_ref().map(|m| movie_json(m, images)),
                "detail": view.detail.as_ref().map(|d| detail_json(d, images, detail_poster_size, cast_limit)),
                "loading": view.loading,
                "error": view.error,
            }));
            return;
        }
        if self.quiet {
            return;
        }

        let Some(movie) = &view.movie else {
            return;
        };

        println!();
        println!("{}", movie.title.bold().bright_white());
        if view.loading {
            println!("{}", "Loading details...".dimmed());
            return;
        }
        if let Some(error) = &view.error {
            // Summary stays usable when the detail pair fails
            println!("{} {}", "⚠".yellow(), error);
            print_overview(&movie.overview);
            return;
        }
        if let Some(aggregate) = &view.detail {
            self.print_aggregate(aggregate, images, detail_poster_size, cast_limit);
        }
    }

    pub fn aggregate(&self, aggregate: &AggregateDetail, images: &ImageResolver, detail_poster_size: &str, cast_limit: usize) {
        if self.format != OutputFormat::Human {
            self.json(&detail_json(aggregate, images, detail_poster_size, cast_limit));
            return;
        }
        if self.quiet {
            return;
        }

        println!();
        println!("{}", aggregate.detail.movie.title.bold().bright_white());
        self.print_aggregate(aggregate, images, detail_poster_size, cast_limit);
    }

    fn print_aggregate(&self, aggregate: &AggregateDetail, images: &ImageResolver, detail_poster_size: &str, cast_limit: usize) {
        let detail = &aggregate.detail;
        let movie = &detail.movie;

        if let Some(tagline) = detail.tagline() {
            println!("{}", tagline.italic().dimmed());
        }

        let mut facts = Table::new();
        facts.load_preset(presets::UTF8_FULL);
        facts.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
        facts.add_row(vec![
            Cell::new("Rating").add_attribute(Attribute::Bold),
            rating_cell(movie.vote_average),
        ]);
        facts.add_row(vec![Cell::new("Votes").add_attribute(Attribute::Bold), Cell::new(movie.vote_count)]);
        if let Some(date) = format_release_date(&movie.release_date) {
            facts.add_row(vec![Cell::new("Released").add_attribute(Attribute::Bold), Cell::new(date)]);
        }
        if let Some(runtime) = format_runtime(detail.runtime) {
            facts.add_row(vec![Cell::new("Runtime").add_attribute(Attribute::Bold), Cell::new(runtime)]);
        }
        if !detail.genres.is_empty() {
            let genres: Vec<&str> = detail.genres.iter().map(|g| g.name.as_str()).collect();
            facts.add_row(vec![Cell::new("Genres").add_attribute(Attribute::Bold), Cell::new(genres.join(", "))]);
        }
        if !detail.status.is_empty() {
            facts.add_row(vec![Cell::new("Status").add_attribute(Attribute::Bold), Cell::new(&detail.status)]);
        }
        if !detail.original_language.is_empty() {
            facts.add_row(vec![
                Cell::new("Language").add_attribute(Attribute::Bold),
                Cell::new(detail.original_language.to_uppercase()),
            ]);
        }
        if let Some(budget) = format_money(detail.budget) {
            facts.add_row(vec![Cell::new("Budget").add_attribute(Attribute::Bold), Cell::new(budget)]);
        }
        if let Some(revenue) = format_money(detail.revenue) {
            facts.add_row(vec![Cell::new("Revenue").add_attribute(Attribute::Bold), Cell::new(revenue)]);
        }
        facts.add_row(vec![
            Cell::new("Poster").add_attribute(Attribute::Bold),
            Cell::new(images.poster(movie.poster_path.as_deref(), detail_poster_size)),
        ]);
        println!("{}", facts);

        print_overview(&movie.overview);

        let cast = top_billed(&aggregate.cast, cast_limit);
        if cast.is_empty() {
            return;
        }
        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL);
        table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
        table.set_header(vec![
            Cell::new("Top Billed Cast").fg(Color::Cyan).add_attribute(Attribute::Bold),
            Cell::new("Character").add_attribute(Attribute::Bold),
            Cell::new("Photo").add_attribute(Attribute::Bold),
        ]);
        for member in cast {
            table.add_row(vec![
                Cell::new(&member.name),
                Cell::new(&member.character),
                Cell::new(images.profile_default(member.profile_path.as_deref())),
            ]);
        }
        println!("{}", table);
    }
}

fn print_overview(overview: &str) {
    if !overview.trim().is_empty() {
        println!();
        println!("{}", overview);
    }
}

fn rating_cell(vote_average: f64) -> Cell {
    let color = match rating_tier(vote_average) {
        RatingTier::High => Color::Green,
        RatingTier::Medium => Color::Yellow,
        RatingTier::Low => Color::Red,
    };
    Cell::new(format!("{:.1}", vote_average)).fg(color)
}

fn movie_json(movie: &Movie, images: &ImageResolver) -> serde_json::Value {
    json!({
        "id": movie.id,
        "title": movie.title,
        "release_date": movie.release_date,
        "vote_average": movie.vote_average,
        "vote_count": movie.vote_count,
        "rating_tier": rating_tier(movie.vote_average),
        "poster_url": images.poster_default(movie.poster_path.as_deref()),
        "overview": movie.overview,
    })
}

fn detail_json(aggregate: &AggregateDetail, images: &ImageResolver, detail_poster_size: &str, cast_limit: usize) -> serde_json::Value {
    let detail = &aggregate.detail;
    let cast: Vec<_> = top_billed(&aggregate.cast, cast_limit)
        .iter()
        .map(|member| {
            json!({
                "id": member.id,
                "name": member.name,
                "character": member.character,
                "profile_url": images.profile_default(member.profile_path.as_deref()),
            })
        })
        .collect();

    json!({
        "id": aggregate.movie_id,
        "title": detail.movie.title,
        "tagline": detail.tagline(),
        "overview": detail.movie.overview,
        "release_date": format_release_date(&detail.movie.release_date),
        "runtime": format_runtime(detail.runtime),
        "genres": detail.genres,
        "vote_average": detail.movie.vote_average,
        "rating_tier": rating_tier(detail.movie.vote_average),
        "status": detail.status,
        "original_language": detail.original_language,
        "budget": format_money(detail.budget),
        "revenue": format_money(detail.revenue),
        "poster_url": images.poster(detail.movie.poster_path.as_deref(), detail_poster_size),
        "cast": cast,
    })
}
