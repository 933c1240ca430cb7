use super::progress::Spinner;
use super::AppContext;
use crate::output::{Output, OutputFormat};
use color_eyre::Result;
use movora_core::{list_title, OrchestratorOptions, QueryOrchestrator};
use movora_models::{Category, QueryIntent, TrendingWindow};

pub async fn run_list(category: Category, window: TrendingWindow, output: &Output) -> Result<()> {
    let ctx = AppContext::load()?;
    let options = OrchestratorOptions {
        category,
        window,
        search_text: String::new(),
        ..OrchestratorOptions::from(&ctx.config.browse)
    };
    run_once(ctx, options, output).await
}

pub async fn run_search(query: String, output: &Output) -> Result<()> {
    if query.trim().is_empty() {
        return Err(color_eyre::eyre::eyre!("Search query cannot be empty"));
    }

    let ctx = AppContext::load()?;
    let options = OrchestratorOptions {
        search_text: query,
        ..OrchestratorOptions::from(&ctx.config.browse)
    };
    run_once(ctx, options, output).await
}

/// Start an orchestrator on the requested intent and print its first settled list
async fn run_once(ctx: AppContext, options: OrchestratorOptions, output: &Output) -> Result<()> {
    let intent = QueryIntent::effective(&options.search_text, options.category, options.window);
    let spinner = Spinner::start(
        format!("Fetching {}...", list_title(&intent)),
        output.format() == OutputFormat::Human && !output.is_quiet(),
    );

    let orchestrator = QueryOrchestrator::spawn(ctx.provider, options);
    let view = orchestrator.settled().await;
    spinner.finish();

    if let Some(error) = &view.error {
        output.error(error);
        return Err(color_eyre::eyre::eyre!("{}", error));
    }

    output.movie_list(&view, &ctx.images);
    Ok(())
}
