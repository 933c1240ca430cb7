use super::progress::Spinner;
use super::AppContext;
use crate::output::{Output, OutputFormat};
use color_eyre::Result;
use movora_core::{fetch_aggregate, DETAIL_UNAVAILABLE_MESSAGE};

pub async fn run_show(id: u64, output: &Output) -> Result<()> {
    let ctx = AppContext::load()?;

    let spinner = Spinner::start(
        format!("Fetching details for movie {}...", id),
        output.format() == OutputFormat::Human && !output.is_quiet(),
    );
    let result = fetch_aggregate(ctx.provider.as_ref(), id).await;
    spinner.finish();

    match result {
        Ok(aggregate) => {
            output.aggregate(
                &aggregate,
                &ctx.images,
                &ctx.config.images.detail_poster_size,
                ctx.config.browse.cast_limit,
            );
            Ok(())
        }
        Err(err) => {
            tracing::warn!(id, error = %err, "Detail request failed");
            output.error(DETAIL_UNAVAILABLE_MESSAGE);
            Err(color_eyre::eyre::eyre!("{}", err))
        }
    }
}
