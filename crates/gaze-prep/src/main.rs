mod bootstrap;
mod report;

use anyhow::Result;
use gaze_core::settings::Settings;
use gaze_data::corpus::process_corpus;

use crate::report::RunReport;

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("gaze-prep v{} starting", env!("CARGO_PKG_VERSION"));

    let options = settings.corpus_options()?;
    tracing::info!(
        "Root: {}, Layout: {}, Minimum fixations: {}",
        settings.root.display(),
        options.layout,
        options.minimum_fixations
    );

    let corpus = process_corpus(&settings.root, &options)?;

    let report = RunReport::new(
        settings.root.clone(),
        options.layout,
        options.minimum_fixations,
        &corpus,
    );
    if settings.json {
        println!("{}", report.render_json()?);
    } else {
        println!("{}", report.render_text());
    }

    Ok(())
}
