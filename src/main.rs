mod cli;

use std::process::ExitCode;

use anyhow::{Context as _, Result};
use clap::Parser;
use cli::{args::Args, config_file, documents};
use log::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use writing_history::{PipelineConfig, RuleBasedModel, process_documents};

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            format!(
                "{}={}",
                env!("CARGO_CRATE_NAME"),
                args.verbose.log_level_filter().as_str().to_lowercase()
            )
            .into()
        }))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(args.color.use_colors()),
        )
        .try_init()
        .context("Failed to initialise tracing")?;

    info!(
        "Starting writing-history version {}",
        env!("CARGO_PKG_VERSION")
    );

    let mut config = match &args.config {
        Some(path) => config_file::read_or_create(path)?,
        None => PipelineConfig::default(),
    };

    let mut model = RuleBasedModel::new(config.language);
    if let Some(path) = &args.lexicon {
        let words = documents::read_lexicon(path)?;
        info!("Spellchecking against {} words", words.len());
        model = model.with_lexicon(words);
        config.enable_spellchecking = true;
    }

    let mut failed = 0;
    let mut inputs = Vec::with_capacity(args.documents.len());
    for path in &args.documents {
        match documents::read_events(path) {
            Ok(events) => inputs.push((documents::document_name(path), events)),
            Err(err) => {
                error!("{err:#}");
                failed += 1;
            }
        }
    }

    for report in process_documents(inputs, &config, &model) {
        let written = report
            .result
            .context("Failed to reconstruct the writing history")
            .and_then(|history| documents::write_history(&args.output, &report.name, &history));

        match written {
            Ok(path) => info!("Wrote the history of {} to '{}'", report.name, path.display()),
            Err(err) => {
                error!("{}: {err:#}", report.name);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        error!("{failed} of {} documents failed", args.documents.len());
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}
