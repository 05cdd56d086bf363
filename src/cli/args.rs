use std::path::PathBuf;

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};

use crate::cli::color_when::ColorWhen;

/// Reconstruct how the sentences of documents were written and revised
/// from their keystroke logs
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Keystroke logs as JSON or YAML lists of events
    #[arg(required = true, value_name = "DOCUMENT")]
    pub documents: Vec<PathBuf>,

    /// Directory receiving one `<DOCUMENT>.history.json` per document
    #[arg(long, short, value_name = "DIR", default_value = ".")]
    pub output: PathBuf,

    /// YAML pipeline configuration, created with the defaults if missing
    #[arg(long, short, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Word list, one word per line, enabling spellchecking
    #[arg(long, value_name = "FILE")]
    pub lexicon: Option<PathBuf>,

    #[command(flatten)]
    pub verbose: Verbosity<InfoLevel>,

    #[arg(
            long,
            value_name = "WHEN",
            default_value_t = ColorWhen::Auto,
            default_missing_value = "always",
            value_enum
        )]
    pub color: ColorWhen,
}
