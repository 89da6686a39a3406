//! Startup configuration: command-line flags with environment fallbacks.
//!
//! `.env` is loaded before parsing, so every `KANA_*` variable can live there.

use clap::Parser;
use kana_core::{WeightingPolicy, DEFAULT_RECENT_WINDOW};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "Kana flashcard trainer", long_about = None)]
pub struct Args {
    /// SQLite file holding progress and preferences
    #[arg(long, env = "KANA_DB_PATH")]
    pub db: Option<PathBuf>,

    /// Seed for a reproducible question order
    #[arg(long, env = "KANA_SEED")]
    pub seed: Option<u64>,

    /// Weight curve: inverse-mastery, wrong-ratio or linear
    #[arg(long, env = "KANA_WEIGHTING", default_value = "inverse-mastery", value_parser = parse_weighting)]
    pub weighting: WeightingPolicy,

    /// How many recent questions are held back from the next draw
    #[arg(long, env = "KANA_RECENT_WINDOW", default_value_t = DEFAULT_RECENT_WINDOW)]
    pub recent: usize,

    /// Text-to-speech program (espeak-ng, espeak or say)
    #[arg(long, env = "KANA_SPEECH_CMD")]
    pub speech_cmd: Option<PathBuf>,

    /// Disable speech output
    #[arg(long)]
    pub no_speech: bool,

    /// Log filter, e.g. "info" or "kana_trainer_lib=debug"
    #[arg(long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,
}

/// Resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub seed: Option<u64>,
    pub weighting: WeightingPolicy,
    pub recent_window: usize,
    pub speech_program: Option<PathBuf>,
    pub speech_disabled: bool,
    pub log_filter: String,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            db_path: args.db.unwrap_or_else(default_db_path),
            seed: args.seed,
            weighting: args.weighting,
            recent_window: args.recent.max(1),
            speech_program: args.speech_cmd,
            speech_disabled: args.no_speech,
            log_filter: args.log_level,
        }
    }
}

fn parse_weighting(s: &str) -> Result<WeightingPolicy, String> {
    WeightingPolicy::from_str(s)
        .ok_or_else(|| format!("unknown weighting '{s}' (inverse-mastery, wrong-ratio, linear)"))
}

/// Local data directory, falling back to the current directory.
pub fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kana-trainer")
        .join("kana.db")
}
