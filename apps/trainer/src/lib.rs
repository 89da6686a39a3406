pub mod commands;
pub mod config;
pub mod db;
pub mod repl;
pub mod speech;
pub mod state;

use anyhow::Context;
use clap::Parser;
use config::{Args, Config};
use db::SqliteRepository;
use kana_core::Selector;
use state::AppState;
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from(Args::parse());

    // Logs go to stderr; stdout belongs to the REPL.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    if let Some(parent) = config.db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating data directory {}", parent.display()))?;
    }

    tracing::info!(path = %config.db_path.display(), "opening database");
    let repository = SqliteRepository::open(&config.db_path)
        .with_context(|| format!("opening database {}", config.db_path.display()))?;

    let speaker =
        speech::speaker_from_config(config.speech_program.as_deref(), config.speech_disabled);

    let selector = match config.seed {
        Some(seed) => Selector::seeded(config.weighting, seed),
        None => Selector::from_entropy(config.weighting),
    };
    tracing::info!(
        weighting = selector.policy_name(),
        seed = ?config.seed,
        recent = config.recent_window,
        "selector ready"
    );

    let mut state = AppState::new(repository, speaker, selector, config.recent_window);

    let stdin = io::stdin();
    repl::run_repl(&mut state, stdin.lock(), io::stdout())
}
