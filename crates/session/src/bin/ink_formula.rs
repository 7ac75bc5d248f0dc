//! ink-formula - Replay recorded formulas through one session

use anyhow::Context;
use clap::Parser;
use formula::ParserConfig;
use session::{load_formulas, Session};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "ink-formula")]
#[command(about = "Replay recorded handwritten formulas and print their solver requests")]
#[command(version)]
struct Args {
    /// JSON array of recorded formulas (`{ "mode", "boxes" }`)
    formulas: PathBuf,

    /// Parser configuration JSON overriding the default thresholds
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading parser config {}", path.display()))?;
            ParserConfig::from_json(&json).context("parsing parser config")?
        }
        None => ParserConfig::default(),
    };

    let formulas = load_formulas(&args.formulas)
        .with_context(|| format!("loading {}", args.formulas.display()))?;
    tracing::info!(count = formulas.len(), "replaying formulas");

    let mut session = Session::with_config(config);
    for formula in formulas {
        session.add_formula(formula);
    }
    for (index, outcome) in session.submit_all().into_iter().enumerate() {
        match outcome {
            Ok(outcome) => println!("{}: {}", index, outcome.request),
            Err(err) => println!("{}: error: {}", index, err),
        }
    }
    Ok(())
}
