//! Fair Dice
//!
//! Interactive non-transitive dice game against the computer. Every random
//! value the computer uses is committed before the player acts and revealed
//! afterwards with the data needed to check it.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use fair_dice::{
    config::{GameConfig, DEFAULT_LOG_FILTER},
    console::Console,
    game::{round::SecureDealer, DiceSet},
    proof::{transcript::RoundTranscript, verify::Scheme},
    VERSION,
};

const USAGE_EXAMPLE: &str = "fair-dice 2,2,4,4,9,9 6,8,1,1,8,6 7,5,3,7,5,3";

#[derive(Parser, Debug)]
#[command(name = "fair-dice", version)]
#[command(about = "Provably fair non-transitive dice game")]
struct Args {
    /// Die configurations, six comma-separated integers each (at least three dice)
    #[arg(value_name = "DIE")]
    dice: Vec<String>,

    /// Commitment scheme: hmac or hash [env: FAIR_DICE_SCHEME]
    #[arg(long)]
    scheme: Option<Scheme>,

    /// Print each round's transcript as JSON [env: FAIR_DICE_TRANSCRIPT]
    #[arg(long)]
    transcript: bool,

    /// Log filter directive [env: FAIR_DICE_LOG]
    #[arg(long)]
    log: Option<String>,

    /// Re-verify a saved transcript and exit
    #[arg(long, value_name = "FILE")]
    verify: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = GameConfig::from_env().context("invalid environment configuration")?;
    if let Some(scheme) = args.scheme {
        config.scheme = scheme;
    }
    if args.transcript {
        config.show_transcript = true;
    }
    if let Some(log) = args.log {
        config.log_filter = log;
    }

    init_logging(&config.log_filter)?;
    info!(version = VERSION, scheme = %config.scheme, "fair-dice starting");

    if let Some(path) = args.verify {
        return verify_transcript(&path);
    }

    let dice = match DiceSet::parse(&args.dice) {
        Ok(dice) => dice,
        Err(err) => {
            eprintln!("Error: {err}");
            eprintln!("Example: {USAGE_EXAMPLE}");
            std::process::exit(2);
        }
    };

    let mut dealer = SecureDealer::new(config.scheme);
    let stdin = io::stdin();
    let mut console = Console::new(&dice, stdin.lock(), io::stdout().lock())
        .with_transcript(config.show_transcript);
    console.run(&mut dealer).context("game aborted")?;

    Ok(())
}

fn init_logging(directive: &str) -> Result<()> {
    let filter =
        EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")
}

fn verify_transcript(path: &Path) -> Result<()> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let transcript = RoundTranscript::from_json(&json).context("malformed transcript")?;

    if let Err(violation) = transcript.verify() {
        bail!("transcript does not verify: {violation}");
    }

    println!(
        "Transcript verified: all {} draws revealed and matching.",
        transcript.entries.len()
    );
    Ok(())
}
