//! creature-adventure: a turn-based wild-encounter text game.

use clap::Parser;

use creature_adventure::battle::state::EncounterRng;
use creature_adventure::cli;

/// A turn-based creature-battling text game.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Seed for the game's random source; a fixed seed replays a session.
    #[arg(long)]
    seed: Option<u64>,

    /// Trainer name, skipping the prompt.
    #[arg(long)]
    name: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "creature_adventure=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut rng = match args.seed {
        Some(seed) => EncounterRng::seeded(seed),
        None => EncounterRng::from_entropy(),
    };

    if let Err(error) = cli::run_game(&mut rng, args.name) {
        eprintln!("Game ended: {}", error);
    }
}
