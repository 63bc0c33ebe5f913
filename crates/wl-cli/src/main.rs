//! Command-line frontend for Alice's Quest.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wl_fiction::GameConfig;

#[derive(Parser)]
#[command(
    name = "wonderland",
    about = "Alice's Quest: escape from Wonderland in a text adventure",
    version,
    propagate_version = true,
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    game: GameArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the game (the default)
    Play(GameArgs),

    /// Load and validate the data files without playing
    Check(GameArgs),
}

#[derive(Args)]
struct GameArgs {
    /// Directory holding actions.txt, locations.txt and characters.txt
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Refuse to start when the data has errors
    #[arg(long)]
    strict: bool,

    /// Room the player starts in
    #[arg(long)]
    start_room: Option<String>,

    /// Item needed to defeat the final opponent
    #[arg(long)]
    win_item: Option<String>,
}

impl GameArgs {
    /// Config file first, then flags on top.
    fn into_config(self) -> Result<GameConfig, String> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_file(path).map_err(|e| e.to_string())?,
            None => GameConfig::default(),
        };
        if let Some(dir) = self.data {
            config = config.with_data_dir(dir);
        }
        if let Some(room) = self.start_room {
            config = config.with_start_room(room);
        }
        if let Some(item) = self.win_item {
            config = config.with_win_item(item);
        }
        if self.strict {
            config = config.with_strict(true);
        }
        Ok(config)
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        None => cli.game.into_config().and_then(|c| commands::play::run(&c)),
        Some(Commands::Play(args)) => args.into_config().and_then(|c| commands::play::run(&c)),
        Some(Commands::Check(args)) => args.into_config().and_then(|c| commands::check::run(&c)),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
