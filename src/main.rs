//! Waymark command line: validate, list, and exercise pattern sets.
#![forbid(unsafe_code)]

mod assets;
mod commands;
mod simulate;
mod watch;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding assets/ and waymark.toml
    #[arg(long, global = true)]
    assets: Option<PathBuf>,

    /// Block registry (defaults to assets/blocks.toml)
    #[arg(long, global = true)]
    blocks: Option<PathBuf>,

    /// Pattern directory (defaults to assets/patterns)
    #[arg(long, global = true)]
    patterns: Option<PathBuf>,

    /// Placement config (defaults to waymark.toml; missing file means defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check every pattern file and report definition errors
    Validate,
    /// List loaded patterns by slot
    List,
    /// Write the built-in patterns into empty slots
    Init,
    /// Walk a player over a terrain profile and print each placement
    Simulate(simulate::SimulateArgs),
    /// Reload patterns whenever the pattern directory changes
    Watch,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let root = assets::resolve_assets_root(args.assets.clone());
    let paths = commands::Paths {
        blocks: args.blocks.unwrap_or_else(|| assets::blocks_path(&root)),
        patterns: args.patterns.unwrap_or_else(|| assets::patterns_dir(&root)),
        config: args.config.unwrap_or_else(|| assets::config_path(&root)),
    };
    log::debug!("using {:?}", paths);

    let result = match args.command {
        Command::Validate => commands::validate(&paths),
        Command::List => commands::list(&paths),
        Command::Init => commands::init(&paths),
        Command::Simulate(sim) => simulate::run(&paths, &sim),
        Command::Watch => watch::run(&paths),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
