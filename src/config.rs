use std::path::PathBuf;

use clap::Parser;
use clap_verbosity_flag::Verbosity;

use crate::engine::game::SpawnPolicy;

/// Play 2048 in the terminal.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub(crate) struct Config {
    #[command(flatten)]
    pub(crate) verbose: Verbosity,

    /// Write log records to this file. Nothing is logged without it.
    #[arg(long)]
    pub(crate) log_file: Option<PathBuf>,

    /// Seed the tile spawner for a reproducible game.
    #[arg(long)]
    pub(crate) seed: Option<u64>,

    /// Which moves earn a new tile.
    #[arg(long, value_enum, default_value_t = SpawnPolicy::OnAnyChange)]
    pub(crate) spawn_on: SpawnPolicy,
}
