use std::io::stdout;

use anyhow::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::{thread_rng, RngCore, SeedableRng};

mod config;
mod engine;
mod error;
mod tui;
mod tui2048;

use config::Config;
use engine::game::Game;
use tui::crossterm::{Crossterm, CrosstermEvents};
use tui2048::Tui2048;

fn main() -> Result<()> {
    let config = Config::parse();
    setup_logging(&config)?;

    let rng: Box<dyn RngCore> = match config.seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed)),
        None => Box::new(thread_rng()),
    };
    let game = Game::new(rng, config.spawn_on);
    log::info!(
        "starting with seed {:?}, spawning on {:?}",
        config.seed,
        game.policy()
    );

    let renderer = Crossterm::new(stdout())?;
    let event_source = CrosstermEvents::default();
    let tui2048 = Tui2048::new(game, renderer, event_source)?;
    tui2048.run()?;

    Ok(())
}

fn setup_logging(config: &Config) -> Result<()> {
    let path = match &config.log_file {
        Some(path) => path,
        None => return Ok(()),
    };
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message,
            ))
        })
        .level(config.verbose.log_level_filter())
        .chain(fern::log_file(path)?)
        .apply()?;
    Ok(())
}
