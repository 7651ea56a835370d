use core::fmt;
use std::{
    fs::File,
    io::{self, BufWriter},
    path::Path,
    process::ExitCode,
};

use clap::Parser;

use cli::{Cli, Mode};
use config::{ConfigError, GameConfiguration, Resolved};
use game::{Game, GameSetup, RandomTargets, Targets};
use settings::*;
use wheel::Wheel;

mod cli;
mod color;
mod config;
mod game;
mod logging;
mod math_utils;
mod player;
#[cfg(feature = "gui")]
mod render;
mod score;
mod settings;
mod terminal;
mod wheel;

#[derive(Debug)]
enum AppError {
    Config(ConfigError),
    Io(io::Error),
    #[cfg_attr(not(feature = "gui"), allow(dead_code))]
    Gui(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(e) => write!(f, "{e}"),
            AppError::Io(e) => write!(f, "i/o error: {e}"),
            AppError::Gui(e) => write!(f, "window error: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<io::Error> for AppError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

fn write_wheel(wheel: &Wheel, path: &Path) -> Result<(), AppError> {
    let mut out = BufWriter::new(File::create(path)?);
    wheel.render().write_ppm(&mut out, PPM_BACKGROUND)?;
    log::info!("wheel written to {}", path.display());
    Ok(())
}

fn targets(seed: Option<u64>) -> Box<dyn Targets> {
    match seed {
        Some(seed) => Box::new(RandomTargets::seeded(seed)),
        None => Box::new(RandomTargets::from_entropy()),
    }
}

#[cfg(feature = "gui")]
fn run_window(game: &mut Game, setup: &GameSetup) -> Result<bool, AppError> {
    render::run(game, setup).map_err(AppError::Gui)?;
    Ok(true)
}

#[cfg(not(feature = "gui"))]
fn run_window(_game: &mut Game, _setup: &GameSetup) -> Result<bool, AppError> {
    log::warn!("built without the `gui` feature, playing in the terminal");
    Ok(false)
}

fn play(headless: bool, game_configuration: &GameConfiguration) -> Result<(), AppError> {
    let Resolved {
        setup,
        canvas_size,
        seed,
        wheel_out,
    } = game_configuration.resolve(game_configuration.load_file()?);
    let wheel = Wheel::new(canvas_size);
    if let Some(path) = &wheel_out {
        write_wheel(&wheel, path)?;
    }
    let mut game = Game::new(wheel, targets(seed));

    if !headless && run_window(&mut game, &setup)? {
        return Ok(());
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    if terminal::run_session(&mut game, &setup, stdin.lock(), &mut stdout)?.is_none() {
        log::info!("game left unfinished");
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), AppError> {
    match cli.mode {
        Mode::Play {
            headless,
            game_configuration,
        } => play(headless, &game_configuration),
        Mode::Wheel { output, size } => {
            write_wheel(&Wheel::new(size.unwrap_or(DEFAULT_CANVAS_SIZE)), &output)
        }
        Mode::Tutorial => {
            println!("{}", terminal::TUTORIAL);
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("could not set up logging: {e}");
    }
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
