use core::fmt;
use std::path::{Path, PathBuf};

use clap::*;
use serde::Deserialize;

use crate::game::{parse_round_count, GameSetup};
use crate::settings::*;

#[derive(Debug, Clone, Default, Args)]
pub struct GameConfiguration {
    #[arg(long = "player-one")]
    pub player_one: Option<String>,
    #[arg(long = "player-two")]
    pub player_two: Option<String>,
    /// Number of rounds; unparsable values fall back to 5
    #[arg(short = 'r', long = "rounds")]
    pub rounds: Option<String>,
    #[arg(short = 's', long = "size")]
    pub canvas_size: Option<u32>,
    #[arg(short = 'c', long = "config")]
    pub config_file: Option<PathBuf>,
    #[arg(long = "seed")]
    pub seed: Option<u64>,
    /// Also write the wheel as a PPM image, for terminal play
    #[arg(long = "wheel-out")]
    pub wheel_out: Option<PathBuf>,
}

/// Optional TOML file with the same settings as the command line.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub rounds: Option<u32>,
    pub canvas_size: Option<u32>,
    pub player_one: Option<String>,
    pub player_two: Option<String>,
    pub seed: Option<u64>,
}

#[derive(Debug)]
pub enum ConfigError {
    Read(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read(path, e) => write!(f, "could not read {}: {e}", path.display()),
            ConfigError::Parse(path, e) => write!(f, "invalid config {}: {e}", path.display()),
        }
    }
}

impl std::error::Error for ConfigError {}

impl FileConfig {
    fn from_toml_str(toml: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents, path)
    }
}

/// Everything a game session needs, after merging flags, file and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub setup: GameSetup,
    pub canvas_size: u32,
    pub seed: Option<u64>,
    pub wheel_out: Option<PathBuf>,
}

impl GameConfiguration {
    pub fn load_file(&self) -> Result<FileConfig, ConfigError> {
        match &self.config_file {
            Some(path) => {
                log::info!("reading config from {}", path.display());
                FileConfig::from_toml_file(path)
            }
            None => Ok(FileConfig::default()),
        }
    }

    /// Command line flags win over the file, the file over defaults.
    pub fn resolve(&self, file: FileConfig) -> Resolved {
        let rounds = match (&self.rounds, file.rounds) {
            (Some(raw), _) => parse_round_count(Some(raw.as_str())),
            (None, Some(n)) if n > 0 => n,
            _ => DEFAULT_ROUNDS,
        };
        Resolved {
            setup: GameSetup {
                player_one: self.player_one.clone().or(file.player_one).unwrap_or_default(),
                player_two: self.player_two.clone().or(file.player_two).unwrap_or_default(),
                rounds,
            },
            canvas_size: self
                .canvas_size
                .or(file.canvas_size)
                .unwrap_or(DEFAULT_CANVAS_SIZE)
                .clamp(MIN_CANVAS_SIZE, MAX_CANVAS_SIZE),
            seed: self.seed.or(file.seed),
            wheel_out: self.wheel_out.clone(),
        }
    }
}
