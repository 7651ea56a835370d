use std::path::PathBuf;

use crate::config::GameConfiguration;

#[derive(clap::Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log more; repeat for debug and trace output
    #[arg(short = 'v', long = "verbose", global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
    #[command(subcommand)]
    pub mode: Mode,
}

#[derive(clap::Subcommand, Debug)]
pub enum Mode {
    /// Play a two-player game
    Play {
        #[arg(short = 'H', long = "headless", default_value_t = false)]
        headless: bool,
        #[clap(flatten)]
        game_configuration: GameConfiguration,
    },
    /// Render the color wheel to a PPM image
    Wheel {
        #[arg()]
        output: PathBuf,
        #[arg(short = 's', long = "size")]
        size: Option<u32>,
    },
    /// Explain the rules
    Tutorial,
}
