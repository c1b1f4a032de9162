//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};

use shoreline::params::{SceneConfig, ScenePreset};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "Shoreline")]
#[command(about = "Procedural sand dunes meeting a foaming shoreline", long_about = None)]
pub struct Args {
    /// Scene preset: dunes (default), lagoon
    #[arg(long, value_name = "PRESET", default_value = "dunes")]
    pub preset: String,

    /// Directory holding the sand and foam textures
    #[arg(long, value_name = "DIR", default_value = "assets")]
    pub assets_dir: PathBuf,

    /// Phrase hashed into the terrain noise seed (defaults to the preset's)
    #[arg(long, value_name = "PHRASE")]
    pub seed: Option<String>,

    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Parse scene preset from command-line arguments
    pub fn parse_preset(&self) -> ScenePreset {
        match self.preset.to_lowercase().as_str() {
            "dunes" => {
                info!("Scene: Dunes (wind-stretched ridges)");
                ScenePreset::Dunes
            }
            "lagoon" => {
                info!("Scene: Lagoon (small calm bay)");
                ScenePreset::Lagoon
            }
            other => {
                warn!("Unknown scene preset '{}', using dunes", other);
                ScenePreset::Dunes
            }
        }
    }

    /// Seed phrase to use: `--seed` if given, else the preset's own
    pub fn seed_phrase<'a>(&'a self, config: &'a SceneConfig) -> &'a str {
        self.seed.as_deref().unwrap_or(&config.seed_phrase)
    }
}
