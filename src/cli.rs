//! Command-line interface

use std::path::PathBuf;

use clap::Parser;

use crate::settings::Settings;

/// Generate the Volunteer app icon and adaptive-icon foreground
#[derive(Debug, Parser)]
#[command(name = "app-icon-gen", version, about)]
pub struct Cli {
    /// Directory the PNG files are written to
    #[arg(short, long, value_name = "DIR", env = "APP_ICON_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Outline font file tried before the system font database
    #[arg(long, value_name = "PATH")]
    pub font: Option<PathBuf>,

    /// Skip the system font database lookup
    #[arg(long)]
    pub no_system_fonts: bool,

    /// Optional TOML settings file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit log lines as JSON
    #[arg(long)]
    pub json_output: bool,
}

impl Cli {
    /// Apply command-line overrides on top of file or default settings
    pub fn apply_to(&self, settings: &mut Settings) {
        if let Some(dir) = &self.output_dir {
            settings.output_dir = dir.clone();
        }
        if let Some(font) = &self.font {
            settings.font_path = font.clone();
        }
        if self.no_system_fonts {
            settings.system_fonts = false;
        }
    }
}

/// Process exit codes
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const UNEXPECTED_FAILURE: i32 = 1;
}
