//! app-icon-gen - launcher icon generator for the Volunteer app
//!
//! Writes two 1024x1024 PNGs into `assets/icon/`:
//! - `app_icon.png` (opaque, used for the launcher icon)
//! - `app_icon_foreground.png` (transparent, adaptive-icon foreground)
//!
//! Platform packaging is left to `flutter_launcher_icons`.

mod cli;
mod icon;
mod logging;
mod settings;

use anyhow::Context;
use clap::Parser;
use cli::{exit_codes, Cli};
use icon::IconGenerator;
use settings::Settings;

const BANNER_WIDTH: usize = 50;

const NEXT_STEPS: [&str; 3] = [
    "1. Run: flutter pub get",
    "2. Run: dart run flutter_launcher_icons",
    "3. Build APK: flutter build apk --release",
];

fn main() {
    std::process::exit(run());
}

fn run() -> i32 {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose, cli.json_output) {
        eprintln!("Failed to initialize logging: {}", e);
        return exit_codes::UNEXPECTED_FAILURE;
    }

    match generate(&cli) {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => {
            tracing::error!(error = %format!("{:#}", e), "Icon generation failed");
            eprintln!("Error: {:#}", e);
            exit_codes::UNEXPECTED_FAILURE
        }
    }
}

fn generate(cli: &Cli) -> anyhow::Result<()> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };
    cli.apply_to(&mut settings);
    tracing::debug!(?settings, "Resolved settings");

    print_banner("Generating Volunteer App Icons");
    println!();

    let generator = IconGenerator::new(&settings);
    let icons = generator.generate_all().with_context(|| {
        format!(
            "Failed to generate icons in {}",
            generator.output_dir().display()
        )
    })?;
    tracing::info!(
        app_icon = %icons.app_icon.display(),
        foreground = %icons.foreground.display(),
        "Icon generation complete"
    );

    println!();
    print_banner("[SUCCESS] Icon generation complete!");
    println!();
    println!("Next steps:");
    for step in NEXT_STEPS {
        println!("{}", step);
    }
    println!();

    Ok(())
}

fn print_banner(title: &str) {
    let rule = "=".repeat(BANNER_WIDTH);
    println!("{}", rule);
    println!("{}", title);
    println!("{}", rule);
}
