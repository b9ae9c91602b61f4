//! Onboard - Terminal onboarding forms
//!
//! This application runs a step-by-step onboarding form in the terminal:
//! one question per screen, per-field validation, and a captured answer
//! set printed on completion.

// Module declarations
mod app;
mod config;
mod constants;
mod models;
mod services;
mod tui;
mod validation;

use anyhow::Result;
use clap::Parser;
use constants::{APP_BINARY_NAME, APP_NAME};
use std::path::PathBuf;

use config::{Config, ThemeMode};
use models::FormDefinition;

/// Onboard - Terminal onboarding forms
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML form definition (runs the built-in demo form when omitted)
    #[arg(value_name = "FILE")]
    form_path: Option<PathBuf>,

    /// Force a theme instead of detecting the OS mode
    #[arg(long, value_name = "MODE", value_parser = parse_theme)]
    theme: Option<ThemeMode>,

    /// Directory the photo picker browses (enables photo fields)
    #[arg(long, value_name = "DIR")]
    photos_dir: Option<PathBuf>,

    /// Print the config file location and exit
    #[arg(long)]
    config_path: bool,
}

fn parse_theme(value: &str) -> Result<ThemeMode, String> {
    match value {
        "auto" => Ok(ThemeMode::Auto),
        "dark" => Ok(ThemeMode::Dark),
        "light" => Ok(ThemeMode::Light),
        other => Err(format!("Unknown theme '{other}' (expected auto, dark, or light)")),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.config_path {
        println!("{}", Config::config_file_path()?.display());
        return Ok(());
    }

    let mut config = Config::load().unwrap_or_else(|_| Config::new());
    if let Some(theme) = cli.theme {
        config.ui.theme_mode = theme;
    }

    let definition = if let Some(path) = cli.form_path {
        if !path.exists() {
            eprintln!("Error: Form definition not found: {}", path.display());
            eprintln!();
            eprintln!("Please provide a valid path to a TOML form definition.");
            eprintln!();
            eprintln!("Examples:");
            eprintln!("  {} my_form.toml", APP_BINARY_NAME);
            eprintln!("  {} path/to/signup.toml", APP_BINARY_NAME);
            eprintln!();
            eprintln!("To try the built-in demo form, run:");
            eprintln!("  {}", APP_BINARY_NAME);
            eprintln!();
            eprintln!("For more options, run:");
            eprintln!("  {} --help", APP_BINARY_NAME);
            std::process::exit(1);
        }
        FormDefinition::load(&path)?
    } else {
        FormDefinition::demo()
    };

    // Photo fields need a directory to browse; default to the working
    // directory so the demo form works out of the box
    let photos_dir = cli
        .photos_dir
        .or_else(|| std::env::current_dir().ok());

    let outcome = app::run_form_terminal(definition, config, photos_dir)?;

    if outcome.completed {
        println!("{APP_NAME}: form complete");
        println!();
        let answers: std::collections::BTreeMap<_, _> = outcome.answers.into_iter().collect();
        print!("{}", toml::to_string_pretty(&answers)?);
    } else {
        println!("{APP_NAME}: form abandoned");
    }

    Ok(())
}
