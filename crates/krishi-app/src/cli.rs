//! CLI argument definitions for the KrishiMitra application.
//!
//! Uses `clap` with derive macros. Priority resolution:
//! CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

/// KrishiMitra — a farming assistant with weather and crop guidance.
#[derive(Parser, Debug)]
#[command(name = "krishimitra", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Response language (english, hindi, marathi, gujarati, punjabi, tamil, telugu).
    #[arg(short = 'L', long = "language")]
    pub language: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Ask a single question and exit instead of starting the chat loop.
    #[arg(long = "ask")]
    pub ask: Option<String>,

    /// Print current weather and the daily forecast, then exit.
    #[arg(long = "weather")]
    pub weather: bool,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > KRISHI_CONFIG env var > ~/.krishimitra/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("KRISHI_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the log level; `None` means use the config file value.
    pub fn resolve_log_level(&self) -> Option<String> {
        self.log_level.clone()
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".krishimitra").join("config.toml");
    }
    PathBuf::from("config.toml")
}
