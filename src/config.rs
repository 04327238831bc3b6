use std::{
    fs::{self, OpenOptions},
    path::PathBuf,
    time::Duration,
};

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    n2yo::{Observer, DEFAULT_BASE_URL},
    satellite::Category,
};

#[derive(Parser, Debug)]
#[command(name = "groundtrack")]
#[command(about = "Animate the ground tracks of satellites above an observer")]
pub struct Cli {
    /// N2YO API key
    #[arg(long, env = "N2YO_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Observer latitude in degrees
    #[arg(long, default_value_t = 37.7749, allow_negative_numbers = true)]
    pub latitude: f64,

    /// Observer longitude in degrees
    #[arg(long, default_value_t = -122.4194, allow_negative_numbers = true)]
    pub longitude: f64,

    /// Observer altitude in meters
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub altitude: f64,

    /// Search radius in degrees
    #[arg(long, default_value_t = 90, value_parser = clap::value_parser!(u32).range(0..=90))]
    pub radius: u32,

    /// Satellite category to look for
    #[arg(long, value_enum, default_value_t = Category::Starlink)]
    pub category: Category,

    /// Default tracking duration in minutes
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..))]
    pub minutes: u64,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Base URL of the N2YO satellite API
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Log file, defaults to the user cache directory
    #[arg(long, env = "GROUNDTRACK_LOG")]
    pub log_file: Option<PathBuf>,
}

/// Runtime settings of the dashboard.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub observer: Observer,
    pub radius: u32,
    pub category: Category,
    pub minutes: u64,
    pub timeout: Duration,
    pub base_url: String,
    pub api_key: String,
}

impl From<Cli> for Settings {
    fn from(cli: Cli) -> Self {
        Self {
            observer: Observer {
                latitude: cli.latitude,
                longitude: cli.longitude,
                altitude: cli.altitude,
            },
            radius: cli.radius,
            category: cli.category,
            minutes: cli.minutes,
            timeout: Duration::from_secs(cli.timeout),
            base_url: cli.base_url,
            api_key: cli.api_key,
        }
    }
}

/// Sends log records to a file, since the terminal is owned by the interface.
///
/// The filter is read from `RUST_LOG` and defaults to `info`.
pub fn init_logger(path: Option<PathBuf>) -> Result<PathBuf> {
    let path = path.unwrap_or_else(|| {
        dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("groundtrack")
            .join("groundtrack.log")
    });
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(path)
}
