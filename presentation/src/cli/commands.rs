//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tourgen_domain::{HotelTier, MAX_DAYS, MAX_TRAVELERS};

/// Output format for generated packages
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Full itinerary with hotel and price breakdown
    Full,
    /// Name, total and one line per day
    Summary,
    /// JSON output
    Json,
}

impl From<OutputFormat> for tourgen_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => tourgen_domain::OutputFormat::Full,
            OutputFormat::Summary => tourgen_domain::OutputFormat::Summary,
            OutputFormat::Json => tourgen_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for tourgen
#[derive(Parser, Debug)]
#[command(name = "tourgen")]
#[command(author, version, about = "Generate an illustrated travel itinerary with Gemini")]
#[command(long_about = r#"
tourgen asks a Gemini text model for a complete tour package and illustrates
every day of the itinerary with an Imagen picture.

The run has two phases:
1. Itinerary: the text model returns a package matching a fixed JSON schema
2. Visuals: one picture per day is generated concurrently; failed days keep
   a placeholder and never fail the run

The API key is read from GEMINI_API_KEY (or API_KEY).

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./tourgen.toml      Project-level config
3. ~/.config/tourgen/config.toml   Global config
Environment variables prefixed with TOURGEN_ override files
(e.g. TOURGEN_GENERATION__IMAGES=false).

Example:
  tourgen "Kyoto, Japan" --days 5 --travelers 2 --hotel boutique
  tourgen "Rome, Italy" -d 3 -o summary --no-images
  tourgen "Maui, Hawaii" --export ./itineraries
"#)]
pub struct Cli {
    /// Destination, e.g. "Kyoto, Japan" (defaults to Paris, France)
    pub destination: Option<String>,

    /// Trip length in days
    #[arg(short, long, default_value_t = 7, value_parser = clap::value_parser!(u32).range(1..=MAX_DAYS as i64))]
    pub days: u32,

    /// Number of travelers
    #[arg(short, long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..=MAX_TRAVELERS as i64))]
    pub travelers: u32,

    /// Hotel preference (3-star, 4-star, 5-star, boutique)
    #[arg(long, value_name = "TIER", default_value = "4-star")]
    pub hotel: HotelTier,

    /// Output format (defaults to the configured format, then full)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Write the itinerary document and day images to this directory
    #[arg(long, value_name = "DIR")]
    pub export: Option<PathBuf>,

    /// Skip image generation
    #[arg(long)]
    pub no_images: bool,

    /// Per-image time limit in seconds
    #[arg(long, value_name = "SECS")]
    pub image_timeout: Option<u64>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Print suggested destinations and exit
    #[arg(long)]
    pub list_destinations: bool,
}
