use clap::{Parser, Subcommand, ValueEnum};
use job_scout::FetchBackend;
use job_scout::filter::RecordFilterConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "job-scout")]
#[command(about = "Scrapes public job search listings and keeps the latest results")]
#[command(version)]
pub struct Args {
    /// Path to JSON configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// File holding the last search's results
    #[arg(short, long, global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search listings and replace the stored results
    Search {
        /// Search keywords
        keywords: String,

        /// Location to search in
        #[arg(short, long)]
        location: Option<String>,

        /// Number of listings wanted
        #[arg(short = 'n', long, default_value_t = 10)]
        count: usize,

        /// How pages are fetched
        #[arg(short, long, value_enum)]
        backend: Option<BackendArg>,

        /// Results per page offset
        #[arg(long)]
        page_size: Option<usize>,

        /// Wait between page fetches in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// List the stored results
    List,

    /// Show stored results whose location contains the given text
    Filter {
        /// Location text to match, case-insensitively
        location: String,

        /// Keep only titles matching this regex (repeatable)
        #[arg(long = "include-title", value_name = "REGEX")]
        include_title: Vec<String>,

        /// Drop titles matching this regex; wins over --include-title (repeatable)
        #[arg(long = "exclude-title", value_name = "REGEX")]
        exclude_title: Vec<String>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum BackendArg {
    Http,
    Webdriver,
}

/// Convert from CLI argument backend to internal backend
pub fn convert_backend(arg: BackendArg) -> FetchBackend {
    match arg {
        BackendArg::Http => FetchBackend::Http,
        BackendArg::Webdriver => FetchBackend::WebDriver,
    }
}

/// Build the record filter configuration for the filter subcommand
pub fn convert_filter(
    location: &str,
    include_title: Vec<String>,
    exclude_title: Vec<String>,
) -> RecordFilterConfig {
    RecordFilterConfig {
        location: Some(location.to_string()),
        include_title_patterns: include_title,
        exclude_title_patterns: exclude_title,
    }
}
