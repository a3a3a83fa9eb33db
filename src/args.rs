use clap::Parser;
use std::path::PathBuf;

use crate::citations::DEFAULT_EXCLUDED_HOST;
use crate::mediawiki::{DEFAULT_API_URL, DEFAULT_USER_AGENT};

#[derive(Parser, Debug)]
#[command(
    name = "geoprov",
    about = "Infer where the sources cited by Wikipedia articles come from, based on their domains",
    version,
    long_about = None
)]
pub struct Args {
    /// Article titles to analyze (defaults to the built-in sample list)
    pub titles: Vec<String>,

    /// Wikipedia language edition
    #[arg(short, long, default_value = "de")]
    pub lang: String,

    /// File with one article title per line
    #[arg(short, long, conflicts_with = "titles")]
    pub articles: Option<PathBuf>,

    /// Where to write the JSON results
    #[arg(short, long, default_value = "geoprovenance_results.json")]
    pub output: PathBuf,

    /// User-Agent sent to the MediaWiki API
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// MediaWiki API endpoint; `{lang}` is replaced by the language code
    #[arg(long, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Links whose host contains this are treated as internal and skipped
    #[arg(long, default_value = DEFAULT_EXCLUDED_HOST)]
    pub exclude_host: String,

    /// Number of top countries to print per article
    #[arg(short, long, default_value_t = 3)]
    pub top: usize,

    /// HTTP request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
