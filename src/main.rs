use anyhow::{Context, Result};
use clap::Parser;
use std::time::Duration;
use tracing::error;

use geoprov::analyzer::{self, Analyzer};
use geoprov::utils::{setup_logging, validate_args};
use geoprov::{Args, CitationExtractor, ClientConfig, MediaWikiClient};

fn run(args: &Args) -> Result<()> {
    let titles = if args.titles.is_empty() {
        analyzer::load_article_titles(args.articles.as_deref())?
    } else {
        args.titles.clone()
    };

    let client = MediaWikiClient::new(ClientConfig {
        user_agent: args.user_agent.clone(),
        api_url: args.api_url.clone(),
        timeout: Duration::from_secs(args.timeout_secs),
    })
    .context("Failed to build HTTP client")?;
    let extractor =
        CitationExtractor::new(&args.exclude_host).context("Failed to compile URL patterns")?;

    let analyzer = Analyzer::new(client, extractor);
    let results = analyzer.analyze_articles(titles.as_slice(), &args.lang);

    analyzer::print_summary(&results, args.top);
    analyzer::write_results(&args.output, &results)?;

    println!(
        "\nAnalysis complete! Results saved to {}",
        args.output.display()
    );
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);
    validate_args(&args)?;

    match run(&args) {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
