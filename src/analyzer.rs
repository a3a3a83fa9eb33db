use anyhow::{Context, Result};
use indexmap::IndexMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;
use tracing::{error, info};

use crate::citations::{Citation, CitationExtractor};
use crate::domain;
use crate::mediawiki::WikitextSource;
use crate::report::{self, ArticleReport};
use crate::utils::format_number;

const DEFAULT_ARTICLES: &str = include_str!("../default_articles.txt");

/// Reports keyed by article title, in the order the articles were analyzed.
pub type AnalysisResults = IndexMap<String, ArticleReport>;

pub struct Analyzer<S> {
    source: S,
    extractor: CitationExtractor,
}

impl<S: WikitextSource> Analyzer<S> {
    pub fn new(source: S, extractor: CitationExtractor) -> Self {
        Self { source, extractor }
    }

    /// Fetches an article and extracts its citations. Fetch failures are
    /// logged and yield no citations.
    pub fn extract_citations(&self, title: &str, language: &str) -> Vec<Citation> {
        let wikitext = match self.source.fetch_wikitext(title, language) {
            Ok(wikitext) => wikitext,
            Err(e) => {
                error!(action = "fetch", component = "analyzer", title = title, language = language, error = %e, "Error fetching article");
                return Vec::new();
            }
        };

        let citations = self.extractor.extract(&wikitext);
        info!(
            action = "extract",
            component = "analyzer",
            title = title,
            citation_count = citations.len(),
            "Extracted citations"
        );
        citations
    }

    pub fn generate_report(&self, title: &str, language: &str) -> ArticleReport {
        let start_time = Instant::now();
        info!(action = "start", component = "analyzer", title = title, language = language, "Starting geoprovenance analysis");

        let citations = self.extract_citations(title, language);
        if citations.is_empty() {
            return ArticleReport::no_citations();
        }

        let urls: Vec<&str> = citations.iter().map(|c| c.url.as_str()).collect();
        let classifications = domain::classify_all(&urls);
        let report = report::compile(title, language, citations, &classifications);

        if let ArticleReport::Ok(summary) = &report {
            info!(
                action = "complete",
                component = "analyzer",
                title = title,
                total_citations = summary.total_citations,
                unique_domains = summary.unique_domains,
                duration_ms = start_time.elapsed().as_millis(),
                "Analysis complete"
            );
        }
        report
    }

    /// Analyzes each article in turn. One article failing never affects the
    /// others.
    pub fn analyze_articles<T: AsRef<str>>(&self, titles: &[T], language: &str) -> AnalysisResults {
        let mut results = AnalysisResults::new();
        for title in titles {
            let title = title.as_ref();
            let report = self.generate_report(title, language);
            results.insert(title.to_string(), report);
        }
        results
    }
}

/// Reads article titles from `path`, or the built-in list when `None`.
pub fn load_article_titles(path: Option<&Path>) -> Result<Vec<String>> {
    let content = match path {
        Some(path) => {
            info!(action = "load", component = "article_list", file_path = ?path, "Loading article titles from file");
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read article list {:?}", path))?
        }
        None => DEFAULT_ARTICLES.to_string(),
    };

    let titles: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect();

    if titles.is_empty() {
        anyhow::bail!("No article titles to analyze");
    }
    Ok(titles)
}

pub fn write_results(path: &Path, results: &AnalysisResults) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, results)
        .with_context(|| format!("Failed to write results to {:?}", path))?;
    writer.flush()?;

    info!(action = "write", component = "results", file_path = ?path, article_count = results.len(), "Saved results");
    Ok(())
}

pub fn print_summary(results: &AnalysisResults, top: usize) {
    for (title, report) in results {
        match report {
            ArticleReport::Ok(report) => {
                println!("\n{}:", title);
                println!("  Citations: {}", format_number(report.total_citations));
                println!("  Unique domains: {}", format_number(report.unique_domains));
                let countries = report
                    .top_countries(top)
                    .into_iter()
                    .map(|(country, count)| format!("{} ({})", country, format_number(count)))
                    .collect::<Vec<_>>();
                if countries.is_empty() {
                    println!("  Top countries: none identified");
                } else {
                    println!("  Top countries: {}", countries.join(", "));
                }
            }
            ArticleReport::Error(e) => println!("\n{}: {}", title, e.error),
        }
    }
}
