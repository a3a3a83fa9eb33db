use std::collections::HashMap;

use geoprov::analyzer::{self, Analyzer};
use geoprov::citations::DEFAULT_EXCLUDED_HOST;
use geoprov::{ArticleReport, CitationExtractor, FetchError, WikitextSource};

struct StubWiki {
    pages: HashMap<(&'static str, &'static str), &'static str>,
}

impl StubWiki {
    fn new() -> Self {
        let mut pages = HashMap::new();
        pages.insert(
            ("X", "en"),
            "<ref>{{cite web|url=https://www.bbc.co.uk/news/123|title=X}}</ref> See also https://en.wikipedia.org/wiki/Y",
        );
        pages.insert(
            ("Salzburg", "de"),
            "'''Salzburg''' ist eine Stadt.<ref>{{Internetquelle |url=https://www.stadt-salzburg.at/geschichte |titel=Geschichte}}</ref>\n\
             <ref>{{cite news|url=https://www.nytimes.com/1990/salzburg.html}}</ref>\n\
             <ref>https://www.salzburg.info/de </ref> [[Datei:Salzburg.jpg]]\n\
             Weblink: http://192.168.1.10/intern https://de.wikipedia.org/wiki/Mozart",
        );
        pages.insert(("Leer", "de"), "'''Leer''' hat keine Einzelnachweise.");
        Self { pages }
    }
}

impl WikitextSource for StubWiki {
    fn fetch_wikitext(&self, title: &str, language: &str) -> Result<String, FetchError> {
        self.pages
            .iter()
            .find(|((t, l), _)| *t == title && *l == language)
            .map(|(_, text)| text.to_string())
            .ok_or_else(|| FetchError::ArticleNotFound {
                title: title.to_string(),
                reason: "missingtitle".to_string(),
            })
    }
}

fn analyzer() -> Analyzer<StubWiki> {
    Analyzer::new(
        StubWiki::new(),
        CitationExtractor::new(DEFAULT_EXCLUDED_HOST).unwrap(),
    )
}

#[test]
fn single_bbc_citation_end_to_end() {
    let report = analyzer().generate_report("X", "en");
    let report = report.as_report().expect("expected a successful report");

    assert_eq!(report.article_title, "X");
    assert_eq!(report.language, "en");
    assert_eq!(report.total_citations, 1);
    assert_eq!(report.unique_domains, 1);
    assert_eq!(report.citations_with_country, 1);
    assert_eq!(report.citations[0].url, "https://www.bbc.co.uk/news/123");
    assert_eq!(report.country_distribution["United Kingdom"], 1);
    assert_eq!(report.tld_distribution["co.uk"], 1);
}

#[test]
fn mixed_article_counts_unclassified_hosts() {
    let report = analyzer().generate_report("Salzburg", "de");
    let report = report.as_report().expect("expected a successful report");

    let urls: Vec<&str> = report.citations.iter().map(|c| c.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            "https://www.stadt-salzburg.at/geschichte",
            "https://www.nytimes.com/1990/salzburg.html",
            "https://www.salzburg.info/de",
            "http://192.168.1.10/intern",
        ]
    );

    assert_eq!(report.total_citations, 4);
    assert_eq!(report.unique_domains, 3);
    assert_eq!(report.citations_with_country, 1);
    assert_eq!(report.country_distribution["Austria"], 1);
    assert_eq!(report.country_distribution["unknown"], 3);
    assert_eq!(
        report.tld_distribution.values().sum::<usize>(),
        report.total_citations
    );
    assert_eq!(
        report.country_distribution.values().sum::<usize>(),
        report.total_citations
    );
}

#[test]
fn articles_without_citations_or_pages_become_error_reports() {
    let analyzer = analyzer();
    assert!(matches!(
        analyzer.generate_report("Leer", "de"),
        ArticleReport::Error(_)
    ));
    assert!(matches!(
        analyzer.generate_report("Gibt es nicht", "de"),
        ArticleReport::Error(_)
    ));
}

#[test]
fn run_over_article_list_keeps_going_and_persists() {
    let titles = ["Gibt es nicht", "Salzburg", "Leer"];
    let results = analyzer().analyze_articles(&titles, "de");

    assert_eq!(
        results.keys().map(String::as_str).collect::<Vec<_>>(),
        titles.to_vec()
    );
    assert!(results["Salzburg"].as_report().is_some());
    assert!(results["Leer"].as_report().is_none());

    let path = std::env::temp_dir().join(format!("geoprov-results-{}.json", std::process::id()));
    analyzer::write_results(&path, &results).unwrap();
    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(written["Gibt es nicht"]["status"], "error");
    assert_eq!(
        written["Gibt es nicht"]["error"],
        "No citations found or article inaccessible"
    );
    assert_eq!(written["Salzburg"]["status"], "ok");
    assert_eq!(written["Salzburg"]["total_citations"], 4);
}
