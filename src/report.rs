//! Aggregation of classified citations into per-article reports.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

use crate::citations::Citation;
use crate::domain::DomainClassification;

/// Bucket for citations without a country or public suffix.
pub const UNKNOWN: &str = "unknown";

pub const NO_CITATIONS_MESSAGE: &str = "No citations found or article inaccessible";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeoprovenanceReport {
    pub article_title: String,
    pub language: String,
    pub total_citations: usize,
    pub unique_domains: usize,
    pub country_distribution: BTreeMap<String, usize>,
    pub tld_distribution: BTreeMap<String, usize>,
    pub citations_with_country: usize,
    pub citations: Vec<Citation>,
    pub timestamp: DateTime<Utc>,
}

impl GeoprovenanceReport {
    /// Countries ordered by descending citation count, ties broken by name.
    /// The unknown bucket is left out.
    pub fn top_countries(&self, n: usize) -> Vec<(&str, usize)> {
        let mut countries: Vec<(&str, usize)> = self
            .country_distribution
            .iter()
            .filter(|(country, _)| country.as_str() != UNKNOWN)
            .map(|(country, count)| (country.as_str(), *count))
            .collect();
        countries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        countries.truncate(n);
        countries
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    pub error: String,
}

/// Outcome of analysing one article, tagged with `"status"` when serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ArticleReport {
    Ok(GeoprovenanceReport),
    Error(ErrorReport),
}

impl ArticleReport {
    pub fn no_citations() -> Self {
        ArticleReport::Error(ErrorReport {
            error: NO_CITATIONS_MESSAGE.to_string(),
        })
    }

    pub fn as_report(&self) -> Option<&GeoprovenanceReport> {
        match self {
            ArticleReport::Ok(report) => Some(report),
            ArticleReport::Error(_) => None,
        }
    }
}

pub fn compile(
    article_title: &str,
    language: &str,
    citations: Vec<Citation>,
    classifications: &[DomainClassification],
) -> ArticleReport {
    compile_at(article_title, language, citations, classifications, Utc::now())
}

/// Builds the report for `citations`, stamped with `timestamp`.
///
/// Unclassified citations count towards `total_citations` and fall into the
/// [`UNKNOWN`] country and suffix buckets, so both distributions always sum
/// to `total_citations`. They are not counted in `unique_domains`.
///
/// `classifications` must hold exactly one entry per citation.
pub fn compile_at(
    article_title: &str,
    language: &str,
    citations: Vec<Citation>,
    classifications: &[DomainClassification],
    timestamp: DateTime<Utc>,
) -> ArticleReport {
    debug_assert_eq!(
        citations.len(),
        classifications.len(),
        "one classification per citation"
    );
    if citations.is_empty() {
        return ArticleReport::no_citations();
    }

    let unique_domains = classifications
        .iter()
        .filter_map(|c| c.registrable_domain.as_deref())
        .collect::<HashSet<_>>()
        .len();

    let mut country_distribution = BTreeMap::new();
    let mut tld_distribution = BTreeMap::new();
    for classification in classifications {
        let country = classification.country.unwrap_or(UNKNOWN);
        *country_distribution.entry(country.to_string()).or_insert(0) += 1;

        let tld = classification.tld.as_deref().unwrap_or(UNKNOWN);
        *tld_distribution.entry(tld.to_string()).or_insert(0) += 1;
    }

    let citations_with_country = classifications
        .iter()
        .filter(|c| c.country.is_some())
        .count();

    ArticleReport::Ok(GeoprovenanceReport {
        article_title: article_title.to_string(),
        language: language.to_string(),
        total_citations: citations.len(),
        unique_domains,
        country_distribution,
        tld_distribution,
        citations_with_country,
        citations,
        timestamp,
    })
}
