//! Extraction of external citation URLs from raw wikitext.

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::trace;
use url::Url;

/// Host whose links are internal to the encyclopedia and never count as citations.
pub const DEFAULT_EXCLUDED_HOST: &str = "wikipedia.org";

/// `url=` parameter of a citation template, up to the next template delimiter.
const URL_PARAM_PATTERN: &str = r"(?i)url\s*=\s*([^|}\n]+)";
/// Bare external link, up to whitespace or a template delimiter.
const DIRECT_URL_PATTERN: &str = r"(?i)https?://[^\s|}]+";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    pub url: String,
    /// Network location as written in the wikitext, e.g. `www.bbc.co.uk:8080`.
    pub domain: String,
}

#[derive(Debug, Clone)]
pub struct CitationExtractor {
    url_param: Regex,
    direct_url: Regex,
    excluded_host: String,
}

impl CitationExtractor {
    pub fn new(excluded_host: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            url_param: Regex::new(URL_PARAM_PATTERN)?,
            direct_url: Regex::new(DIRECT_URL_PATTERN)?,
            excluded_host: excluded_host.trim().to_ascii_lowercase(),
        })
    }

    /// Collects the external citation URLs of an article.
    ///
    /// `url=` template parameters are scanned first, then bare links. A URL
    /// found more than once is reported once, at the position where it was
    /// first seen. Candidates that are not absolute external http(s) URLs are
    /// dropped.
    pub fn extract(&self, wikitext: &str) -> Vec<Citation> {
        let param_matches = self
            .url_param
            .captures_iter(wikitext)
            .filter_map(|captures| captures.get(1));
        let direct_matches = self.direct_url.find_iter(wikitext);

        let mut citations: IndexMap<&str, Citation> = IndexMap::new();
        for candidate in param_matches.chain(direct_matches) {
            let url = clean_candidate(candidate.as_str());
            match self.external_netloc(url) {
                Some(domain) => {
                    citations.insert(
                        url,
                        Citation {
                            url: url.to_string(),
                            domain: domain.to_string(),
                        },
                    );
                }
                None => trace!(
                    action = "reject",
                    component = "citation_extraction",
                    candidate = url,
                    "Dropped candidate URL"
                ),
            }
        }

        citations.into_values().collect()
    }

    /// Returns the network location of `candidate` if it is an external
    /// http(s) URL.
    fn external_netloc<'a>(&self, candidate: &'a str) -> Option<&'a str> {
        let parsed = Url::parse(candidate).ok()?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return None;
        }

        let netloc = raw_netloc(candidate)?;
        if !self.excluded_host.is_empty()
            && netloc.to_ascii_lowercase().contains(&self.excluded_host)
        {
            return None;
        }

        Some(netloc)
    }
}

/// Strips whitespace and the `|`/`}` template syntax that bleeds into a match.
fn clean_candidate(raw: &str) -> &str {
    raw.trim().trim_end_matches(['|', '}'])
}

fn raw_netloc(url: &str) -> Option<&str> {
    let (_, rest) = url.split_once("://")?;
    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let netloc = &rest[..end];
    (!netloc.is_empty()).then_some(netloc)
}
