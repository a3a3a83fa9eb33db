//! Retrieval of article wikitext from the MediaWiki action API.

use serde::Deserialize;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::error::FetchError;

pub const DEFAULT_USER_AGENT: &str = "WikipediaGeoProvenance";
/// `{lang}` is replaced with the article's language code.
pub const DEFAULT_API_URL: &str = "https://{lang}.wikipedia.org/w/api.php";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Anything that can hand out the raw wikitext of an article.
pub trait WikitextSource {
    fn fetch_wikitext(&self, title: &str, language: &str) -> Result<String, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub user_agent: String,
    pub api_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Blocking API client. One instance is meant to serve every request of a run.
#[derive(Debug)]
pub struct MediaWikiClient {
    http: reqwest::blocking::Client,
    api_url: String,
}

impl MediaWikiClient {
    pub fn new(config: ClientConfig) -> Result<Self, FetchError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout)
            .build()?;

        Ok(Self::with_client(http, config.api_url))
    }

    /// Wraps an already configured HTTP client.
    pub fn with_client(http: reqwest::blocking::Client, api_url: impl Into<String>) -> Self {
        Self {
            http,
            api_url: api_url.into(),
        }
    }

    pub fn api_url(&self, language: &str) -> String {
        self.api_url.replace("{lang}", language)
    }
}

impl WikitextSource for MediaWikiClient {
    fn fetch_wikitext(&self, title: &str, language: &str) -> Result<String, FetchError> {
        let start_time = Instant::now();
        let api_url = self.api_url(language);
        debug!(action = "request", component = "mediawiki", api_url = %api_url, title = title, "Requesting article wikitext");

        let response = self
            .http
            .get(api_url.as_str())
            .query(&[
                ("action", "parse"),
                ("page", title),
                ("format", "json"),
                ("prop", "wikitext"),
            ])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { status });
        }

        let body = response.text()?;
        let wikitext = parse_response(title, &body)?;

        info!(
            action = "complete",
            component = "mediawiki",
            title = title,
            bytes = wikitext.len(),
            duration_ms = start_time.elapsed().as_millis(),
            "Fetched article wikitext"
        );
        Ok(wikitext)
    }
}

#[derive(Deserialize)]
struct ApiResponse {
    parse: Option<Parse>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct Parse {
    wikitext: Option<Wikitext>,
}

#[derive(Deserialize)]
struct Wikitext {
    #[serde(rename = "*")]
    content: String,
}

#[derive(Deserialize)]
struct ApiError {
    code: String,
    info: Option<String>,
}

/// Pulls the wikitext out of an `action=parse&prop=wikitext` response body.
pub fn parse_response(title: &str, body: &str) -> Result<String, FetchError> {
    let response: ApiResponse = serde_json::from_str(body)?;

    if let Some(Parse {
        wikitext: Some(wikitext),
    }) = response.parse
    {
        return Ok(wikitext.content);
    }

    let reason = match response.error {
        Some(ApiError {
            info: Some(info), ..
        }) => info,
        Some(ApiError { code, info: None }) => code,
        None => "response carries no wikitext".to_string(),
    };
    Err(FetchError::ArticleNotFound {
        title: title.to_string(),
        reason,
    })
}
