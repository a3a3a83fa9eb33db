//! Splitting citation hosts into subdomain, registrable domain and public
//! suffix, and inferring a country from the suffix.

use serde::Serialize;
use thiserror::Error;
use tracing::warn;
use url::{Host, Url};

use crate::country;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("unparseable URL: {0}")]
    Parse(#[from] url::ParseError),
    #[error("URL has no host")]
    MissingHost,
    #[error("IP address {0} has no registrable domain")]
    IpAddress(String),
    #[error("host '{0}' is not a valid domain name")]
    InvalidHost(String),
    #[error("host '{0}' has no registrable domain under the public suffix list")]
    NoRegistrableDomain(String),
}

/// Host decomposition per the public suffix list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainParts {
    pub subdomain: String,
    pub registrable_domain: String,
    pub suffix: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainClassification {
    pub url: String,
    /// `None` when the host could not be decomposed.
    pub registrable_domain: Option<String>,
    pub subdomain: String,
    /// Public suffix such as `com` or `co.uk`.
    pub tld: Option<String>,
    pub country: Option<&'static str>,
}

impl DomainClassification {
    fn unclassified(url: &str) -> Self {
        Self {
            url: url.to_string(),
            registrable_domain: None,
            subdomain: String::new(),
            tld: None,
            country: None,
        }
    }

    pub fn is_classified(&self) -> bool {
        self.registrable_domain.is_some()
    }
}

/// Splits a host into subdomain, registrable domain and public suffix.
///
/// Only ICANN suffixes count: private entries such as `blogspot.com` or
/// `github.io` are registrable domains like any other. Internationalized
/// labels come back in their Unicode form.
pub fn decompose_host(host: &str) -> Result<DomainParts, ClassifyError> {
    let host = idna::domain_to_ascii(host.trim_end_matches('.'))
        .map_err(|_| ClassifyError::InvalidHost(host.to_string()))?;
    let no_registrable = || ClassifyError::NoRegistrableDomain(host.clone());

    let suffix_len = icann_suffix_len(&host).ok_or_else(no_registrable)?;
    if suffix_len + 1 >= host.len() {
        return Err(no_registrable());
    }

    let suffix = &host[host.len() - suffix_len..];
    let rest = &host[..host.len() - suffix_len - 1];
    let (subdomain, label) = rest.rsplit_once('.').unwrap_or(("", rest));
    if label.is_empty() {
        return Err(no_registrable());
    }

    Ok(DomainParts {
        subdomain: to_unicode(subdomain),
        registrable_domain: to_unicode(&format!("{label}.{suffix}")),
        suffix: to_unicode(suffix),
    })
}

/// Byte length of the ICANN public suffix of an ASCII host. A private match
/// is retried on its parent labels until an ICANN (or default) rule applies.
fn icann_suffix_len(host: &str) -> Option<usize> {
    let mut candidate = host;
    loop {
        let suffix = psl::suffix(candidate.as_bytes())?;
        let len = suffix.as_bytes().len();
        if !matches!(suffix.typ(), Some(psl::Type::Private)) {
            return Some(len);
        }
        let private = &candidate[candidate.len() - len..];
        candidate = private.split_once('.')?.1;
    }
}

fn to_unicode(domain: &str) -> String {
    if domain.is_empty() {
        return String::new();
    }
    idna::domain_to_unicode(domain).0
}

pub fn decompose_url(url: &str) -> Result<DomainParts, ClassifyError> {
    let parsed = Url::parse(url)?;
    match parsed.host() {
        None => Err(ClassifyError::MissingHost),
        Some(Host::Ipv4(ip)) => Err(ClassifyError::IpAddress(ip.to_string())),
        Some(Host::Ipv6(ip)) => Err(ClassifyError::IpAddress(ip.to_string())),
        Some(Host::Domain(host)) => decompose_host(host),
    }
}

/// Classifies a citation URL. Never fails: a URL whose host cannot be
/// decomposed comes back unclassified so it still counts towards totals.
pub fn classify(url: &str) -> DomainClassification {
    match decompose_url(url) {
        Ok(parts) => DomainClassification {
            url: url.to_string(),
            country: country::country_for_suffix(&parts.suffix),
            registrable_domain: Some(parts.registrable_domain),
            subdomain: parts.subdomain,
            tld: Some(parts.suffix),
        },
        Err(e) => {
            warn!(action = "classify", component = "domain_classifier", url = url, error = %e, "Could not decompose citation URL");
            DomainClassification::unclassified(url)
        }
    }
}

pub fn classify_all<S: AsRef<str>>(urls: &[S]) -> Vec<DomainClassification> {
    urls.iter().map(|url| classify(url.as_ref())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_label_suffix() {
        let c = classify("https://news.bbc.co.uk/2/hi/123.stm");
        assert_eq!(c.registrable_domain.as_deref(), Some("bbc.co.uk"));
        assert_eq!(c.subdomain, "news");
        assert_eq!(c.tld.as_deref(), Some("co.uk"));
        assert_eq!(c.country, Some("United Kingdom"));
    }

    #[test]
    fn generic_tld_has_no_country() {
        let c = classify("https://www.nytimes.com/2020/01/01/a.html");
        assert_eq!(c.registrable_domain.as_deref(), Some("nytimes.com"));
        assert_eq!(c.subdomain, "www");
        assert_eq!(c.tld.as_deref(), Some("com"));
        assert_eq!(c.country, None);
        assert!(c.is_classified());
    }

    #[test]
    fn host_case_and_port_do_not_matter() {
        let c = classify("http://WWW.Spiegel.DE:8080/politik");
        assert_eq!(c.registrable_domain.as_deref(), Some("spiegel.de"));
        assert_eq!(c.country, Some("Germany"));
    }

    #[test]
    fn nested_subdomains_are_kept_whole() {
        let parts = decompose_host("a.b.archive.example.org").unwrap();
        assert_eq!(parts.subdomain, "a.b.archive");
        assert_eq!(parts.registrable_domain, "example.org");
        assert_eq!(parts.suffix, "org");
    }

    #[test]
    fn bare_registrable_domain_has_empty_subdomain() {
        let parts = decompose_host("bbc.co.uk").unwrap();
        assert_eq!(parts.subdomain, "");
        assert_eq!(parts.registrable_domain, "bbc.co.uk");
    }

    #[test]
    fn hosting_platforms_are_registrable_domains() {
        let c = classify("https://foo.blogspot.com/2020/x.html");
        assert_eq!(c.registrable_domain.as_deref(), Some("blogspot.com"));
        assert_eq!(c.subdomain, "foo");
        assert_eq!(c.tld.as_deref(), Some("com"));

        let c = classify("https://user.github.io/p");
        assert_eq!(c.registrable_domain.as_deref(), Some("github.io"));
        assert_eq!(c.subdomain, "user");
        assert_eq!(c.tld.as_deref(), Some("io"));

        let c = classify("https://bucket.s3.amazonaws.com/k");
        assert_eq!(c.registrable_domain.as_deref(), Some("amazonaws.com"));
        assert_eq!(c.subdomain, "bucket.s3");
        assert_eq!(c.tld.as_deref(), Some("com"));

        let c = classify("https://foo.blogspot.de/");
        assert_eq!(c.registrable_domain.as_deref(), Some("blogspot.de"));
        assert_eq!(c.country, Some("Germany"));

        let parts = decompose_host("blogspot.com").unwrap();
        assert_eq!(parts.subdomain, "");
        assert_eq!(parts.registrable_domain, "blogspot.com");
    }

    #[test]
    fn internationalized_hosts_stay_unicode() {
        let c = classify("https://www.bücher.de/x");
        assert_eq!(c.registrable_domain.as_deref(), Some("bücher.de"));
        assert_eq!(c.subdomain, "www");
        assert_eq!(c.tld.as_deref(), Some("de"));
        assert_eq!(c.country, Some("Germany"));

        let parts = decompose_host("WWW.Bücher.DE").unwrap();
        assert_eq!(parts.registrable_domain, "bücher.de");
        assert_eq!(parts.subdomain, "www");
    }

    #[test]
    fn ip_hosts_are_unclassified() {
        let c = classify("http://192.168.0.1/index.html");
        assert!(!c.is_classified());
        assert_eq!(c.tld, None);
        assert_eq!(c.country, None);
        assert_eq!(c.url, "http://192.168.0.1/index.html");
        assert!(matches!(
            decompose_url("http://[::1]/"),
            Err(ClassifyError::IpAddress(_))
        ));
    }

    #[test]
    fn bare_suffix_and_garbage_are_unclassified() {
        assert!(!classify("http://co.uk/").is_classified());
        assert!(!classify("not a url").is_classified());
        assert!(matches!(
            decompose_url("not a url"),
            Err(ClassifyError::Parse(_))
        ));
    }

    #[test]
    fn classify_all_keeps_order() {
        let urls = ["https://www.lemonde.fr/a", "https://example.com/b"];
        let classified = classify_all(&urls);
        assert_eq!(classified.len(), 2);
        assert_eq!(classified[0].country, Some("France"));
        assert_eq!(classified[1].country, None);
    }
}
