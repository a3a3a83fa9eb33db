pub mod analyzer;
pub mod args;
pub mod citations;
pub mod country;
pub mod domain;
pub mod error;
pub mod mediawiki;
pub mod report;
pub mod utils;

pub use analyzer::{AnalysisResults, Analyzer};
pub use args::Args;
pub use citations::{Citation, CitationExtractor};
pub use domain::{classify, DomainClassification};
pub use error::FetchError;
pub use mediawiki::{ClientConfig, MediaWikiClient, WikitextSource};
pub use report::{compile, ArticleReport, ErrorReport, GeoprovenanceReport};
