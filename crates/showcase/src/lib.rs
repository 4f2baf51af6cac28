//! Showcase - a GitHub Discussion showcase scraper.
//!
//! This library harvests community showcase submissions posted as comments
//! on a single GitHub Discussion, classifies the links each comment
//! contains, enriches repository links with live statistics, and persists
//! one JSON record per author for a separate site-generation process.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use showcase::{DiscussionCoords, OctocrabTransport, ScrapeOptions, Scraper};
//!
//! let transport = Arc::new(OctocrabTransport::new(token)?);
//! let scraper = Scraper::new(transport, "src/content/showcase");
//!
//! let records = scraper
//!     .run(
//!         &DiscussionCoords {
//!             organization: "acme".into(),
//!             repository: "site".into(),
//!             discussion_number: 2022,
//!         },
//!         ScrapeOptions::default(),
//!     )
//!     .await?;
//! println!("wrote {} records", records.len());
//! ```

pub mod aggregate;
pub mod discussion;
pub mod enrich;
pub mod error;
pub mod links;
pub mod progress;
pub mod record;
pub mod scraper;
pub mod transport;
pub mod writer;

pub use discussion::{Comment, DiscussionCoords};
pub use error::{Result, ScrapeError, short_error_message};
pub use links::{RepoRef, UrlShape, classify_url, extract_links};
pub use progress::{ProgressCallback, ScrapeProgress, emit};
pub use record::{Link, LinkType, RepositoryStats, ShowcaseRecord};
pub use scraper::{ScrapeOptions, Scraper};
pub use transport::{GithubTransport, OctocrabTransport, TransportError};
