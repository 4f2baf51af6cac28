//! Link extraction and classification.
//!
//! Extraction pulls raw URLs out of a comment's rendered markup;
//! classification decides what each URL points at. The two never mix:
//! extraction yields strings, classification is applied per link afterward.

use scraper::{Html, Selector};
use url::Url;

use crate::record::LinkType;

/// A parsed repository coordinate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoRef {
    pub owner: String,
    pub name: String,
}

impl RepoRef {
    /// Stable lookup key for attributing fetch results back to links.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}/{}", self.owner.to_lowercase(), self.name.to_lowercase())
    }
}

/// Classification result over the closed set of URL shapes we care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlShape {
    /// Not a GitHub URL, or a GitHub URL of no recognizable shape.
    Unknown,
    /// A GitHub profile: exactly one path segment.
    User { login: String },
    /// A GitHub repository: owner and name from the first two segments.
    Repo(RepoRef),
}

impl UrlShape {
    /// The link type this shape maps to.
    #[must_use]
    pub fn link_type(&self) -> LinkType {
        match self {
            UrlShape::Unknown => LinkType::Unknown,
            UrlShape::User { .. } => LinkType::GithubUser,
            UrlShape::Repo(_) => LinkType::GithubRepo,
        }
    }
}

/// Classify a URL into one of the recognized shapes.
///
/// Pure and total: unparseable input and non-GitHub hosts classify as
/// [`UrlShape::Unknown`], never an error.
pub fn classify_url(raw: &str) -> UrlShape {
    let Ok(url) = Url::parse(raw) else {
        return UrlShape::Unknown;
    };
    let Some(host) = url.host_str() else {
        return UrlShape::Unknown;
    };
    if normalize_host(host) != "github.com" {
        return UrlShape::Unknown;
    }

    let segments: Vec<&str> = match url.path_segments() {
        Some(segments) => segments.filter(|s| !s.is_empty()).collect(),
        None => return UrlShape::Unknown,
    };

    match segments.as_slice() {
        [] => UrlShape::Unknown,
        [login] => UrlShape::User {
            login: (*login).to_string(),
        },
        [owner, name, ..] => {
            let name = name.strip_suffix(".git").unwrap_or(name);
            if name.is_empty() {
                return UrlShape::Unknown;
            }
            UrlShape::Repo(RepoRef {
                owner: (*owner).to_string(),
                name: name.to_string(),
            })
        }
    }
}

/// Extract every hyperlink target from rendered comment markup.
///
/// Returns `href` values in document order, duplicates preserved.
pub fn extract_links(body_html: &str) -> Vec<String> {
    let fragment = Html::parse_fragment(body_html);
    let selector = Selector::parse("a[href]").expect("selector should parse");

    fragment
        .select(&selector)
        .filter_map(|anchor| anchor.value().attr("href"))
        .map(String::from)
        .collect()
}

fn normalize_host(host: &str) -> String {
    let host = host.trim_end_matches('.').to_lowercase();
    host.strip_prefix("www.").unwrap_or(&host).to_string()
}
