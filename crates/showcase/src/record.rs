//! Showcase data model.
//!
//! These are the shapes persisted for the site generator: one
//! [`ShowcaseRecord`] per author, serialized as camelCase JSON.

use serde::{Deserialize, Serialize};

/// What a submitted hyperlink points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkType {
    /// Anything that is not a GitHub profile or repository.
    Unknown,
    /// A GitHub user or organization profile.
    GithubUser,
    /// A GitHub repository.
    GithubRepo,
}

/// One hyperlink extracted from a discussion comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// The URL exactly as it appeared in the comment.
    pub url: String,
    /// Classification of the URL.
    #[serde(rename = "type")]
    pub link_type: LinkType,
    /// Live repository statistics; present only for enriched
    /// [`LinkType::GithubRepo`] links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<RepositoryStats>,
}

impl Link {
    /// Create an unenriched link.
    pub fn new(url: impl Into<String>, link_type: LinkType) -> Self {
        Self {
            url: url.into(),
            link_type,
            stats: None,
        }
    }
}

/// Live repository statistics attached to a repository link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryStats {
    /// Repository name.
    pub name: String,
    /// Owner login (user or organization).
    pub owner_login: String,
    /// Owner avatar URL, when available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_avatar_url: Option<String>,
    /// Repository description, when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// URL of the originating link, not the canonical repository URL, so a
    /// renamed repository does not drift away from what the author posted.
    pub url: String,
    /// Star count.
    pub star_count: u64,
    /// Fork count.
    pub fork_count: u64,
    /// Open issue count.
    pub open_issue_count: u64,
    /// Open pull request count.
    pub open_pull_request_count: u64,
    /// Discussion count.
    pub discussion_count: u64,
    /// Mentionable user count.
    pub mentionable_user_count: u64,
}

/// The per-author aggregate persisted to the content directory.
///
/// `links` preserves first-discovery order across the whole comment
/// sequence; an author with zero links is never materialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowcaseRecord {
    /// Author login.
    pub author: String,
    /// All links the author posted, in discovery order.
    pub links: Vec<Link>,
}
