//! Discussion comment pagination.
//!
//! Fetches the full, ordered comment list for one discussion by walking
//! the comment connection cursor until exhausted. Pages are strictly
//! sequential: each request's cursor comes from the prior response.

use serde::Deserialize;
use serde_json::json;

use crate::error::{Result, ScrapeError};
use crate::progress::{ProgressCallback, ScrapeProgress, emit};
use crate::transport::GithubTransport;

/// Comments requested per page.
const PAGE_SIZE: u32 = 100;

/// Login attributed to comments whose author account was deleted.
const DELETED_AUTHOR_LOGIN: &str = "ghost";

/// GraphQL query for one page of discussion comments.
const DISCUSSION_COMMENTS_QUERY: &str = r#"
query($owner: String!, $repo: String!, $number: Int!, $first: Int!, $after: String) {
  repository(owner: $owner, name: $repo) {
    discussion(number: $number) {
      comments(first: $first, after: $after) {
        pageInfo {
          endCursor
          hasNextPage
        }
        nodes {
          author {
            login
          }
          bodyHTML
        }
      }
    }
  }
}
"#;

/// Coordinates identifying the discussion to scrape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscussionCoords {
    /// Organization (or user) owning the repository.
    pub organization: String,
    /// Repository containing the discussion.
    pub repository: String,
    /// Discussion number.
    pub discussion_number: u64,
}

/// One discussion comment: its author and rendered markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Author login.
    pub author: String,
    /// Rendered HTML body.
    pub body_html: String,
}

#[derive(Deserialize)]
struct DiscussionData {
    repository: Option<RepositoryNode>,
}

#[derive(Deserialize)]
struct RepositoryNode {
    discussion: Option<DiscussionNode>,
}

#[derive(Deserialize)]
struct DiscussionNode {
    comments: CommentConnection,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentConnection {
    page_info: PageInfo,
    nodes: Vec<CommentNode>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageInfo {
    end_cursor: Option<String>,
    has_next_page: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentNode {
    author: Option<CommentAuthor>,
    #[serde(rename = "bodyHTML")]
    body_html: String,
}

#[derive(Deserialize)]
struct CommentAuthor {
    login: String,
}

/// Fetch every comment on the discussion, in discussion order.
///
/// The returned sequence is the concatenation of pages in fetch order;
/// within a page, nodes keep the order the API returned. A failing page
/// propagates immediately and no partial list is used.
pub async fn fetch_all_comments(
    transport: &dyn GithubTransport,
    coords: &DiscussionCoords,
    starting_cursor: Option<String>,
    on_progress: Option<&ProgressCallback>,
) -> Result<Vec<Comment>> {
    let mut comments = Vec::new();
    let mut cursor = starting_cursor;
    let mut page = 1u32;

    loop {
        let variables = json!({
            "owner": coords.organization,
            "repo": coords.repository,
            "number": coords.discussion_number,
            "first": PAGE_SIZE,
            "after": cursor,
        });

        let data = transport
            .query(DISCUSSION_COMMENTS_QUERY, variables)
            .await?;
        let parsed: DiscussionData = serde_json::from_value(data)
            .map_err(|e| ScrapeError::transport(format!("malformed comments page: {e}")))?;

        let connection = parsed
            .repository
            .and_then(|r| r.discussion)
            .ok_or_else(|| {
                ScrapeError::transport(format!(
                    "discussion {}/{}#{} not found",
                    coords.organization, coords.repository, coords.discussion_number
                ))
            })?
            .comments;

        let count = connection.nodes.len();
        for node in connection.nodes {
            comments.push(Comment {
                author: node
                    .author
                    .map(|a| a.login)
                    .unwrap_or_else(|| DELETED_AUTHOR_LOGIN.to_string()),
                body_html: node.body_html,
            });
        }

        emit(
            on_progress,
            ScrapeProgress::FetchedPage {
                page,
                count,
                total_so_far: comments.len(),
            },
        );

        if !connection.page_info.has_next_page {
            break;
        }
        cursor = connection.page_info.end_cursor;
        page += 1;
    }

    Ok(comments)
}
