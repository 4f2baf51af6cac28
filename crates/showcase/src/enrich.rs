//! Repository-link enrichment.
//!
//! Every link classified as a GitHub repository gets one metadata query;
//! the result is attached to the link with the original URL preserved.
//! Distinct repositories are fetched concurrently and attributed back by
//! `{owner, name}` key, so fetch completion order never matters. The first
//! failing query aborts the whole run.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::error::{Result, ScrapeError};
use crate::links::{RepoRef, UrlShape, classify_url};
use crate::progress::{ProgressCallback, ScrapeProgress, emit};
use crate::record::{LinkType, RepositoryStats, ShowcaseRecord};
use crate::transport::GithubTransport;

/// Maximum concurrent repository-metadata queries.
const ENRICH_CONCURRENCY: usize = 8;

/// GraphQL query for one repository's statistics.
const REPOSITORY_STATS_QUERY: &str = r#"
query($owner: String!, $name: String!) {
  repository(owner: $owner, name: $name) {
    name
    description
    url
    owner {
      login
      avatarUrl
    }
    stargazerCount
    forkCount
    issues(states: OPEN) {
      totalCount
    }
    pullRequests(states: OPEN) {
      totalCount
    }
    discussions {
      totalCount
    }
    mentionableUsers {
      totalCount
    }
  }
}
"#;

#[derive(Deserialize)]
struct StatsData {
    repository: Option<RepositoryStatsNode>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepositoryStatsNode {
    name: String,
    description: Option<String>,
    url: String,
    owner: OwnerNode,
    stargazer_count: u64,
    fork_count: u64,
    issues: CountNode,
    pull_requests: CountNode,
    discussions: CountNode,
    mentionable_users: CountNode,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OwnerNode {
    login: String,
    avatar_url: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CountNode {
    total_count: u64,
}

impl RepositoryStatsNode {
    fn into_stats(self) -> RepositoryStats {
        RepositoryStats {
            name: self.name,
            owner_login: self.owner.login,
            owner_avatar_url: self.owner.avatar_url,
            description: self.description,
            url: self.url,
            star_count: self.stargazer_count,
            fork_count: self.fork_count,
            open_issue_count: self.issues.total_count,
            open_pull_request_count: self.pull_requests.total_count,
            discussion_count: self.discussions.total_count,
            mentionable_user_count: self.mentionable_users.total_count,
        }
    }
}

/// Fetch live statistics for one repository.
pub async fn fetch_repository_stats(
    transport: &dyn GithubTransport,
    repo: &RepoRef,
) -> Result<RepositoryStats> {
    let variables = json!({ "owner": repo.owner, "name": repo.name });
    let data = transport.query(REPOSITORY_STATS_QUERY, variables).await?;

    let parsed: StatsData = serde_json::from_value(data)
        .map_err(|e| ScrapeError::transport(format!("malformed repository stats: {e}")))?;

    let node = parsed.repository.ok_or_else(|| {
        ScrapeError::transport(format!("repository {}/{} not found", repo.owner, repo.name))
    })?;

    Ok(node.into_stats())
}

/// Attach statistics to every repository link across the records.
///
/// Returns the number of distinct repositories fetched.
pub async fn enrich_records(
    transport: &Arc<dyn GithubTransport>,
    records: &mut [ShowcaseRecord],
    on_progress: Option<&ProgressCallback>,
) -> Result<usize> {
    // Distinct refs only: the same repository posted in several comments is
    // fetched once and attached to each link.
    let mut refs: HashMap<String, RepoRef> = HashMap::new();
    for record in records.iter() {
        for link in &record.links {
            if link.link_type == LinkType::GithubRepo
                && let UrlShape::Repo(repo) = classify_url(&link.url)
            {
                refs.entry(repo.key()).or_insert(repo);
            }
        }
    }

    emit(
        on_progress,
        ScrapeProgress::EnrichingRepos { count: refs.len() },
    );

    let semaphore = Arc::new(Semaphore::new(ENRICH_CONCURRENCY));
    let mut join_set: JoinSet<Result<(String, RepositoryStats)>> = JoinSet::new();

    for (key, repo) in refs {
        let transport = Arc::clone(transport);
        let semaphore = Arc::clone(&semaphore);
        join_set.spawn(async move {
            let _permit = semaphore
                .acquire()
                .await
                .map_err(|e| ScrapeError::transport(e.to_string()))?;
            let stats = fetch_repository_stats(transport.as_ref(), &repo).await?;
            Ok((key, stats))
        });
    }

    let mut fetched: HashMap<String, RepositoryStats> = HashMap::new();
    while let Some(joined) = join_set.join_next().await {
        let (key, stats) =
            joined.map_err(|e| ScrapeError::transport(format!("enrichment task failed: {e}")))??;
        emit(
            on_progress,
            ScrapeProgress::EnrichedRepo {
                owner: stats.owner_login.clone(),
                name: stats.name.clone(),
            },
        );
        fetched.insert(key, stats);
    }

    for record in records.iter_mut() {
        for link in &mut record.links {
            if link.link_type == LinkType::GithubRepo
                && let UrlShape::Repo(repo) = classify_url(&link.url)
                && let Some(stats) = fetched.get(&repo.key())
            {
                let mut stats = stats.clone();
                // Keep the URL the author posted, not the canonical one, so
                // a renamed repository does not drift.
                stats.url = link.url.clone();
                link.stats = Some(stats);
            }
        }
    }

    Ok(fetched.len())
}
