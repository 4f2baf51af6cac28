//! The scrape orchestrator.
//!
//! Sequences the full pipeline: paginate the discussion's comments, extract
//! and classify links, group by author, enrich repository links, replace the
//! output directory. All data is collected and enriched before the first
//! destructive filesystem operation, so a transport failure never leaves a
//! half-written directory.

use std::path::PathBuf;
use std::sync::Arc;

use crate::aggregate::AuthorBuckets;
use crate::discussion::{DiscussionCoords, fetch_all_comments};
use crate::enrich::enrich_records;
use crate::error::Result;
use crate::links::{classify_url, extract_links};
use crate::progress::{ProgressCallback, ScrapeProgress, emit};
use crate::record::{Link, ShowcaseRecord};
use crate::transport::GithubTransport;
use crate::writer::write_records;

/// Options for one scrape run.
#[derive(Default)]
pub struct ScrapeOptions {
    /// Resume pagination from this cursor instead of the first page.
    pub starting_cursor: Option<String>,
    /// Records from a prior run; their authors keep their position ahead of
    /// anything discovered in this run.
    pub prior_records: Vec<ShowcaseRecord>,
    /// Progress event sink.
    pub on_progress: Option<ProgressCallback>,
}

/// The pipeline entry point exposed to external callers.
pub struct Scraper {
    transport: Arc<dyn GithubTransport>,
    output_root: PathBuf,
}

impl Scraper {
    pub fn new(transport: Arc<dyn GithubTransport>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            transport,
            output_root: output_root.into(),
        }
    }

    /// Run the full pipeline and return the records just persisted, in
    /// aggregation order.
    pub async fn run(
        &self,
        coords: &DiscussionCoords,
        options: ScrapeOptions,
    ) -> Result<Vec<ShowcaseRecord>> {
        let on_progress = options.on_progress.as_ref();

        emit(
            on_progress,
            ScrapeProgress::FetchingComments {
                organization: coords.organization.clone(),
                repository: coords.repository.clone(),
                discussion_number: coords.discussion_number,
            },
        );

        let comments = fetch_all_comments(
            self.transport.as_ref(),
            coords,
            options.starting_cursor,
            on_progress,
        )
        .await?;

        emit(
            on_progress,
            ScrapeProgress::FetchComplete {
                total: comments.len(),
            },
        );

        let mut buckets = AuthorBuckets::seed(options.prior_records);
        for comment in &comments {
            for url in extract_links(&comment.body_html) {
                let link_type = classify_url(&url).link_type();
                buckets.push(&comment.author, Link::new(url, link_type));
            }
        }

        emit(
            on_progress,
            ScrapeProgress::Aggregated {
                authors: buckets.author_count(),
                links: buckets.link_count(),
            },
        );

        let mut records = buckets.into_records();
        enrich_records(&self.transport, &mut records, on_progress).await?;
        write_records(&self.output_root, &records, on_progress).await?;

        Ok(records)
    }
}
