//! Progress events emitted during a scrape run.

/// Progress events, in pipeline order.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum ScrapeProgress {
    /// Starting to fetch discussion comments.
    FetchingComments {
        /// Organization owning the repository.
        organization: String,
        /// Repository containing the discussion.
        repository: String,
        /// Discussion number.
        discussion_number: u64,
    },

    /// Fetched one page of comments.
    FetchedPage {
        /// Page number within this run (1-indexed).
        page: u32,
        /// Number of comments on this page.
        count: usize,
        /// Running total of comments fetched so far.
        total_so_far: usize,
    },

    /// Finished fetching all comments.
    FetchComplete {
        /// Total comments fetched.
        total: usize,
    },

    /// Grouped links by author.
    Aggregated {
        /// Number of authors with at least one link.
        authors: usize,
        /// Total links across all authors.
        links: usize,
    },

    /// Starting repository enrichment.
    EnrichingRepos {
        /// Number of distinct repositories to fetch.
        count: usize,
    },

    /// Fetched statistics for one repository.
    EnrichedRepo {
        /// Repository owner.
        owner: String,
        /// Repository name.
        name: String,
    },

    /// Wrote one author record.
    WroteRecord {
        /// Author login.
        author: String,
    },

    /// Finished writing the output directory.
    WriteComplete {
        /// Number of records written.
        written: usize,
    },
}

/// Progress callback for scrape operations.
pub type ProgressCallback = Box<dyn Fn(ScrapeProgress) + Send + Sync>;

/// Emit a progress event if a callback is present.
#[inline]
pub fn emit(on_progress: Option<&ProgressCallback>, event: ScrapeProgress) {
    if let Some(cb) = on_progress {
        cb(event);
    }
}
