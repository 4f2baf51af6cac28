//! Insertion-ordered grouping of links by author.
//!
//! Record order is the order each author's first link was discovered, not
//! comment index or alphabetical order. The grouping keeps an explicit key
//! sequence next to the bucket map instead of leaning on any map's
//! iteration order.

use std::collections::HashMap;

use crate::record::{Link, ShowcaseRecord};

/// Accumulator folding (author, link) pairs into per-author buckets.
///
/// A bucket is created the first time an author contributes a link, so an
/// author who commented without posting links never appears at all.
#[derive(Debug, Default)]
pub struct AuthorBuckets {
    order: Vec<String>,
    buckets: HashMap<String, Vec<Link>>,
}

impl AuthorBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed buckets from records produced by a prior run, preserving their
    /// order ahead of anything discovered later.
    pub fn seed(records: impl IntoIterator<Item = ShowcaseRecord>) -> Self {
        let mut buckets = Self::new();
        for record in records {
            for link in record.links {
                buckets.push(&record.author, link);
            }
        }
        buckets
    }

    /// Append a link to the author's bucket, creating it on first sight.
    pub fn push(&mut self, author: &str, link: Link) {
        match self.buckets.get_mut(author) {
            Some(links) => links.push(link),
            None => {
                self.order.push(author.to_string());
                self.buckets.insert(author.to_string(), vec![link]);
            }
        }
    }

    /// Number of authors with at least one link.
    #[must_use]
    pub fn author_count(&self) -> usize {
        self.order.len()
    }

    /// Total links across all buckets.
    #[must_use]
    pub fn link_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Emit one record per bucket, in bucket-creation order.
    #[must_use]
    pub fn into_records(mut self) -> Vec<ShowcaseRecord> {
        self.order
            .into_iter()
            .map(|author| {
                let links = self
                    .buckets
                    .remove(&author)
                    .expect("every ordered key has a bucket");
                ShowcaseRecord { author, links }
            })
            .collect()
    }
}
