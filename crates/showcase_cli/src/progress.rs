//! Progress reporting for scrape runs.
//!
//! Two modes, auto-detected:
//! - Interactive mode (TTY): animated spinner and bar using indicatif
//! - Logging mode (non-TTY): structured logging using tracing

use std::sync::{Arc, Mutex};

use console::Term;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use showcase::{ProgressCallback, ScrapeProgress};

/// Progress reporter that handles both interactive and logging modes.
pub enum ProgressReporter {
    /// Interactive progress display for TTY.
    Interactive(InteractiveReporter),
    /// Structured logging for non-TTY (CI, pipes).
    Logging(LoggingReporter),
}

impl ProgressReporter {
    /// Create a new progress reporter, auto-detecting TTY mode.
    pub fn new() -> Self {
        if Term::stdout().is_term() {
            Self::Interactive(InteractiveReporter::new())
        } else {
            Self::Logging(LoggingReporter)
        }
    }

    pub fn handle(&self, event: ScrapeProgress) {
        match self {
            Self::Interactive(reporter) => reporter.handle(event),
            Self::Logging(reporter) => reporter.handle(event),
        }
    }
}

/// Wrap a shared reporter as the library's progress callback.
pub fn callback(reporter: Arc<ProgressReporter>) -> ProgressCallback {
    Box::new(move |event| reporter.handle(event))
}

#[derive(Default)]
struct Bars {
    fetch: Option<ProgressBar>,
    enrich: Option<ProgressBar>,
}

/// Animated progress bars for interactive terminals.
pub struct InteractiveReporter {
    multi: MultiProgress,
    bars: Mutex<Bars>,
}

impl InteractiveReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            bars: Mutex::new(Bars::default()),
        }
    }

    fn handle(&self, event: ScrapeProgress) {
        let mut bars = self.bars.lock().unwrap_or_else(|e| e.into_inner());

        match event {
            ScrapeProgress::FetchingComments {
                organization,
                repository,
                discussion_number,
            } => {
                let spinner = self.multi.add(ProgressBar::new_spinner());
                spinner.set_style(
                    ProgressStyle::with_template("{spinner} {msg}")
                        .expect("template should parse"),
                );
                spinner.set_message(format!(
                    "Fetching comments from {organization}/{repository}#{discussion_number}"
                ));
                spinner.enable_steady_tick(std::time::Duration::from_millis(100));
                bars.fetch = Some(spinner);
            }

            ScrapeProgress::FetchedPage {
                page,
                total_so_far,
                ..
            } => {
                if let Some(spinner) = &bars.fetch {
                    spinner.set_message(format!(
                        "Fetched page {page} ({total_so_far} comments)"
                    ));
                }
            }

            ScrapeProgress::FetchComplete { total } => {
                if let Some(spinner) = bars.fetch.take() {
                    spinner.finish_with_message(format!("Fetched {total} comments"));
                }
            }

            ScrapeProgress::Aggregated { authors, links } => {
                let _ = self
                    .multi
                    .println(format!("{links} links across {authors} authors"));
            }

            ScrapeProgress::EnrichingRepos { count } => {
                let bar = self.multi.add(ProgressBar::new(count as u64));
                bar.set_style(
                    ProgressStyle::with_template(
                        "{bar:40.cyan/blue} {pos}/{len} repositories {msg}",
                    )
                    .expect("template should parse"),
                );
                bars.enrich = Some(bar);
            }

            ScrapeProgress::EnrichedRepo { owner, name } => {
                if let Some(bar) = &bars.enrich {
                    bar.set_message(format!("{owner}/{name}"));
                    bar.inc(1);
                }
            }

            ScrapeProgress::WroteRecord { .. } => {}

            ScrapeProgress::WriteComplete { written } => {
                if let Some(bar) = bars.enrich.take() {
                    bar.finish_and_clear();
                }
                let _ = self.multi.println(format!("Wrote {written} records"));
            }

            _ => {}
        }
    }
}

/// Logging reporter using tracing for structured output.
pub struct LoggingReporter;

impl LoggingReporter {
    fn handle(&self, event: ScrapeProgress) {
        match event {
            ScrapeProgress::FetchingComments {
                organization,
                repository,
                discussion_number,
            } => {
                tracing::info!(
                    organization = %organization,
                    repository = %repository,
                    discussion_number,
                    "Fetching comments"
                );
            }

            ScrapeProgress::FetchedPage {
                page,
                count,
                total_so_far,
            } => {
                tracing::debug!(page, count, total_so_far, "Fetched page");
            }

            ScrapeProgress::FetchComplete { total } => {
                tracing::info!(total, "Fetch complete");
            }

            ScrapeProgress::Aggregated { authors, links } => {
                tracing::info!(authors, links, "Aggregated links by author");
            }

            ScrapeProgress::EnrichingRepos { count } => {
                tracing::info!(count, "Enriching repository links");
            }

            ScrapeProgress::EnrichedRepo { owner, name } => {
                tracing::debug!(owner = %owner, name = %name, "Enriched repository");
            }

            ScrapeProgress::WroteRecord { author } => {
                tracing::debug!(author = %author, "Wrote record");
            }

            ScrapeProgress::WriteComplete { written } => {
                tracing::info!(written, "Write complete");
            }

            _ => {}
        }
    }
}
