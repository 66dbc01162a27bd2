//! Import runner: archive months → post URLs → posts → deduplicated store
//! writes.
//!
//! Runs strictly sequentially. Per-URL failures are recorded in the report
//! and never abort the run; only an unreachable store does.

mod report;

pub use report::{ImportReport, PostOutcome, PostStatus, PreviewReport, FETCH_ERROR_TITLE};

use std::sync::Arc;
use std::time::Duration;

use indicatif::ProgressBar;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::archive::ArchiveLister;
use crate::models::{ArchivePeriod, ImportedPost};
use crate::post::PostFetcher;
use crate::repository::{PostStore, StoreError};

/// Default delay between post fetches.
pub const DEFAULT_POST_DELAY: Duration = Duration::from_millis(200);

/// Default per-month cap on processed URLs.
pub const DEFAULT_MAX_PER_MONTH: usize = 50;

/// Default target collection.
pub const DEFAULT_COLLECTION: &str = "blogs";

/// Fatal import errors.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[source] StoreError),
}

/// Where a run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    ListingArchive,
    FetchingPost,
    DedupCheck,
    Skipping,
    Saving,
    Done,
}

impl RunPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunPhase::Idle => "idle",
            RunPhase::ListingArchive => "listing_archive",
            RunPhase::FetchingPost => "fetching_post",
            RunPhase::DedupCheck => "dedup_check",
            RunPhase::Skipping => "skipping",
            RunPhase::Saving => "saving",
            RunPhase::Done => "done",
        }
    }
}

/// Configuration for import runs.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Collection posts are written to.
    pub collection: String,
    /// Pause before each post fetch except the first of a month.
    pub post_delay: Duration,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            collection: DEFAULT_COLLECTION.to_string(),
            post_delay: DEFAULT_POST_DELAY,
        }
    }
}

/// One import invocation.
#[derive(Debug, Clone)]
pub struct ImportRequest {
    /// Periods to import, processed in this order.
    pub months: Vec<ArchivePeriod>,
    /// At most this many URLs are processed per month.
    pub max_per_month: usize,
}

impl ImportRequest {
    pub fn new(months: Vec<ArchivePeriod>) -> Self {
        Self {
            months,
            max_per_month: DEFAULT_MAX_PER_MONTH,
        }
    }

    pub fn with_max_per_month(mut self, max: usize) -> Self {
        self.max_per_month = max;
        self
    }
}

/// Orchestrates listing, fetching, deduplication and saving.
pub struct ImportRunner {
    lister: ArchiveLister,
    fetcher: PostFetcher,
    store: Arc<dyn PostStore>,
    options: ImportOptions,
    phase: RunPhase,
    progress: Option<ProgressBar>,
}

impl ImportRunner {
    pub fn new(
        lister: ArchiveLister,
        fetcher: PostFetcher,
        store: Arc<dyn PostStore>,
        options: ImportOptions,
    ) -> Self {
        Self {
            lister,
            fetcher,
            store,
            options,
            phase: RunPhase::Idle,
            progress: None,
        }
    }

    /// Report per-post progress on a progress bar or spinner.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Phase of the current or most recent run.
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    fn set_phase(&mut self, phase: RunPhase) {
        debug!("Import phase: {} -> {}", self.phase.as_str(), phase.as_str());
        self.phase = phase;
    }

    fn progress_message(&self, message: String) {
        if let Some(pb) = &self.progress {
            pb.set_message(message);
        }
    }

    /// Run an import.
    ///
    /// Fails only if the store is unreachable before any work starts.
    pub async fn run(&mut self, request: &ImportRequest) -> Result<ImportReport, ImportError> {
        self.set_phase(RunPhase::Idle);
        self.store
            .health_check()
            .await
            .map_err(ImportError::StoreUnavailable)?;

        info!(
            "Importing {} month(s) into '{}' (max {} per month)",
            request.months.len(),
            self.options.collection,
            request.max_per_month
        );

        let mut report = ImportReport::default();

        for &period in &request.months {
            self.set_phase(RunPhase::ListingArchive);
            self.progress_message(format!("Listing {}", period));

            let listing = self.lister.list_post_urls(period).await;
            report
                .diagnostics
                .push(format!("{}: {}", period, listing.diagnostics));

            for (index, url) in listing
                .urls
                .iter()
                .take(request.max_per_month)
                .enumerate()
            {
                if index > 0 && !self.options.post_delay.is_zero() {
                    tokio::time::sleep(self.options.post_delay).await;
                }

                let outcome = self.process_url(url, &mut report).await;
                report.fetched += 1;
                report.record(outcome);

                if let Some(pb) = &self.progress {
                    pb.inc(1);
                }
            }
        }

        self.set_phase(RunPhase::Done);
        info!("{}", report.message());
        Ok(report)
    }

    async fn process_url(&mut self, url: &str, report: &mut ImportReport) -> PostOutcome {
        self.set_phase(RunPhase::FetchingPost);
        self.progress_message(url.to_string());

        let post = match self.fetcher.try_fetch_post(url).await {
            Ok(post) => post,
            Err(e) => {
                warn!("Failed to fetch post {}: {}", url, e);
                return PostOutcome {
                    title: FETCH_ERROR_TITLE.to_string(),
                    url: url.to_string(),
                    status: PostStatus::Error,
                    detail: Some(e.to_string()),
                };
            }
        };

        self.set_phase(RunPhase::DedupCheck);
        let collection = self.options.collection.clone();
        match self.store.find_existing(&collection, &post).await {
            Ok(Some((field, existing))) => {
                self.set_phase(RunPhase::Skipping);
                debug!(
                    "Skipping {}: {} matches post {}",
                    url,
                    field.as_str(),
                    existing.id
                );
                return PostOutcome {
                    title: post.title,
                    url: url.to_string(),
                    status: PostStatus::Skipped,
                    detail: Some(format!("existing {}", field.as_str())),
                };
            }
            Ok(None) => {}
            Err(e) => {
                warn!("Lookup failed for {}: {}", url, e);
                return store_failure(post, url, e);
            }
        }

        self.set_phase(RunPhase::Saving);
        let review_note = empty_content_note(&post, url);
        match self.store.insert(&collection, &post).await {
            Ok(id) => {
                info!("Saved '{}' as {}", post.title, id);
                if let Some(note) = &review_note {
                    report.diagnostics.push(note.clone());
                }
                PostOutcome {
                    title: post.title,
                    url: url.to_string(),
                    status: PostStatus::Saved,
                    detail: review_note,
                }
            }
            Err(e) => {
                warn!("Failed to save {}: {}", url, e);
                store_failure(post, url, e)
            }
        }
    }

    /// Fetch up to `limit` posts of one period without writing anything.
    pub async fn preview(&mut self, period: ArchivePeriod, limit: usize) -> PreviewReport {
        self.set_phase(RunPhase::ListingArchive);
        let listing = self.lister.list_post_urls(period).await;

        let mut posts = Vec::new();
        let mut failed = Vec::new();
        for (index, url) in listing.urls.iter().take(limit).enumerate() {
            if index > 0 && !self.options.post_delay.is_zero() {
                tokio::time::sleep(self.options.post_delay).await;
            }
            self.set_phase(RunPhase::FetchingPost);
            self.progress_message(url.to_string());

            match self.fetcher.fetch_post(url).await {
                Some(post) => posts.push(post),
                None => failed.push(url.clone()),
            }
            if let Some(pb) = &self.progress {
                pb.inc(1);
            }
        }

        self.set_phase(RunPhase::Done);
        PreviewReport {
            period,
            total_urls: listing.urls.len(),
            diagnostics: listing.diagnostics,
            posts,
            failed,
        }
    }
}

fn store_failure(post: ImportedPost, url: &str, e: StoreError) -> PostOutcome {
    PostOutcome {
        title: post.title,
        url: url.to_string(),
        status: PostStatus::Error,
        detail: Some(e.to_string()),
    }
}

/// Review note for posts whose body could not be extracted.
fn empty_content_note(post: &ImportedPost, url: &str) -> Option<String> {
    post.has_empty_content()
        .then(|| format!("{}: empty content, needs manual review", url))
}
