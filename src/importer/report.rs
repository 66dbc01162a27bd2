//! Import run results.

use console::style;
use serde::Serialize;

use crate::models::{ArchivePeriod, ImportedPost};

/// Title recorded for URLs whose page could not be fetched.
pub const FETCH_ERROR_TITLE: &str = "Parse error";

/// What happened to one candidate URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Saved,
    Skipped,
    Error,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Saved => "saved",
            PostStatus::Skipped => "skipped",
            PostStatus::Error => "error",
        }
    }
}

/// Per-URL outcome of an import run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostOutcome {
    pub title: String,
    pub url: String,
    pub status: PostStatus,
    /// Failure cause, duplicate key, or review note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Aggregate result of an import run.
///
/// `fetched == saved + skipped + errors` always holds.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
    pub fetched: usize,
    pub saved: usize,
    pub skipped: usize,
    pub errors: usize,
    pub posts: Vec<PostOutcome>,
    pub diagnostics: Vec<String>,
}

impl ImportReport {
    pub(crate) fn record(&mut self, outcome: PostOutcome) {
        match outcome.status {
            PostStatus::Saved => self.saved += 1,
            PostStatus::Skipped => self.skipped += 1,
            PostStatus::Error => self.errors += 1,
        }
        self.posts.push(outcome);
    }

    /// Outcomes with the given status.
    pub fn with_status(&self, status: PostStatus) -> impl Iterator<Item = &PostOutcome> {
        self.posts.iter().filter(move |p| p.status == status)
    }

    /// One-line summary.
    pub fn message(&self) -> String {
        format!(
            "Migration complete: {} saved, {} skipped, {} errors",
            self.saved, self.skipped, self.errors
        )
    }

    pub fn print_summary(&self) {
        println!("\n{} Import complete:", style("✓").green());
        println!("  Posts fetched: {}", style(self.fetched).dim());
        println!("  Posts saved:   {}", style(self.saved).green());
        println!("  Posts skipped: {}", style(self.skipped).yellow());
        if self.errors > 0 {
            println!("  Errors:        {}", style(self.errors).red());
            for outcome in self.with_status(PostStatus::Error) {
                println!(
                    "    {} {} ({})",
                    style("✗").red(),
                    outcome.url,
                    outcome.detail.as_deref().unwrap_or("unknown error")
                );
            }
        }

        let flagged: Vec<&String> = self
            .diagnostics
            .iter()
            .filter(|d| d.ends_with("needs manual review"))
            .collect();
        if !flagged.is_empty() {
            println!(
                "  {} {} post(s) need manual review:",
                style("!").yellow(),
                flagged.len()
            );
            for note in flagged {
                println!("    {}", note);
            }
        }
    }
}

/// Posts fetched for one period without saving anything.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewReport {
    pub period: ArchivePeriod,
    pub total_urls: usize,
    pub diagnostics: String,
    pub posts: Vec<ImportedPost>,
    /// URLs whose page could not be fetched.
    pub failed: Vec<String>,
}
