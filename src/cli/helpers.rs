//! Shared helper functions for CLI commands.

use std::sync::Arc;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::archive::ArchiveLister;
use crate::config::Settings;
use crate::http_client::{HttpClient, PageSource};
use crate::importer::{ImportOptions, ImportRunner};
use crate::post::PostFetcher;
use crate::repository::{DieselPostStore, PostStore, SqlitePool};

/// Build the HTTP page source from settings.
pub fn page_source(settings: &Settings) -> anyhow::Result<Arc<dyn PageSource>> {
    let client = HttpClient::builder(settings.request_timeout())
        .user_agent(&settings.user_agent)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))?;
    Ok(Arc::new(client))
}

pub fn archive_lister(
    settings: &Settings,
    source: Arc<dyn PageSource>,
) -> anyhow::Result<ArchiveLister> {
    Ok(ArchiveLister::new(source, &settings.source_url)?)
}

pub fn post_fetcher(settings: &Settings, source: Arc<dyn PageSource>) -> PostFetcher {
    PostFetcher::new(source, &settings.author_handle).with_slug_max_len(settings.slug_max_len)
}

/// Open the SQLite post store. Fails if `lekh init` has not been run.
pub fn open_store(settings: &Settings) -> anyhow::Result<DieselPostStore> {
    if !settings.database_exists() {
        anyhow::bail!(
            "Database not found at {}. Run 'lekh init' first.",
            settings.database_path().display()
        );
    }
    Ok(DieselPostStore::new(SqlitePool::new(&settings.database_url())))
}

/// Wire an import runner against the live blog.
pub fn import_runner(
    settings: &Settings,
    store: Arc<dyn PostStore>,
) -> anyhow::Result<ImportRunner> {
    let source = page_source(settings)?;
    Ok(ImportRunner::new(
        archive_lister(settings, source.clone())?,
        post_fetcher(settings, source),
        store,
        ImportOptions {
            collection: settings.collection.clone(),
            post_delay: settings.request_delay(),
        },
    ))
}

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(message.to_string());
    pb
}

pub fn progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );
    pb
}

/// Truncate a title for one-line listings.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

pub fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn heading(text: &str) {
    println!("{} {}", style("→").cyan(), text);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("नमस्ते", 10), "नमस्ते");
        assert_eq!(truncate("abcdef", 4), "abc…");
    }

    #[test]
    fn test_open_store_requires_database() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::with_data_dir(dir.path().to_path_buf());
        assert!(open_store(&settings).is_err());
    }
}
