//! Read-only commands against the source blog.

use std::sync::Arc;

use console::style;

use crate::cli::helpers::{
    archive_lister, heading, import_runner, page_source, post_fetcher, print_json, progress_bar,
    spinner, truncate,
};
use crate::config::Settings;
use crate::extract::{extract_content, extract_title};
use crate::models::ArchivePeriod;
use crate::repository::InMemoryPostStore;

/// Print the months `migrate` imports when none are given.
pub fn cmd_months(settings: &Settings) -> anyhow::Result<()> {
    heading(&format!(
        "{} archive month(s) from {}",
        settings.archive_months.len(),
        settings.source_url
    ));
    for period in &settings.archive_months {
        println!("  {}  {}", period, period.archive_url(&settings.source_url));
    }
    Ok(())
}

/// List the candidate post URLs of one archive month.
pub async fn cmd_list(settings: &Settings, period: ArchivePeriod) -> anyhow::Result<()> {
    let lister = archive_lister(settings, page_source(settings)?)?;

    let pb = spinner(&format!("Fetching {}", period.archive_url(lister.base_url())));
    let listing = lister.list_post_urls(period).await;
    pb.finish_and_clear();

    println!("{} {}: {}", style("→").cyan(), period, listing.diagnostics);
    for url in &listing.urls {
        println!("  {}", url);
    }
    if listing.urls.is_empty() {
        println!("  {} No post URLs found", style("!").yellow());
    }
    Ok(())
}

/// Fetch and parse posts of one month without touching the store.
pub async fn cmd_preview(
    settings: &Settings,
    period: ArchivePeriod,
    limit: usize,
    json: bool,
) -> anyhow::Result<()> {
    // Preview never writes; the runner just needs a store handle.
    let mut runner = import_runner(settings, Arc::new(InMemoryPostStore::new()))?;
    let pb = (!json).then(|| progress_bar(limit as u64));
    if let Some(pb) = &pb {
        runner = runner.with_progress(pb.clone());
    }

    let report = runner.preview(period, limit).await;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    if json {
        return print_json(&report);
    }

    println!(
        "\n{} {}: {} ({} URL(s))",
        style("✓").green(),
        report.period,
        report.diagnostics,
        report.total_urls
    );
    for post in &report.posts {
        let marker = if post.has_empty_content() {
            style("!").yellow()
        } else {
            style("✓").green()
        };
        println!(
            "  {} {} [{}] {} chars, {} min",
            marker,
            truncate(&post.title, 60),
            post.category,
            post.content.chars().count(),
            post.reading_time
        );
        println!("      {}", style(&post.slug).dim());
    }
    for url in &report.failed {
        println!("  {} {}", style("✗").red(), url);
    }
    Ok(())
}

/// Show each title and content strategy tried on one post page.
pub async fn cmd_inspect(settings: &Settings, url: &str) -> anyhow::Result<()> {
    let source = page_source(settings)?;

    let pb = spinner(&format!("Fetching {}", url));
    let page = source.fetch_page(url).await;
    pb.finish_and_clear();

    let page = page?.ensure_success()?.ensure_text()?;
    heading(&format!("{} ({} chars)", url, page.body.chars().count()));

    let title = extract_title(&page.body, &settings.author_handle);
    println!("  Title: {}", title.value);
    for attempt in &title.attempts {
        println!("    {}", style(attempt).dim());
    }

    let content = extract_content(&page.body);
    println!("  Content: {} chars", content.value.chars().count());
    for attempt in &content.attempts {
        println!("    {}", style(attempt).dim());
    }
    if content.value.is_empty() {
        println!("  {} No content container found", style("!").yellow());
    } else {
        println!("\n{}", truncate(&content.value, 300));
    }

    // Same assembly the importer uses.
    let post = post_fetcher(settings, source).assemble(url, &page.body);
    println!(
        "\n  slug={} category={} tags={} published={}",
        post.slug,
        post.category,
        post.tags.join(","),
        post.published_at.to_rfc3339()
    );
    Ok(())
}
