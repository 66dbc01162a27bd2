//! Review commands over stored posts.

use console::style;

use crate::cli::helpers::{heading, open_store, truncate};
use crate::config::Settings;
use crate::repository::PostStore;

/// Posts with less content than this are flagged for review.
const MIN_CONTENT_CHARS: usize = 50;

/// List stored posts with content length and featured flag.
pub async fn cmd_verify(settings: &Settings) -> anyhow::Result<()> {
    let store = open_store(settings)?;
    let posts = store.list(&settings.collection).await?;

    heading(&format!(
        "{} post(s) in '{}'",
        posts.len(),
        settings.collection
    ));

    let mut flagged = 0;
    for stored in &posts {
        let chars = stored.post.content.chars().count();
        let star = if stored.post.is_featured { "★" } else { "☆" };
        println!(
            "  {} {} ({} chars) {}",
            star,
            truncate(&stored.post.title, 60),
            chars,
            style(&stored.post.slug).dim()
        );
        if chars < MIN_CONTENT_CHARS {
            flagged += 1;
            println!(
                "    {} Content looks too short, check {}",
                style("!").yellow(),
                stored.post.source_url
            );
        }
    }

    if flagged > 0 {
        println!(
            "\n{} {} post(s) need manual review",
            style("!").yellow(),
            flagged
        );
    } else if !posts.is_empty() {
        println!("\n{} All posts have content", style("✓").green());
    }
    Ok(())
}

/// Mark the newest `count` posts as featured.
pub async fn cmd_feature(settings: &Settings, count: usize) -> anyhow::Result<()> {
    let store = open_store(settings)?;
    let posts = store.list(&settings.collection).await?;

    if posts.is_empty() {
        println!(
            "{} No posts in '{}'. Run 'lekh migrate' first.",
            style("!").yellow(),
            settings.collection
        );
        return Ok(());
    }

    for stored in posts.iter().take(count) {
        store.set_featured(&stored.id, true).await?;
        println!("  {} Featured: {}", style("★").yellow(), stored.post.title);
    }
    println!(
        "{} Featured {} post(s)",
        style("✓").green(),
        count.min(posts.len())
    );
    Ok(())
}
