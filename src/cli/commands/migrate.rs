//! Blog import command.

use std::sync::Arc;

use console::style;

use crate::cli::helpers::{heading, import_runner, open_store, print_json, spinner};
use crate::config::Settings;
use crate::importer::ImportRequest;
use crate::models::ArchivePeriod;

/// Import posts from the given archive months (or the configured ones).
pub async fn cmd_migrate(
    settings: &Settings,
    periods: Vec<ArchivePeriod>,
    max_per_month: Option<usize>,
    json: bool,
) -> anyhow::Result<()> {
    let store = open_store(settings)?;

    let months = if periods.is_empty() {
        settings.archive_months.clone()
    } else {
        periods
    };
    let request = ImportRequest::new(months)
        .with_max_per_month(max_per_month.unwrap_or(settings.max_per_month));

    let mut runner = import_runner(settings, Arc::new(store))?;
    if !json {
        heading(&format!(
            "Importing {} month(s) from {} into '{}'",
            request.months.len(),
            settings.source_url,
            settings.collection
        ));
    }
    let pb = (!json).then(|| spinner("Starting..."));
    if let Some(pb) = &pb {
        runner = runner.with_progress(pb.clone());
    }

    let result = runner.run(&request).await;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{} {}", style("✗").red(), e);
            return Err(e.into());
        }
    };

    if json {
        return print_json(&report);
    }

    report.print_summary();
    println!("{}", report.message());
    Ok(())
}
