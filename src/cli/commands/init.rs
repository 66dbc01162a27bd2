//! Initialize command.

use console::style;

use crate::config::Settings;
use crate::repository::run_migrations;

/// Initialize the data directory and database.
pub async fn cmd_init(settings: &Settings) -> anyhow::Result<()> {
    settings.ensure_directories()?;

    println!("{} Running database migrations...", style("→").cyan());
    match run_migrations(&settings.database_url()).await {
        Ok(applied) => {
            for name in &applied {
                println!("  {} Applied {}", style("✓").green(), name);
            }
            if applied.is_empty() {
                println!("  {} Database already up to date", style("✓").green());
            }
        }
        Err(e) => {
            eprintln!("  {} Migration failed: {}", style("✗").red(), e);
            return Err(anyhow::anyhow!("Database migration failed: {}", e));
        }
    }

    println!(
        "{} Initialized lekh in {}",
        style("✓").green(),
        settings.data_dir.display()
    );
    println!("  Source blog: {}", settings.source_url);

    Ok(())
}
