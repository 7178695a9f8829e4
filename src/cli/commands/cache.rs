//! Cache command - inspect or clear downloaded artifacts

use crate::cache::CacheDir;
use crate::cli::args::{CacheAction, CacheArgs};
use crate::config::Settings;
use crate::error::SyncResult;
use crate::ui;
use console::style;
use std::io::{self, Write};
use tracing::debug;

/// Execute the cache command
pub fn execute(args: CacheArgs, settings: &Settings) -> SyncResult<()> {
    let cache = CacheDir::new(&settings.cache.dir);

    match args.action {
        CacheAction::Info => show_info(&cache, settings),
        CacheAction::Clear { yes } => clear_cache(&cache, yes),
    }
}

fn show_info(cache: &CacheDir, settings: &Settings) -> SyncResult<()> {
    let files = cache.list()?;

    if files.is_empty() {
        println!("No cached artifacts in {}", cache.path().display());
        return Ok(());
    }

    println!("{:<40} {:>12}", "FILE", "SIZE");
    println!("{}", "-".repeat(53));
    for file in &files {
        println!("{:<40} {:>12}", file.name, ui::human_bytes(file.size));
    }

    println!();
    println!(
        "Total: {} file(s), {} (limit {})",
        files.len(),
        ui::human_bytes(cache.size()?),
        ui::human_bytes(settings.cache.max_bytes)
    );
    Ok(())
}

fn clear_cache(cache: &CacheDir, skip_confirm: bool) -> SyncResult<()> {
    let files = cache.list()?;

    if files.is_empty() {
        println!("No cached artifacts to clear.");
        return Ok(());
    }

    println!("This will remove {} cached artifact(s):", files.len());
    for file in &files {
        println!("  {} {}", style("•").red(), file.name);
    }
    println!();

    if !skip_confirm {
        print!("Are you sure? [y/N] ");
        let _ = io::stdout().flush();

        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            println!("Failed to read input, aborting.");
            return Ok(());
        }

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    debug!("Clearing {}", cache.path().display());
    cache.clear()?;
    println!("{} cleared {} artifact(s)", style("✓").green(), files.len());

    Ok(())
}
