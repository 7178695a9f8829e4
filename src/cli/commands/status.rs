//! Status command - show stored state and cache usage

use crate::cache::{CacheDir, CacheSizeStatus};
use crate::config::{Settings, StateStore};
use crate::error::SyncResult;
use crate::ui;
use console::style;

/// Execute the status command
pub fn execute(settings: &Settings, state: &StateStore) -> SyncResult<()> {
    println!("{}", style("geyser-sync status").bold().cyan());

    let record = state.load()?;
    ui::section("State");
    ui::key_value("File", &state.path().display().to_string());
    ui::key_value("FTP server", &record.ftp_server);
    ui::key_value("Username", &record.username);
    ui::key_value("Password", &record.masked_password());
    ui::key_value("Jenkins job", &record.jenkins_host);
    ui::key_value(
        "Last build",
        record.last_build.as_deref().unwrap_or("(none)"),
    );
    if let Some(build) = &record.last_build {
        ui::key_value(
            "Remote file",
            &format!("{}/{}", settings.remote.dir, settings.artifact.file_name(build)),
        );
    }

    let cache = CacheDir::new(&settings.cache.dir);
    let size = cache.size()?;
    let limit = settings.cache.max_bytes;
    ui::section("Cache");
    ui::key_value("Directory", &cache.path().display().to_string());
    ui::key_value(
        "Usage",
        &format!(
            "{} of {} ({:.0}%)",
            ui::human_bytes(size),
            ui::human_bytes(limit),
            CacheSizeStatus::percentage(size, limit)
        ),
    );

    match CacheSizeStatus::from_usage(size, limit) {
        CacheSizeStatus::Ok => {}
        CacheSizeStatus::Warning => ui::step_warn("Cache is close to its size limit"),
        CacheSizeStatus::Exceeded => {
            ui::step_warn_hint("Cache is over its size limit", "It will be cleared on the next run")
        }
    }

    Ok(())
}
