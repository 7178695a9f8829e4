//! Run command - one full sync

use crate::audit::AuditLog;
use crate::ci::JenkinsClient;
use crate::cli::args::RunArgs;
use crate::config::{Settings, StateStore};
use crate::error::SyncResult;
use crate::sync::{Deployment, StaleRemoval, SyncOutcome, Syncer};
use crate::transfer::FtpStore;
use crate::ui::{self, UiContext};
use std::time::Duration;
use tracing::debug;

/// Execute the run command
pub fn execute(args: RunArgs, settings: &Settings, state: &StateStore) -> SyncResult<()> {
    let settings = apply_overrides(args, settings);
    let mut record = state.load()?;
    debug!(
        "Loaded state from {} (last build {:?})",
        state.path().display(),
        record.last_build
    );

    let ctx = UiContext::detect();
    let timeout = settings.http.timeout_secs.map(Duration::from_secs);
    let jenkins = JenkinsClient::new(&record.jenkins_host, timeout, ctx);
    let ftp = FtpStore::from_record(&record, settings.remote.port);
    let audit = AuditLog::new(&settings);

    let syncer = Syncer {
        settings: &settings,
        source: &jenkins,
        remote: &ftp,
        state,
        audit: &audit,
    };

    match syncer.run(&mut record)? {
        SyncOutcome::UpToDate { build } => {
            ui::step_info(&format!("No new build, {} is already deployed", build));
        }
        SyncOutcome::BuildNotSuccessful { build, result } => {
            ui::step_warn(&format!("Latest build {} finished {}, skipping", build, result));
        }
        SyncOutcome::Deployed(deployment) => report(&deployment, &settings),
    }

    Ok(())
}

fn apply_overrides(args: RunArgs, settings: &Settings) -> Settings {
    let mut settings = settings.clone();
    if let Some(dir) = args.cache_dir {
        settings.cache.dir = dir;
    }
    if let Some(dir) = args.remote_dir {
        settings.remote.dir = dir;
    }
    settings
}

fn report(deployment: &Deployment, settings: &Settings) {
    let source = if deployment.downloaded {
        "downloaded"
    } else {
        "from cache"
    };
    ui::step_ok_detail(
        &format!(
            "Uploaded {} to {}/",
            deployment.file_name, settings.remote.dir
        ),
        source,
    );

    match &deployment.stale {
        StaleRemoval::Skipped => ui::step_info("No previous build recorded, nothing to remove"),
        StaleRemoval::Removed { file_name } => ui::step_ok(&format!("Removed {}", file_name)),
        StaleRemoval::Refused { file_name, reply } => ui::step_warn_hint(
            &format!("Could not remove {}", file_name),
            reply,
        ),
    }

    ui::step_ok(&format!(
        "Recorded build {} (was {})",
        deployment.build,
        deployment.previous.as_deref().unwrap_or("none")
    ));
}
