//! One sync run: check CI, download, upload, remove the stale build, record
//!
//! Nothing here exits the process. "Nothing to do" comes back as a
//! `SyncOutcome` variant, and failures come back as `SyncError`, so the
//! caller decides how to report either.

use crate::audit::AuditLog;
use crate::cache::{fetch_artifacts, CacheDir};
use crate::ci::{check_for_update, BuildCheck, BuildSource};
use crate::config::{HostRecord, Settings, StateStore};
use crate::error::SyncResult;
use crate::transfer::RemoteStore;
use serde_json::json;
use tracing::{info, warn};

/// Result of a run that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The deployed build is already the latest
    UpToDate { build: String },

    /// The latest build did not succeed; nothing was touched
    BuildNotSuccessful { build: String, result: String },

    /// A new build was uploaded and recorded
    Deployed(Deployment),
}

/// What happened to the previously deployed file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaleRemoval {
    /// No previous build was recorded
    Skipped,

    /// The previous file was deleted
    Removed { file_name: String },

    /// The server refused the delete; the file is still there
    Refused { file_name: String, reply: String },
}

/// Details of a successful deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deployment {
    pub build: String,
    pub previous: Option<String>,
    pub file_name: String,
    /// False when the artifact was already in the cache
    pub downloaded: bool,
    pub stale: StaleRemoval,
}

/// Everything one run talks to
pub struct Syncer<'a> {
    pub settings: &'a Settings,
    pub source: &'a dyn BuildSource,
    pub remote: &'a dyn RemoteStore,
    pub state: &'a StateStore,
    pub audit: &'a AuditLog,
}

impl Syncer<'_> {
    /// Run the full sequence against `record`, persisting it on deployment.
    ///
    /// The record is only advanced once the upload succeeded. A refused
    /// delete of the old file is reported but does not hold the state back,
    /// since the new build is already live.
    pub fn run(&self, record: &mut HostRecord) -> SyncResult<SyncOutcome> {
        let cache = CacheDir::new(&self.settings.cache.dir);
        cache.ensure()?;
        if let Some(size) = cache.prune_if_over(self.settings.cache.max_bytes)? {
            self.audit.log(
                "cache.pruned",
                &json!({ "dir": cache.path().display().to_string(), "bytes": size }),
            );
        }

        let build = match check_for_update(self.source, record.last_build.as_deref())? {
            BuildCheck::UpToDate { build } => {
                info!("No new build, exiting");
                return Ok(SyncOutcome::UpToDate { build });
            }
            BuildCheck::NotSuccessful { build, result } => {
                info!("Latest build {} was {}, exiting", build, result);
                return Ok(SyncOutcome::BuildNotSuccessful { build, result });
            }
            BuildCheck::Available(build) => build,
        };

        info!("Downloading artifacts for build {}", build.display_name);
        let local = fetch_artifacts(self.source, &build, &self.settings.artifact, &cache)?;
        if local.downloaded {
            self.audit.log(
                "artifact.downloaded",
                &json!({
                    "build": build.display_name,
                    "file": local.file_name,
                    "bytes": local.bytes,
                    "sha256": local.sha256,
                }),
            );
        }

        let remote_dir = self.settings.remote.dir.as_str();
        self.remote.upload(&local.path, remote_dir)?;
        self.audit.log(
            "artifact.uploaded",
            &json!({ "file": local.file_name, "dir": remote_dir }),
        );

        let previous = record.last_build.clone();
        let stale = match previous.as_deref() {
            None => StaleRemoval::Skipped,
            Some(old) => self.remove_stale(&self.settings.artifact.file_name(old), remote_dir)?,
        };

        record.last_build = Some(build.display_name.clone());
        self.state.save(record)?;
        self.audit.log(
            "state.advanced",
            &json!({ "from": previous, "to": build.display_name }),
        );

        Ok(SyncOutcome::Deployed(Deployment {
            build: build.display_name,
            previous,
            file_name: local.file_name,
            downloaded: local.downloaded,
            stale,
        }))
    }

    fn remove_stale(&self, file_name: &str, remote_dir: &str) -> SyncResult<StaleRemoval> {
        match self.remote.delete(file_name, remote_dir) {
            Ok(()) => {
                self.audit.log(
                    "artifact.deleted",
                    &json!({ "file": file_name, "dir": remote_dir }),
                );
                Ok(StaleRemoval::Removed {
                    file_name: file_name.to_string(),
                })
            }
            Err(e) if e.is_permission() => {
                warn!("Could not delete {}/{}: {}", remote_dir, file_name, e);
                self.audit.log(
                    "artifact.delete_refused",
                    &json!({ "file": file_name, "dir": remote_dir, "reply": e.to_string() }),
                );
                Ok(StaleRemoval::Refused {
                    file_name: file_name.to_string(),
                    reply: e.to_string(),
                })
            }
            Err(e) => Err(e),
        }
    }
}
