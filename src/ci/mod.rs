//! Build-check client for the Jenkins job that produces the plugin
//!
//! `BuildSource` is the seam between the sync run and the CI server:
//! `JenkinsClient` talks to a real server, tests substitute a fake.

mod build;
mod jenkins;

pub use build::{Artifact, BuildDescriptor, BuildResult};
pub use jenkins::JenkinsClient;

use crate::error::SyncResult;
use std::io::Write;
use tracing::{debug, info};

/// Source of build metadata and artifact bytes
pub trait BuildSource {
    /// Fetch the descriptor of the last successful build
    fn latest_build(&self) -> SyncResult<BuildDescriptor>;

    /// Stream an artifact of the last successful build into `dest`,
    /// returning the number of bytes written
    fn download(&self, artifact: &Artifact, dest: &mut dyn Write) -> SyncResult<u64>;
}

/// What the CI server reports relative to the deployed build
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildCheck {
    /// The latest build is the one already deployed
    UpToDate { build: String },

    /// The latest build did not finish with `SUCCESS`
    NotSuccessful { build: String, result: String },

    /// A newer successful build exists
    Available(BuildDescriptor),
}

/// Compare the latest build against the last deployed identifier
pub fn check_for_update(
    source: &dyn BuildSource,
    last_build: Option<&str>,
) -> SyncResult<BuildCheck> {
    info!("Getting last build info");
    let build = source.latest_build()?;
    debug!(
        "Latest build {} ({}), {} artifact(s)",
        build.display_name,
        build.result_label(),
        build.artifacts.len()
    );

    if last_build == Some(build.display_name.as_str()) {
        return Ok(BuildCheck::UpToDate {
            build: build.display_name,
        });
    }

    if !build.is_success() {
        return Ok(BuildCheck::NotSuccessful {
            result: build.result_label(),
            build: build.display_name,
        });
    }

    Ok(BuildCheck::Available(build))
}
