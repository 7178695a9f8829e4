//! Check command - ask CI whether a deployment is pending

use crate::cache::validate_build_id;
use crate::ci::{check_for_update, BuildCheck, JenkinsClient};
use crate::config::{Settings, StateStore};
use crate::error::SyncResult;
use crate::ui::{self, UiContext};
use std::time::Duration;

/// Execute the check command
pub fn execute(settings: &Settings, state: &StateStore) -> SyncResult<()> {
    let record = state.load()?;
    let timeout = settings.http.timeout_secs.map(Duration::from_secs);
    let jenkins = JenkinsClient::new(&record.jenkins_host, timeout, UiContext::detect());

    ui::section("Build check");
    ui::key_value("Job", &record.jenkins_host);
    ui::key_value(
        "Deployed",
        record.last_build.as_deref().unwrap_or("(none)"),
    );

    match check_for_update(&jenkins, record.last_build.as_deref())? {
        BuildCheck::UpToDate { build } => {
            ui::step_ok(&format!("Up to date with {}", build));
        }
        BuildCheck::NotSuccessful { build, result } => {
            ui::step_warn(&format!("Latest build {} finished {}", build, result));
        }
        BuildCheck::Available(build) => {
            validate_build_id(&build.display_name)?;
            let matching: Vec<_> = build
                .artifacts
                .iter()
                .filter(|a| settings.artifact.matches(&a.file_name))
                .collect();

            if matching.is_empty() {
                ui::step_warn_hint(
                    &format!(
                        "Build {} has no artifact matching '{}'",
                        build.display_name, settings.artifact.filter
                    ),
                    "Adjust [artifact].filter in the configuration file",
                );
            } else {
                ui::step_info(&format!(
                    "Build {} is ready: {} would be deployed",
                    build.display_name,
                    settings.artifact.file_name(&build.display_name)
                ));
            }
        }
    }

    Ok(())
}
