//! Build descriptor returned by the Jenkins JSON API

use serde::Deserialize;
use std::fmt;

/// Result of a Jenkins build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuildResult {
    Success,
    Unstable,
    Failure,
    NotBuilt,
    Aborted,
    /// Any value this tool does not recognise
    #[serde(other)]
    Unknown,
}

impl fmt::Display for BuildResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Success => "SUCCESS",
            Self::Unstable => "UNSTABLE",
            Self::Failure => "FAILURE",
            Self::NotBuilt => "NOT_BUILT",
            Self::Aborted => "ABORTED",
            Self::Unknown => "UNKNOWN",
        };
        write!(f, "{}", name)
    }
}

/// A file attached to a build
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    /// Base file name, e.g. `Geyser-Spigot.jar`
    pub file_name: String,

    /// Path below the build's `artifact/` endpoint
    pub relative_path: String,
}

/// Metadata of the last successful build
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildDescriptor {
    /// Human-readable build label, used as the version tag
    pub display_name: String,

    /// `null` while a build is still running
    #[serde(default)]
    pub result: Option<BuildResult>,

    #[serde(default)]
    pub artifacts: Vec<Artifact>,
}

impl BuildDescriptor {
    /// Whether the build finished with `SUCCESS`
    pub fn is_success(&self) -> bool {
        self.result == Some(BuildResult::Success)
    }

    /// Result as shown to the user
    pub fn result_label(&self) -> String {
        self.result
            .map(|r| r.to_string())
            .unwrap_or_else(|| "IN_PROGRESS".to_string())
    }
}
