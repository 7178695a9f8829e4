//! Configuration schema for geyser-sync
//!
//! Two files are involved:
//! - `host.json`: connection record and last deployed build (mutated by runs)
//! - `~/.config/geyser-sync/config.toml`: tool settings (read-only, optional)

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Connection record persisted in `host.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostRecord {
    /// FTP server, optionally with `:port`
    pub ftp_server: String,

    /// FTP username
    pub username: String,

    /// FTP password
    pub password: String,

    /// Jenkins job URL, e.g. `https://ci.example.org/job/Geyser/job/master/`
    pub jenkins_host: String,

    /// Display name of the build currently deployed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_build: Option<String>,

    /// Keys this tool does not know about, written back untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl HostRecord {
    /// Password replaced by asterisks, for display
    pub fn masked_password(&self) -> String {
        "*".repeat(self.password.chars().count().min(8))
    }
}

/// Root settings structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// General settings
    pub general: GeneralSettings,

    /// Local download cache
    pub cache: CacheSettings,

    /// Artifact selection and naming
    pub artifact: ArtifactSettings,

    /// Remote FTP target
    pub remote: RemoteSettings,

    /// HTTP client
    pub http: HttpSettings,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable audit logging
    pub audit_log: bool,

    /// Where audit lines are appended
    pub audit_path: PathBuf,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            audit_log: true,
            audit_path: PathBuf::from("geyser-sync-audit.log"),
        }
    }
}

/// Cache directory settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// Directory holding downloaded artifacts
    pub dir: PathBuf,

    /// Wipe the directory when its total size exceeds this many bytes
    pub max_bytes: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("download"),
            max_bytes: 100_000_000,
        }
    }
}

/// Artifact settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactSettings {
    /// Case-insensitive substring an artifact file name must contain
    pub filter: String,

    /// Local and remote file name prefix
    pub name_prefix: String,

    /// File extension, without the dot
    pub extension: String,
}

impl ArtifactSettings {
    /// File name for a given build, e.g. `Geyser-Spigot-1234.jar`
    pub fn file_name(&self, build_id: &str) -> String {
        format!("{}-{}.{}", self.name_prefix, build_id, self.extension)
    }

    /// Whether a CI artifact file name passes the filter
    pub fn matches(&self, file_name: &str) -> bool {
        file_name
            .to_lowercase()
            .contains(&self.filter.to_lowercase())
    }
}

impl Default for ArtifactSettings {
    fn default() -> Self {
        Self {
            filter: "spigot".to_string(),
            name_prefix: "Geyser-Spigot".to_string(),
            extension: "jar".to_string(),
        }
    }
}

/// Remote FTP settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteSettings {
    /// Directory on the server the plugin lives in
    pub dir: String,

    /// Port used when `ftp_server` does not carry one
    pub port: u16,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            dir: "plugins".to_string(),
            port: 21,
        }
    }
}

/// HTTP client settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    /// Overall per-request timeout; unset waits indefinitely
    pub timeout_secs: Option<u64>,
}
