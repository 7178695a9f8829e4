//! Jenkins implementation of `BuildSource` over blocking HTTP

use super::{Artifact, BuildDescriptor, BuildSource};
use crate::error::{SyncError, SyncResult};
use crate::ui::{DownloadProgress, UiContext};
use std::io::{Read, Write};
use std::time::Duration;
use tracing::debug;
use url::Url;

const DOWNLOAD_CHUNK: usize = 64 * 1024;

/// Client for one Jenkins job's `lastSuccessfulBuild`
pub struct JenkinsClient {
    agent: ureq::Agent,
    job_url: String,
    ui: UiContext,
}

impl JenkinsClient {
    /// Create a client for a job URL such as `https://ci.example.org/job/Geyser/job/master/`
    pub fn new(job_url: &str, timeout: Option<Duration>, ui: UiContext) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(timeout)
            .build();

        Self {
            agent: config.into(),
            job_url: job_url.trim_end_matches('/').to_string(),
            ui,
        }
    }

    /// URL of the build metadata endpoint
    pub fn api_url(&self) -> String {
        format!("{}/lastSuccessfulBuild/api/json", self.job_url)
    }

    /// URL an artifact is served from
    ///
    /// Each segment of the artifact's relative path is percent-encoded.
    pub fn artifact_url(&self, artifact: &Artifact) -> SyncResult<String> {
        let invalid = |reason: String| SyncError::CiRequest {
            url: self.job_url.clone(),
            reason,
        };

        let mut url = Url::parse(&self.job_url).map_err(|e| invalid(e.to_string()))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| invalid("job URL cannot carry a path".to_string()))?;
            segments
                .pop_if_empty()
                .extend(["lastSuccessfulBuild", "artifact"])
                .extend(artifact.relative_path.split('/').filter(|s| !s.is_empty()));
        }
        Ok(url.into())
    }

    fn get(&self, url: &str) -> SyncResult<ureq::http::Response<ureq::Body>> {
        debug!("GET {}", url);
        self.agent.get(url).call().map_err(|e| SyncError::CiRequest {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}

impl BuildSource for JenkinsClient {
    fn latest_build(&self) -> SyncResult<BuildDescriptor> {
        let url = self.api_url();
        let mut response = self.get(&url)?;

        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| SyncError::CiRequest {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        serde_json::from_str(&body).map_err(|e| SyncError::CiResponse {
            url,
            reason: e.to_string(),
        })
    }

    fn download(&self, artifact: &Artifact, dest: &mut dyn Write) -> SyncResult<u64> {
        let url = self.artifact_url(artifact)?;
        let response = self.get(&url)?;

        let total = response
            .headers()
            .get("content-length")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());
        let progress = DownloadProgress::new(&self.ui, &artifact.file_name, total);

        let mut reader = response.into_body().into_reader();
        let mut buf = vec![0u8; DOWNLOAD_CHUNK];
        let mut written = 0u64;

        loop {
            let n = reader
                .read(&mut buf)
                .map_err(|e| SyncError::io(format!("reading {}", url), e))?;
            if n == 0 {
                break;
            }
            dest.write_all(&buf[..n])
                .map_err(|e| SyncError::io(format!("writing {}", artifact.file_name), e))?;
            written += n as u64;
            progress.inc(n as u64);
        }

        progress.finish();
        debug!("Downloaded {} bytes from {}", written, url);
        Ok(written)
    }
}
