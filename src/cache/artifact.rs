//! Artifact downloader
//!
//! Local file names are derived from the build identifier alone, so a file
//! that already exists is taken as downloaded. Bytes land in a `.part` file
//! first and are renamed into place once complete.

use super::dir::CacheDir;
use crate::ci::{Artifact, BuildDescriptor, BuildSource};
use crate::config::schema::ArtifactSettings;
use crate::error::{SyncError, SyncResult};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// The local copy of the build's plugin artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalArtifact {
    /// File name, identical locally and remotely
    pub file_name: String,

    /// Path inside the cache directory
    pub path: PathBuf,

    /// Whether this run fetched it (false when already cached)
    pub downloaded: bool,

    /// Bytes written, when downloaded
    pub bytes: u64,

    /// SHA-256 of the downloaded bytes, hex encoded
    pub sha256: Option<String>,
}

/// Reject identifiers that would escape the cache directory or the remote
/// plugin directory once used as a filename component
pub fn validate_build_id(id: &str) -> SyncResult<()> {
    let bad = id.is_empty()
        || id.contains('/')
        || id.contains('\\')
        || id.contains("..")
        || id.chars().any(char::is_control);

    if bad {
        return Err(SyncError::InvalidBuildId(id.to_string()));
    }
    Ok(())
}

/// Download every artifact of `build` that passes the filter into `cache`.
///
/// All matches map onto the same local name, so only the first one is
/// ever fetched.
pub fn fetch_artifacts(
    source: &dyn BuildSource,
    build: &BuildDescriptor,
    settings: &ArtifactSettings,
    cache: &CacheDir,
) -> SyncResult<LocalArtifact> {
    validate_build_id(&build.display_name)?;

    let file_name = settings.file_name(&build.display_name);
    let path = cache.file_path(&file_name);
    let mut result: Option<LocalArtifact> = None;

    for artifact in build
        .artifacts
        .iter()
        .filter(|a| settings.matches(&a.file_name))
    {
        if path.exists() {
            info!("File already downloaded: {}", file_name);
            if result.is_none() {
                result = Some(LocalArtifact {
                    file_name: file_name.clone(),
                    path: path.clone(),
                    downloaded: false,
                    bytes: 0,
                    sha256: None,
                });
            }
            continue;
        }

        info!("Downloading {} as {}", artifact.relative_path, file_name);
        let (bytes, digest) = download_to(source, artifact, &path)?;
        info!("Downloaded {} ({} bytes, sha256 {})", file_name, bytes, digest);

        result = Some(LocalArtifact {
            file_name: file_name.clone(),
            path: path.clone(),
            downloaded: true,
            bytes,
            sha256: Some(digest),
        });
    }

    result.ok_or_else(|| SyncError::NoMatchingArtifact {
        build: build.display_name.clone(),
        filter: settings.filter.clone(),
    })
}

fn download_to(
    source: &dyn BuildSource,
    artifact: &Artifact,
    path: &Path,
) -> SyncResult<(u64, String)> {
    let mut part = path.as_os_str().to_os_string();
    part.push(".part");
    let part = PathBuf::from(part);

    let file = fs::File::create(&part)
        .map_err(|e| SyncError::io(format!("creating {}", part.display()), e))?;
    let mut writer = HashingWriter::new(BufWriter::new(file));

    let outcome = source.download(artifact, &mut writer).and_then(|bytes| {
        writer
            .flush()
            .map_err(|e| SyncError::io(format!("flushing {}", part.display()), e))?;
        Ok(bytes)
    });

    let bytes = match outcome {
        Ok(bytes) => bytes,
        Err(e) => {
            drop(writer);
            debug!("Removing partial download {}", part.display());
            let _ = fs::remove_file(&part);
            return Err(e);
        }
    };

    let digest = writer.finish();
    fs::rename(&part, path)
        .map_err(|e| SyncError::io(format!("moving download to {}", path.display()), e))?;
    Ok((bytes, digest))
}

/// Writer that hashes everything passing through it
struct HashingWriter<W: Write> {
    inner: W,
    hasher: Sha256,
}

impl<W: Write> HashingWriter<W> {
    fn new(inner: W) -> Self {
        Self {
            inner,
            hasher: Sha256::new(),
        }
    }

    fn finish(self) -> String {
        hex::encode(self.hasher.finalize())
    }
}

impl<W: Write> Write for HashingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.hasher.update(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
