//! FTP implementation of `RemoteStore`

use super::RemoteStore;
use crate::config::HostRecord;
use crate::error::{SyncError, SyncResult};
use std::fs::File;
use std::path::Path;
use suppaftp::types::FileType;
use suppaftp::{FtpError, FtpStream};
use tracing::{debug, info, warn};

/// Whether an FTP reply code is a permanent negative completion (5xx),
/// the class servers use for permission and missing-file failures
fn is_permission_reply(code: u32) -> bool {
    (500..600).contains(&code)
}

/// Credentialed FTP endpoint
pub struct FtpStore {
    address: String,
    username: String,
    password: String,
}

impl FtpStore {
    pub fn new(
        address: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Build from the connection record, appending `default_port` when the
    /// server entry has none
    pub fn from_record(record: &HostRecord, default_port: u16) -> Self {
        Self::new(
            with_port(&record.ftp_server, default_port),
            record.username.clone(),
            record.password.clone(),
        )
    }

    /// `host:port` this store connects to
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Open a logged-in binary-mode session, run `op` in `remote_dir`, and
    /// always send QUIT afterwards
    fn with_session<T>(
        &self,
        operation: &str,
        remote_dir: &str,
        op: impl FnOnce(&mut FtpStream) -> Result<T, FtpError>,
    ) -> SyncResult<T> {
        debug!("Connecting to ftp://{} for {}", self.address, operation);
        let mut ftp =
            FtpStream::connect(self.address.as_str()).map_err(|e| classify(operation, e))?;

        let result = ftp
            .login(self.username.as_str(), self.password.as_str())
            .and_then(|_| ftp.transfer_type(FileType::Binary))
            .and_then(|_| ftp.cwd(remote_dir))
            .and_then(|_| op(&mut ftp));

        if let Err(e) = ftp.quit() {
            warn!("FTP QUIT after {} failed: {}", operation, e);
        }

        result.map_err(|e| classify(operation, e))
    }
}

impl RemoteStore for FtpStore {
    fn upload(&self, local: &Path, remote_dir: &str) -> SyncResult<()> {
        let name = local
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| SyncError::User(format!("not a file: {}", local.display())))?;

        let mut file = File::open(local)
            .map_err(|e| SyncError::io(format!("opening {}", local.display()), e))?;

        info!("Sending {} to {}/", name, remote_dir);
        let bytes = self.with_session("upload", remote_dir, |ftp| {
            ftp.put_file(name.as_str(), &mut file)
        })?;
        info!("Uploaded {} ({} bytes)", name, bytes);
        Ok(())
    }

    fn delete(&self, file_name: &str, remote_dir: &str) -> SyncResult<()> {
        self.with_session("delete", remote_dir, |ftp| ftp.rm(file_name))?;
        info!("Deleted {}/{}", remote_dir, file_name);
        Ok(())
    }
}

/// Map a protocol failure onto the crate error, separating 5xx replies
fn classify(operation: &str, err: FtpError) -> SyncError {
    match &err {
        FtpError::UnexpectedResponse(response) if is_permission_reply(response.status.code()) => {
            SyncError::TransferPermission {
                operation: operation.to_string(),
                reply: err.to_string(),
            }
        }
        _ => SyncError::transfer(operation, err),
    }
}

fn with_port(server: &str, default_port: u16) -> String {
    let has_port = if let Some(rest) = server.strip_prefix('[') {
        rest.contains("]:")
    } else {
        server.matches(':').count() == 1
    };

    if has_port {
        server.to_string()
    } else if server.contains(':') && !server.starts_with('[') {
        // Bare IPv6 literal
        format!("[{}]:{}", server, default_port)
    } else {
        format!("{}:{}", server, default_port)
    }
}
