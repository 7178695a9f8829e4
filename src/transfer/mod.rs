//! Remote plugin directory access
//!
//! `RemoteStore` is the seam between the sync run and the game server's
//! file storage. `FtpStore` is the production implementation; each call
//! opens and closes its own session.

mod ftp;

pub use ftp::FtpStore;

use crate::error::SyncResult;
use std::path::Path;

/// Remote storage holding the deployed plugin
pub trait RemoteStore {
    /// Upload `local` into `remote_dir` under its base file name
    fn upload(&self, local: &Path, remote_dir: &str) -> SyncResult<()>;

    /// Delete `file_name` from `remote_dir`
    fn delete(&self, file_name: &str, remote_dir: &str) -> SyncResult<()>;
}
