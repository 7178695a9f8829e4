//! Local artifact cache
//!
//! Downloaded builds are kept in a single directory, named after the build
//! they came from. The directory is wiped wholesale once it grows past the
//! configured size limit.

pub mod artifact;
pub mod dir;

pub use artifact::{fetch_artifacts, validate_build_id, LocalArtifact};
pub use dir::{CacheDir, CacheSizeStatus, CachedFile};
