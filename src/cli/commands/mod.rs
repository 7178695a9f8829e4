//! CLI command implementations

pub mod cache;
pub mod check;
pub mod run;
pub mod status;

pub use cache::execute as cache;
pub use check::execute as check;
pub use run::execute as run;
pub use status::execute as status;
