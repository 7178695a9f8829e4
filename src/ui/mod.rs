//! Terminal output helpers
//!
//! Plain, colored step lines for every run plus a download bar when a
//! human is watching. Scheduled runs get the step lines only.

mod context;
mod output;
mod progress;

pub use context::UiContext;
pub use output::{
    human_bytes, key_value, section, step_info, step_ok, step_ok_detail, step_warn,
    step_warn_hint,
};
pub use progress::DownloadProgress;
