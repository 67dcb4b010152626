//! Command implementations for splice-cli
//!
//! Each command returns `Ok(true)` when every document succeeded and
//! `Ok(false)` when at least one was skipped or failed.

pub mod apply;
pub mod locate;
pub mod replace;

pub use apply::run_apply;
pub use locate::run_locate;
pub use replace::{ReplaceArgs, run_replace};
