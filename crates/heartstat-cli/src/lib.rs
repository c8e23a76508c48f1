//! Argument and configuration plumbing for the `heartstat` binary.
pub mod report;
pub mod util;
