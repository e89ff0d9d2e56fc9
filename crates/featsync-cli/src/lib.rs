//! Shared plumbing for the featsync binaries.

pub mod logging;
pub mod version;
