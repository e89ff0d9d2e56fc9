//! Core logic for featsync: feature-notes progress blocks and project diagnostics.

pub mod block;
pub mod candidates;
pub mod config;
pub mod confirm;
pub mod diagnostics;
pub mod infer;
pub mod project_info;
pub mod repo;
pub mod snapshot;
pub mod sync;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::version;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
