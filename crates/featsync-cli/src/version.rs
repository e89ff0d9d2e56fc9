/// Package version plus the commit the binaries were built from.
pub const FULL: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "+git.",
    env!("FEATSYNC_GIT_SHA"),
    env!("FEATSYNC_GIT_DIRTY")
);

#[cfg(test)]
mod tests {
    use super::FULL;

    #[test]
    fn version_embeds_build_commit() {
        assert!(FULL.starts_with(env!("CARGO_PKG_VERSION")));
        let output = std::process::Command::new("git")
            .args(["rev-parse", "--short", "HEAD"])
            .current_dir(env!("CARGO_MANIFEST_DIR"))
            .output();
        let sha = match output {
            Ok(output) if output.status.success() => {
                String::from_utf8_lossy(&output.stdout).trim().to_string()
            }
            _ => "nogit".to_string(),
        };
        assert!(
            FULL.contains(&sha),
            "version string does not include build commit; version={FULL} sha={sha}"
        );
    }
}
