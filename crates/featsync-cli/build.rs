use std::process::Command;

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");

    let sha = git(&["rev-parse", "--short", "HEAD"]);
    // `git diff --quiet` exits 1 for local changes and 128 outside a repository.
    let dirty = sha.is_some()
        && Command::new("git")
            .args(["diff", "--quiet"])
            .status()
            .map(|status| status.code() == Some(1))
            .unwrap_or(false);

    println!(
        "cargo:rustc-env=FEATSYNC_GIT_SHA={}",
        sha.unwrap_or_else(|| "nogit".to_string())
    );
    println!(
        "cargo:rustc-env=FEATSYNC_GIT_DIRTY={}",
        if dirty { ".dirty" } else { "" }
    );
}
