use std::path::{Component, Path, PathBuf};

/// Nearest ancestor of `start` (inclusive) holding a `.git` entry.
pub fn find_repo_root(start: &Path) -> PathBuf {
    for candidate in start.ancestors() {
        if candidate.join(".git").exists() {
            return candidate.to_path_buf();
        }
    }
    start.to_path_buf()
}

/// Working directory as shown in progress blocks: `.` at the root, `./a/b` below it.
pub fn display_relative(cwd: &Path, repo_root: &Path) -> String {
    let Ok(rest) = cwd.strip_prefix(repo_root) else {
        return cwd.display().to_string();
    };
    let segments: Vec<String> = rest
        .components()
        .filter_map(|component| match component {
            Component::Normal(segment) => Some(segment.to_string_lossy().to_string()),
            _ => None,
        })
        .collect();
    if segments.is_empty() {
        ".".to_string()
    } else {
        format!("./{}", segments.join("/"))
    }
}
