use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use chrono::{DateTime, Utc};

use crate::repo::display_relative;

/// Best-effort repository status lookups. Each answer is independent; `None`
/// means the lookup failed or had nothing to report.
pub trait StatusQueries {
    fn branch(&self) -> Option<String>;
    fn latest_commit(&self) -> Option<String>;
    fn status_porcelain(&self) -> Option<String>;
}

#[derive(Debug, Clone)]
pub struct GitCli {
    dir: PathBuf,
    git: Option<PathBuf>,
}

impl GitCli {
    pub fn new(dir: &Path) -> Self {
        let git = which::which("git").ok();
        if git.is_none() {
            tracing::debug!("git not found on PATH; repository status will be n/a");
        }
        Self {
            dir: dir.to_path_buf(),
            git,
        }
    }

    fn run(&self, args: &[&str]) -> Option<String> {
        let git = self.git.as_ref()?;
        let output = Command::new(git)
            .arg("-C")
            .arg(&self.dir)
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output();
        let output = match output {
            Ok(output) if output.status.success() => output,
            Ok(output) => {
                tracing::debug!(?args, status = %output.status, "git query failed");
                return None;
            }
            Err(err) => {
                tracing::debug!(?args, error = %err, "git query could not start");
                return None;
            }
        };
        let text = String::from_utf8(output.stdout).ok()?;
        let text = text.trim_end();
        if text.trim().is_empty() {
            return None;
        }
        Some(text.to_string())
    }
}

impl StatusQueries for GitCli {
    fn branch(&self) -> Option<String> {
        self.run(&["rev-parse", "--abbrev-ref", "HEAD"])
            .map(|value| value.trim().to_string())
    }

    fn latest_commit(&self) -> Option<String> {
        self.run(&["log", "-1", "--oneline"])
            .map(|value| value.trim().to_string())
    }

    fn status_porcelain(&self) -> Option<String> {
        self.run(&["status", "--porcelain"])
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeSummary {
    pub added: usize,
    pub modified: usize,
    pub deleted: usize,
}

impl fmt::Display for ChangeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{} ~{} -{}", self.added, self.modified, self.deleted)
    }
}

/// Count added, modified and deleted entries in `git status --porcelain` output.
///
/// Only the plain codes count: `A`/`??` prefixes as added, ` M`/`M ` as
/// modified, ` D`/`D ` as deleted. Renames, copies and mixed index/worktree
/// states such as `MM` are not counted. Empty listings yield `None`.
pub fn summarize_porcelain(status: &str) -> Option<ChangeSummary> {
    let mut summary = ChangeSummary::default();
    let mut seen = false;
    for line in status.lines().filter(|line| !line.trim().is_empty()) {
        seen = true;
        if line.starts_with('A') || line.starts_with("??") {
            summary.added += 1;
        } else if line.starts_with(" M") || line.starts_with("M ") {
            summary.modified += 1;
        } else if line.starts_with(" D") || line.starts_with("D ") {
            summary.deleted += 1;
        }
    }
    seen.then_some(summary)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub timestamp: DateTime<Utc>,
    pub branch: Option<String>,
    pub commit: Option<String>,
    pub changes: Option<ChangeSummary>,
    pub pwd: String,
}

impl Snapshot {
    pub fn timestamp_label(&self) -> String {
        self.timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
    }
}

pub fn build_snapshot(
    queries: &dyn StatusQueries,
    repo_root: &Path,
    cwd: &Path,
    now: DateTime<Utc>,
) -> Snapshot {
    let branch = queries.branch();
    let commit = queries.latest_commit();
    let changes = queries
        .status_porcelain()
        .as_deref()
        .and_then(summarize_porcelain);
    Snapshot {
        timestamp: now,
        branch,
        commit,
        changes,
        pwd: display_relative(cwd, repo_root),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct Fixed {
        branch: Option<&'static str>,
        commit: Option<&'static str>,
        status: Option<&'static str>,
    }

    impl StatusQueries for Fixed {
        fn branch(&self) -> Option<String> {
            self.branch.map(str::to_string)
        }
        fn latest_commit(&self) -> Option<String> {
            self.commit.map(str::to_string)
        }
        fn status_porcelain(&self) -> Option<String> {
            self.status.map(str::to_string)
        }
    }

    #[test]
    fn summarize_counts_plain_codes() {
        let status = " M src/lib.rs\nM  README.md\nA  new.rs\n?? scratch.txt\n D gone.rs\nD  old.rs\nMM both.rs\nR  a -> b\n";
        let summary = summarize_porcelain(status).expect("summary");
        assert_eq!(
            summary,
            ChangeSummary {
                added: 2,
                modified: 2,
                deleted: 2
            }
        );
        assert_eq!(summary.to_string(), "+2 ~2 -2");
    }

    #[test]
    fn summarize_counts_added_with_worktree_edits() {
        let summary = summarize_porcelain("AM staged-then-edited.rs\n").expect("summary");
        assert_eq!(summary.added, 1);
    }

    #[test]
    fn summarize_empty_listing_is_none() {
        assert_eq!(summarize_porcelain(""), None);
        assert_eq!(summarize_porcelain("\n\n"), None);
    }

    #[test]
    fn build_snapshot_keeps_failures_as_none() {
        let queries = Fixed {
            branch: None,
            commit: Some("abc1234 seed"),
            status: None,
        };
        let now = Utc.with_ymd_and_hms(2026, 2, 4, 9, 5, 7).unwrap();
        let root = Path::new("/work/repo");
        let snapshot = build_snapshot(&queries, root, &root.join("docs"), now);

        assert_eq!(snapshot.branch, None);
        assert_eq!(snapshot.commit.as_deref(), Some("abc1234 seed"));
        assert_eq!(snapshot.changes, None);
        assert_eq!(snapshot.pwd, "./docs");
        assert_eq!(snapshot.timestamp_label(), "2026-02-04 09:05:07 UTC");
    }

    #[test]
    fn git_cli_in_missing_dir_yields_none() {
        let temp = tempfile::TempDir::new().expect("tempdir");
        let git = GitCli::new(&temp.path().join("missing"));
        assert_eq!(git.branch(), None);
        assert_eq!(git.latest_commit(), None);
        assert_eq!(git.status_porcelain(), None);
    }
}
