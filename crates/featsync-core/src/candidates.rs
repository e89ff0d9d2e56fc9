use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub file: String,
    pub path: PathBuf,
    pub modified: SystemTime,
}

/// Markdown files directly under `notes_dir`, most recently modified first.
///
/// A missing directory yields an empty list. Entries with equal modification
/// times keep the order the directory listing returned them in.
pub fn list_candidates(notes_dir: &Path) -> std::io::Result<Vec<Candidate>> {
    if !notes_dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut candidates = Vec::new();
    for entry in fs::read_dir(notes_dir)? {
        let entry = entry?;
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if !name.ends_with(".md") {
            continue;
        }
        // Follows symlinks; dangling links are skipped.
        let Ok(meta) = fs::metadata(entry.path()) else {
            continue;
        };
        if !meta.is_file() {
            continue;
        }
        candidates.push(Candidate {
            file: name,
            path: entry.path(),
            modified: meta.modified()?,
        });
    }
    candidates.sort_by(|a, b| b.modified.cmp(&a.modified));
    Ok(candidates)
}
