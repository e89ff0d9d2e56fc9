use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::block::{append_block, compose_block, extract_open_items, is_duplicate, AppendOutcome};
use crate::candidates::list_candidates;
use crate::config::{load_settings, SyncSettings};
use crate::confirm::{confirm, confirm_question, InputSource};
use crate::infer::infer_feature_file;
use crate::repo::find_repo_root;
use crate::snapshot::{build_snapshot, StatusQueries};

pub const DECLINED_CANDIDATE_LIMIT: usize = 20;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("notes directory not found: {}", .0.display())]
    NotesDirMissing(PathBuf),
    #[error("No markdown feature candidates in {}", .0.display())]
    NoCandidates(PathBuf),
    #[error("Specified feature file not found: {0}")]
    FileNotFound(String),
    #[error("Inferred feature file was not confirmed")]
    Declined { candidates: Vec<String> },
    #[error("Failed to scan {}", path.display())]
    Scan {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Read error: {}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Write error: {}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureTarget {
    pub file: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct SyncRequest {
    pub cwd: PathBuf,
    pub invocation_dir: PathBuf,
    pub file: Option<String>,
    pub dry_run: bool,
    pub now: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Updated(PathBuf),
    DuplicateSkipped(PathBuf),
    Preview { path: PathBuf, block: String },
}

/// Resolve an explicitly named feature file.
///
/// `arg` is tried as a notes file name first (`.md` appended when missing),
/// then as a path relative to `base_dir`.
pub fn resolve_named_target(
    notes_dir: &Path,
    base_dir: &Path,
    arg: &str,
) -> Result<FeatureTarget, SyncError> {
    let name = if arg.ends_with(".md") {
        arg.to_string()
    } else {
        format!("{arg}.md")
    };
    let in_notes = notes_dir.join(&name);
    if in_notes.exists() {
        return Ok(FeatureTarget {
            file: name,
            path: in_notes,
        });
    }
    let direct = base_dir.join(arg);
    if direct.exists() {
        let file = direct
            .file_name()
            .map(|segment| segment.to_string_lossy().to_string())
            .unwrap_or_else(|| arg.to_string());
        return Ok(FeatureTarget { file, path: direct });
    }
    Err(SyncError::FileNotFound(name))
}

pub fn infer_target(
    notes_dir: &Path,
    settings: &SyncSettings,
    input: &mut dyn InputSource,
    prompt_out: &mut dyn Write,
) -> Result<FeatureTarget, SyncError> {
    let candidates = list_candidates(notes_dir).map_err(|source| SyncError::Scan {
        path: notes_dir.to_path_buf(),
        source,
    })?;
    let Some(guess) = infer_feature_file(&candidates, &settings.keywords) else {
        return Err(SyncError::NoCandidates(notes_dir.to_path_buf()));
    };
    tracing::debug!(file = %guess.file, total = candidates.len(), "inferred feature file");

    if !confirm(input, prompt_out, &confirm_question(&guess.file)) {
        return Err(SyncError::Declined {
            candidates: candidates
                .iter()
                .take(DECLINED_CANDIDATE_LIMIT)
                .map(|candidate| candidate.file.clone())
                .collect(),
        });
    }
    Ok(FeatureTarget {
        file: guess.file.clone(),
        path: guess.path.clone(),
    })
}

pub fn run_feature_sync(
    request: &SyncRequest,
    input: &mut dyn InputSource,
    queries: &dyn StatusQueries,
    prompt_out: &mut dyn Write,
) -> Result<SyncOutcome, SyncError> {
    let repo_root = find_repo_root(&request.cwd);
    let settings = load_settings(&repo_root);
    let notes_dir = settings.notes_path(&repo_root);
    if !notes_dir.is_dir() {
        return Err(SyncError::NotesDirMissing(notes_dir));
    }

    let explicit = request
        .file
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty());
    let target = match explicit {
        Some(arg) => resolve_named_target(&notes_dir, &request.invocation_dir, arg)?,
        None => infer_target(&notes_dir, &settings, input, prompt_out)?,
    };

    let content = fs::read_to_string(&target.path).map_err(|source| SyncError::Read {
        path: target.path.clone(),
        source,
    })?;

    let snapshot = build_snapshot(queries, &repo_root, &request.cwd, request.now);
    let open_items = extract_open_items(&content, settings.max_open_items);
    let block = compose_block(&snapshot, &open_items);

    if request.dry_run {
        if is_duplicate(&content, &block) {
            return Ok(SyncOutcome::DuplicateSkipped(target.path));
        }
        return Ok(SyncOutcome::Preview {
            path: target.path,
            block,
        });
    }

    match append_block(&target.path, &content, &block) {
        Ok(AppendOutcome::Appended) => {
            tracing::debug!(path = %target.path.display(), items = open_items.len(), "appended progress block");
            Ok(SyncOutcome::Updated(target.path))
        }
        Ok(AppendOutcome::DuplicateSkipped) => Ok(SyncOutcome::DuplicateSkipped(target.path)),
        Err(source) => Err(SyncError::Write {
            path: target.path,
            source,
        }),
    }
}
