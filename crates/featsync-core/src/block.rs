use std::fs;
use std::path::Path;

use regex::Regex;

use crate::snapshot::Snapshot;

pub const DEFAULT_OPEN_ITEM_LIMIT: usize = 5;

pub const SIGNATURE_LEN: usize = 25;

const OPEN_ITEM_PREFIX: &str = "- [ ] ";

pub fn extract_open_items(content: &str, limit: usize) -> Vec<String> {
    let re = Regex::new(r"(?m)^- \[ \] .+").expect("regex");
    re.find_iter(content)
        .filter_map(|m| {
            let line = m.as_str().trim_end_matches('\r');
            let item = line.strip_prefix(OPEN_ITEM_PREFIX).unwrap_or(line);
            (!item.is_empty()).then(|| item.to_string())
        })
        .take(limit)
        .collect()
}

/// Render the progress section appended to a feature file.
///
/// Missing repository details are rendered here and nowhere else: `n/a` for
/// branch and commit, `none` for the change summary.
pub fn compose_block(snapshot: &Snapshot, open_items: &[String]) -> String {
    let branch = snapshot.branch.as_deref().unwrap_or("n/a");
    let commit = snapshot.commit.as_deref().unwrap_or("n/a");
    let changes = snapshot
        .changes
        .map(|summary| summary.to_string())
        .unwrap_or_else(|| "none".to_string());

    let mut lines = Vec::new();
    lines.push(String::new());
    lines.push(format!("## Progress {}", snapshot.timestamp_label()));
    lines.push(String::new());
    lines.push("Context:".to_string());
    lines.push(format!("- Branch: {}", branch));
    lines.push(format!("- Commit: {}", commit));
    lines.push(format!("- Changes: {}", changes));
    lines.push(format!("- PWD: {}", snapshot.pwd));
    lines.push(String::new());
    lines.push("Plan (succinct):".to_string());
    lines.push("- Current Focus: <fill>".to_string());
    lines.push("- Next Step: <single actionable step>".to_string());
    lines.push("- Risks: <list or none>".to_string());
    lines.push(String::new());
    lines.push("Open Items:".to_string());
    if open_items.is_empty() {
        lines.push(format!("{}<add next task>", OPEN_ITEM_PREFIX));
    } else {
        for item in open_items {
            lines.push(format!("{}{}", OPEN_ITEM_PREFIX, item));
        }
    }
    lines.push(String::new());
    lines.push("---".to_string());
    lines.push(String::new());
    lines.join("\n")
}

pub fn block_signature(block: &str) -> &str {
    match block.char_indices().nth(SIGNATURE_LEN) {
        Some((end, _)) => &block[..end],
        None => block,
    }
}

pub fn is_duplicate(existing: &str, block: &str) -> bool {
    existing.contains(block_signature(block))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    Appended,
    DuplicateSkipped,
}

/// Append `block` to the file at `path` whose current text is `existing`.
///
/// The whole file is rewritten as `existing` (trailing whitespace trimmed)
/// followed by the block. Nothing is written when the block's signature is
/// already present.
pub fn append_block(path: &Path, existing: &str, block: &str) -> std::io::Result<AppendOutcome> {
    if is_duplicate(existing, block) {
        return Ok(AppendOutcome::DuplicateSkipped);
    }
    let mut content = String::with_capacity(existing.len() + block.len());
    content.push_str(existing.trim_end());
    content.push_str(block);
    fs::write(path, content)?;
    Ok(AppendOutcome::Appended)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::ChangeSummary;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn snapshot() -> Snapshot {
        Snapshot {
            timestamp: Utc.with_ymd_and_hms(2026, 2, 4, 12, 30, 45).unwrap(),
            branch: Some("feature/sync".to_string()),
            commit: Some("abc1234 Add scanner".to_string()),
            changes: Some(ChangeSummary {
                added: 1,
                modified: 2,
                deleted: 0,
            }),
            pwd: ".".to_string(),
        }
    }

    #[test]
    fn extracts_first_five_items_in_order() {
        let content = (1..=7)
            .map(|n| format!("- [ ] item {n}"))
            .collect::<Vec<_>>()
            .join("\n");
        let items = extract_open_items(&content, DEFAULT_OPEN_ITEM_LIMIT);
        assert_eq!(
            items,
            vec!["item 1", "item 2", "item 3", "item 4", "item 5"]
        );
    }

    #[test]
    fn ignores_checked_indented_and_empty_items() {
        let content = "# Plan\n- [x] done\n  - [ ] nested\n- [ ] \n- [ ] real one\r\n* [ ] star\n";
        let items = extract_open_items(content, DEFAULT_OPEN_ITEM_LIMIT);
        assert_eq!(items, vec!["real one"]);
    }

    #[test]
    fn composes_full_block() {
        let block = compose_block(&snapshot(), &["wire scanner".to_string()]);
        let expected = "\n## Progress 2026-02-04 12:30:45 UTC\n\nContext:\n- Branch: feature/sync\n- Commit: abc1234 Add scanner\n- Changes: +1 ~2 -0\n- PWD: .\n\nPlan (succinct):\n- Current Focus: <fill>\n- Next Step: <single actionable step>\n- Risks: <list or none>\n\nOpen Items:\n- [ ] wire scanner\n\n---\n";
        assert_eq!(block, expected);
    }

    #[test]
    fn missing_details_render_placeholders() {
        let mut snap = snapshot();
        snap.branch = None;
        snap.commit = None;
        snap.changes = None;
        let block = compose_block(&snap, &[]);
        assert!(block.contains("- Branch: n/a\n"));
        assert!(block.contains("- Commit: n/a\n"));
        assert!(block.contains("- Changes: none\n"));
        assert!(block.contains("Open Items:\n- [ ] <add next task>\n"));
    }

    #[test]
    fn signature_is_leading_prefix() {
        let block = compose_block(&snapshot(), &[]);
        assert_eq!(block_signature(&block), "\n## Progress 2026-02-04 1");
        assert_eq!(block_signature("short"), "short");
    }

    #[test]
    fn append_trims_trailing_whitespace_then_skips_repeat() {
        let temp = tempfile::TempDir::new().expect("tempdir");
        let path = temp.path().join("feature.md");
        let original = "# Feature\n\n- [ ] first\n\n\n";
        fs::write(&path, original).expect("seed");

        let block = compose_block(&snapshot(), &["first".to_string()]);
        let outcome = append_block(&path, original, &block).expect("append");
        assert_eq!(outcome, AppendOutcome::Appended);
        let written = fs::read_to_string(&path).expect("read");
        assert_eq!(written, format!("# Feature\n\n- [ ] first{block}"));

        let outcome = append_block(&path, &written, &block).expect("append again");
        assert_eq!(outcome, AppendOutcome::DuplicateSkipped);
        assert_eq!(fs::read_to_string(&path).expect("read"), written);
    }
}
