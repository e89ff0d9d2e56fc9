use crate::candidates::Candidate;

pub const DEFAULT_KEYWORDS: [&str; 4] = ["feature", "roadmap", "task", "plan"];

pub fn default_keywords() -> Vec<String> {
    DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

/// First keyword match in newest-first `candidates`, else the newest file.
pub fn infer_feature_file<'a>(
    candidates: &'a [Candidate],
    keywords: &[String],
) -> Option<&'a Candidate> {
    candidates
        .iter()
        .find(|candidate| matches_keyword(&candidate.file, keywords))
        .or_else(|| candidates.first())
}

fn matches_keyword(file: &str, keywords: &[String]) -> bool {
    let lowered = file.to_lowercase();
    keywords
        .iter()
        .map(|keyword| keyword.trim().to_lowercase())
        .filter(|keyword| !keyword.is_empty())
        .any(|keyword| lowered.contains(&keyword))
}
