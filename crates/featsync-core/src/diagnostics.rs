use std::path::Path;

use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EnvReport {
    #[serde(rename = "USER")]
    pub user: Option<String>,
    #[serde(rename = "HOME")]
    pub home: Option<String>,
    #[serde(rename = "WORKSPACE")]
    pub workspace: String,
}

impl EnvReport {
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            user: lookup("USER"),
            home: lookup("HOME"),
            workspace: lookup("WORKSPACE")
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| "Not set".to_string()),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

pub fn render_env_check(cwd: &Path, report: &EnvReport) -> String {
    let env = serde_json::to_string_pretty(report).unwrap_or_default();
    format!(
        "🎉 Custom command is working!\nCurrent directory: {}\nEnvironment: {}",
        cwd.display(),
        env
    )
}
