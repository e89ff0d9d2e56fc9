use std::fs;
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_WORKSPACE: &str = "/workspace";
pub const FILE_LISTING_LIMIT: usize = 10;

#[derive(Debug, Error)]
pub enum ProjectInfoError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("invalid package.json: {0}")]
    PackageJson(#[from] serde_json::Error),
    #[error("invalid Cargo.toml: {0}")]
    CargoToml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInfo {
    pub timestamp: String,
    pub workspace: String,
    pub files: Vec<String>,
    pub git_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PackageJson {
    name: Option<String>,
    version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CargoManifest {
    package: Option<CargoPackage>,
}

#[derive(Debug, Deserialize)]
struct CargoPackage {
    name: Option<String>,
    version: Option<toml::Value>,
}

/// Collect metadata about `workspace`.
///
/// Collection stops at the first failure, which is recorded in `error`; the
/// fields gathered before it are kept.
pub fn collect_project_info(workspace: &Path) -> ProjectInfo {
    let mut info = ProjectInfo {
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        workspace: workspace.display().to_string(),
        files: Vec::new(),
        git_status: None,
        project_name: None,
        project_version: None,
        error: None,
    };
    if let Err(err) = fill_project_info(workspace, &mut info) {
        tracing::debug!(error = %err, "project info incomplete");
        info.error = Some(err.to_string());
    }
    info
}

fn fill_project_info(workspace: &Path, info: &mut ProjectInfo) -> Result<(), ProjectInfoError> {
    info.files = list_entries(workspace)?;

    if workspace.join(".git").exists() {
        info.git_status = Some("Git repository detected".to_string());
    }

    let package_json = workspace.join("package.json");
    if package_json.exists() {
        let raw = fs::read_to_string(&package_json)?;
        let pkg: PackageJson = serde_json::from_str(&raw)?;
        info.project_name = pkg.name;
        info.project_version = pkg.version;
        return Ok(());
    }

    let cargo_toml = workspace.join("Cargo.toml");
    if cargo_toml.exists() {
        let raw = fs::read_to_string(&cargo_toml)?;
        let manifest: CargoManifest = toml::from_str(&raw)?;
        if let Some(package) = manifest.package {
            info.project_name = package.name;
            // `version.workspace = true` has no literal version to report.
            info.project_version = package
                .version
                .and_then(|value| value.as_str().map(str::to_string));
        }
    }
    Ok(())
}

fn list_entries(dir: &Path) -> std::io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        names.push(entry?.file_name().to_string_lossy().to_string());
    }
    names.sort();
    names.truncate(FILE_LISTING_LIMIT);
    Ok(names)
}

pub fn render_project_info(info: &ProjectInfo) -> String {
    let json = serde_json::to_string_pretty(info).unwrap_or_default();
    format!("📊 Project Information:\n{json}")
}
