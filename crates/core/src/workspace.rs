//! # Workspace
//!
//! The output directory the crew builds into. It is wiped and recreated once
//! at the start of every run; afterwards only the file writer tool touches it.

use crate::error::{PathError, SwarmError};
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use walkdir::WalkDir;

/// Default output directory, relative to the working directory
pub const DEFAULT_WORKSPACE_DIR: &str = "project_output";

/// Source subdirectory created inside the workspace
pub const SRC_DIR: &str = "src";

/// Paths of a freshly reset workspace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceLayout {
    pub root: PathBuf,
    pub src: PathBuf,
}

/// Remove `root` if it exists, then create `root/src`.
///
/// Any IO failure is returned as [`SwarmError::Workspace`] and must abort the run.
pub async fn reset_workspace(root: &Path) -> Result<WorkspaceLayout, SwarmError> {
    let io_err = |source| SwarmError::Workspace {
        path: root.to_path_buf(),
        source,
    };

    if fs::metadata(root).await.is_ok() {
        fs::remove_dir_all(root).await.map_err(io_err)?;
        tracing::debug!(path = %root.display(), "Removed previous workspace");
    }

    let src = root.join(SRC_DIR);
    fs::create_dir_all(&src).await.map_err(io_err)?;

    tracing::info!(path = %root.display(), "Workspace reset");
    Ok(WorkspaceLayout {
        root: root.to_path_buf(),
        src,
    })
}

/// Normalize a task file name into a relative path that stays inside the workspace.
///
/// `.` components are dropped; `..`, roots and drive prefixes are rejected.
pub fn normalize_relative(name: &str) -> Result<PathBuf, PathError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(PathError::Empty);
    }

    let mut out = PathBuf::new();
    for component in Path::new(trimmed).components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::CurDir => {}
            Component::ParentDir => return Err(PathError::EscapesWorkspace(name.to_string())),
            Component::RootDir | Component::Prefix(_) => {
                return Err(PathError::Absolute(name.to_string()))
            }
        }
    }

    if out.as_os_str().is_empty() {
        return Err(PathError::Empty);
    }
    Ok(out)
}

/// Render a relative path with `/` separators, the form used in ledgers and reports
pub fn display_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Canonical `/`-separated name for a task file
pub fn canonical_name(name: &str) -> Result<String, PathError> {
    normalize_relative(name).map(|p| display_path(&p))
}

/// Every file currently under `root`, as sorted relative names
pub fn inventory(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            entry
                .path()
                .strip_prefix(root)
                .ok()
                .map(display_path)
        })
        .collect();
    files.sort();
    files
}
