//! # File Tools
//!
//! The "Advanced FileWriter": the only way a specialist can persist code.
//! Writes are confined to the workspace and recorded in a [`WriteLedger`],
//! which is what the executor checks to decide whether a task completed.

use crate::workspace;
use radkit::tools::{FunctionTool, ToolResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Tool name exposed to the model
pub const FILE_WRITER_TOOL: &str = "advanced_file_writer";

/// Name the task instructions refer to
pub const FILE_WRITER_DISPLAY_NAME: &str = "Advanced FileWriter";

/// A file written by the tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedFile {
    /// Canonical path relative to the workspace root
    pub path: String,
    pub bytes: usize,
}

/// Record of every successful write in one session
#[derive(Debug, Clone, Default)]
pub struct WriteLedger {
    entries: Arc<Mutex<Vec<SavedFile>>>,
}

impl WriteLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, file: SavedFile) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(file);
        }
    }

    pub fn snapshot(&self) -> Vec<SavedFile> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }
}

/// Write `content` to `file_name` under `root`, creating parent directories.
pub fn save_file(root: &Path, file_name: &str, content: &str) -> Result<SavedFile, String> {
    let relative = workspace::normalize_relative(file_name).map_err(|e| e.to_string())?;
    let full_path: PathBuf = root.join(&relative);

    if let Some(parent) = full_path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create directories: {}", e))?;
    }

    std::fs::write(&full_path, content)
        .map_err(|e| format!("Failed to write '{}': {}", file_name, e))?;

    Ok(SavedFile {
        path: workspace::display_path(&relative),
        bytes: content.len(),
    })
}

/// Handle one writer call: both fields must be present strings, and only a
/// successful write reaches the ledger.
pub fn write_from_args(
    root: &Path,
    ledger: &WriteLedger,
    file_name: Option<&Value>,
    content: Option<&Value>,
) -> Result<SavedFile, String> {
    let file_name = file_name
        .and_then(Value::as_str)
        .ok_or_else(|| "missing 'file_name' (expected a string)".to_string())?;
    let content = content
        .and_then(Value::as_str)
        .ok_or_else(|| "missing 'content' (expected a string)".to_string())?;

    let saved = save_file(root, file_name, content)?;
    ledger.record(saved.clone());
    Ok(saved)
}

/// Build the file writer tool for one session.
///
/// The closure captures the workspace root and the session's ledger.
pub fn advanced_file_writer(root: &Path, ledger: WriteLedger) -> FunctionTool {
    let root = root.to_path_buf();

    FunctionTool::new(
        FILE_WRITER_TOOL,
        "Advanced FileWriter: save a complete source file into the project workspace. \
         Args: {\"file_name\": \"relative/path\", \"content\": \"full file contents\"}",
        move |args, _ctx| {
            let root = root.clone();
            let ledger = ledger.clone();
            Box::pin(async move {
                match write_from_args(&root, &ledger, args.get("file_name"), args.get("content")) {
                    Ok(saved) => {
                        tracing::info!(path = %saved.path, bytes = saved.bytes, "File saved by agent");
                        ToolResult::success(json!({
                            "saved": true,
                            "file_name": saved.path,
                            "bytes_written": saved.bytes,
                            "message": format!("{} was saved.", saved.path)
                        }))
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "File writer rejected call");
                        ToolResult::error(e)
                    }
                }
            })
        },
    )
}
