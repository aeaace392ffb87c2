use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Language of a source file
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
}

impl Language {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "py" | "pyi" => Some(Language::Python),
            _ => None,
        }
    }
}

/// A single import statement found in a source file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportStatement {
    /// The module/package path being imported (empty for bare relative imports)
    pub module: String,
    /// Specific items imported (e.g., `from foo import bar, baz`)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<String>,
    /// Line number in source file
    pub line: usize,
    /// Alias if any (e.g., `import numpy as np`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl ImportStatement {
    /// The top-level package identifier this import depends on.
    ///
    /// Returns `None` for relative imports (`from . import x`,
    /// `from ..config import y`), which reference the project's own code.
    pub fn top_level(&self) -> Option<&str> {
        if self.module.is_empty() || self.module.starts_with('.') {
            return None;
        }
        self.module.split('.').next()
    }
}

/// Whether a junk item is a file or a whole directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JunkKind {
    File,
    Folder,
}

/// A junk artifact found in the project tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JunkItem {
    pub path: PathBuf,
    pub kind: JunkKind,
    /// Size in bytes (recursive for folders)
    pub size: u64,
}

/// A removal that could not be completed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of a cleaning pass
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CleanSummary {
    pub removed: Vec<JunkItem>,
    pub failures: Vec<CleanFailure>,
    pub bytes_freed: u64,
}

impl CleanSummary {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.failures.is_empty()
    }
}

/// Result of archiving a project directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveReport {
    pub path: PathBuf,
    pub files: usize,
    pub bytes: u64,
}
