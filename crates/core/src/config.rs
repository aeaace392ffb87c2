use globset::{Glob, GlobSet, GlobSetBuilder};
use std::ffi::OsStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to build glob pattern: {0}")]
    GlobError(#[from] globset::Error),
}

/// Folder names removed by the cleaner (matched anywhere in the tree)
pub const JUNK_FOLDERS: &[&str] = &[
    "__pycache__",
    ".pytest_cache",
    ".venv",
    "venv",
    ".idea",
    ".vscode",
    "node_modules",
    ".DS_Store",
    "*.egg-info",
    ".git",
    ".cache",
];

/// File name patterns removed by the cleaner
pub const JUNK_FILES: &[&str] = &[
    "*.pyc",
    "*.pyo",
    "*.pyd",
    ".DS_Store",
    "Thumbs.db",
    "*.log",
    "*.tmp",
];

/// Files never removed, whatever the junk patterns say
pub const KEEP_FILES: &[&str] = &[
    ".gitignore",
    ".env.example",
    "LICENSE",
    "README.md",
    "requirements.txt",
];

/// Directory names excluded when creating the working copy
pub const CLONE_SKIP: &[&str] = &[".git", ".venv", "venv", "__pycache__", ".pytest_cache"];

/// Matches junk folders and files by name.
///
/// Matching is on the final path component only, so the same filter works
/// for the cleaner and the packager regardless of where an item sits in
/// the tree.
#[derive(Debug)]
pub struct JunkFilter {
    folders: GlobSet,
    files: GlobSet,
}

impl JunkFilter {
    pub fn new() -> Result<Self, ConfigError> {
        Ok(Self {
            folders: build_globset(JUNK_FOLDERS)?,
            files: build_globset(JUNK_FILES)?,
        })
    }

    pub fn is_junk_folder(&self, name: &OsStr) -> bool {
        let lossy = name.to_string_lossy();
        let name: &str = &lossy;
        self.folders.is_match(name)
    }

    pub fn is_junk_file(&self, name: &OsStr) -> bool {
        let lossy = name.to_string_lossy();
        let name: &str = &lossy;
        if KEEP_FILES.contains(&name) {
            return false;
        }
        self.files.is_match(name)
    }
}

fn build_globset(patterns: &[&str]) -> Result<GlobSet, ConfigError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}
