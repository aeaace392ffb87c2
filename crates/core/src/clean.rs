use crate::config::JunkFilter;
use crate::models::{CleanFailure, CleanSummary, JunkItem, JunkKind};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Finds and removes junk artifacts (caches, virtual environments, build
/// byproducts) from a project tree.
pub struct ProjectCleaner<'a> {
    root: PathBuf,
    filter: &'a JunkFilter,
}

impl<'a> ProjectCleaner<'a> {
    pub fn new(root: impl Into<PathBuf>, filter: &'a JunkFilter) -> Self {
        Self {
            root: root.into(),
            filter,
        }
    }

    /// Walk the tree and report junk without removing anything.
    ///
    /// Junk folders are reported whole (recursive size) and not descended
    /// into; their contents are implied.
    pub fn scan(&self) -> Vec<JunkItem> {
        let mut items = Vec::new();
        let mut walker = WalkDir::new(&self.root).into_iter();

        while let Some(entry) = walker.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(_) => continue,
            };

            if entry.file_type().is_dir() {
                if entry.depth() > 0 && self.filter.is_junk_folder(entry.file_name()) {
                    walker.skip_current_dir();
                    let path = entry.into_path();
                    let size = dir_size(&path);
                    items.push(JunkItem {
                        path,
                        kind: JunkKind::Folder,
                        size,
                    });
                }
            } else if entry.file_type().is_file() && self.filter.is_junk_file(entry.file_name()) {
                let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
                items.push(JunkItem {
                    path: entry.into_path(),
                    kind: JunkKind::File,
                    size,
                });
            }
        }

        items
    }

    /// Remove everything `scan` reports, best-effort. A failed removal is
    /// recorded in the summary and the pass continues.
    pub fn clean(&self) -> CleanSummary {
        let mut summary = CleanSummary::default();

        for item in self.scan() {
            let result = match item.kind {
                JunkKind::Folder => fs::remove_dir_all(&item.path),
                JunkKind::File => fs::remove_file(&item.path),
            };

            match result {
                Ok(()) => {
                    summary.bytes_freed += item.size;
                    summary.removed.push(item);
                }
                Err(e) => summary.failures.push(CleanFailure {
                    path: item.path,
                    reason: e.to_string(),
                }),
            }
        }

        summary
    }
}

fn dir_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.metadata().ok())
        .map(|m| m.len())
        .sum()
}
