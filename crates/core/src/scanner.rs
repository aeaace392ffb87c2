use crate::models::Language;
use crate::parsers::{create_parser, ParserError};
use crate::stdlib::StdlibRegistry;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("cannot scan {path}: {source}")]
    RootUnreadable {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error(transparent)]
    Parser(#[from] ParserError),
}

/// Discovers the external packages a Python project imports.
///
/// The scan is a single synchronous pass: every source file under the root
/// is parsed, the top-level segment of each absolute import is collected,
/// and the standard-library registry is subtracted from the result. Files
/// that cannot be read or parsed are skipped; only a root that cannot be
/// enumerated at all is an error.
pub struct DependencyScanner {
    root: PathBuf,
    registry: StdlibRegistry,
}

impl DependencyScanner {
    pub fn new(root: impl Into<PathBuf>, registry: StdlibRegistry) -> Self {
        Self {
            root: root.into(),
            registry,
        }
    }

    /// Scan the project and return external dependency names, sorted and
    /// deduplicated. An empty list is a valid result, not an error.
    pub fn discover_dependencies(&self) -> Result<Vec<String>, ScanError> {
        let meta = fs::metadata(&self.root).map_err(|e| ScanError::RootUnreadable {
            path: self.root.clone(),
            source: e,
        })?;
        if !meta.is_dir() {
            return Err(ScanError::NotADirectory(self.root.clone()));
        }

        let mut parser = create_parser(&Language::Python)?;
        let mut found = BTreeSet::new();

        // Every nested directory is scanned; junk exclusion is the
        // cleaner's concern, not the extractor's.
        for entry in WalkDir::new(&self.root).into_iter().filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() {
                continue;
            }
            if !is_python_source(entry.path()) {
                continue;
            }

            let source = match fs::read_to_string(entry.path()) {
                Ok(source) => source,
                Err(_) => continue,
            };

            for import in parser.parse(&source) {
                if let Some(top) = import.top_level() {
                    if !self.registry.contains(top) {
                        found.insert(top.to_string());
                    }
                }
            }
        }

        Ok(found.into_iter().collect())
    }
}

fn is_python_source(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(Language::from_extension)
        .is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn scanner(root: &Path) -> DependencyScanner {
        DependencyScanner::new(root, StdlibRegistry::python())
    }

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_empty_project_yields_empty_list() {
        let dir = TempDir::new().unwrap();
        let deps = scanner(dir.path()).discover_dependencies().unwrap();
        assert!(deps.is_empty());
    }

    #[test]
    fn test_stdlib_only_yields_empty_list() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "app.py", "import os\nimport sys\nimport json\n");
        let deps = scanner(dir.path()).discover_dependencies().unwrap();
        assert!(deps.is_empty());
    }

    #[test]
    fn test_dotted_import_contributes_top_level_only() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "app.py", "import foo.bar.baz\n");
        let deps = scanner(dir.path()).discover_dependencies().unwrap();
        assert_eq!(deps, vec!["foo"]);
    }

    #[test]
    fn test_from_import_contributes_base_module() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "app.py", "from alpha.beta import gamma\n");
        let deps = scanner(dir.path()).discover_dependencies().unwrap();
        assert_eq!(deps, vec!["alpha"]);
    }

    #[test]
    fn test_relative_imports_contribute_nothing() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "pkg/app.py",
            "from . import utils\nfrom ..helpers import x\n",
        );
        let deps = scanner(dir.path()).discover_dependencies().unwrap();
        assert!(deps.is_empty());
    }

    #[test]
    fn test_result_is_sorted_across_files() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.py", "import zeta\n");
        write(dir.path(), "b.py", "import alpha\n");
        let deps = scanner(dir.path()).discover_dependencies().unwrap();
        assert_eq!(deps, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_duplicates_collapse() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.py", "import numpy\n");
        write(dir.path(), "b.py", "import numpy as np\n");
        let deps = scanner(dir.path()).discover_dependencies().unwrap();
        assert_eq!(deps, vec!["numpy"]);
    }

    #[test]
    fn test_bad_file_does_not_abort_scan() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "broken.py", "def broken(:\n    ???\n");
        write(dir.path(), "good.py", "import requests\n");
        // Unreadable bytes are skipped too
        fs::write(dir.path().join("binary.py"), [0xff, 0xfe, 0x00, 0x01]).unwrap();
        let deps = scanner(dir.path()).discover_dependencies().unwrap();
        assert_eq!(deps, vec!["requests"]);
    }

    #[test]
    fn test_nested_directories_are_scanned() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a/b/c/deep.py", "import flask\n");
        let deps = scanner(dir.path()).discover_dependencies().unwrap();
        assert_eq!(deps, vec!["flask"]);
    }

    #[test]
    fn test_non_python_files_are_ignored() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "notes.txt", "import not_a_dep\n");
        let deps = scanner(dir.path()).discover_dependencies().unwrap();
        assert!(deps.is_empty());
    }

    #[test]
    fn test_idempotent_over_unchanged_tree() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.py", "import requests\nimport flask\n");
        let s = scanner(dir.path());
        let first = s.discover_dependencies().unwrap();
        let second = s.discover_dependencies().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let err = scanner(&missing).discover_dependencies();
        assert!(matches!(err, Err(ScanError::RootUnreadable { .. })));
    }

    #[test]
    fn test_file_root_is_an_error() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("app.py");
        fs::write(&file, "import requests\n").unwrap();
        let err = scanner(&file).discover_dependencies();
        assert!(matches!(err, Err(ScanError::NotADirectory(_))));
    }

    #[test]
    fn test_custom_registry_filters() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.py", "import alpha\nimport beta\n");
        let s = DependencyScanner::new(dir.path(), StdlibRegistry::from_modules(["alpha"]));
        let deps = s.discover_dependencies().unwrap();
        assert_eq!(deps, vec!["beta"]);
    }
}
