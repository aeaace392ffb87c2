use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Outcome of a conventional-file write
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// File was written; for requirements.txt, the number of dependencies
    Created(usize),
    /// Target already existed and was left alone
    AlreadyExists,
}

/// Checks a project for conventional files and writes them when missing.
///
/// Writers never overwrite: an existing target short-circuits to
/// `AlreadyExists`. Confirmation prompts belong to the caller.
pub struct ProjectInspector {
    root: PathBuf,
}

impl ProjectInspector {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn has_requirements(&self) -> bool {
        self.requirements_path().exists()
    }

    pub fn has_readme(&self) -> bool {
        self.readme_path().exists()
    }

    pub fn requirements_path(&self) -> PathBuf {
        self.root.join("requirements.txt")
    }

    pub fn readme_path(&self) -> PathBuf {
        self.root.join("README.md")
    }

    /// Write requirements.txt from a dependency list, one name per line in
    /// the order received. An empty list yields a placeholder comment.
    pub fn write_requirements(&self, deps: &[String]) -> io::Result<WriteOutcome> {
        let path = self.requirements_path();
        if path.exists() {
            return Ok(WriteOutcome::AlreadyExists);
        }

        let content = if deps.is_empty() {
            "# Add your dependencies here\n".to_string()
        } else {
            let mut content = deps.join("\n");
            content.push('\n');
            content
        };

        fs::write(&path, content)?;
        Ok(WriteOutcome::Created(deps.len()))
    }

    /// Write a skeleton README.md titled with the project directory name.
    pub fn write_readme(&self) -> io::Result<WriteOutcome> {
        let path = self.readme_path();
        if path.exists() {
            return Ok(WriteOutcome::AlreadyExists);
        }

        let name = project_name(&self.root);
        let content = format!(
            "# {name}\n\n\
             ## Description\n\n\
             Add your project description here.\n\n\
             ## Installation\n\n\
             ```bash\n\
             pip install -r requirements.txt\n\
             ```\n\n\
             ## Usage\n\n\
             Add usage instructions here.\n\n\
             ## License\n\n\
             Add license information here.\n"
        );

        fs::write(&path, content)?;
        Ok(WriteOutcome::Created(0))
    }
}

fn project_name(root: &Path) -> String {
    root.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "project".to_string())
}
