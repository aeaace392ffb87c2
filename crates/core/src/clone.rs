use crate::config::CLONE_SKIP;
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CloneError {
    #[error("source does not exist: {0}")]
    Missing(PathBuf),
    #[error("source is not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("source has no parent directory: {0}")]
    NoParent(PathBuf),
    #[error("destination already exists: {0}")]
    DestinationExists(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Create a timestamped working copy of the project next to the original.
///
/// The copy lands at `<parent>/<name>_pypack_<YYYYMMDD_HHMMSS>` and skips
/// `.git`, virtual environments, and test caches. Symlinks are not
/// followed. Everything downstream (inspection, cleaning, packaging)
/// operates on the returned path, never on the original.
pub fn clone_project(src: &Path) -> Result<PathBuf, CloneError> {
    if !src.exists() {
        return Err(CloneError::Missing(src.to_path_buf()));
    }
    if !src.is_dir() {
        return Err(CloneError::NotADirectory(src.to_path_buf()));
    }

    let parent = src
        .parent()
        .ok_or_else(|| CloneError::NoParent(src.to_path_buf()))?;
    let name = src
        .file_name()
        .ok_or_else(|| CloneError::NoParent(src.to_path_buf()))?
        .to_string_lossy();

    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    let dest = parent.join(format!("{}_pypack_{}", name, stamp));

    if dest.exists() {
        return Err(CloneError::DestinationExists(dest));
    }

    copy_dir(src, &dest)?;
    Ok(dest)
}

fn copy_dir(src: &Path, dest: &Path) -> Result<(), CloneError> {
    fs::create_dir_all(dest)?;

    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let file_type = entry.file_type()?;
        let name = entry.file_name();

        let lossy = name.to_string_lossy();
        let entry_name: &str = &lossy;
        if CLONE_SKIP.contains(&entry_name) {
            continue;
        }
        if file_type.is_symlink() {
            continue;
        }

        let target = dest.join(&name);
        if file_type.is_dir() {
            copy_dir(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }

    Ok(())
}
