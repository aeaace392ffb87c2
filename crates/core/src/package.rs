use crate::config::JunkFilter;
use crate::models::ArchiveReport;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

#[derive(Error, Debug)]
pub enum PackageError {
    #[error("project does not exist: {0}")]
    Missing(PathBuf),
    #[error("project has no parent directory: {0}")]
    NoParent(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Archive a project directory into `<parent>/<dirname>.zip`.
///
/// Entries are named relative to the parent directory, so the archive
/// unpacks into a single top-level folder. Junk folders and files are
/// excluded even if a cleaning pass was skipped.
pub fn create_archive(project: &Path, filter: &JunkFilter) -> Result<ArchiveReport, PackageError> {
    if !project.is_dir() {
        return Err(PackageError::Missing(project.to_path_buf()));
    }
    let parent = project
        .parent()
        .ok_or_else(|| PackageError::NoParent(project.to_path_buf()))?;
    let name = project
        .file_name()
        .ok_or_else(|| PackageError::NoParent(project.to_path_buf()))?
        .to_string_lossy();

    let zip_path = parent.join(format!("{}.zip", name));
    let file = fs::File::create(&zip_path)?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut files = 0usize;
    let mut walker = WalkDir::new(project).into_iter();

    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(_) => continue,
        };

        if entry.file_type().is_dir() {
            if entry.depth() > 0 && filter.is_junk_folder(entry.file_name()) {
                walker.skip_current_dir();
            }
            continue;
        }
        if !entry.file_type().is_file() || filter.is_junk_file(entry.file_name()) {
            continue;
        }

        let rel = entry.path().strip_prefix(parent).unwrap_or(entry.path());
        writer.start_file(archive_name(rel), options)?;
        let bytes = fs::read(entry.path())?;
        writer.write_all(&bytes)?;
        files += 1;
    }

    writer.finish()?;
    let bytes = fs::metadata(&zip_path)?.len();

    Ok(ArchiveReport {
        path: zip_path,
        files,
        bytes,
    })
}

/// Zip entry names use forward slashes on every platform.
fn archive_name(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
