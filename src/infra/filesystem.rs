//! Filesystem operations
//!
//! Handles file and directory operations.

use std::path::Path;

use walkdir::WalkDir;

use crate::error::FilesystemError;

/// Create a directory and all parent directories
///
/// Idempotent: succeeds if the directory already exists.
pub fn create_dir_all(path: &Path) -> Result<(), FilesystemError> {
    std::fs::create_dir_all(path).map_err(|e| FilesystemError::CreateDir {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Remove a directory and all its contents
pub fn remove_dir_all(path: &Path) -> Result<(), FilesystemError> {
    if path.exists() {
        std::fs::remove_dir_all(path).map_err(|e| FilesystemError::RemoveDir {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
    }
    Ok(())
}

/// Copy a directory tree into `dest`, preserving relative layout
///
/// Missing source directories are skipped silently so callers can pass
/// declared-but-absent resource directories.
pub fn copy_tree(src: &Path, dest: &Path) -> Result<(), FilesystemError> {
    if !src.is_dir() {
        return Ok(());
    }

    for entry in WalkDir::new(src) {
        let entry = entry.map_err(|e| FilesystemError::Walk {
            path: src.to_path_buf(),
            error: e.to_string(),
        })?;

        let relative = entry
            .path()
            .strip_prefix(src)
            .unwrap_or_else(|_| entry.path());
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                create_dir_all(parent)?;
            }
            std::fs::copy(entry.path(), &target).map_err(|e| FilesystemError::CopyFile {
                from: entry.path().to_path_buf(),
                to: target.clone(),
                error: e.to_string(),
            })?;
        }
    }

    Ok(())
}
