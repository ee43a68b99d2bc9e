use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StorageError;

/// Directory generated code is saved into when none is configured.
pub fn default_downloads_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Writes generated test code to `dir/file_name`, replacing any previous file.
pub fn save_generated_code(dir: &Path, file_name: &str, code: &str) -> Result<PathBuf, StorageError> {
    fs::create_dir_all(dir).map_err(|source| StorageError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let file = dir.join(file_name);
    fs::write(&file, code).map_err(|source| StorageError::Write {
        path: file.clone(),
        source,
    })?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_code_into_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_generated_code(dir.path(), "generated_tests.py", "def test_a():\n    pass\n").unwrap();

        assert_eq!(path, dir.path().join("generated_tests.py"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "def test_a():\n    pass\n");
    }

    #[test]
    fn creates_missing_directories_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("exports").join("today");

        save_generated_code(&nested, "api_tests.feature", "Feature: old").unwrap();
        let path = save_generated_code(&nested, "api_tests.feature", "Feature: new").unwrap();

        assert_eq!(fs::read_to_string(path).unwrap(), "Feature: new");
    }

    #[test]
    fn reports_unwritable_target() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "file").unwrap();

        let err = save_generated_code(&blocker, "generated_tests.py", "x").unwrap_err();
        assert!(matches!(err, StorageError::CreateDir { .. }));
    }
}
