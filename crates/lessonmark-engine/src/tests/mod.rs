use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary lessons directory
pub fn create_test_lessons_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create a lesson file with content
pub fn create_test_file(lessons_dir: &TempDir, filename: &str, content: &str) -> PathBuf {
    let file_path = lessons_dir.path().join(filename);
    fs::write(&file_path, content).unwrap();
    file_path
}
