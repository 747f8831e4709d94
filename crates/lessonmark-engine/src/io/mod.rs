use crate::lesson::Lesson;
use crate::models::LessonFile;
use relative_path::{RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};

/// File extensions recognised as lessons.
pub const LESSON_EXTENSIONS: &[&str] = &["lesson", "txt"];

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid lessons directory: {0}")]
    InvalidLessonsDir(String),
}

/// Read a lesson file and return its content
pub fn read_file(relative_path: &RelativePath, lessons_root: &Path) -> Result<String, IoError> {
    let absolute_path = relative_path.to_path(lessons_root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    fs::read_to_string(&absolute_path).map_err(IoError::Io)
}

/// Read and parse a lesson file
pub fn load_lesson(relative_path: &RelativePath, lessons_root: &Path) -> Result<Lesson, IoError> {
    let content = read_file(relative_path, lessons_root)?;
    Ok(Lesson::create_from_source(&content))
}

/// Scan for lesson files in the lessons directory
pub fn scan_lesson_files(lessons_root: &Path) -> Result<Vec<PathBuf>, IoError> {
    if !lessons_root.exists() {
        return Err(IoError::InvalidLessonsDir(
            "lessons directory not found".to_string(),
        ));
    }

    let mut files = Vec::new();
    scan_directory_recursive(lessons_root, &mut files)?;
    files.sort();
    Ok(files)
}

/// Lesson files under the lessons directory, relative to it
pub fn list_lesson_files(lessons_root: &Path) -> Result<Vec<LessonFile>, IoError> {
    let files = scan_lesson_files(lessons_root)?;
    Ok(files
        .iter()
        .filter_map(|path| {
            let relative = path.strip_prefix(lessons_root).ok()?;
            match RelativePathBuf::from_path(relative) {
                Ok(relative) => Some(LessonFile::new(relative)),
                Err(e) => {
                    log::warn!("skipping lesson {}: {e}", path.display());
                    None
                }
            }
        })
        .collect())
}

pub fn is_lesson_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| LESSON_EXTENSIONS.contains(&ext))
}

fn scan_directory_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), IoError> {
    let entries = fs::read_dir(dir).map_err(IoError::Io)?;

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("skipping unreadable entry in {}: {e}", dir.display());
                continue;
            }
        };
        let path = entry.path();

        if path.is_dir() {
            if let Err(e) = scan_directory_recursive(&path, files) {
                log::warn!("skipping unreadable directory {}: {e}", path.display());
            }
        } else if is_lesson_path(&path) {
            files.push(path);
        }
    }

    Ok(())
}

pub fn validate_lessons_dir(path: &Path) -> Result<(), IoError> {
    if !path.exists() || !path.is_dir() {
        return Err(IoError::InvalidLessonsDir(
            "Directory does not exist".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lesson::QuestionType;
    use crate::tests::{create_test_file, create_test_lessons_dir};

    #[test]
    fn test_scan_and_load_files() {
        // Given a lessons directory with lesson files
        let lessons_dir = create_test_lessons_dir();
        create_test_file(&lessons_dir, "one.lesson", "(?) First?\n(=) yes");
        create_test_file(&lessons_dir, "two.txt", "(i) Hello");

        // When scanning for files
        let files = scan_lesson_files(lessons_dir.path()).unwrap();

        // Then we find the expected files, sorted
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].file_name().unwrap(), "one.lesson");
        assert_eq!(files[1].file_name().unwrap(), "two.txt");
    }

    #[test]
    fn test_handle_invalid_lessons_directory() {
        let nonexistent_path = PathBuf::from("/this/path/does/not/exist");

        let result = scan_lesson_files(&nonexistent_path);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("lessons directory"));
    }

    #[test]
    fn test_scan_nested_directories() {
        let lessons_dir = create_test_lessons_dir();
        create_test_file(&lessons_dir, "root.lesson", "(i) Root");

        let sub_dir = lessons_dir.path().join("maths");
        std::fs::create_dir(&sub_dir).unwrap();
        std::fs::write(sub_dir.join("nested.lesson"), "(i) Nested").unwrap();

        let files = list_lesson_files(lessons_dir.path()).unwrap();

        let names: Vec<_> = files.iter().map(|f| f.display_path()).collect();
        assert_eq!(names, vec!["maths/nested", "root"]);
    }

    #[test]
    fn test_ignore_other_files() {
        let lessons_dir = create_test_lessons_dir();
        create_test_file(&lessons_dir, "quiz.lesson", "(i) Quiz");
        create_test_file(&lessons_dir, "image.png", "fake image data");
        create_test_file(&lessons_dir, "notes.md", "# Notes");

        let files = scan_lesson_files(lessons_dir.path()).unwrap();

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_name().unwrap(), "quiz.lesson");
    }

    #[test]
    fn test_validate_lessons_dir() {
        let lessons_dir = create_test_lessons_dir();
        assert!(validate_lessons_dir(lessons_dir.path()).is_ok());

        let result = validate_lessons_dir(Path::new("/nonexistent/path"));
        assert!(matches!(result, Err(IoError::InvalidLessonsDir(_))));
    }

    #[test]
    fn test_read_file_not_found() {
        let lessons_dir = create_test_lessons_dir();
        let result = read_file(RelativePath::new("missing.lesson"), lessons_dir.path());
        assert!(matches!(result, Err(IoError::NotFound(_))));
    }

    #[test]
    fn test_load_lesson() {
        let lessons_dir = create_test_lessons_dir();
        create_test_file(
            &lessons_dir,
            "capitals.lesson",
            "Title: Capitals\r\n(?) Capital of France?\r\n(=) Paris\r\n(x) Lyon\r\n",
        );

        let lesson = load_lesson(RelativePath::new("capitals.lesson"), lessons_dir.path()).unwrap();

        assert_eq!(lesson.title(), Some("Capitals"));
        assert_eq!(lesson.problems().len(), 1);
        assert_eq!(lesson.problems()[0].question_type(), QuestionType::Simple);
        assert_eq!(lesson.problems()[0].right_answers()[0].html(), "Paris");
    }
}
