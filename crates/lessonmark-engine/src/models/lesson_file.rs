use relative_path::{RelativePath, RelativePathBuf};

use crate::io::LESSON_EXTENSIONS;

/// A lesson file under the lessons root, with display-friendly names
#[derive(Debug, Clone, PartialEq)]
pub struct LessonFile {
    relative_path: RelativePathBuf,
    display_name: String,
    display_path: String,
}

impl LessonFile {
    pub fn new(relative_path: RelativePathBuf) -> Self {
        let display_name = relative_path
            .file_name()
            .map(strip_lesson_extension)
            .unwrap_or("Untitled")
            .to_string();
        let display_path = strip_lesson_extension(relative_path.as_str()).to_string();

        Self {
            relative_path,
            display_name,
            display_path,
        }
    }

    pub fn from_relative_str(path: &str) -> Self {
        Self::new(RelativePathBuf::from(path))
    }

    pub fn relative_path(&self) -> &RelativePath {
        &self.relative_path
    }

    /// File name without its lesson extension
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Relative path without its lesson extension
    pub fn display_path(&self) -> &str {
        &self.display_path
    }
}

fn strip_lesson_extension(name: &str) -> &str {
    LESSON_EXTENSIONS
        .iter()
        .find_map(|ext| {
            name.strip_suffix(ext)
                .and_then(|stem| stem.strip_suffix('.'))
        })
        .unwrap_or(name)
}

impl From<RelativePathBuf> for LessonFile {
    fn from(path: RelativePathBuf) -> Self {
        Self::new(path)
    }
}

impl From<&str> for LessonFile {
    fn from(path: &str) -> Self {
        Self::from_relative_str(path)
    }
}
