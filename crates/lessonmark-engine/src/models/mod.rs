pub mod lesson_file;

pub use lesson_file::LessonFile;
