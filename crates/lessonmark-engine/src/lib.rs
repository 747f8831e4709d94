pub mod io;
pub mod lesson;
pub mod markup;
pub mod metadata;
pub mod models;
pub mod parsing;
pub mod resolvers;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use io::*;
pub use lesson::{Lesson, Problem, QuestionType};
pub use markup::TextItem;
pub use metadata::Metadata;
pub use models::LessonFile;
pub use parsing::{FieldKey, LessonSource, RawProblemBlock};
