//! # Lesson Source Parsing
//!
//! Two-phase splitting of a lesson document into raw problem blocks.
//!
//! 1. **Line Classification** (`classify`): each line is classified on its own
//!    into a `LineClass` (an optional `FieldKey` plus the text after the marker).
//! 2. **Block Construction** (`builder`): a `BlockBuilder` feeds the classified
//!    lines through `SplitState` and stores released text into
//!    `RawProblemBlock`s, opening a new block whenever a key would overwrite a
//!    populated intro/question or follows a question break.
//!
//! Splitting never fails. Input that matches no marker becomes metadata (before
//! the first key line) or continuation text of whichever field is open.

pub mod builder;
pub mod classify;
pub mod types;

#[cfg(test)]
mod tests;

pub use builder::{BlockBuilder, Flush, SplitState};
pub use classify::{FieldKey, LessonLineClassifier, LineClass};
pub use types::{LessonSource, RawProblemBlock};

/// Splits a document into its metadata text and raw problem blocks.
///
/// Accepts `\n` and `\r\n` line endings.
pub fn split(document: &str) -> (String, Vec<RawProblemBlock>) {
    let classifier = LessonLineClassifier;
    let mut builder = BlockBuilder::new();

    for line in document.lines() {
        builder.push(classifier.classify(line));
    }

    builder.finish()
}
