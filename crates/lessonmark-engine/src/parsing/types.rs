use super::classify::FieldKey;

/// Raw, unrendered text of one problem as collected by the splitter.
///
/// String fields keep the trailing newline of every line that fed them;
/// each answer entry is one key line plus its continuation lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawProblemBlock {
    pub intro: String,
    pub question: String,
    pub right_answers: Vec<String>,
    pub wrong_answers: Vec<String>,
    pub explanation: String,
}

impl RawProblemBlock {
    /// Appends flushed text to the field named by `key`.
    ///
    /// Answers get one entry per flush. `QuestionBreak` stores nothing.
    pub fn store(&mut self, key: FieldKey, text: String) {
        match key {
            FieldKey::Intro => self.intro.push_str(&text),
            FieldKey::Question => self.question.push_str(&text),
            FieldKey::RightAnswer => self.right_answers.push(text),
            FieldKey::WrongAnswer => self.wrong_answers.push(text),
            FieldKey::Explanation => self.explanation.push_str(&text),
            FieldKey::QuestionBreak => {}
        }
    }

    /// Whether a line keyed `next` closes this block and opens a new one.
    ///
    /// `previous` is the key that was open before `next` arrived.
    pub fn starts_new_block(&self, previous: Option<FieldKey>, next: FieldKey) -> bool {
        previous == Some(FieldKey::QuestionBreak)
            || (next == FieldKey::Intro && !self.intro.is_empty())
            || (next == FieldKey::Question && !self.question.is_empty())
    }

    /// True when no field holds any text.
    pub fn is_empty(&self) -> bool {
        self.intro.is_empty()
            && self.question.is_empty()
            && self.right_answers.is_empty()
            && self.wrong_answers.is_empty()
            && self.explanation.is_empty()
    }
}

/// A lesson document split into its metadata preamble and raw problem blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonSource {
    metadata_text: String,
    blocks: Vec<RawProblemBlock>,
}

impl LessonSource {
    /// Splits a whole lesson document. Never fails: unrecognised lines end
    /// up as metadata or continuation text.
    pub fn create_from_source(document: &str) -> Self {
        let (metadata_text, blocks) = super::split(document);
        Self {
            metadata_text,
            blocks,
        }
    }

    /// Text that preceded the first key line.
    pub fn metadata_text(&self) -> &str {
        &self.metadata_text
    }

    /// All blocks, including an initial empty one when nothing was keyed.
    pub fn blocks(&self) -> &[RawProblemBlock] {
        &self.blocks
    }

    pub fn into_parts(self) -> (String, Vec<RawProblemBlock>) {
        (self.metadata_text, self.blocks)
    }
}
