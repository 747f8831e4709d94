//! Finished problems and lessons.

use std::{fmt, sync::Arc};

use crate::{
    markup::TextItem,
    metadata::Metadata,
    parsing::{LessonSource, RawProblemBlock},
};

/// How a learner interacts with a problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionType {
    /// Informational, nothing to answer.
    Slide,
    /// One right answer.
    Simple,
    /// Several right answers.
    Multi,
    /// Fill the worded blanks of the question.
    Fill,
    /// Put the question's words in order.
    Order,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Slide => "slide",
            QuestionType::Simple => "simple",
            QuestionType::Multi => "multi",
            QuestionType::Fill => "fill",
            QuestionType::Order => "order",
        }
    }

    /// First matching rule wins: empty question, answer count, then the
    /// kind of blanks in the question.
    fn classify(question: &TextItem, right_answers: usize) -> Self {
        if question.is_empty() {
            return QuestionType::Slide;
        }
        match right_answers {
            1 => return QuestionType::Simple,
            n if n > 1 => return QuestionType::Multi,
            _ => {}
        }

        let blanks = question.missing_words();
        if blanks.iter().any(Option::is_some) {
            QuestionType::Fill
        } else if blanks.iter().any(Option::is_none) {
            QuestionType::Order
        } else {
            QuestionType::Slide
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rendered problem. Immutable once assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    intro: TextItem,
    question: TextItem,
    right_answers: Vec<TextItem>,
    wrong_answers: Vec<TextItem>,
    explanation: TextItem,
    question_type: QuestionType,
    metadata: Arc<Metadata>,
}

impl Problem {
    /// Renders every field of `block` against the lesson's metadata and
    /// classifies the result.
    pub fn assemble(block: RawProblemBlock, metadata: &Arc<Metadata>) -> Self {
        let meta = Some(metadata.as_ref());
        let render = |raw: &str| TextItem::create_from_source(raw, meta);

        let question = render(&block.question);
        let right_answers: Vec<_> = block.right_answers.iter().map(|a| render(a)).collect();
        let question_type = QuestionType::classify(&question, right_answers.len());

        Self {
            intro: render(&block.intro),
            question,
            right_answers,
            wrong_answers: block.wrong_answers.iter().map(|a| render(a)).collect(),
            explanation: render(&block.explanation),
            question_type,
            metadata: Arc::clone(metadata),
        }
    }

    pub fn intro(&self) -> &TextItem {
        &self.intro
    }

    pub fn question(&self) -> &TextItem {
        &self.question
    }

    pub fn right_answers(&self) -> &[TextItem] {
        &self.right_answers
    }

    pub fn wrong_answers(&self) -> &[TextItem] {
        &self.wrong_answers
    }

    pub fn explanation(&self) -> &TextItem {
        &self.explanation
    }

    pub fn question_type(&self) -> QuestionType {
        self.question_type
    }

    /// The metadata shared by every problem of the lesson.
    pub fn metadata(&self) -> &Arc<Metadata> {
        &self.metadata
    }
}

/// A parsed lesson: its metadata and rendered problems.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    metadata: Arc<Metadata>,
    problems: Vec<Problem>,
}

impl Lesson {
    /// Parses a whole lesson document. Never fails.
    ///
    /// Blocks without any text are dropped.
    pub fn create_from_source(document: &str) -> Self {
        let (metadata_text, blocks) = LessonSource::create_from_source(document).into_parts();
        let metadata = Arc::new(Metadata::create_from_source(&metadata_text));

        let problems: Vec<_> = blocks
            .into_iter()
            .filter(|block| !block.is_empty())
            .map(|block| Problem::assemble(block, &metadata))
            .collect();

        log::debug!(
            "parsed lesson {:?}: {} metadata entries, {} problems",
            metadata.title().unwrap_or_default(),
            metadata.len(),
            problems.len()
        );

        Self { metadata, problems }
    }

    pub fn title(&self) -> Option<&str> {
        self.metadata.title()
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    pub fn into_parts(self) -> (Arc<Metadata>, Vec<Problem>) {
        (self.metadata, self.problems)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn block(question: &str, right: &[&str]) -> RawProblemBlock {
        RawProblemBlock {
            question: question.to_string(),
            right_answers: right.iter().map(|a| a.to_string()).collect(),
            ..Default::default()
        }
    }

    #[rstest]
    #[case::empty_question("", &["yes\n"], QuestionType::Slide)]
    #[case::one_answer("Capital of France?\n", &["Paris\n"], QuestionType::Simple)]
    #[case::two_answers("Pick primes\n", &["2\n", "3\n"], QuestionType::Multi)]
    #[case::worded_blanks("The ...cat sat\n", &[], QuestionType::Fill)]
    #[case::bare_blanks("Sort these words 123\n", &[], QuestionType::Order)]
    #[case::mixed_blanks("...one then 123\n", &[], QuestionType::Fill)]
    #[case::emphasised_blank("The capital is **...Paris**\n", &[], QuestionType::Fill)]
    #[case::plain_prompt("Think about it\n", &[], QuestionType::Slide)]
    #[case::answers_beat_blanks("The ...cat sat\n", &["cat\n"], QuestionType::Simple)]
    fn classification(#[case] question: &str, #[case] right: &[&str], #[case] expected: QuestionType) {
        let meta = Arc::new(Metadata::default());
        let problem = Problem::assemble(block(question, right), &meta);
        assert_eq!(problem.question_type(), expected);
    }

    #[test]
    fn question_type_names() {
        assert_eq!(QuestionType::Order.as_str(), "order");
        assert_eq!(QuestionType::Multi.to_string(), "multi");
    }

    #[test]
    fn problems_share_one_metadata_instance() {
        let lesson = Lesson::create_from_source(
            "Title: Shared\n(?) meta:title one\n(=) a\n(?) two\n(=) b\n",
        );
        let (metadata, problems) = lesson.into_parts();

        assert_eq!(problems.len(), 2);
        assert_eq!(problems[0].question().html(), "Shared one");
        for problem in &problems {
            assert!(Arc::ptr_eq(problem.metadata(), &metadata));
        }
    }

    #[test]
    fn empty_blocks_are_dropped() {
        let lesson = Lesson::create_from_source("Title: Only metadata\nAuthor: me\n");
        assert_eq!(lesson.title(), Some("Only metadata"));
        assert!(lesson.problems().is_empty());
    }

    #[test]
    fn all_fields_are_rendered() {
        let lesson = Lesson::create_from_source(
            "(i) Welcome\n(?) Pick *one*\n(=) right\n(x) wrong\n(x) also wrong\n(&) Because.\n",
        );
        let problem = &lesson.problems()[0];

        assert_eq!(problem.intro().html(), "Welcome");
        assert_eq!(problem.question().html(), "Pick <em>one</em>");
        assert_eq!(problem.right_answers().len(), 1);
        assert_eq!(problem.wrong_answers()[1].html(), "also wrong");
        assert_eq!(problem.explanation().html(), "Because.");
        assert_eq!(problem.question_type(), QuestionType::Simple);
    }
}
