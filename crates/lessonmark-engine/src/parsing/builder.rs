use super::{
    classify::{FieldKey, LineClass},
    types::RawProblemBlock,
};

/// Text released from the pending buffer when a key line arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flush {
    /// Field the text belongs to; `None` means the metadata preamble.
    pub target: Option<FieldKey>,
    pub text: String,
}

/// Splitter state between two lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitState {
    /// The field currently collecting text.
    pub current_key: Option<FieldKey>,
    /// Lines seen since the last key line, each terminated by `\n`.
    pub pending: String,
}

impl SplitState {
    /// Advances the state by one classified line.
    ///
    /// Continuation lines only grow the pending buffer. A key line releases
    /// the buffer to the field that was open, starts a new buffer with its
    /// own content and becomes the open field.
    pub fn step(self, line: LineClass) -> (SplitState, Option<Flush>) {
        let SplitState {
            current_key,
            mut pending,
        } = self;

        let Some(key) = line.key else {
            pending.push_str(&line.content);
            pending.push('\n');
            return (
                SplitState {
                    current_key,
                    pending,
                },
                None,
            );
        };

        let flush = (!pending.is_empty()).then(|| Flush {
            target: current_key,
            text: pending,
        });

        let pending = if line.content.is_empty() {
            String::new()
        } else {
            format!("{}\n", line.content)
        };

        (
            SplitState {
                current_key: Some(key),
                pending,
            },
            flush,
        )
    }

    /// Releases whatever is still pending at end of input.
    pub fn finish(self) -> Option<Flush> {
        (!self.pending.is_empty()).then_some(Flush {
            target: self.current_key,
            text: self.pending,
        })
    }
}

/// Groups classified lines into a metadata preamble and problem blocks.
pub struct BlockBuilder {
    state: SplitState,
    metadata: String,
    current: RawProblemBlock,
    out: Vec<RawProblemBlock>,
}

impl BlockBuilder {
    pub fn new() -> Self {
        Self {
            state: SplitState::default(),
            metadata: String::new(),
            current: RawProblemBlock::default(),
            out: vec![],
        }
    }

    pub fn push(&mut self, line: LineClass) {
        let previous = self.state.current_key;
        let opened = line.key;

        let state = std::mem::take(&mut self.state);
        let (next, flush) = state.step(line);
        self.state = next;

        if let Some(flush) = flush {
            self.apply(flush);
        }

        if let Some(key) = opened {
            log::trace!("key line {key:?} (previous {previous:?})");
            if self.current.starts_new_block(previous, key) {
                let done = std::mem::take(&mut self.current);
                self.out.push(done);
            }
        }
    }

    /// Returns the metadata text and every block, in document order.
    pub fn finish(mut self) -> (String, Vec<RawProblemBlock>) {
        // EOF flush
        let state = std::mem::take(&mut self.state);
        if let Some(flush) = state.finish() {
            self.apply(flush);
        }
        self.out.push(self.current);
        log::debug!(
            "split lesson into {} block(s), {} byte(s) of metadata",
            self.out.len(),
            self.metadata.len()
        );
        (self.metadata, self.out)
    }

    fn apply(&mut self, flush: Flush) {
        match flush.target {
            Some(key) => self.current.store(key, flush.text),
            None => self.metadata.push_str(&flush.text),
        }
    }
}

impl Default for BlockBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::classify::LessonLineClassifier;
    use pretty_assertions::assert_eq;

    fn line(key: Option<FieldKey>, content: &str) -> LineClass {
        LineClass {
            key,
            content: content.to_string(),
        }
    }

    fn build(lines: &[&str]) -> (String, Vec<RawProblemBlock>) {
        let mut builder = BlockBuilder::new();
        for l in lines {
            builder.push(LessonLineClassifier.classify(l));
        }
        builder.finish()
    }

    #[test]
    fn continuation_lines_only_grow_pending() {
        let (state, flush) = SplitState::default().step(line(None, "Title: x"));
        assert_eq!(flush, None);
        assert_eq!(state.current_key, None);
        assert_eq!(state.pending, "Title: x\n");
    }

    #[test]
    fn key_line_flushes_pending_to_the_open_field() {
        let state = SplitState {
            current_key: Some(FieldKey::Question),
            pending: "What?\nReally?\n".into(),
        };
        let (state, flush) = state.step(line(Some(FieldKey::RightAnswer), "yes"));

        assert_eq!(
            flush,
            Some(Flush {
                target: Some(FieldKey::Question),
                text: "What?\nReally?\n".into(),
            })
        );
        assert_eq!(state.current_key, Some(FieldKey::RightAnswer));
        assert_eq!(state.pending, "yes\n");
    }

    #[test]
    fn first_key_line_flushes_preamble_to_metadata() {
        let (state, _) = SplitState::default().step(line(None, "Author: me"));
        let (state, flush) = state.step(line(Some(FieldKey::Intro), ""));

        assert_eq!(
            flush,
            Some(Flush {
                target: None,
                text: "Author: me\n".into(),
            })
        );
        assert_eq!(state.pending, "");
    }

    #[test]
    fn empty_pending_is_never_flushed() {
        let state = SplitState {
            current_key: Some(FieldKey::RightAnswer),
            pending: String::new(),
        };
        let (state, flush) = state.step(line(Some(FieldKey::WrongAnswer), "no"));
        assert_eq!(flush, None);
        assert_eq!(state.finish().map(|f| f.text), Some("no\n".to_string()));
    }

    #[test]
    fn splits_the_reference_document_into_two_blocks() {
        let (metadata, blocks) = build(&[
            "(i)intro",
            "(?)question",
            "(=)right",
            "(x)wrong",
            "(+)explanation",
            "(i)intro2",
        ]);

        assert_eq!(metadata, "");
        assert_eq!(blocks.len(), 2);
        assert_eq!(
            blocks[0],
            RawProblemBlock {
                intro: "intro\n".into(),
                question: "question\n".into(),
                right_answers: vec!["right\n".into()],
                wrong_answers: vec!["wrong\n".into()],
                explanation: "explanation\n".into(),
            }
        );
        assert_eq!(blocks[1].intro, "intro2\n");
        assert!(blocks[1].question.is_empty());
    }

    #[test]
    fn question_break_forces_a_split_even_before_an_answer() {
        let (_, blocks) = build(&["(?) one", "(=) a", "___", "(=) b", "(?) two"]);

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].question, "one\n");
        assert_eq!(blocks[0].right_answers, vec!["a\n"]);
        assert_eq!(blocks[1].right_answers, vec!["b\n"]);
        assert_eq!(blocks[1].question, "two\n");
    }

    #[test]
    fn text_after_a_question_break_is_discarded() {
        let (_, blocks) = build(&["(?) one", "___ ignored", "also ignored", "(?) two"]);

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].question, "one\n");
        assert_eq!(blocks[1].question, "two\n");
    }

    #[test]
    fn continuation_lines_join_the_open_field() {
        let (metadata, blocks) = build(&[
            "Title: Sums",
            "",
            "(?) What is",
            "2 + 2?",
            "(=) 4",
            "exactly",
            "(=) four",
        ]);

        assert_eq!(metadata, "Title: Sums\n\n");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].question, "What is\n2 + 2?\n");
        assert_eq!(blocks[0].right_answers, vec!["4\nexactly\n", "four\n"]);
    }

    #[test]
    fn document_without_keys_is_all_metadata() {
        let (metadata, blocks) = build(&["just", "text"]);
        assert_eq!(metadata, "just\ntext\n");
        assert_eq!(blocks, vec![RawProblemBlock::default()]);
    }

    #[test]
    fn second_question_without_intro_starts_a_new_block() {
        let (_, blocks) = build(&["(?) one", "(=) a", "(?) two", "(x) b"]);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].question, "two\n");
        assert_eq!(blocks[1].wrong_answers, vec!["b\n"]);
    }

    #[test]
    fn intro_after_question_stays_in_the_same_block() {
        let (_, blocks) = build(&["(?) q", "(i) late intro"]);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].intro, "late intro\n");
    }
}
