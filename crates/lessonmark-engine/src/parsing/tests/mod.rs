//! Whole-document tests for the splitter.

use pretty_assertions::assert_eq;

use crate::parsing::{LessonSource, RawProblemBlock, split};

#[test]
fn crlf_and_lf_documents_split_identically() {
    let lf = "Title: T\n(?) q\n(=) a\n(x) b\n";
    let crlf = "Title: T\r\n(?) q\r\n(=) a\r\n(x) b\r\n";

    assert_eq!(split(lf), split(crlf));
}

#[test]
fn empty_document() {
    let (metadata, blocks) = split("");
    assert_eq!(metadata, "");
    assert_eq!(blocks, vec![RawProblemBlock::default()]);
}

#[test]
fn malformed_lines_degrade_to_metadata_and_continuations() {
    let doc = "#### not a key\n????\nplain\n";
    let (metadata, blocks) = split(doc);

    // `????` has no closing delimiter, so nothing here is a key line.
    assert_eq!(metadata, doc);
    assert!(blocks.iter().all(RawProblemBlock::is_empty));
}

#[test]
fn lesson_source_keeps_initial_empty_block() {
    let source = LessonSource::create_from_source("Title: Only metadata\n");
    assert_eq!(source.metadata_text(), "Title: Only metadata\n");
    assert_eq!(source.blocks().len(), 1);
    assert!(source.blocks()[0].is_empty());
}

#[test]
fn multiple_problems_with_breaks() {
    let doc = "\
Title: Animals
Author: A. Person

(i) Welcome to the quiz
(?) Which is a mammal?
(=) Whale
(x) Shark
(x) Trout
(&) Whales breathe air.
___
(?) Which are birds?
(=) Penguin
(=) Ostrich
(x) Bat
";
    let (metadata, blocks) = split(doc);

    assert_eq!(metadata, "Title: Animals\nAuthor: A. Person\n\n");
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].intro, "Welcome to the quiz\n");
    assert_eq!(blocks[0].wrong_answers, vec!["Shark\n", "Trout\n"]);
    assert_eq!(blocks[0].explanation, "Whales breathe air.\n");
    assert_eq!(blocks[1].question, "Which are birds?\n");
    assert_eq!(blocks[1].right_answers, vec!["Penguin\n", "Ostrich\n"]);
    assert_eq!(blocks[1].wrong_answers, vec!["Bat\n"]);
}
