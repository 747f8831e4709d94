use std::sync::OnceLock;

use regex::Regex;

use crate::metadata::Metadata;

use super::{
    chain::{ReplaceContext, ReplacerChain},
    render::render_inline,
};

/// One rendered text field: its HTML plus the blanks found in it.
///
/// `missing_words` has one entry per blank marker in `html`, left to right.
/// `Some(word)` is a `...word` blank, `None` a bare ` 123` blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextItem {
    html: String,
    missing_words: Vec<Option<String>>,
}

impl TextItem {
    /// Resolves raw field text through the standard markup pipeline.
    pub fn create_from_source(raw: &str, metadata: Option<&Metadata>) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return Self::default();
        }

        let mut ctx = ReplaceContext::new(metadata);
        let rendered = render_inline(raw, ReplacerChain::standard(), &mut ctx);
        let (html, missing_words) = ctx.expand_blanks(&rendered);

        Self {
            html,
            missing_words,
        }
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn missing_words(&self) -> &[Option<String>] {
        &self.missing_words
    }

    pub fn is_empty(&self) -> bool {
        self.html.is_empty()
    }

    /// Text without markup. Blanks read as `...`, line breaks as newlines.
    pub fn plain_text(&self) -> String {
        static BLANK: OnceLock<Regex> = OnceLock::new();
        static TAG: OnceLock<Regex> = OnceLock::new();
        let blank = BLANK.get_or_init(|| {
            Regex::new(r#"<span class="missing-word[^"]*" data-word="[^"]*"></span>"#)
                .expect("Invalid blank marker regex")
        });
        let tag = TAG.get_or_init(|| Regex::new(r"<[^>]*>").expect("Invalid tag regex"));

        let text = blank.replace_all(&self.html, "...");
        let text = text.replace("<br>", "\n").replace("</p>", "\n\n");
        let text = tag.replace_all(&text, "");
        html_escape::decode_html_entities(text.trim()).into_owned()
    }

    /// First run of non-space, non-tag text, skipping leading tags.
    pub fn first_word(&self) -> Option<String> {
        static FIRST_WORD: OnceLock<Regex> = OnceLock::new();
        let re = FIRST_WORD.get_or_init(|| {
            Regex::new(r"^(?:\s*<[^>]*>)*\s*([^\s<]+)").expect("Invalid first word regex")
        });

        re.captures(&self.html)
            .map(|caps| html_escape::decode_html_entities(&caps[1]).into_owned())
    }

    /// Checks `answers` positionally against the worded blanks.
    ///
    /// Comparison trims whitespace and ignores ASCII case. Bare blanks and
    /// blanks without an answer are never correct.
    pub fn check_missing_words(&self, answers: &[&str]) -> Vec<bool> {
        self.missing_words
            .iter()
            .enumerate()
            .map(|(i, word)| match (word, answers.get(i)) {
                (Some(word), Some(answer)) => word.trim().eq_ignore_ascii_case(answer.trim()),
                _ => false,
            })
            .collect()
    }
}
