use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::metadata::Metadata;

use super::{html::blank_marker, rules};

/// One ordered rewrite step of the substitution pipeline.
pub trait Replacer: Send + Sync {
    fn apply(&self, input: &str, ctx: &mut ReplaceContext<'_>) -> String;
}

/// State threaded through every [`Replacer`] of one resolution.
///
/// Blank rules do not write their markers directly: they register the blank
/// here and leave a private-use placeholder in the text. [`expand_blanks`]
/// swaps placeholders for markers once the pipeline is done, which yields
/// missing words in source order no matter which rule found them.
///
/// [`expand_blanks`]: ReplaceContext::expand_blanks
#[derive(Debug, Default)]
pub struct ReplaceContext<'m> {
    metadata: Option<&'m Metadata>,
    blanks: Vec<Blank>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Blank {
    word: Option<String>,
    class: Option<&'static str>,
}

/// Opens a blank placeholder. Never present in normalised input.
pub const PLACEHOLDER_OPEN: char = '\u{E000}';
/// Closes a blank placeholder.
pub const PLACEHOLDER_CLOSE: char = '\u{E001}';

impl<'m> ReplaceContext<'m> {
    pub fn new(metadata: Option<&'m Metadata>) -> Self {
        Self {
            metadata,
            blanks: vec![],
        }
    }

    pub fn metadata(&self) -> Option<&'m Metadata> {
        self.metadata
    }

    /// Registers a blank and returns the placeholder to put in its place.
    pub fn add_blank(&mut self, word: Option<String>, class: Option<&'static str>) -> String {
        let index = self.blanks.len();
        self.blanks.push(Blank { word, class });
        format!("{PLACEHOLDER_OPEN}{index}{PLACEHOLDER_CLOSE}")
    }

    pub fn blank_count(&self) -> usize {
        self.blanks.len()
    }

    /// Replaces every placeholder in `html` with its blank marker and returns
    /// the missing words in the order the markers appear.
    pub fn expand_blanks(&self, html: &str) -> (String, Vec<Option<String>>) {
        let mut missing_words = Vec::with_capacity(self.blanks.len());
        let expanded = placeholder_regex().replace_all(html, |caps: &Captures| {
            let blank = caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|index| self.blanks.get(index));
            match blank {
                Some(blank) => {
                    missing_words.push(blank.word.clone());
                    blank_marker(blank.word.as_deref(), blank.class)
                }
                None => String::new(),
            }
        });
        (expanded.into_owned(), missing_words)
    }
}

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\x{E000}([0-9]+)\x{E001}").expect("Invalid placeholder regex")
    })
}

/// An ordered list of replacers applied left to right.
pub struct ReplacerChain {
    rules: Vec<Box<dyn Replacer>>,
}

impl ReplacerChain {
    pub fn new(rules: Vec<Box<dyn Replacer>>) -> Self {
        Self { rules }
    }

    /// The lesson markup pipeline: escaped `>`, bare blanks, filled blanks,
    /// emoji, metadata, icons, text classes, class brackets.
    pub fn standard() -> &'static ReplacerChain {
        static STANDARD: OnceLock<ReplacerChain> = OnceLock::new();
        STANDARD.get_or_init(|| {
            ReplacerChain::new(vec![
                Box::new(rules::EscapedGt),
                Box::new(rules::BareBlank),
                Box::new(rules::FilledBlank),
                Box::new(rules::EmojiToken),
                Box::new(rules::MetaToken),
                Box::new(rules::IconToken),
                Box::new(rules::TextToken),
                Box::new(rules::ClassBrackets),
            ])
        })
    }

    pub fn apply(&self, input: &str, ctx: &mut ReplaceContext<'_>) -> String {
        self.rules
            .iter()
            .fold(input.to_string(), |text, rule| rule.apply(&text, ctx))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
