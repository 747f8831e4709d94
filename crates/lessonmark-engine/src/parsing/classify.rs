use std::sync::OnceLock;

use regex::Regex;

/// The field a key line opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    /// `i` - the intro slide shown before the question.
    Intro,
    /// `?` - the question itself.
    Question,
    /// `=` - one right answer.
    RightAnswer,
    /// `x` - one wrong answer.
    WrongAnswer,
    /// `&` (or `+`) - the explanation shown after answering.
    Explanation,
    /// `_` - forces the next key line to start a new problem.
    QuestionBreak,
}

impl FieldKey {
    /// Maps a tag character to its key, ignoring ASCII case.
    pub fn from_tag(tag: char) -> Option<Self> {
        match tag.to_ascii_lowercase() {
            'i' => Some(Self::Intro),
            '?' => Some(Self::Question),
            '=' => Some(Self::RightAnswer),
            'x' => Some(Self::WrongAnswer),
            '&' | '+' => Some(Self::Explanation),
            '_' => Some(Self::QuestionBreak),
            _ => None,
        }
    }
}

/// Classification of a single source line.
///
/// Lines are classified independently of their neighbours; grouping happens
/// in [`BlockBuilder`](super::BlockBuilder).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineClass {
    /// The field this line opens, or `None` for continuation text.
    pub key: Option<FieldKey>,
    /// Text after the marker, or the whole line when there is no marker.
    pub content: String,
}

/// Recognises key lines such as `(i) Welcome`, `?? What is 2+2`, `--= 4`.
///
/// Shape: up to three filler characters (`-#_*` or space), optional opening
/// parens, one tag character repeated any number of times, then at least
/// one closing delimiter (`_`, `)` or space). Parens are consumed greedily
/// and need not balance.
pub struct LessonLineClassifier;

impl LessonLineClassifier {
    /// Classifies a line (without its terminator).
    pub fn classify(&self, line: &str) -> LineClass {
        let Some(caps) = key_line_regex().captures(line) else {
            return LineClass {
                key: None,
                content: line.to_string(),
            };
        };

        let key = caps
            .get(1)
            .and_then(|tag| tag.as_str().chars().next())
            .and_then(FieldKey::from_tag);

        match key {
            Some(key) => LineClass {
                key: Some(key),
                content: caps.get(2).map_or("", |m| m.as_str()).to_string(),
            },
            None => LineClass {
                key: None,
                content: line.to_string(),
            },
        }
    }
}

fn key_line_regex() -> &'static Regex {
    static KEY_LINE: OnceLock<Regex> = OnceLock::new();
    KEY_LINE.get_or_init(|| {
        Regex::new(r"(?i)^[-#_* ]{0,3}\(*(i+|\?+|=+|x+|&+|\++|_+)[_) ]+(.*)$")
            .expect("Invalid key line regex")
    })
}
