//! `key: value` metadata at the top of a lesson.

use std::{collections::HashMap, sync::OnceLock};

use regex::Regex;

/// Case-insensitive lookup of lesson metadata.
///
/// Keys are stored uppercased; values are HTML-escaped once, here, so they
/// can be injected into rendered HTML as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    entries: HashMap<String, String>,
}

impl Metadata {
    /// Parses `key: value` lines. Separators `:`, `;` and `.` are accepted,
    /// optionally followed by `-`. Lines of any other shape are skipped and
    /// a repeated key keeps its last value.
    pub fn create_from_source(raw: &str) -> Self {
        let re = metadata_line_regex();
        let mut entries = HashMap::new();

        for line in raw.lines() {
            let Some(caps) = re.captures(line) else {
                continue;
            };
            let key = caps[1].to_ascii_uppercase();
            let value = html_escape::encode_safe(&caps[2]).into_owned();
            entries.insert(key, value);
        }

        Self { entries }
    }

    /// Looks up `key` ignoring case, falling back to `default`.
    pub fn get(&self, key: &str, default: Option<&str>) -> Option<String> {
        self.value(key)
            .or(default)
            .map(ToString::to_string)
    }

    /// Borrowing lookup, ignoring case.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.entries
            .get(&key.to_ascii_uppercase())
            .map(String::as_str)
    }

    /// The `TITLE` entry, if any.
    pub fn title(&self) -> Option<&str> {
        self.value("title")
    }

    /// Stored keys (uppercased), sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<_> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn metadata_line_regex() -> &'static Regex {
    static METADATA_LINE: OnceLock<Regex> = OnceLock::new();
    METADATA_LINE.get_or_init(|| {
        Regex::new(r"^\s*([A-Za-z0-9_]+)\s*[:;.]-?\s*(.*?)\s*$").expect("Invalid metadata regex")
    })
}
