//! Small HTML fragments shared by the token rules and resolvers.

use base64::{Engine as _, engine::general_purpose::STANDARD};

/// Classes an author may attach with a `>class` suffix.
pub const SAFE_CLASSES: &[&str] = &["big", "bigger", "biggest", "massive", "giant", "column"];

/// Class carried by every blank marker.
pub const MISSING_WORD_CLASS: &str = "missing-word";

/// Class carried by every inline error marker.
pub const ERROR_CLASS: &str = "error";

/// Returns the allow-listed class matching `class`, if any.
pub fn safe_class(class: Option<&str>) -> Option<&'static str> {
    let class = class?;
    SAFE_CLASSES.iter().copied().find(|safe| *safe == class)
}

/// Base64 encoding used for every data attribute this crate emits.
pub fn encode_attribute(value: &str) -> String {
    STANDARD.encode(value.as_bytes())
}

/// Reverses [`encode_attribute`]. Returns `None` for malformed input.
pub fn decode_attribute(value: &str) -> Option<String> {
    let bytes = STANDARD.decode(value).ok()?;
    String::from_utf8(bytes).ok()
}

/// Wraps already-safe `content` in a visible error marker carrying `message`.
pub fn error_span(content: &str, message: &str) -> String {
    format!(
        r#"<span class="{ERROR_CLASS}" data-error="{}">{content}</span>"#,
        encode_attribute(message)
    )
}

/// The empty span that stands in for a blank in rendered HTML.
pub fn blank_marker(word: Option<&str>, class: Option<&str>) -> String {
    format!(
        r#"<span class="{MISSING_WORD_CLASS}{}" data-word="{}"></span>"#,
        class_suffix(class),
        encode_attribute(word.unwrap_or_default())
    )
}

/// `" cls"` for a present class, `""` otherwise.
pub fn class_suffix(class: Option<&str>) -> String {
    class.map(|c| format!(" {c}")).unwrap_or_default()
}
