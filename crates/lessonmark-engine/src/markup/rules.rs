//! The token rules of the substitution pipeline, in pipeline order.
//!
//! Rules run on one rendered paragraph: escaped (`&` and `<`), with line
//! breaks as `<br>` and emphasis already turned into tags. A raw `<` in their
//! input always belongs to emitted markup.
//!
//! Prefix tokens (`...word`, `emoji:`, `meta:`, `icon:`, `text:`) start at the
//! beginning of a line, after whitespace or right after `>`, and end at end of
//! line, whitespace, one of `, ; : . ? !`, a `<br>` or a closing tag. A
//! rejected end leaves the token untouched.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::resolvers::{resolve_emoji, resolve_icon};

use super::{
    chain::{PLACEHOLDER_CLOSE, PLACEHOLDER_OPEN, ReplaceContext, Replacer},
    html::{SAFE_CLASSES, class_suffix, error_span, safe_class},
};

/// A token word: entities, or anything but whitespace, angle brackets,
/// terminating punctuation and blank placeholders.
const WORD: &str = r"(?:&#?[0-9A-Za-z]+;|[^\s<>&,;:.?!\x{E000}\x{E001}])+";

/// Builds `(lead)prefix(word)(>class)?` for a prefix token.
fn token_regex(prefix: &str, word: &str) -> Regex {
    Regex::new(&format!(
        r"(?m)(^|[\s>]){}({word})(?:>([A-Za-z_-]+))?",
        regex::escape(prefix)
    ))
    .expect("Invalid token regex")
}

/// Whether a token ending at byte `end` of `s` ends on a boundary.
fn ends_at_boundary(s: &str, end: usize) -> bool {
    let rest = &s[end..];
    match rest.chars().next() {
        None => true,
        Some(c) if c.is_whitespace() => true,
        Some(',' | ';' | ':' | '.' | '?' | '!') => true,
        Some('<') => rest.starts_with("</") || rest.starts_with("<br>"),
        Some(c) => c == PLACEHOLDER_OPEN || c == PLACEHOLDER_CLOSE,
    }
}

/// Replaces every boundary-respecting match of `re`, keeping the lead
/// character (capture 1) and substituting the rest with `f`.
fn replace_tokens(re: &Regex, input: &str, mut f: impl FnMut(&Captures) -> String) -> String {
    let mut out = String::with_capacity(input.len());
    let mut last = 0;

    for caps in re.captures_iter(input) {
        let Some(m) = caps.get(0) else {
            continue;
        };
        if !ends_at_boundary(input, m.end()) {
            continue;
        }
        out.push_str(&input[last..m.start()]);
        out.push_str(caps.get(1).map_or("", |lead| lead.as_str()));
        out.push_str(&f(&caps));
        last = m.end();
    }

    out.push_str(&input[last..]);
    out
}

fn class_of<'c>(caps: &'c Captures) -> Option<&'c str> {
    caps.get(3).map(|m| m.as_str())
}

/// `\>` becomes `&gt;`, so a literal `>` can sit inside a token word
/// without being read as a class delimiter.
pub struct EscapedGt;

impl Replacer for EscapedGt {
    fn apply(&self, input: &str, _ctx: &mut ReplaceContext<'_>) -> String {
        input.replace("\\>", "&gt;")
    }
}

/// ` 123` at the end of a line is a blank with no word. Closing tags may sit
/// between it and the line end.
pub struct BareBlank;

impl Replacer for BareBlank {
    fn apply(&self, input: &str, ctx: &mut ReplaceContext<'_>) -> String {
        static BARE: OnceLock<Regex> = OnceLock::new();
        let re = BARE.get_or_init(|| {
            Regex::new(r"(?m) 123(?:>([A-Za-z_-]+))?[ \t]*((?:</[a-z]+>)*(?:<br>|$))")
                .expect("Invalid bare blank regex")
        });

        re.replace_all(input, |caps: &Captures| {
            let class = safe_class(caps.get(1).map(|m| m.as_str()));
            format!(" {}{}", ctx.add_blank(None, class), &caps[2])
        })
        .into_owned()
    }
}

/// `...word` is a blank whose answer is `word`.
pub struct FilledBlank;

impl Replacer for FilledBlank {
    fn apply(&self, input: &str, ctx: &mut ReplaceContext<'_>) -> String {
        static FILLED: OnceLock<Regex> = OnceLock::new();
        let re = FILLED.get_or_init(|| token_regex("...", WORD));

        replace_tokens(re, input, |caps| {
            let word = html_escape::decode_html_entities(&caps[2]).into_owned();
            ctx.add_blank(Some(word), safe_class(class_of(caps)))
        })
    }
}

/// `emoji:name` or `emoji:U+1F600`.
pub struct EmojiToken;

impl Replacer for EmojiToken {
    fn apply(&self, input: &str, _ctx: &mut ReplaceContext<'_>) -> String {
        static EMOJI: OnceLock<Regex> = OnceLock::new();
        let re = EMOJI.get_or_init(|| token_regex("emoji:", WORD));

        replace_tokens(re, input, |caps| {
            format!(
                r#"<span class="emoji{}">{}</span>"#,
                class_suffix(safe_class(class_of(caps))),
                resolve_emoji(&caps[2])
            )
        })
    }
}

/// `meta:KEY` inserts the (already escaped) metadata value.
pub struct MetaToken;

impl Replacer for MetaToken {
    fn apply(&self, input: &str, ctx: &mut ReplaceContext<'_>) -> String {
        static META: OnceLock<Regex> = OnceLock::new();
        let re = META.get_or_init(|| {
            Regex::new(r"(?m)(^|[\s>])meta:([A-Za-z0-9_]+)").expect("Invalid meta regex")
        });

        let metadata = ctx.metadata();
        replace_tokens(re, input, |caps| {
            let key = &caps[2];
            match metadata.and_then(|m| m.value(key)) {
                Some(value) => value.to_string(),
                None => {
                    log::warn!("lesson references missing metadata {key:?}");
                    error_span(key, &format!("Cannot find metadata {key}"))
                }
            }
        })
    }
}

/// `icon:name`.
pub struct IconToken;

impl Replacer for IconToken {
    fn apply(&self, input: &str, _ctx: &mut ReplaceContext<'_>) -> String {
        static ICON: OnceLock<Regex> = OnceLock::new();
        let re = ICON.get_or_init(|| token_regex("icon:", WORD));

        replace_tokens(re, input, |caps| {
            resolve_icon(&caps[2], safe_class(class_of(caps)))
        })
    }
}

/// `text:word>class` styles a single word.
pub struct TextToken;

impl Replacer for TextToken {
    fn apply(&self, input: &str, _ctx: &mut ReplaceContext<'_>) -> String {
        static TEXT: OnceLock<Regex> = OnceLock::new();
        let re = TEXT.get_or_init(|| token_regex("text:", WORD));

        replace_tokens(re, input, |caps| match safe_class(class_of(caps)) {
            Some(class) => format!(r#"<span class="{class}">{}</span>"#, &caps[2]),
            None => format!("<span>{}</span>", &caps[2]),
        })
    }
}

/// `{big}some words{big}` for every safe class.
pub struct ClassBrackets;

impl Replacer for ClassBrackets {
    fn apply(&self, input: &str, _ctx: &mut ReplaceContext<'_>) -> String {
        static BRACKETS: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();
        let rules = BRACKETS.get_or_init(|| {
            SAFE_CLASSES
                .iter()
                .map(|class| {
                    let tag = regex::escape(&format!("{{{class}}}"));
                    let re = Regex::new(&format!("{tag}(.+?){tag}"))
                        .expect("Invalid class bracket regex");
                    (*class, re)
                })
                .collect()
        });

        rules.iter().fold(input.to_string(), |text, (class, re)| {
            re.replace_all(&text, format!(r#"<span class="{class}">${{1}}</span>"#).as_str())
                .into_owned()
        })
    }
}
