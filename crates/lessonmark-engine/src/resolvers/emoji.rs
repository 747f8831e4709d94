use std::{collections::HashMap, sync::OnceLock};

use regex::Regex;

use crate::markup::html::error_span;

/// Glyph shown for names that are not in the table (`❓`).
pub const UNKNOWN_EMOJI: &str = "&#x2753;";

/// Short names and their numeric character references. A value starting with
/// `@` is an alias for another entry.
const EMOJI: &[(&str, &str)] = &[
    ("SMILE", "&#x1F604;"),
    ("SMILEY", "&#x1F603;"),
    ("GRIN", "&#x1F601;"),
    ("LAUGH", "&#x1F606;"),
    ("JOY", "&#x1F602;"),
    ("WINK", "&#x1F609;"),
    ("BLUSH", "&#x1F60A;"),
    ("COOL", "&#x1F60E;"),
    ("THINK", "&#x1F914;"),
    ("THINKING", "@THINK"),
    ("NEUTRAL", "&#x1F610;"),
    ("CONFUSED", "&#x1F615;"),
    ("SAD", "&#x1F622;"),
    ("CRY", "@SAD"),
    ("ANGRY", "&#x1F620;"),
    ("SURPRISED", "&#x1F62E;"),
    ("SCREAM", "&#x1F631;"),
    ("SLEEPY", "&#x1F634;"),
    ("NERD", "&#x1F913;"),
    ("PARTY", "&#x1F973;"),
    ("THUMBSUP", "&#x1F44D;"),
    ("+1", "@THUMBSUP"),
    ("YES", "@THUMBSUP"),
    ("THUMBSDOWN", "&#x1F44E;"),
    ("-1", "@THUMBSDOWN"),
    ("NO", "@THUMBSDOWN"),
    ("CLAP", "&#x1F44F;"),
    ("WAVE", "&#x1F44B;"),
    ("OK", "&#x1F44C;"),
    ("POINT", "&#x1F449;"),
    ("POINTLEFT", "&#x1F448;"),
    ("POINTUP", "&#x1F446;"),
    ("POINTDOWN", "&#x1F447;"),
    ("MUSCLE", "&#x1F4AA;"),
    ("PRAY", "&#x1F64F;"),
    ("EYES", "&#x1F440;"),
    ("BRAIN", "&#x1F9E0;"),
    ("HEART", "&#x2764;&#xFE0F;"),
    ("LOVE", "@HEART"),
    ("STAR", "&#x2B50;"),
    ("SPARKLES", "&#x2728;"),
    ("FIRE", "&#x1F525;"),
    ("SUN", "&#x2600;&#xFE0F;"),
    ("MOON", "&#x1F319;"),
    ("CLOUD", "&#x2601;&#xFE0F;"),
    ("RAIN", "&#x1F327;&#xFE0F;"),
    ("SNOW", "&#x2744;&#xFE0F;"),
    ("RAINBOW", "&#x1F308;"),
    ("TREE", "&#x1F333;"),
    ("FLOWER", "&#x1F33C;"),
    ("APPLE", "&#x1F34E;"),
    ("PIZZA", "&#x1F355;"),
    ("CAKE", "&#x1F370;"),
    ("COFFEE", "&#x2615;"),
    ("CAT", "&#x1F408;"),
    ("DOG", "&#x1F415;"),
    ("BIRD", "&#x1F426;"),
    ("FISH", "&#x1F41F;"),
    ("WHALE", "&#x1F40B;"),
    ("BOOK", "&#x1F4D6;"),
    ("BOOKS", "&#x1F4DA;"),
    ("PENCIL", "&#x270F;&#xFE0F;"),
    ("BULB", "&#x1F4A1;"),
    ("IDEA", "@BULB"),
    ("QUESTION", "&#x2753;"),
    ("EXCLAMATION", "&#x2757;"),
    ("WARNING", "&#x26A0;&#xFE0F;"),
    ("CHECK", "&#x2705;"),
    ("TICK", "@CHECK"),
    ("CROSS", "&#x274C;"),
    ("WRONG", "@CROSS"),
    ("TROPHY", "&#x1F3C6;"),
    ("MEDAL", "&#x1F3C5;"),
    ("ROCKET", "&#x1F680;"),
    ("CLOCK", "&#x23F0;"),
    ("GLOBE", "&#x1F30D;"),
    ("EARTH", "@GLOBE"),
    ("MUSIC", "&#x1F3B5;"),
    ("HUNDRED", "&#x1F4AF;"),
    ("100", "@HUNDRED"),
];

fn table() -> &'static HashMap<&'static str, &'static str> {
    static TABLE: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    TABLE.get_or_init(|| EMOJI.iter().copied().collect())
}

fn code_points_regex() -> &'static Regex {
    static CODE_POINTS: OnceLock<Regex> = OnceLock::new();
    CODE_POINTS.get_or_init(|| {
        Regex::new(r"(?i)^(?:U\+[0-9A-F]{1,6})+$").expect("Invalid code point regex")
    })
}

fn code_point_regex() -> &'static Regex {
    static CODE_POINT: OnceLock<Regex> = OnceLock::new();
    CODE_POINT
        .get_or_init(|| Regex::new(r"(?i)U\+([0-9A-F]{1,6})").expect("Invalid code point regex"))
}

/// Resolves an emoji short name or `U+XXXX` sequence to inline HTML.
///
/// Blank input yields a single space; unknown names yield [`UNKNOWN_EMOJI`]
/// inside an error marker.
pub fn resolve_emoji(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        return " ".to_string();
    }

    if code_points_regex().is_match(name) {
        return code_point_regex()
            .captures_iter(name)
            .map(|caps| format!("&#x{};", caps[1].to_ascii_uppercase()))
            .collect();
    }

    match lookup(&name.to_ascii_uppercase()) {
        Some(glyph) => glyph.to_string(),
        None => {
            log::warn!("unknown emoji name {name:?}");
            error_span(UNKNOWN_EMOJI, &format!("Unknown emoji {name}"))
        }
    }
}

/// Table lookup with one level of `@` alias dereferencing.
fn lookup(key: &str) -> Option<&'static str> {
    let value = table().get(key).copied()?;
    match value.strip_prefix('@') {
        Some(target) => table()
            .get(target)
            .copied()
            .filter(|glyph| !glyph.starts_with('@')),
        None => Some(value),
    }
}
