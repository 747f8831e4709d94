//! Inline renderer: escaping, paragraphs, emphasis and the replacer chain.
//!
//! Input is escaped (`&` and `<`) first, so every raw `<` seen later is
//! markup this module or a replacer emitted. Emphasis is rendered before
//! the chain runs, which lets token rules start right after an emitted
//! `>` and stop at a closing tag (`**...Paris**`).

use super::{
    chain::{PLACEHOLDER_CLOSE, PLACEHOLDER_OPEN, ReplaceContext, ReplacerChain},
    cursor::Cursor,
};

struct Emphasis {
    marker: &'static [u8],
    tag: &'static str,
    /// Refuses to open or close inside a word (`snake_case_name`).
    word_bound: bool,
}

/// Doubled markers first so `**` is never read as two `*`.
const EMPHASIS: &[Emphasis] = &[
    Emphasis {
        marker: b"**",
        tag: "strong",
        word_bound: false,
    },
    Emphasis {
        marker: b"__",
        tag: "strong",
        word_bound: true,
    },
    Emphasis {
        marker: b"~~",
        tag: "del",
        word_bound: false,
    },
    Emphasis {
        marker: b"*",
        tag: "em",
        word_bound: false,
    },
    Emphasis {
        marker: b"_",
        tag: "em",
        word_bound: true,
    },
];

const CODE_TICK: u8 = b'`';

/// Renders one text field to inline HTML.
///
/// A single paragraph is returned bare; two or more are each wrapped in
/// `<p>`. Lines inside a paragraph are joined with `<br>`. The chain runs
/// once per paragraph, after emphasis.
pub fn render_inline(text: &str, chain: &ReplacerChain, ctx: &mut ReplaceContext<'_>) -> String {
    let normalized = normalize(text);
    let escaped = html_escape::encode_text_minimal(&normalized);

    let mut rendered: Vec<String> = paragraphs(&escaped)
        .iter()
        .map(|p| chain.apply(&render_emphasis(p), ctx))
        .collect();

    match rendered.len() {
        0 => String::new(),
        1 => rendered.remove(0),
        _ => rendered.iter().map(|p| format!("<p>{p}</p>")).collect(),
    }
}

/// Replaces NUL with U+FFFD and drops the characters reserved for blank
/// placeholders.
fn normalize(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            '\0' => Some(char::REPLACEMENT_CHARACTER),
            PLACEHOLDER_OPEN | PLACEHOLDER_CLOSE | '\r' => None,
            c => Some(c),
        })
        .collect()
}

/// Groups non-blank lines into paragraphs, each joined with `<br>`.
fn paragraphs(text: &str) -> Vec<String> {
    let mut out = vec![];
    let mut lines: Vec<&str> = vec![];

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            if !lines.is_empty() {
                out.push(lines.join("<br>"));
                lines.clear();
            }
        } else {
            lines.push(line);
        }
    }
    if !lines.is_empty() {
        out.push(lines.join("<br>"));
    }

    out
}

fn render_emphasis(s: &str) -> String {
    let closers = Closers::scan(s);
    let mut cur = Cursor::new(s);
    let mut out = String::with_capacity(s.len());
    let mut text_start = 0;

    fn flush_text(out: &mut String, s: &str, start: usize, end: usize) {
        if end > start {
            out.push_str(&s[start..end]);
        }
    }

    while !cur.eof() {
        let start = cur.pos();
        // Tags stay part of the surrounding text run.
        if cur.skip_tag() {
            continue;
        }
        if let Some(html) = try_parse_code_span(&mut cur) {
            flush_text(&mut out, s, text_start, start);
            out.push_str(&html);
            text_start = cur.pos();
            continue;
        }
        if let Some(html) = try_parse_emphasis(&mut cur, &closers) {
            flush_text(&mut out, s, text_start, start);
            out.push_str(&html);
            text_start = cur.pos();
            continue;
        }
        cur.bump();
    }

    flush_text(&mut out, s, text_start, cur.pos());
    out
}

/// `` `code` ``. The content is emitted as-is; it is already escaped.
fn try_parse_code_span(cur: &mut Cursor<'_>) -> Option<String> {
    if cur.peek() != Some(CODE_TICK) {
        return None;
    }

    let saved = cur.clone();
    cur.bump(); // `
    let inner_start = cur.pos();

    while !cur.eof() && cur.peek() != Some(CODE_TICK) {
        cur.bump();
    }

    if cur.peek() != Some(CODE_TICK) || cur.pos() == inner_start {
        *cur = saved;
        return None;
    }
    let inner = &cur.s[inner_start..cur.pos()];
    cur.bump(); // closing `

    Some(format!("<code>{inner}</code>"))
}

/// Any of [`EMPHASIS`], closed by the first valid closer after it.
fn try_parse_emphasis(cur: &mut Cursor<'_>, closers: &Closers) -> Option<String> {
    let (index, rule) = EMPHASIS
        .iter()
        .enumerate()
        .find(|(_, rule)| cur.starts_with(rule.marker))?;
    let len = rule.marker.len();

    if rule.word_bound && cur.prev().is_some_and(|b| b.is_ascii_alphanumeric()) {
        return None;
    }

    let inner_start = cur.pos() + len;
    if cur
        .s
        .as_bytes()
        .get(inner_start)
        .is_none_or(|b| b.is_ascii_whitespace())
    {
        return None;
    }

    let close = closers.first_after(index, inner_start)?;
    let inner = &cur.s[inner_start..close];
    cur.bump_n(close + len - cur.pos());

    Some(format!(
        "<{tag}>{}</{tag}>",
        render_emphasis(inner),
        tag = rule.tag
    ))
}

/// Sorted closing positions of every [`EMPHASIS`] rule in one paragraph.
///
/// Found in a single pass so an opener that never closes costs a binary
/// search instead of a scan to the end of the paragraph.
struct Closers(Vec<Vec<usize>>);

impl Closers {
    fn scan(s: &str) -> Self {
        let bytes = s.as_bytes();
        let mut closers = vec![Vec::new(); EMPHASIS.len()];
        let mut cur = Cursor::new(s);

        while let Some(b) = cur.peek() {
            if cur.skip_tag() {
                continue;
            }
            if !EMPHASIS.iter().any(|rule| rule.marker[0] == b) {
                cur.bump();
                continue;
            }

            let start = cur.pos();
            let run = marker_run(&cur, b);
            for (rule, positions) in EMPHASIS.iter().zip(closers.iter_mut()) {
                let len = rule.marker.len();
                // A single marker only closes on a lone delimiter; a doubled
                // one closes on the last two of a longer run (`***`).
                let fits = if len == 1 { run == 1 } else { run >= len };
                if rule.marker[0] != b || !fits {
                    continue;
                }

                let close = start + run - len;
                let before = close.checked_sub(1).map(|i| bytes[i]);
                let after = bytes.get(close + len).copied();
                if before.is_some_and(|b| !b.is_ascii_whitespace())
                    && !(rule.word_bound && after.is_some_and(|b| b.is_ascii_alphanumeric()))
                {
                    positions.push(close);
                }
            }
            cur.bump_n(run);
        }

        Self(closers)
    }

    /// First closer of rule `index` strictly after `pos`.
    fn first_after(&self, index: usize, pos: usize) -> Option<usize> {
        let positions = &self.0[index];
        positions
            .get(positions.partition_point(|&close| close <= pos))
            .copied()
    }
}

/// Length of the run of `b` starting at the cursor.
fn marker_run(cur: &Cursor<'_>, b: u8) -> usize {
    cur.s.as_bytes()[cur.pos()..]
        .iter()
        .take_while(|&&c| c == b)
        .count()
}
