//! # Inline Markup
//!
//! Turns the raw text of one field into HTML.
//!
//! 1. **Normalise and escape** (`render`): NUL becomes U+FFFD, `&` and `<`
//!    are escaped.
//! 2. **Paragraphs and emphasis** (`render`): blank-line separated
//!    paragraphs, `<br>` line breaks, `**strong**`, `*em*`, `~~del~~` and
//!    `` `code` ``.
//! 3. **Token rules** (`rules`, run by a `ReplacerChain` on each rendered
//!    paragraph): escaped `>`, bare and filled blanks, `emoji:`, `meta:`,
//!    `icon:`, `text:` and `{class}` brackets, in that order.
//! 4. **Blank expansion** (`chain`): placeholders left by the blank rules
//!    become blank markers, collecting `missing_words` in source order.

pub mod chain;
mod cursor;
pub mod html;
pub mod render;
pub mod rules;
pub mod text_item;

pub use chain::{ReplaceContext, Replacer, ReplacerChain};
pub use render::render_inline;
pub use text_item::TextItem;
