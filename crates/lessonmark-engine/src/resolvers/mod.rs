//! Pure lookups from short token names to inline HTML.

pub mod emoji;
pub mod icon;

pub use emoji::resolve_emoji;
pub use icon::resolve_icon;
