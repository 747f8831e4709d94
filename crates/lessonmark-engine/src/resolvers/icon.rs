use std::sync::OnceLock;

use regex::Regex;

use crate::markup::html::class_suffix;

/// Class every icon carries.
pub const ICON_FAMILY: &str = "fa";
/// Prefix of the per-icon class.
pub const ICON_PREFIX: &str = "fa-";
/// Icon used when the requested name is not a valid icon name.
pub const NOT_DEFINED_ICON: &str = "question";

fn icon_name_regex() -> &'static Regex {
    static ICON_NAME: OnceLock<Regex> = OnceLock::new();
    ICON_NAME.get_or_init(|| Regex::new(r"(?i)^[a-z-]{2,}$").expect("Invalid icon name regex"))
}

fn extra_class_regex() -> &'static Regex {
    static EXTRA_CLASS: OnceLock<Regex> = OnceLock::new();
    EXTRA_CLASS.get_or_init(|| Regex::new(r"^[A-Za-z_-]{2,}$").expect("Invalid class regex"))
}

/// Builds the markup for an icon.
///
/// `name` may carry the family prefix (`fa-star` and `star` are equivalent).
/// Invalid names fall back to [`NOT_DEFINED_ICON`]; an invalid extra class is
/// dropped.
pub fn resolve_icon(name: &str, extra_class: Option<&str>) -> String {
    let trimmed = name.trim();
    let bare = strip_family_prefix(trimmed);

    let icon = if icon_name_regex().is_match(bare) {
        bare.to_ascii_lowercase()
    } else {
        NOT_DEFINED_ICON.to_string()
    };
    let extra = extra_class.filter(|class| extra_class_regex().is_match(class));

    format!(
        r#"<i class="{ICON_FAMILY} {ICON_PREFIX}{icon}{}"></i>"#,
        class_suffix(extra)
    )
}

fn strip_family_prefix(name: &str) -> &str {
    match name.get(..ICON_PREFIX.len()) {
        Some(head) if head.eq_ignore_ascii_case(ICON_PREFIX) => &name[ICON_PREFIX.len()..],
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("star", r#"<i class="fa fa-star"></i>"#)]
    #[case("fa-star", r#"<i class="fa fa-star"></i>"#)]
    #[case("FA-Star", r#"<i class="fa fa-star"></i>"#)]
    #[case("arrow-right", r#"<i class="fa fa-arrow-right"></i>"#)]
    fn valid_names(#[case] name: &str, #[case] html: &str) {
        assert_eq!(resolve_icon(name, None), html);
    }

    #[rstest]
    #[case("x")]
    #[case("")]
    #[case("star2")]
    #[case("star\"><script>")]
    #[case("fa-")]
    fn invalid_names_use_the_not_defined_icon(#[case] name: &str) {
        assert_eq!(resolve_icon(name, None), r#"<i class="fa fa-question"></i>"#);
    }

    #[test]
    fn valid_extra_class_is_appended() {
        assert_eq!(
            resolve_icon("star", Some("big")),
            r#"<i class="fa fa-star big"></i>"#
        );
        assert_eq!(
            resolve_icon("star", Some("fa_spin")),
            r#"<i class="fa fa-star fa_spin"></i>"#
        );
    }

    #[rstest]
    #[case("b")]
    #[case("big1")]
    #[case("a b")]
    fn invalid_extra_class_is_dropped(#[case] class: &str) {
        assert_eq!(
            resolve_icon("star", Some(class)),
            r#"<i class="fa fa-star"></i>"#
        );
    }
}
