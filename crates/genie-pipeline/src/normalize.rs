//! Comment text normalization.

use std::sync::LazyLock;

use regex::Regex;

static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("valid link regex"));

// ASCII word characters only, and `_` is stripped as well.
static NON_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9A-Za-z\s]").expect("valid non-word regex"));

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Turn raw comment markup into analyzable text.
///
/// Returns `None` when the comment carries an absolute `http(s)` link (the
/// check runs on the raw text) or when nothing is left after cleaning.
/// Otherwise the text is entity-decoded, lowercased, stripped of everything
/// but ASCII letters, digits and whitespace, and whitespace-collapsed.
///
/// Idempotent on its own output.
#[must_use]
pub fn normalize_comment(raw: &str) -> Option<String> {
    if LINK_RE.is_match(raw) {
        return None;
    }

    let decoded = html_escape::decode_html_entities(raw);
    let lowered = decoded.to_lowercase();
    let stripped = NON_WORD_RE.replace_all(&lowered, "");
    let collapsed = WHITESPACE_RE.replace_all(&stripped, " ");
    let trimmed = collapsed.trim();

    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_comment;

    #[test]
    fn links_exclude_the_comment() {
        assert_eq!(normalize_comment("Check this http://x.co out!"), None);
        assert_eq!(normalize_comment("Check https://spam.com"), None);
        assert_eq!(
            normalize_comment(r#"see <a href="https://www.youtube.com/watch?v=1">here</a>"#),
            None
        );
    }

    #[test]
    fn bare_scheme_without_target_is_not_a_link() {
        assert_eq!(
            normalize_comment("type http:// then the rest").as_deref(),
            Some("type http then the rest")
        );
    }

    #[test]
    fn lowercases_and_strips_punctuation() {
        assert_eq!(
            normalize_comment("Is this REAL?!").as_deref(),
            Some("is this real")
        );
    }

    #[test]
    fn decodes_entities_before_stripping() {
        assert_eq!(
            normalize_comment("Tom &amp; Jerry").as_deref(),
            Some("tom jerry")
        );
        assert_eq!(normalize_comment("I&#39;m here").as_deref(), Some("im here"));
        assert_eq!(
            normalize_comment("a&nbsp;b").as_deref(),
            Some("a b"),
            "decoded non-breaking space is whitespace"
        );
    }

    #[test]
    fn malformed_entities_degrade_to_text() {
        assert_eq!(
            normalize_comment("fish & &bogusentity; chips").as_deref(),
            Some("fish bogusentity chips")
        );
    }

    #[test]
    fn underscores_and_non_ascii_letters_are_removed() {
        assert_eq!(normalize_comment("snake_case").as_deref(), Some("snakecase"));
        assert_eq!(normalize_comment("café time").as_deref(), Some("caf time"));
    }

    #[test]
    fn whitespace_is_collapsed_and_trimmed() {
        assert_eq!(
            normalize_comment("  so \n\t many   spaces  ").as_deref(),
            Some("so many spaces")
        );
    }

    #[test]
    fn markup_only_comments_are_discarded() {
        assert_eq!(normalize_comment("!!! ???"), None);
        assert_eq!(normalize_comment(""), None);
        assert_eq!(normalize_comment("&amp;&lt;&gt;"), None);
        assert_eq!(normalize_comment("🔥🔥🔥"), None);
    }

    #[test]
    fn normalization_is_idempotent() {
        let samples = [
            "Is this real?",
            "Tom &amp; Jerry &lt;3",
            "  LOTS   of\tspace ",
            "snake_case &#39;quoted&#39;",
            "<b>bold</b><br>next line",
            "&amp;amp; double encoded",
            "numbers 123 and 4.5",
        ];
        for raw in samples {
            let once = normalize_comment(raw).expect("sample should survive");
            assert_eq!(
                normalize_comment(&once).as_deref(),
                Some(once.as_str()),
                "not idempotent for {raw:?}"
            );
        }
    }
}
