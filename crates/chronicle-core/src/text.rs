//! Small text helpers used by the admin surface and the feed.

/// Derive a URL slug from free text: lowercase ASCII alphanumerics with
/// single dashes between words, no leading or trailing dash.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut last_was_dash = true;

    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_dash = false;
        } else if !last_was_dash {
            slug.push('-');
            last_was_dash = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    slug
}

/// Truncate text to at most `limit` whitespace-separated words, appending
/// an ellipsis when anything was cut.
pub fn truncate_words(input: &str, limit: usize) -> String {
    let mut words = input.split_whitespace();
    let kept: Vec<&str> = words.by_ref().take(limit).collect();

    if words.next().is_some() {
        format!("{}…", kept.join(" "))
    } else {
        kept.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("Rust 2024 Edition!"), "rust-2024-edition");
    }

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("  lots -- of   separators  "), "lots-of-separators");
        assert_eq!(slugify("--already--dashed--"), "already-dashed");
    }

    #[test]
    fn test_slugify_strips_non_ascii() {
        assert_eq!(slugify("café & crème"), "caf-cr-me");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_truncate_words_short_text_untouched() {
        assert_eq!(truncate_words("one two three", 30), "one two three");
    }

    #[test]
    fn test_truncate_words_cuts_and_marks() {
        assert_eq!(truncate_words("a b c d e", 3), "a b c…");
    }

    #[test]
    fn test_truncate_words_normalizes_whitespace() {
        assert_eq!(truncate_words("a\n b\t\tc", 5), "a b c");
    }
}
