use once_cell::sync::Lazy;
use regex::Regex;

pub const ELLIPSIS: &str = "...";

const STOP_CHARS: &[char] = &[' ', '.', ',', '!', ':', '?'];

static LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?:/").unwrap());

/// Shortens `text` to at most `max_length` characters plus an ellipsis,
/// cutting at the last space or punctuation mark so words stay whole.
///
/// Text without any break in the first `max_length` characters is cut hard.
pub fn truncate(text: &str, max_length: usize) -> String {
    let chars = text.chars().collect::<Vec<char>>();
    if chars.len() <= max_length {
        return text.to_string();
    }

    let cut = (0..=max_length)
        .rev()
        .find(|idx| STOP_CHARS.contains(&chars[*idx]))
        .unwrap_or(max_length);

    let mut preview = chars[..cut].iter().collect::<String>();
    preview.push_str(ELLIPSIS);
    preview
}

/// Whether `text` carries an http(s) link.
pub fn contains_link(text: &str) -> bool {
    LINK.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHORT: &str = "hi, a sample short text";

    #[test]
    fn empty_text_is_returned_as_is() {
        assert_eq!(truncate("", 120), "");
        assert_eq!(truncate("", 0), "");
    }

    #[test]
    fn short_text_is_unchanged() {
        assert_eq!(truncate(SHORT, 120), SHORT);
        assert_eq!(truncate(SHORT, SHORT.len()), SHORT);
    }

    #[test]
    fn cuts_at_last_break() {
        assert_eq!(truncate(SHORT, 10), "hi, a...");
    }

    #[test]
    fn long_text_stays_under_limit() {
        let long_text = "
            Here is a much longer text which will need to be trimmed
            by the preview. Some more text goes here please!
        ";
        assert!(long_text.len() > 120);
        assert!(truncate(long_text, 120).chars().count() <= 123);
    }

    #[test]
    fn words_are_not_split() {
        let long_word = "a".repeat(80);
        let spaced = format!("{long_word} {}", "b".repeat(40));
        assert_eq!(truncate(&spaced, 120), format!("{long_word}..."));

        let dotted = format!("{long_word}.{}", "b".repeat(40));
        assert_eq!(truncate(&dotted, 120), format!("{long_word}..."));
    }

    #[test]
    fn unbroken_text_is_cut_hard() {
        let no_breaks = "a".repeat(150);
        assert_eq!(truncate(&no_breaks, 120), format!("{}...", "a".repeat(120)));
    }

    #[test]
    fn counts_characters_not_bytes() {
        let text = "émile zola écrit beaucoup";
        assert_eq!(truncate(text, 8), "émile...");
    }

    #[test]
    fn link_detection() {
        assert!(!contains_link("No link in this text"));
        assert!(contains_link("There may https://some be a link here"));
        assert!(!contains_link(
            "In this text all the false positives appear: http, https, https:, http:"
        ));
        assert!(contains_link("but add a backslash and it fails: https:/"));
    }
}
