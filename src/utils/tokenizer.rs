/// Whitespace that separates words: space, tab, LF, VT, FF, CR
#[inline]
fn is_separator(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

/// Split one line of text into lower-cased words.
///
/// Characters other than ASCII letters, ASCII digits and ASCII whitespace are
/// dropped before splitting, so they join their neighbours rather than
/// separating them (`it's` becomes `its`). Empty words are never produced.
pub fn extract_words(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();

    for ch in line.chars() {
        if ch.is_ascii_alphanumeric() {
            current.push(ch.to_ascii_lowercase());
        } else if is_separator(ch) && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        words.push(current);
    }

    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_words() {
        let words = extract_words("Hello, my name is Kitty.");
        assert_eq!(words, vec!["hello", "my", "name", "is", "kitty"]);
    }

    #[test]
    fn test_punctuation_joins() {
        let words = extract_words("Hello Kitty, it's nice to meet you!");
        assert_eq!(
            words,
            vec!["hello", "kitty", "its", "nice", "to", "meet", "you"]
        );
        assert_eq!(extract_words("e-mail x--y"), vec!["email", "xy"]);
    }

    #[test]
    fn test_whitespace_runs_and_blank_lines() {
        assert!(extract_words("").is_empty());
        assert!(extract_words("   \t  ").is_empty());
        assert!(extract_words("!!! ... ???").is_empty());
        assert_eq!(extract_words("  a\t\tb \x0B c\r"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_non_ascii_is_dropped() {
        // Non-ASCII letters and non-ASCII spaces are removed, not split on
        assert_eq!(extract_words("café naïve"), vec!["caf", "nave"]);
        assert_eq!(extract_words("a\u{00A0}b"), vec!["ab"]);
    }

    #[test]
    fn test_digits_are_words() {
        assert_eq!(extract_words("Route 66 in 1926"), vec!["route", "66", "in", "1926"]);
    }
}
