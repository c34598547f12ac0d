use std::borrow::Cow;

use regex::Regex;

/// Keeps only characters accepted by `keep`, borrowing when nothing is removed.
pub fn retain_chars(input: &str, keep: impl Fn(char) -> bool) -> Cow<'_, str> {
    if input.chars().all(&keep) {
        Cow::Borrowed(input)
    } else {
        Cow::Owned(input.chars().filter(|ch| keep(*ch)).collect())
    }
}

/// Replaces every `from` with `to`, borrowing when `from` does not occur.
pub fn replace_char(input: &str, from: char, to: char) -> Cow<'_, str> {
    if input.contains(from) {
        Cow::Owned(
            input
                .chars()
                .map(|ch| if ch == from { to } else { ch })
                .collect(),
        )
    } else {
        Cow::Borrowed(input)
    }
}

/// Applies a regex replacement while avoiding allocation when there are no matches.
pub fn regex_replace<'a>(value: &'a str, regex: &Regex, replacement: &str) -> Cow<'a, str> {
    if regex.is_match(value) {
        Cow::Owned(regex.replace_all(value, replacement).into_owned())
    } else {
        Cow::Borrowed(value)
    }
}

pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retain_chars_borrows_clean_input() {
        assert!(matches!(
            retain_chars("123", |c| c.is_ascii_digit()),
            Cow::Borrowed(_)
        ));
        assert_eq!(retain_chars("Rp 1.500", |c| c.is_ascii_digit()), "1500");
    }

    #[test]
    fn replace_char_swaps_every_occurrence() {
        assert_eq!(replace_char("1,5,0", ',', '.'), "1.5.0");
        assert!(matches!(replace_char("150", ',', '.'), Cow::Borrowed(_)));
    }

    #[test]
    fn contains_ignore_case_matches_mixed_case() {
        assert!(contains_ignore_case("Stiker A4", "stiker"));
        assert!(contains_ignore_case("kartu nama", "NAMA"));
        assert!(!contains_ignore_case("Banner", "stiker"));
    }
}
