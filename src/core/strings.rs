//! String inspection helpers. All positions and lengths are in characters,
//! not bytes.

pub fn is_ends_with(haystack: &str, needle: &str) -> bool {
    haystack.ends_with(needle)
}

pub fn is_starts_with(haystack: &str, needle: &str) -> bool {
    haystack.starts_with(needle)
}

pub fn length_of(text: &str) -> usize {
    text.chars().count()
}

/// Uppercases the first character only; the rest is left as is.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn lowercase(text: &str) -> String {
    text.to_lowercase()
}

/// Text between the first `start` and the next `end` after it.
///
/// Returns an empty string when `start` is missing or when no `end` follows it.
///
/// ```
/// use web_box::core::strings::first_wrapped_string;
///
/// assert_eq!(first_wrapped_string("This is a [custom] string", "[", "]"), "custom");
/// ```
pub fn first_wrapped_string<'a>(haystack: &'a str, start: &str, end: &str) -> &'a str {
    let Some(open) = haystack.find(start) else {
        return "";
    };

    let rest = &haystack[open + start.len()..];
    match rest.find(end) {
        Some(close) => &rest[..close],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_and_suffix_with_multibyte_text() {
        assert!(is_starts_with("Привет, мир", "Привет"));
        assert!(is_ends_with("Привет, мир", "мир"));
        assert!(!is_ends_with("Привет, мир", "Привет"));
        assert!(is_starts_with("anything", ""));
        assert!(!is_starts_with("ab", "abc"));
    }

    #[test]
    fn test_length_of_counts_characters() {
        assert_eq!(length_of("мир"), 3);
        assert_eq!(length_of("文件名"), 3);
        assert_eq!(length_of(""), 0);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("hello World"), "Hello World");
        assert_eq!(capitalize("ёжик"), "Ёжик");
        assert_eq!(capitalize("ßa"), "SSa");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_lowercase() {
        assert_eq!(lowercase("ПРИВЕТ World"), "привет world");
    }

    #[test]
    fn test_first_wrapped_string() {
        assert_eq!(first_wrapped_string("a [b] c", "[", "]"), "b");
        assert_eq!(first_wrapped_string("[x] and [y]", "[", "]"), "x");
        assert_eq!(first_wrapped_string("no markers", "[", "]"), "");
        assert_eq!(first_wrapped_string("open [only", "[", "]"), "");
        assert_eq!(first_wrapped_string("{{name}} rest", "{{", "}}"), "name");
        assert_eq!(first_wrapped_string("«цитата» текст", "«", "»"), "цитата");
    }
}
