//! Small case helpers shared by dictionaries and the ranking engine.

/// Lowercase a single character, keeping it unchanged when the lowercase
/// form is not a single character.
pub fn fold_case(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

/// Upper-case the first character of `word`.
pub fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars().map(fold_case).eq(b.chars().map(fold_case))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalize() {
        assert_eq!(capitalize_first("hello"), "Hello");
        assert_eq!(capitalize_first("Hello"), "Hello");
        assert_eq!(capitalize_first(""), "");
        assert_eq!(capitalize_first("éa"), "Éa");
    }

    #[test]
    fn fold() {
        assert_eq!(fold_case('A'), 'a');
        assert_eq!(fold_case('\''), '\'');
        // U+0130 lowercases to two chars
        assert_eq!(fold_case('\u{130}'), '\u{130}');
    }

    #[test]
    fn ignore_case() {
        assert!(eq_ignore_case("Hello", "hELLO"));
        assert!(!eq_ignore_case("hell", "hello"));
    }
}
