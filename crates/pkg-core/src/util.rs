//! Small string helpers shared across the crate.

/// Whitespace as classified by C `isspace` in the default locale.
fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r')
}

/// Trim leading and trailing whitespace from a string.
///
/// Returns a sub-slice of the input, so nothing is allocated. Internal
/// whitespace is kept as-is and an all-whitespace input yields `""`.
///
/// # Examples
///
/// ```
/// use pkg_core::util::trim_spaces;
///
/// assert_eq!(trim_spaces("  main \t"), "main");
/// assert_eq!(trim_spaces("a b"), "a b");
/// assert_eq!(trim_spaces(" \n "), "");
/// ```
pub fn trim_spaces(s: &str) -> &str {
    s.trim_matches(is_space)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_spaces_both_ends() {
        assert_eq!(trim_spaces("  main  "), "main");
        assert_eq!(trim_spaces("\tmain\n"), "main");
        assert_eq!(trim_spaces("\x0bmain\x0c\r"), "main");
    }

    #[test]
    fn test_trim_spaces_keeps_internal_whitespace() {
        assert_eq!(trim_spaces("  my repo  "), "my repo");
        assert_eq!(trim_spaces("a \t b"), "a \t b");
    }

    #[test]
    fn test_trim_spaces_all_whitespace() {
        assert_eq!(trim_spaces(""), "");
        assert_eq!(trim_spaces("   "), "");
        assert_eq!(trim_spaces(" \t\r\n"), "");
    }

    #[test]
    fn test_trim_spaces_idempotent() {
        for s in ["", " x ", "x", "\t a b \n", "   ", "https://example.com/ "] {
            assert_eq!(trim_spaces(trim_spaces(s)), trim_spaces(s));
        }
    }

    #[test]
    fn test_trim_spaces_returns_subslice() {
        let input = String::from("  name  ");
        let trimmed = trim_spaces(&input);
        let offset = trimmed.as_ptr() as usize - input.as_ptr() as usize;
        assert_eq!(offset, 2);
    }

    #[test]
    fn test_trim_spaces_leaves_unicode_spaces() {
        // Only the ASCII isspace set is stripped
        assert_eq!(trim_spaces("\u{a0}x\u{a0}"), "\u{a0}x\u{a0}");
    }
}
