//! Parsing of single repository configuration lines.

use thiserror::Error;

use crate::util::trim_spaces;

/// Why a repository line was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineError {
    #[error("repository name is missing")]
    MissingName,

    #[error("repository URL is missing")]
    MissingUrl,

    #[error("too many '=' separated fields")]
    TooManyFields,
}

/// Parse one line of the repositories file.
///
/// Returns `Ok(None)` for blank and comment lines, `Ok(Some((name, url)))`
/// for a valid entry, and a [`LineError`] otherwise. The returned slices
/// borrow from `line` and are already trimmed.
///
/// ```
/// use pkg_core::registry::{parse_line, LineError};
///
/// assert_eq!(parse_line(" main = https://example.com\n"), Ok(Some(("main", "https://example.com"))));
/// assert_eq!(parse_line("# comment"), Ok(None));
/// assert_eq!(parse_line("broken-line"), Err(LineError::MissingUrl));
/// assert_eq!(parse_line("a=b=c"), Err(LineError::TooManyFields));
/// ```
pub fn parse_line(line: &str) -> Result<Option<(&str, &str)>, LineError> {
    let line = line.trim_end_matches(['\n', '\r']);

    if line.starts_with('#') || line.starts_with(';') || trim_spaces(line).is_empty() {
        return Ok(None);
    }

    let Some((name, rest)) = line.split_once('=') else {
        return Err(LineError::MissingUrl);
    };

    if rest.contains('=') {
        return Err(LineError::TooManyFields);
    }

    let name = trim_spaces(name);
    let url = trim_spaces(rest);

    if name.is_empty() {
        return Err(LineError::MissingName);
    }
    if url.is_empty() {
        return Err(LineError::MissingUrl);
    }

    Ok(Some((name, url)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_entry() {
        assert_eq!(
            parse_line("main=https://example.com/repo"),
            Ok(Some(("main", "https://example.com/repo")))
        );
    }

    #[test]
    fn test_parse_trims_name_and_url() {
        assert_eq!(
            parse_line("  main \t=\t https://example.com/repo  \n"),
            Ok(Some(("main", "https://example.com/repo")))
        );
    }

    #[test]
    fn test_parse_strips_crlf() {
        assert_eq!(
            parse_line("main=https://example.com/repo\r\n"),
            Ok(Some(("main", "https://example.com/repo")))
        );
    }

    #[test]
    fn test_parse_skips_comments_and_blank_lines() {
        assert_eq!(parse_line(""), Ok(None));
        assert_eq!(parse_line("\n"), Ok(None));
        assert_eq!(parse_line("   \t"), Ok(None));
        assert_eq!(parse_line("# main=https://example.com"), Ok(None));
        assert_eq!(parse_line("; main=https://example.com"), Ok(None));
    }

    #[test]
    fn test_parse_comment_marker_must_be_first_character() {
        // An indented '#' is not a comment, and has no '='
        assert_eq!(parse_line("  # note"), Err(LineError::MissingUrl));
    }

    #[test]
    fn test_parse_missing_separator() {
        assert_eq!(parse_line("broken-line"), Err(LineError::MissingUrl));
    }

    #[test]
    fn test_parse_empty_fields() {
        assert_eq!(parse_line("=https://example.com"), Err(LineError::MissingName));
        assert_eq!(parse_line("main="), Err(LineError::MissingUrl));
        assert_eq!(parse_line("main=   "), Err(LineError::MissingUrl));
    }

    #[test]
    fn test_parse_too_many_fields() {
        assert_eq!(parse_line("a=b=c"), Err(LineError::TooManyFields));
        assert_eq!(parse_line("a=b="), Err(LineError::TooManyFields));
        assert_eq!(
            parse_line("main=https://example.com/?q=1"),
            Err(LineError::TooManyFields)
        );
    }
}
