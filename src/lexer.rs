//! Splitting a raw input line into command tokens.
//!
//! The shell's grammar is deliberately flat: tokens are substrings separated
//! by runs of spaces, tabs or newlines. There is no quoting and no escaping,
//! so tokenization cannot fail; over-long input is clipped rather than
//! rejected.

/// Delimiters between tokens.
const WHITESPACE: [char; 3] = [' ', '\t', '\n'];

/// Split `line` into at most `max_tokens` whitespace-delimited tokens.
///
/// Runs of delimiters never produce empty tokens, and an empty or
/// all-whitespace line yields an empty vector. Tokens past `max_tokens` are
/// silently dropped.
pub fn split_into_tokens(line: &str, max_tokens: usize) -> Vec<String> {
    line.split(WHITESPACE)
        .filter(|part| !part.is_empty())
        .take(max_tokens)
        .map(str::to_owned)
        .collect()
}

/// Clip a raw line to at most `max_chars` characters, on a char boundary.
pub fn clip_line(line: &str, max_chars: usize) -> &str {
    match line.char_indices().nth(max_chars) {
        Some((cut, _)) => &line[..cut],
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace_runs() {
        assert_eq!(
            split_into_tokens("ls -l /tmp\n", 12),
            vec!["ls", "-l", "/tmp"]
        );
        assert_eq!(
            split_into_tokens("  echo\t\thello   world  ", 12),
            vec!["echo", "hello", "world"]
        );
    }

    #[test]
    fn no_empty_tokens() {
        for token in split_into_tokens(" a  b\t c \n", 12) {
            assert!(!token.is_empty());
        }
    }

    #[test]
    fn blank_line_yields_nothing() {
        assert!(split_into_tokens("", 12).is_empty());
        assert!(split_into_tokens("   \t \n", 12).is_empty());
    }

    #[test]
    fn truncates_past_the_token_limit() {
        let line = "cmd a b c d e";
        assert_eq!(split_into_tokens(line, 3), vec!["cmd", "a", "b"]);
    }

    #[test]
    fn clips_long_lines_without_splitting_chars() {
        assert_eq!(clip_line("abcdef", 4), "abcd");
        assert_eq!(clip_line("abc", 4), "abc");
        // Multibyte char right at the boundary stays intact.
        assert_eq!(clip_line("héllo", 2), "hé");
    }
}
