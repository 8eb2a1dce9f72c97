//! Comment stripping and delimiter matching
//!
//! Every later stage works on the comment-free text produced by
//! [`strip_comments`]. Stripping keeps the newlines of block comments, so a
//! byte offset in the stripped text maps to the same line index as in the raw
//! source and [`line_of`] can be used for highlighting.
//!
//! [`find_matching`] is the one structural primitive of the parser: all class
//! bodies, constructor bodies and argument lists are delimited with it.

use super::errors::ExtractError;

/// Remove `//` and `/* */` comments, leaving string and char literals intact
pub fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' | '\'' => {
                out.push(c);
                // Copy the literal verbatim up to the closing quote
                while let Some(inner) = chars.next() {
                    out.push(inner);
                    if inner == '\\' {
                        if let Some(escaped) = chars.next() {
                            out.push(escaped);
                        }
                    } else if inner == c || inner == '\n' {
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'/') => {
                while let Some(&next) = chars.peek() {
                    if next == '\n' {
                        break;
                    }
                    chars.next();
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for inner in chars.by_ref() {
                    if prev == '*' && inner == '/' {
                        break;
                    }
                    if inner == '\n' {
                        out.push('\n');
                    }
                    prev = inner;
                }
            }
            _ => out.push(c),
        }
    }

    out
}

/// Index of the quote closing the literal opened at `open`.
///
/// Follows the same rules as [`strip_comments`]: a backslash escapes the next
/// byte and an unterminated literal ends at the newline or end of text.
fn literal_end(bytes: &[u8], open: usize) -> usize {
    let quote = bytes[open];
    let mut i = open + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' => return i,
            b if b == quote => return i,
            _ => i += 1,
        }
    }
    bytes.len().saturating_sub(1)
}

/// Find the closer matching an already-consumed `open` delimiter.
///
/// `start` is the byte index just after the opener. Returns the byte index of
/// the matching `close`. Only `open`/`close` affect the depth, and delimiters
/// inside string or char literals are ignored.
pub fn find_matching(text: &str, start: usize, open: u8, close: u8) -> Result<usize, ExtractError> {
    let bytes = text.as_bytes();
    let mut depth = 1usize;
    let mut i = start;

    while i < bytes.len() {
        let b = bytes[i];
        if b == b'"' || b == b'\'' {
            i = literal_end(bytes, i);
        } else if b == open {
            depth += 1;
        } else if b == close {
            depth -= 1;
            if depth == 0 {
                return Ok(i);
            }
        }
        i += 1;
    }

    Err(ExtractError::UnbalancedBraces {
        offset: start.saturating_sub(1),
    })
}

/// [`find_matching`] for `{` / `}`
pub fn find_matching_brace(text: &str, start: usize) -> Result<usize, ExtractError> {
    find_matching(text, start, b'{', b'}')
}

/// 0-based line index of a byte offset
pub fn line_of(text: &str, offset: usize) -> usize {
    let end = offset.min(text.len());
    text.as_bytes()[..end].iter().filter(|&&b| b == b'\n').count()
}

/// Replace every nested `{ ... }` block with spaces, keeping newlines.
///
/// Used to hide method bodies when scanning a class body for members. An
/// unbalanced block is blanked to the end of the text.
pub fn blank_nested_blocks(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut depth = 0usize;
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' | '\'' => {
                // Braces inside literals do not open or close blocks
                let blank = depth > 0;
                out.push(if blank { ' ' } else { c });
                while let Some(inner) = chars.next() {
                    let escaped = if inner == '\\' { chars.next() } else { None };
                    for ch in std::iter::once(inner).chain(escaped) {
                        out.push(match ch {
                            '\n' => '\n',
                            _ if blank => ' ',
                            _ => ch,
                        });
                    }
                    if escaped.is_none() && (inner == c || inner == '\n') {
                        break;
                    }
                }
            }
            '{' => {
                depth += 1;
                out.push(' ');
            }
            '}' if depth > 0 => {
                depth -= 1;
                out.push(' ');
            }
            '\n' => out.push('\n'),
            _ if depth > 0 => out.push(' '),
            _ => out.push(c),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_line_and_block_comments() {
        let stripped = strip_comments("int x; // trailing\nint y; /* block */ int z;");
        assert_eq!(stripped, "int x; \nint y;  int z;");
    }

    #[test]
    fn test_block_comment_keeps_line_count() {
        let source = "a /* one\ntwo\nthree */ b\nc";
        let stripped = strip_comments(source);
        assert_eq!(stripped.lines().count(), source.lines().count());
        assert_eq!(line_of(&stripped, stripped.find('c').unwrap()), 3);
    }

    #[test]
    fn test_comment_delimiters_inside_strings_survive() {
        let source = r#"Student s("http://x.org", "/* not */"); // real"#;
        let stripped = strip_comments(source);
        assert_eq!(stripped, r#"Student s("http://x.org", "/* not */"); "#);
    }

    #[test]
    fn test_escaped_quote_in_string() {
        let source = r#"f("a\"//b"); // gone"#;
        assert_eq!(strip_comments(source), r#"f("a\"//b"); "#);
    }

    #[test]
    fn test_unterminated_block_comment_runs_to_end() {
        assert_eq!(strip_comments("int a; /* open\nforever"), "int a; \n");
    }

    #[test]
    fn test_find_matching_brace_nested() {
        let text = "{ a { b } { c { d } } } tail";
        assert_eq!(find_matching_brace(text, 1), Ok(22));
        assert_eq!(find_matching_brace(text, 5), Ok(8));
    }

    #[test]
    fn test_find_matching_parens() {
        let text = "f(g(1, 2), h())";
        assert_eq!(find_matching(text, 2, b'(', b')'), Ok(14));
    }

    #[test]
    fn test_find_matching_unbalanced() {
        let text = "{ { }";
        assert_eq!(
            find_matching_brace(text, 1),
            Err(ExtractError::UnbalancedBraces { offset: 0 })
        );
    }

    #[test]
    fn test_find_matching_every_prefix_of_balanced_input() {
        // Every opener in a balanced string finds its partner
        let text = "{{}{{}{}}}";
        let mut stack = Vec::new();
        for (i, b) in text.bytes().enumerate() {
            if b == b'{' {
                stack.push(i);
            } else {
                let open = stack.pop().unwrap();
                assert_eq!(find_matching_brace(text, open + 1), Ok(i));
            }
        }
    }

    #[test]
    fn test_find_matching_skips_delimiters_in_literals() {
        let text = r#"("Hi :)", 3);"#;
        assert_eq!(find_matching(text, 1, b'(', b')'), Ok(11));

        let text = r#"{ cout << "{"; char c = '}'; } tail"#;
        assert_eq!(find_matching_brace(text, 1), Ok(29));
    }

    #[test]
    fn test_find_matching_escaped_quote_in_literal() {
        let text = r#"("a\")", ')')"#;
        assert_eq!(find_matching(text, 1, b'(', b')'), Ok(12));
    }

    #[test]
    fn test_blank_nested_blocks_ignores_braces_in_literals() {
        let body = "void show() { cout << \"{\"; }\nint after;";
        let blanked = blank_nested_blocks(body);
        assert!(blanked.contains("int after;"));
        assert!(!blanked.contains("cout"));
        assert_eq!(blanked.len(), body.len());
    }

    #[test]
    fn test_blank_nested_blocks() {
        let blanked = blank_nested_blocks("int a; void f() { int b; }\nint c;");
        assert!(blanked.contains("int a;"));
        assert!(blanked.contains("int c;"));
        assert!(!blanked.contains("int b;"));
        assert_eq!(blanked.len(), "int a; void f() { int b; }\nint c;".len());
    }
}
