//! Argument list tokenization
//!
//! Splits the text between the delimiters of an object declaration into
//! individual argument expressions. `(`, `[` and `{` share one depth counter, so
//! `foo(1,2), 3` yields `foo(1,2)` and `3`. Commas inside string or char
//! literals never split.

use super::errors::ExtractError;

/// Split a raw argument string into trimmed argument expressions.
///
/// Empty pieces are dropped and one layer of matching quotes is removed from
/// fully quoted arguments. Closing more brackets than were opened, or leaving
/// some open, is a [`ExtractError::MalformedArgumentList`].
pub fn tokenize_arguments(raw: &str) -> Result<Vec<String>, ExtractError> {
    let malformed = || ExtractError::MalformedArgumentList {
        arguments: raw.trim().to_string(),
    };

    let mut args = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in raw.chars() {
        if let Some(q) = quote {
            current.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }

        match c {
            '"' | '\'' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.checked_sub(1).ok_or_else(malformed)?,
            ',' if depth == 0 => {
                push_argument(&mut args, &current);
                current.clear();
                continue;
            }
            _ => {}
        }
        current.push(c);
    }

    if depth != 0 || quote.is_some() {
        return Err(malformed());
    }
    push_argument(&mut args, &current);

    Ok(args)
}

fn push_argument(args: &mut Vec<String>, piece: &str) {
    let arg = piece.trim();
    if !arg.is_empty() {
        args.push(unquote(arg).to_string());
    }
}

/// Remove one layer of matching `"` or `'` quotes
pub fn unquote(arg: &str) -> &str {
    let bytes = arg.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        if (first == b'"' || first == b'\'') && bytes[bytes.len() - 1] == first {
            return &arg[1..arg.len() - 1];
        }
    }
    arg
}
