//! Constructor extraction
//!
//! Looks for `Class(params) [: init-list] {` anywhere in the comment-free text,
//! including out-of-line `Class::Class(...)` definitions. Destructors
//! (`~Class(`) and declarations not followed by a body are skipped. The first
//! candidate with a body wins.
//!
//! A missing constructor is not an error here; the coordinator decides whether
//! one is required.

use super::errors::ExtractError;
use super::model::{ConstructorSignature, TypedName};
use super::scanner::{find_matching, find_matching_brace, line_of};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static CALL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Za-z_]\w*)\s*\(").expect("call pattern is valid")
});

/// A constructor definition found in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorDecl {
    pub params: Vec<TypedName>,
    pub body: String,
    pub signature: ConstructorSignature,
}

/// Find the first constructor of `class_name` that has a body
pub fn extract_constructor(
    code: &str,
    class_name: &str,
) -> Result<Option<ConstructorDecl>, ExtractError> {
    for caps in CALL_RE.captures_iter(code) {
        let (Some(whole), Some(ident)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if ident.as_str() != class_name || is_destructor(code, ident.start()) {
            continue;
        }

        let params_start = whole.end();
        let params_end = find_matching(code, params_start, b'(', b')')?;

        let mut pos = skip_whitespace(code, params_end + 1);
        let mut initializer_list = None;
        if code[pos..].starts_with(':') && !code[pos..].starts_with("::") {
            let Some(list_end) = skip_initializer_list(code, pos + 1)? else {
                continue;
            };
            initializer_list = Some(code[pos + 1..list_end].trim().to_string());
            pos = list_end;
        }

        if !code[pos..].starts_with('{') {
            continue;
        }

        let body_start = pos + 1;
        let body_end = find_matching_brace(code, body_start)?;
        let raw_params = code[params_start..params_end].trim().to_string();
        let params = parse_params(&raw_params);

        debug!(class = class_name, params = params.len(), "found constructor");

        return Ok(Some(ConstructorDecl {
            params,
            body: code[body_start..body_end].to_string(),
            signature: ConstructorSignature {
                line_index: line_of(code, ident.start()),
                raw_params,
                initializer_list,
            },
        }));
    }

    Ok(None)
}

fn is_destructor(code: &str, ident_start: usize) -> bool {
    code[..ident_start].trim_end().ends_with('~')
}

fn skip_whitespace(code: &str, mut pos: usize) -> usize {
    let bytes = code.as_bytes();
    while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }
    pos
}

/// Walk `a(x), b{y}, ...` starting after the `:`.
///
/// Returns the offset of the first byte after the list, or `None` when the text
/// does not look like an initializer list.
fn skip_initializer_list(code: &str, start: usize) -> Result<Option<usize>, ExtractError> {
    let bytes = code.as_bytes();
    let mut pos = start;

    loop {
        pos = skip_whitespace(code, pos);
        let name_start = pos;
        while pos < bytes.len()
            && (bytes[pos].is_ascii_alphanumeric() || matches!(bytes[pos], b'_' | b':' | b'<' | b'>'))
        {
            pos += 1;
        }
        if pos == name_start {
            return Ok(None);
        }

        pos = skip_whitespace(code, pos);
        match bytes.get(pos) {
            Some(b'(') => pos = find_matching(code, pos + 1, b'(', b')')? + 1,
            Some(b'{') => pos = find_matching_brace(code, pos + 1)? + 1,
            _ => return Ok(None),
        }

        pos = skip_whitespace(code, pos);
        if bytes.get(pos) == Some(&b',') {
            pos += 1;
        } else {
            return Ok(Some(pos));
        }
    }
}

/// Split a raw parameter list into typed names.
///
/// Splitting happens at bracket depth 0 and default values are dropped. The
/// last word of each parameter is its name; `*`/`&` glued to the name move to
/// the type. `void`, unnamed parameters and repeated names are skipped.
pub fn parse_params(raw: &str) -> Vec<TypedName> {
    let mut params: Vec<TypedName> = Vec::new();

    for piece in split_top_level(raw) {
        let decl = strip_default(&piece).trim();
        if decl.is_empty() || decl == "void" {
            continue;
        }

        let words: Vec<&str> = decl.split_whitespace().collect();
        let Some((last, type_words)) = words.split_last() else {
            continue;
        };
        if type_words.is_empty() {
            continue;
        }

        let name = last.trim_start_matches(['*', '&']);
        let sigils = &last[..last.len() - name.len()];
        let (name, array_suffix) = match name.find('[') {
            Some(i) => (&name[..i], &name[i..]),
            None => (name, ""),
        };
        if name.is_empty() || params.iter().any(|p| p.name == name) {
            continue;
        }

        let type_name = format!("{}{}{}", type_words.join(" "), sigils, array_suffix);
        debug!(param = name, ty = %type_name, "found parameter");
        params.push(TypedName::new(name, type_name));
    }

    params
}

fn split_top_level(raw: &str) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;

    for c in raw.chars() {
        match c {
            '<' | '(' | '[' | '{' => depth += 1,
            '>' | ')' | ']' | '}' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                pieces.push(std::mem::take(&mut current));
                continue;
            }
            _ => {}
        }
        current.push(c);
    }
    pieces.push(current);

    pieces
}

fn strip_default(piece: &str) -> &str {
    let mut depth = 0usize;
    for (i, c) in piece.char_indices() {
        match c {
            '<' | '(' | '[' | '{' => depth += 1,
            '>' | ')' | ']' | '}' => depth = depth.saturating_sub(1),
            '=' if depth == 0 => return &piece[..i],
            _ => {}
        }
    }
    piece
}
