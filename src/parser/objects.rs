//! Object declaration discovery
//!
//! Scans the whole comment-free source (not just `main`) for declarations of
//! the class. Declaration forms are tried in a fixed priority order and a name
//! is registered by the first form that matches it:
//!
//! | form          | syntax                             |
//! |---------------|------------------------------------|
//! | `Direct`      | `Class name(args);`                |
//! | `CopyInit`    | `Class name = Class(args);`        |
//! | `HeapNew`     | `Class* name = new Class(args);`   |
//! | `Auto`        | `auto name = Class(args);`         |
//! | `Default`     | `Class name;`                      |
//! | `BraceAssign` | `Class name = {args};`             |
//! | `BraceInit`   | `Class name{args};`                |
//!
//! Only when none of these match does the loose scan run, accepting any
//! `Class ident` followed shortly by `(`, `=` or `;`. Sites are returned in
//! source order, not in the priority order of the form that found them.

use super::arguments::tokenize_arguments;
use super::errors::ExtractError;
use super::model::{DeclarationForm, MethodCall, ObjectSite};
use super::parse::ParseOptions;
use super::scanner::{find_matching, find_matching_brace, line_of};
use regex::Regex;
use tracing::debug;

/// Identifiers that can follow the class name without naming an object
const RESERVED_NAMES: &[&str] = &[
    "final", "const", "operator", "override", "new", "return", "delete", "public", "private",
    "protected",
];

/// Delimiter enclosing a declaration's arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArgumentGroup {
    Parens,
    Braces,
    None,
}

struct Found {
    site: ObjectSite,
    start: usize,
    end: usize,
}

fn declaration_patterns(class_name: &str) -> Vec<(DeclarationForm, ArgumentGroup, Regex)> {
    let c = regex::escape(class_name);
    let id = r"([A-Za-z_]\w*)";

    [
        (DeclarationForm::Direct, ArgumentGroup::Parens, format!(r"\b{c}\s+{id}\s*\(")),
        (
            DeclarationForm::CopyInit,
            ArgumentGroup::Parens,
            format!(r"\b{c}\s+{id}\s*=\s*{c}\s*\("),
        ),
        (
            DeclarationForm::HeapNew,
            ArgumentGroup::Parens,
            format!(r"\b{c}\s*\*\s*{id}\s*=\s*new\s+{c}\s*\("),
        ),
        (
            DeclarationForm::Auto,
            ArgumentGroup::Parens,
            format!(r"\bauto\s+{id}\s*=\s*{c}\s*\("),
        ),
        (DeclarationForm::Default, ArgumentGroup::None, format!(r"\b{c}\s+{id}\s*;")),
        (
            DeclarationForm::BraceAssign,
            ArgumentGroup::Braces,
            format!(r"\b{c}\s+{id}\s*=\s*\{{"),
        ),
        (DeclarationForm::BraceInit, ArgumentGroup::Braces, format!(r"\b{c}\s+{id}\s*\{{")),
    ]
    .into_iter()
    .filter_map(|(form, group, pattern)| Regex::new(&pattern).ok().map(|re| (form, group, re)))
    .collect()
}

fn is_object_name(name: &str, class_name: &str) -> bool {
    name != class_name && !RESERVED_NAMES.contains(&name)
}

fn skip_whitespace(code: &str, mut pos: usize) -> usize {
    let bytes = code.as_bytes();
    while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }
    pos
}

/// Find every object declaration of `class_name` in `code`
pub fn locate_objects(
    code: &str,
    class_name: &str,
    options: &ParseOptions,
) -> Result<Vec<ObjectSite>, ExtractError> {
    let mut found: Vec<Found> = Vec::new();

    for (form, group, re) in declaration_patterns(class_name) {
        for caps in re.captures_iter(code) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let name = name.as_str();
            if !is_object_name(name, class_name) || found.iter().any(|f| f.site.name == name) {
                continue;
            }

            let (raw_args, after_group) = match group {
                ArgumentGroup::Parens => {
                    let close = find_matching(code, whole.end(), b'(', b')')?;
                    (&code[whole.end()..close], close + 1)
                }
                ArgumentGroup::Braces => {
                    let close = find_matching_brace(code, whole.end())?;
                    (&code[whole.end()..close], close + 1)
                }
                ArgumentGroup::None => ("", whole.end()),
            };

            let end = if group == ArgumentGroup::None {
                after_group
            } else {
                let pos = skip_whitespace(code, after_group);
                if !code[pos..].starts_with(';') {
                    continue;
                }
                pos + 1
            };

            let arguments = tokenize_arguments(raw_args)?;
            debug!(object = name, ?form, args = ?arguments, "found object");

            found.push(Found {
                site: ObjectSite {
                    name: name.to_string(),
                    arguments,
                    line_index: Some(line_of(code, whole.start())),
                    form,
                    follow_up_call: None,
                },
                start: whole.start(),
                end,
            });
        }
    }

    if found.is_empty() {
        found = loose_scan(code, class_name, options.loose_lookahead);
    }
    if found.is_empty() {
        return Err(ExtractError::NoObjectsFound {
            class: class_name.to_string(),
        });
    }

    found.sort_by_key(|f| f.start);

    Ok(found
        .into_iter()
        .map(|f| {
            let follow_up_call =
                find_follow_up_call(code, &f.site.name, f.end, options.follow_up_lines);
            ObjectSite {
                follow_up_call,
                ..f.site
            }
        })
        .collect())
}

/// Last resort: `Class ident` with `(`, `=` or `;` within `lookahead` bytes
fn loose_scan(code: &str, class_name: &str, lookahead: usize) -> Vec<Found> {
    let mut found: Vec<Found> = Vec::new();
    let Ok(re) = Regex::new(&format!(r"\b{}\s+([A-Za-z_]\w*)", regex::escape(class_name))) else {
        return found;
    };

    for caps in re.captures_iter(code) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let name = name.as_str();
        if !is_object_name(name, class_name) || found.iter().any(|f| f.site.name == name) {
            continue;
        }

        let window_end = (whole.end() + lookahead).min(code.len());
        let window = &code.as_bytes()[whole.end()..window_end];
        if !window.iter().any(|&b| matches!(b, b'(' | b'=' | b';')) {
            continue;
        }

        debug!(object = name, "found object by loose scan");
        found.push(Found {
            site: ObjectSite {
                name: name.to_string(),
                arguments: Vec::new(),
                line_index: Some(line_of(code, whole.start())),
                form: DeclarationForm::Loose,
                follow_up_call: None,
            },
            start: whole.start(),
            end: whole.end(),
        });
    }

    found
}

/// First `name.method(` or `name->method(` after a declaration.
///
/// The search covers the rest of the declaration's line and the following
/// `lines` lines.
pub fn find_follow_up_call(
    code: &str,
    name: &str,
    from: usize,
    lines: usize,
) -> Option<MethodCall> {
    let from = from.min(code.len());
    let mut newlines = 0;
    let mut until = code.len();
    for (i, b) in code.bytes().enumerate().skip(from) {
        if b == b'\n' {
            newlines += 1;
            if newlines > lines {
                until = i;
                break;
            }
        }
    }

    let pattern = format!(r"\b{}\s*(?:\.|->)\s*([A-Za-z_]\w*)\s*\(", regex::escape(name));
    let re = Regex::new(&pattern).ok()?;
    let caps = re.captures(&code[from..until])?;
    let method = caps.get(1)?;

    Some(MethodCall {
        method: method.as_str().to_string(),
        line_index: line_of(code, from + method.start()),
    })
}
