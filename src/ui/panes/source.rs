//! Source code pane rendering with syntax highlighting
//!
//! Displays the loaded C++ snippet with line numbers and marks the line the
//! current construction step refers to. The pane scrolls so that line stays
//! near the middle.
//!
//! Highlighting uses a small character-by-character tokenizer; it does not
//! need to agree with the extractor.

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Simple syntax highlighting for C++ snippets
fn highlight_source_code(line: &str) -> Line<'_> {
    let mut spans = Vec::new();
    let mut current_word = String::new();

    let chars: Vec<(usize, char)> = line.char_indices().collect();
    let mut i = 0;

    while i < chars.len() {
        let (offset, c) = chars[i];

        if c == '/' && chars.get(i + 1).is_some_and(|&(_, n)| n == '/') {
            if !current_word.is_empty() {
                spans.push(Span::raw(std::mem::take(&mut current_word)));
            }
            spans.push(Span::styled(
                &line[offset..],
                Style::default().fg(DEFAULT_THEME.comment),
            ));
            break;
        }

        if c == '"' || c == '\'' {
            if !current_word.is_empty() {
                spans.push(Span::raw(std::mem::take(&mut current_word)));
            }
            let mut end = i + 1;
            while end < chars.len() && chars[end].1 != c {
                end += if chars[end].1 == '\\' { 2 } else { 1 };
            }
            end = (end + 1).min(chars.len());
            let end_offset = chars.get(end).map_or(line.len(), |&(o, _)| o);
            spans.push(Span::styled(
                &line[offset..end_offset],
                Style::default().fg(DEFAULT_THEME.string),
            ));
            i = end;
            continue;
        }

        if !c.is_alphanumeric() && c != '_' {
            if !current_word.is_empty() {
                let style = get_keyword_style(&current_word, c == '(');
                spans.push(Span::styled(std::mem::take(&mut current_word), style));
            }

            let style = match c {
                '{' | '}' | '(' | ')' | '[' | ']' => Style::default().fg(DEFAULT_THEME.primary),
                _ => Style::default().fg(DEFAULT_THEME.fg),
            };
            spans.push(Span::styled(c.to_string(), style));
            i += 1;
            continue;
        }

        current_word.push(c);
        i += 1;
    }

    if !current_word.is_empty() {
        let style = get_keyword_style(&current_word, false);
        spans.push(Span::styled(current_word, style));
    }

    Line::from(spans)
}

fn get_keyword_style(word: &str, is_function: bool) -> Style {
    match word {
        "int" | "char" | "void" | "bool" | "float" | "double" | "long" | "short" | "unsigned"
        | "signed" | "string" | "auto" | "std" => Style::default().fg(DEFAULT_THEME.type_name),
        "class" | "struct" | "public" | "private" | "protected" | "return" | "if" | "else"
        | "while" | "for" | "new" | "delete" | "this" | "const" | "static" | "virtual"
        | "using" | "namespace" | "include" => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        "true" | "false" | "nullptr" | "NULL" => Style::default().fg(DEFAULT_THEME.number),
        _ if word.starts_with(|c: char| c.is_ascii_digit()) => {
            Style::default().fg(DEFAULT_THEME.number)
        }
        _ if is_function => Style::default().fg(DEFAULT_THEME.function),
        _ => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Scroll state for the source pane
#[derive(Debug, Default)]
pub struct SourceScrollState {
    pub offset: usize,
}

/// Render the source code pane.
///
/// `current_line` is the 0-based line of the current step, if any.
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
    current_line: Option<usize>,
    in_constructor: bool,
    scroll_state: &mut SourceScrollState,
) {
    let border_style = if in_constructor {
        Style::default()
            .fg(DEFAULT_THEME.constructor_border)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Source Code ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines: Vec<&str> = source_code.lines().collect();
    let total_lines = lines.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    if let Some(line) = current_line.filter(|&l| l < total_lines) {
        let max_scroll = total_lines.saturating_sub(visible_height);
        scroll_state.offset = line.saturating_sub(visible_height / 2).min(max_scroll);
    }

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let is_current = current_line == Some(idx);
            let (marker, num_style) = if is_current {
                (
                    "▶",
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                (" ", Style::default().fg(DEFAULT_THEME.comment))
            };

            let mut content_line = highlight_source_code(line);
            if is_current {
                let current = Style::default().bg(DEFAULT_THEME.step_line_bg);
                for span in &mut content_line.spans {
                    span.style = span.style.patch(current);
                }
            }

            let mut spans = vec![Span::styled(format!("{marker}{:4} ", idx + 1), num_style)];
            spans.extend(content_line.spans);
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
