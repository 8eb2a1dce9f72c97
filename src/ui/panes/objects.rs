//! Object pane rendering
//!
//! One card per discovered object: its name, lifecycle flag and every member
//! with the value playback has assigned so far.

use crate::playback::Session;
use crate::trace::UNRESOLVED;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render_objects_pane(frame: &mut Frame, area: Rect, session: &Session) {
    let block = Block::default()
        .title(" Objects ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));

    let active = session.state().current_object_index;
    let mut lines: Vec<Line> = Vec::new();

    for (i, (site, runtime)) in session
        .sites()
        .iter()
        .zip(session.runtime_states())
        .enumerate()
    {
        let name_style = if i == active {
            Style::default()
                .fg(DEFAULT_THEME.secondary)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(DEFAULT_THEME.fg)
        };
        let (flag, flag_style) = if runtime.created {
            ("created", Style::default().fg(DEFAULT_THEME.success))
        } else {
            ("pending", Style::default().fg(DEFAULT_THEME.comment))
        };

        lines.push(Line::from(vec![
            Span::styled(if i == active { "▶ " } else { "  " }, name_style),
            Span::styled(site.name.as_str(), name_style),
            Span::styled(format!(" [{}] ", flag), flag_style),
        ]));

        for member in session.member_values(i) {
            let value = if member.initialized {
                Span::styled(
                    member.value.unwrap_or(UNRESOLVED),
                    Style::default().fg(DEFAULT_THEME.member_value),
                )
            } else {
                Span::styled("—", Style::default().fg(DEFAULT_THEME.comment))
            };
            lines.push(Line::from(vec![
                Span::raw("    "),
                Span::styled(
                    member.member.type_name.as_str(),
                    Style::default().fg(DEFAULT_THEME.type_name),
                ),
                Span::raw(" "),
                Span::styled(
                    member.member.name.as_str(),
                    Style::default().fg(DEFAULT_THEME.fg),
                ),
                Span::raw(" = "),
                value,
            ]));
        }
    }

    if lines.is_empty() {
        lines.push(Line::styled(
            "(no objects)",
            Style::default().fg(DEFAULT_THEME.comment),
        ));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
