//! Construction step list for the active object

use crate::trace::Trace;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Render `trace`; steps before `current` are done, `None` means not started
pub fn render_steps_pane(
    frame: &mut Frame,
    area: Rect,
    trace: Option<&Trace>,
    current: Option<usize>,
    object_complete: bool,
) {
    let title = match trace {
        Some(t) => format!(" Steps: {} ", t.object_name),
        None => " Steps ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));

    let Some(trace) = trace else {
        let paragraph = Paragraph::new("(nothing loaded)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    };

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    let skip = current
        .map(|c| c.saturating_sub(visible_height.saturating_sub(1)))
        .unwrap_or(0);

    let items: Vec<ListItem> = trace
        .steps
        .iter()
        .enumerate()
        .skip(skip)
        .take(visible_height)
        .map(|(i, step)| {
            let done = object_complete || current.is_some_and(|c| i < c);
            let active = !object_complete && current == Some(i);

            let (marker, style) = if active {
                (
                    "▶",
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .bg(DEFAULT_THEME.step_line_bg)
                        .add_modifier(Modifier::BOLD),
                )
            } else if done {
                ("✓", Style::default().fg(DEFAULT_THEME.success))
            } else {
                (" ", Style::default().fg(DEFAULT_THEME.comment))
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{marker}{:3}. ", step.ordinal), style),
                Span::styled(step.label.as_str(), style),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
