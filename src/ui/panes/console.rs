//! Console pane rendering

use crate::playback::console::ConsoleLog;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

/// Render the console messages, newest last
pub fn render_console_pane(frame: &mut Frame, area: Rect, console: &ConsoleLog) {
    let block = Block::default()
        .title(" Console ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));

    if console.is_empty() {
        let paragraph = Paragraph::new("(no output)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    let skip = console.len().saturating_sub(visible_height);

    let items: Vec<ListItem> = console
        .lines()
        .skip(skip)
        .map(|line| {
            let color = if line.starts_with('✓') {
                DEFAULT_THEME.success
            } else {
                DEFAULT_THEME.fg
            };
            ListItem::new(line).style(Style::default().fg(color))
        })
        .collect();

    let list = List::new(items).block(block.padding(Padding::new(1, 0, 0, 0)));
    frame.render_widget(list, area);
}
