//! Status bar rendering with keybindings and state indicators

use crate::playback::PlaybackStatus;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph},
    Frame,
};

/// Everything the status bar shows
pub struct StatusRenderData<'a> {
    pub message: &'a str,
    pub status: PlaybackStatus,
    pub object_index: usize,
    pub object_count: usize,
    pub step_count: usize,
    pub auto_play: bool,
    pub paused: bool,
}

fn position_text(data: &StatusRenderData) -> String {
    let object = format!("Object {}/{}", data.object_index + 1, data.object_count);
    match data.status {
        PlaybackStatus::Idle => " Idle ".to_string(),
        PlaybackStatus::Ready => format!(" {object} · Ready "),
        PlaybackStatus::Stepping(i) => format!(" {object} · Step {}/{} ", i + 1, data.step_count),
        PlaybackStatus::ObjectComplete => format!(" {object} · Done "),
        PlaybackStatus::AllComplete => " All complete ".to_string(),
    }
}

/// Render the status bar at the bottom
pub fn render_status_bar(frame: &mut Frame, area: Rect, data: &StatusRenderData) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let position_bg = match data.status {
        PlaybackStatus::AllComplete => DEFAULT_THEME.success,
        PlaybackStatus::Idle => DEFAULT_THEME.error,
        _ => DEFAULT_THEME.primary,
    };

    let left_spans = vec![
        Span::styled(
            position_text(data),
            Style::default()
                .bg(position_bg)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " | ",
            Style::default()
                .bg(DEFAULT_THEME.step_line_bg)
                .fg(DEFAULT_THEME.comment),
        ),
        Span::styled(
            format!(" {} ", data.message),
            Style::default()
                .bg(DEFAULT_THEME.step_line_bg)
                .fg(DEFAULT_THEME.fg),
        ),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(DEFAULT_THEME.step_line_bg))
        .alignment(Alignment::Left);
    frame.render_widget(left_paragraph, layout[0]);

    // Keybinds with visual grouping
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = Style::default()
        .bg(DEFAULT_THEME.step_line_bg)
        .fg(DEFAULT_THEME.fg);
    let sep_style = Style::default()
        .bg(DEFAULT_THEME.step_line_bg)
        .fg(DEFAULT_THEME.comment);

    let mut right_spans = Vec::new();
    for (i, (key, desc)) in [
        (" ⎵/→ ", " next "),
        (" ← ", " back "),
        (" 1-9 ", " jump "),
        (" a ", " auto "),
        (" p ", " pause "),
        (" r ", " restart "),
        (" c ", " code "),
        ("q", " quit "),
    ]
    .into_iter()
    .enumerate()
    {
        if i > 0 {
            right_spans.push(Span::styled("│", sep_style));
            right_spans.push(Span::styled(" ", desc_style));
        }
        right_spans.push(Span::styled(key, key_style));
        right_spans.push(Span::styled(desc, desc_style));
    }

    let indicator = if data.paused {
        Some((" ⏸ PAUSED ", DEFAULT_THEME.error))
    } else if data.auto_play {
        Some((" ▶ AUTO ", DEFAULT_THEME.secondary))
    } else {
        None
    };
    if let Some((text, bg)) = indicator {
        right_spans.push(Span::styled("│", sep_style));
        right_spans.push(Span::styled(
            text,
            Style::default()
                .bg(bg)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(DEFAULT_THEME.step_line_bg))
        .alignment(Alignment::Right);
    frame.render_widget(right_paragraph, layout[1]);
}

/// Render the current step's progress and label
pub fn render_progress_bar(frame: &mut Frame, area: Rect, progress: f64, label: &str) {
    let gauge = Gauge::default()
        .gauge_style(
            Style::default()
                .fg(DEFAULT_THEME.primary)
                .bg(DEFAULT_THEME.step_line_bg),
        )
        .ratio(progress.clamp(0.0, 1.0))
        .label(label.to_string());
    frame.render_widget(gauge, area);
}
