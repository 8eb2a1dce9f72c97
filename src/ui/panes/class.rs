//! Class pane rendering
//!
//! Shows the extracted class: constructor signature, each member with the
//! parameter it is bound to, and the binding tier that produced the binding.

use crate::parser::model::ClassModel;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render_class_pane(frame: &mut Frame, area: Rect, class: Option<&ClassModel>) {
    let block = Block::default()
        .title(" Class ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));

    let Some(class) = class else {
        let paragraph = Paragraph::new("(nothing loaded)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    };

    let signature = if class.has_constructor() {
        class.constructor_display()
    } else {
        format!("{} (no constructor)", class.name)
    };

    let mut lines = vec![
        Line::from(Span::styled(
            signature,
            Style::default()
                .fg(DEFAULT_THEME.function)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled("binding: ", Style::default().fg(DEFAULT_THEME.comment)),
            Span::styled(
                class.binding_tier.to_string(),
                Style::default().fg(DEFAULT_THEME.secondary),
            ),
        ]),
    ];

    for member in &class.members {
        let bound = match class.bound_param(&member.name) {
            Some(param) => Span::styled(
                format!(" ← {param}"),
                Style::default().fg(DEFAULT_THEME.primary),
            ),
            None => Span::styled(" (unbound)", Style::default().fg(DEFAULT_THEME.comment)),
        };
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(
                member.type_name.as_str(),
                Style::default().fg(DEFAULT_THEME.type_name),
            ),
            Span::raw(" "),
            Span::styled(member.name.as_str(), Style::default().fg(DEFAULT_THEME.fg)),
            bound,
        ]));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
