//! Colors shared by every pane

use ratatui::style::Color;

/// Palette for the panes, grouped by what they color
pub struct Theme {
    pub fg: Color,
    /// Delimiters, pane titles and the progress gauge
    pub primary: Color,
    /// Highlight marker and in-progress steps
    pub secondary: Color,
    /// Comments, hints and not-yet-run steps
    pub comment: Color,
    /// Created objects, initialized members and `✓` console lines
    pub success: Color,
    pub error: Color,

    // C++ highlighting
    pub keyword: Color,
    pub string: Color,
    pub number: Color,
    pub function: Color,
    pub type_name: Color,

    /// Source border while control is inside the constructor
    pub constructor_border: Color,
    pub border_normal: Color,
    /// Background of the current step line and the bottom bars
    pub step_line_bg: Color,
    /// Values assigned to members
    pub member_value: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),
    secondary: Color::Rgb(250, 179, 135),
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),

    keyword: Color::Rgb(137, 180, 250),
    string: Color::Rgb(250, 179, 135),
    number: Color::Rgb(250, 179, 135),
    function: Color::Rgb(249, 226, 175),
    type_name: Color::Rgb(148, 226, 213),

    constructor_border: Color::Rgb(249, 226, 175),
    border_normal: Color::Rgb(108, 112, 134),
    step_line_bg: Color::Rgb(50, 50, 70),
    member_value: Color::Rgb(245, 194, 231),
};
