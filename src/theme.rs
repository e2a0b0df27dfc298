use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const TODAY_STYLE: Style = Style::new()
    .fg(Color::LightYellow)
    .bg(Color::Black)
    .add_modifier(Modifier::BOLD);

pub(crate) const OUTSIDE_MONTH_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub(crate) const RULE_STYLE: Style = BASE_STYLE.fg(Color::Gray);

pub(crate) const GRID_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub(crate) const LEGEND_STYLE: Style = BASE_STYLE.fg(Color::Gray);

/// Background used for appointments whose color name is not recognized
pub(crate) const FALLBACK_APPOINTMENT_COLOR: Color = Color::Cyan;

pub(crate) mod tabs {
    use super::*;

    pub(crate) const ACTIVE_TAB_STYLE: Style = BASE_STYLE
        .add_modifier(Modifier::BOLD)
        .add_modifier(Modifier::REVERSED);

    pub(crate) const INACTIVE_TAB_STYLE: Style = BASE_STYLE.fg(Color::Gray);
}

pub(crate) mod jumpto {
    use super::*;

    pub(crate) const UNFILLED_CELL_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

    pub(crate) const READY_ENTER_STYLE: Style = BASE_STYLE.add_modifier(Modifier::UNDERLINED);
}
