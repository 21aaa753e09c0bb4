use ratatui::style::Color;

pub(super) const HEADER_HEIGHT: u16 = 1;
pub(super) const STATUS_HEIGHT: u16 = 1;
pub(super) const MENU_WIDTH: u16 = 34;
pub(super) const POPUP_MARGIN: u16 = 2;
pub(super) const POPUP_MIN_WIDTH: u16 = 30;
pub(super) const PANEL_BG: Color = Color::Rgb(28, 30, 36);
pub(super) const SELECTED_FG: Color = Color::Cyan;
