//! The widget library: one panel per `core.*` identifier. Panels own their
//! internal state, load it from the persistent store on activation, and
//! render it; the navigation controller only sees the `Widget` contract.

pub mod aprs_setup;
pub mod digi_setup;
pub mod key_setup;
pub mod status_info;
pub mod trklog_setup;
pub mod wifi_setup;

pub use aprs_setup::AprsSetup;
pub use digi_setup::DigiSetup;
pub use key_setup::KeySetup;
pub use status_info::StatusInfo;
pub use trklog_setup::TrklogSetup;
pub use wifi_setup::WifiSetup;

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders};

use crate::console::theme::Theme;

pub(crate) fn field(label: &str, value: impl Into<String>, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:>14}: "), Style::default().fg(theme.overlay1)),
        Span::styled(value.into(), Style::default().fg(theme.text)),
    ])
}

pub(crate) fn panel_block(title: &'static str, theme: &Theme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(theme.surface0))
}

pub(crate) fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}

pub(crate) fn mhz(hz: u32) -> String {
    format!("{:.3} MHz", hz as f64 / 1_000_000.0)
}
