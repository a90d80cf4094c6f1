use anyhow::Result;
use async_trait::async_trait;
use ratatui::{Frame, layout::Rect};
use ratatui::prelude::Stylize;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::console::registry::ids;
use crate::console::theme::Theme;
use crate::console::widget::{Capabilities, Mount, Navigable, ServerMapping, TrackerEntry, Widget};
use crate::panels::{field, panel_block};

/// Store keys; also written by the device-communication collaborator.
pub const TRACKERS_KEY: &str = "trackers";
pub const AUTH_KEY: &str = "auth";

/// The designated navigable widget: an ordered, cyclic sequence of tracker
/// entries, each optionally mapped to a tracking server, plus the
/// authentication flag the lock indicator derives from.
#[derive(Default)]
pub struct KeySetup {
    entries: Vec<TrackerEntry>,
    selected: Option<usize>,
    authenticated: bool,
}

impl KeySetup {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Widget for KeySetup {
    fn capabilities(&self) -> Capabilities {
        Capabilities { refresh_hook: true }
    }

    async fn activate(&mut self, mount: &Mount) -> Result<()> {
        self.entries = mount
            .store
            .get(ids::KEY_SETUP, TRACKERS_KEY)
            .await?
            .unwrap_or_default();
        self.authenticated = mount
            .store
            .get(ids::KEY_SETUP, AUTH_KEY)
            .await?
            .unwrap_or(false);

        // Keep the selection stable across re-activation where possible.
        self.selected = match self.selected {
            Some(i) if i < self.entries.len() => Some(i),
            _ if self.entries.is_empty() => None,
            _ => Some(0),
        };
        log::debug!(
            "key setup loaded {} tracker entries (auth: {})",
            self.entries.len(),
            self.authenticated
        );
        Ok(())
    }

    fn refresh(&mut self) {
        let label = Navigable::selected(self).map(|e| e.id.as_str()).unwrap_or("NONE");
        log::debug!("key setup selection now {label}");
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let mut lines: Vec<Line> = Vec::new();

        if self.entries.is_empty() {
            lines.push(Line::styled(
                "no trackers configured",
                Style::default().fg(theme.overlay1),
            ));
        }
        for (i, entry) in self.entries.iter().enumerate() {
            let marker = if self.selected == Some(i) { "▶ " } else { "  " };
            let id_style = if self.selected == Some(i) {
                Style::default().fg(theme.lavender).bold()
            } else {
                Style::default().fg(theme.text)
            };
            let srv_text = match &entry.srv {
                Some(srv) if srv.key.is_some() => format!("{} (key set)", srv.url),
                Some(srv) => format!("{} (no key)", srv.url),
                None => "no server".to_string(),
            };
            lines.push(Line::from(vec![
                Span::styled(marker, Style::default().fg(theme.lavender)),
                Span::styled(format!("{:<10}", entry.id), id_style),
                Span::styled(srv_text, Style::default().fg(theme.subtext0)),
            ]));
        }

        lines.push(Line::raw(""));
        lines.push(field(
            "authenticated",
            if self.authenticated { "yes" } else { "no" },
            theme,
        ));

        frame.render_widget(
            Paragraph::new(lines).block(panel_block("Tracker keys", theme)),
            area,
        );
    }

    fn navigable(&self) -> Option<&dyn Navigable> {
        Some(self)
    }

    fn navigable_mut(&mut self) -> Option<&mut dyn Navigable> {
        Some(self)
    }
}

impl Navigable for KeySetup {
    fn select_next(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let n = self.entries.len();
        self.selected = Some(self.selected.map_or(0, |i| (i + 1) % n));
    }

    fn select_prev(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let n = self.entries.len();
        self.selected = Some(self.selected.map_or(n - 1, |i| (i + n - 1) % n));
    }

    fn selected(&self) -> Option<&TrackerEntry> {
        self.selected.and_then(|i| self.entries.get(i))
    }

    fn selected_server(&self) -> Option<&ServerMapping> {
        Navigable::selected(self).and_then(|entry| entry.srv.as_ref())
    }

    fn is_authenticated(&self) -> bool {
        self.authenticated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, key: Option<&str>) -> TrackerEntry {
        TrackerEntry {
            id: id.to_string(),
            srv: Some(ServerMapping {
                url: "https://aprs.example/api".to_string(),
                key: key.map(str::to_string),
            }),
        }
    }

    fn widget(n: usize) -> KeySetup {
        KeySetup {
            entries: (0..n).map(|i| entry(&format!("T{i}"), Some("k"))).collect(),
            selected: Some(0),
            authenticated: false,
        }
    }

    #[test]
    fn next_wraps_back_to_start_after_full_cycle() {
        for start in 0..3 {
            let mut keys = widget(3);
            keys.selected = Some(start);
            for _ in 0..3 {
                keys.select_next();
            }
            assert_eq!(keys.selected, Some(start));
        }
    }

    #[test]
    fn prev_then_next_is_identity() {
        for start in 0..4 {
            let mut keys = widget(4);
            keys.selected = Some(start);
            keys.select_prev();
            keys.select_next();
            assert_eq!(keys.selected, Some(start));

            keys.select_next();
            keys.select_prev();
            assert_eq!(keys.selected, Some(start));
        }
    }

    #[test]
    fn prev_from_first_entry_wraps_to_last() {
        let mut keys = widget(3);
        keys.select_prev();
        assert_eq!(keys.selected, Some(2));
    }

    #[test]
    fn empty_sequence_stays_unselected() {
        let mut keys = KeySetup::new();
        keys.select_next();
        keys.select_prev();
        assert_eq!(keys.selected, None);
        assert!(Navigable::selected(&keys).is_none());
        assert!(keys.selected_server().is_none());
    }

    #[test]
    fn selected_server_follows_the_selected_entry() {
        let mut keys = KeySetup {
            entries: vec![entry("A", Some("key-a")), entry("B", None)],
            selected: Some(0),
            authenticated: true,
        };
        assert_eq!(
            keys.selected_server().and_then(|s| s.key.as_deref()),
            Some("key-a")
        );
        keys.select_next();
        assert_eq!(keys.selected_server().and_then(|s| s.key.as_deref()), None);
    }
}
