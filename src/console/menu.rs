use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::prelude::Stylize;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::console::registry::ids;
use crate::console::theme::Theme;

/// What a click in the menu header resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuTarget {
    /// The lock indicator; opens the key-setup panel.
    Lock,
    PrevTracker,
    NextTracker,
    Panel(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    Locked,
    Unlocked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuButton {
    pub id: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// Declarative description of the menu header. Rebuilt from controller state
/// on every frame; holds nothing and mutates nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuView {
    pub lock: LockState,
    pub selected_label: String,
    pub buttons: Vec<MenuButton>,
}

/// Pure projection of (active widget id, unlocked, selected label) into the
/// menu description. The active button is tagged by structured id
/// comparison.
pub fn menu_view(active: Option<&str>, unlocked: bool, selected_label: &str) -> MenuView {
    MenuView {
        lock: if unlocked {
            LockState::Unlocked
        } else {
            LockState::Locked
        },
        selected_label: selected_label.to_string(),
        buttons: ids::PANELS
            .iter()
            .map(|&(id, label)| MenuButton {
                id,
                label,
                active: active == Some(id),
            })
            .collect(),
    }
}

/// Hit-test rectangles recorded while the menu is rendered, consumed by the
/// shell to dispatch mouse clicks.
#[derive(Default)]
pub struct MenuHits {
    targets: Vec<(Rect, MenuTarget)>,
}

impl MenuHits {
    pub fn clear(&mut self) {
        self.targets.clear();
    }

    fn record(&mut self, rect: Rect, target: MenuTarget) {
        self.targets.push((rect, target));
    }

    pub fn hit(&self, x: u16, y: u16) -> Option<MenuTarget> {
        self.targets
            .iter()
            .find(|(rect, _)| {
                x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
            })
            .map(|&(_, target)| target)
    }
}

/// Accumulates spans on a single menu line while tracking the column each
/// span lands on, so clickable spans get exact hit rectangles.
struct LineBuilder<'a> {
    spans: Vec<Span<'static>>,
    x: u16,
    y: u16,
    hits: &'a mut MenuHits,
}

impl<'a> LineBuilder<'a> {
    fn new(area: Rect, hits: &'a mut MenuHits) -> Self {
        Self {
            spans: Vec::new(),
            x: area.x,
            y: area.y,
            hits,
        }
    }

    fn push(&mut self, span: Span<'static>, target: Option<MenuTarget>) {
        let width = span.width() as u16;
        if let Some(target) = target {
            self.hits.record(Rect::new(self.x, self.y, width, 1), target);
        }
        self.x = self.x.saturating_add(width);
        self.spans.push(span);
    }

    fn gap(&mut self, width: u16) {
        self.push(Span::raw(" ".repeat(width as usize)), None);
    }
}

/// Draw the menu header and record its hit rectangles.
pub fn render_menu(
    view: &MenuView,
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    hits: &mut MenuHits,
) {
    hits.clear();
    let mut line = LineBuilder::new(area, hits);

    let lock_span = match view.lock {
        LockState::Unlocked => Span::styled("[UNLOCKED]", Style::default().fg(theme.green).bold()),
        LockState::Locked => Span::styled("[LOCKED]", Style::default().fg(theme.red).bold()),
    };
    line.push(lock_span, Some(MenuTarget::Lock));
    line.gap(2);

    line.push(
        Span::styled("◄", Style::default().fg(theme.blue)),
        Some(MenuTarget::PrevTracker),
    );
    line.gap(1);
    line.push(
        Span::styled(
            view.selected_label.clone(),
            Style::default().fg(theme.text).bold(),
        ),
        None,
    );
    line.gap(1);
    line.push(
        Span::styled("►", Style::default().fg(theme.blue)),
        Some(MenuTarget::NextTracker),
    );
    line.gap(3);

    for button in &view.buttons {
        let style = if button.active {
            Style::default().fg(theme.lavender).bg(theme.surface0).bold()
        } else {
            Style::default().fg(theme.subtext0)
        };
        line.push(
            Span::styled(format!(" {} ", button.label), style),
            Some(MenuTarget::Panel(button.id)),
        );
        line.gap(1);
    }

    frame.render_widget(Paragraph::new(Line::from(line.spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_exactly_the_active_button() {
        let view = menu_view(Some(ids::APRS_SETUP), false, "NONE");
        let active: Vec<&str> = view
            .buttons
            .iter()
            .filter(|b| b.active)
            .map(|b| b.id)
            .collect();
        assert_eq!(active, vec![ids::APRS_SETUP]);
    }

    #[test]
    fn no_button_active_before_first_activation() {
        let view = menu_view(None, false, "NONE");
        assert!(view.buttons.iter().all(|b| !b.active));
    }

    #[test]
    fn key_setup_is_not_a_button() {
        let view = menu_view(Some(ids::KEY_SETUP), true, "LD5QN-7");
        assert!(view.buttons.iter().all(|b| b.id != ids::KEY_SETUP));
        assert!(view.buttons.iter().all(|b| !b.active));
    }

    #[test]
    fn lock_state_follows_unlocked_flag() {
        assert_eq!(menu_view(None, true, "X").lock, LockState::Unlocked);
        assert_eq!(menu_view(None, false, "X").lock, LockState::Locked);
    }

    #[test]
    fn hit_testing_resolves_recorded_rects() {
        let mut hits = MenuHits::default();
        hits.record(Rect::new(0, 0, 8, 1), MenuTarget::Lock);
        hits.record(Rect::new(10, 0, 1, 1), MenuTarget::PrevTracker);

        assert_eq!(hits.hit(3, 0), Some(MenuTarget::Lock));
        assert_eq!(hits.hit(10, 0), Some(MenuTarget::PrevTracker));
        assert_eq!(hits.hit(8, 0), None);
        assert_eq!(hits.hit(3, 1), None);
    }
}
