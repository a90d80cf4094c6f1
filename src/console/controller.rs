use crate::console::error::ConsoleError;
use crate::console::registry::{WidgetRegistry, ids};
use crate::console::widget::{Mount, Navigable};

/// Label shown when no tracker entry is selected. Displayed literally in the
/// menu header; not an error.
pub const NONE_LABEL: &str = "NONE";

/// Owns the registry and the single active-widget reference, and drives
/// cyclic tracker navigation through the designated navigable widget
/// (`core.keySetup`).
pub struct NavigationController {
    registry: WidgetRegistry,
    mount: Mount,
    active: Option<String>,
}

impl NavigationController {
    pub fn new(registry: WidgetRegistry, mount: Mount) -> Self {
        Self {
            registry,
            mount,
            active: None,
        }
    }

    /// Mount the widget registered under `id` and make it the active widget.
    /// Re-activating the current widget re-runs its own `activate`, which
    /// widgets treat as reset-to-visible. A failed call leaves the active
    /// reference unchanged.
    pub async fn activate(&mut self, id: &str) -> Result<(), ConsoleError> {
        let widget = self.registry.get_mut(id)?;
        widget
            .activate(&self.mount)
            .await
            .map_err(|source| ConsoleError::Activation {
                id: id.to_string(),
                source: source.into(),
            })?;
        log::info!("activated widget {id}");
        self.active = Some(id.to_string());
        Ok(())
    }

    /// Step the tracker selection forward one entry, wrapping at the end.
    pub fn next(&mut self) -> Result<(), ConsoleError> {
        self.step(|nav| nav.select_next())
    }

    /// Step the tracker selection backward one entry, wrapping at the start.
    pub fn prev(&mut self) -> Result<(), ConsoleError> {
        self.step(|nav| nav.select_prev())
    }

    fn step(&mut self, advance: impl FnOnce(&mut dyn Navigable)) -> Result<(), ConsoleError> {
        let active = self.active.clone().ok_or(ConsoleError::NotActivated)?;

        let keys = self.registry.get_mut(ids::KEY_SETUP)?;
        if let Some(nav) = keys.navigable_mut() {
            advance(nav);
        }

        // Repaint hook on the active widget, per its registration snapshot.
        if self.registry.capabilities(&active)?.refresh_hook {
            self.registry.get_mut(&active)?.refresh();
        }
        Ok(())
    }

    /// Derived, never cached: an entry is selected, it has a server mapping,
    /// the mapping carries a key, and the widget reports authenticated.
    /// Evaluated left to right with short-circuiting.
    pub fn is_unlocked(&self) -> bool {
        let Ok(keys) = self.registry.get(ids::KEY_SETUP) else {
            return false;
        };
        let Some(nav) = keys.navigable() else {
            return false;
        };
        if nav.selected().is_none() {
            return false;
        }
        let Some(srv) = nav.selected_server() else {
            return false;
        };
        srv.key.is_some() && nav.is_authenticated()
    }

    /// The selected tracker id, or the `"NONE"` sentinel.
    pub fn selected_label(&self) -> String {
        self.registry
            .get(ids::KEY_SETUP)
            .ok()
            .and_then(|keys| keys.navigable())
            .and_then(|nav| nav.selected())
            .map(|entry| entry.id.clone())
            .unwrap_or_else(|| NONE_LABEL.to_string())
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn registry(&self) -> &WidgetRegistry {
        &self.registry
    }
}
