use std::collections::HashMap;

use crate::console::error::ConsoleError;
use crate::console::widget::{Capabilities, Widget};

/// Contract-constant widget identifiers. The controller and the menu depend
/// on these being registered before the shell starts.
pub mod ids {
    pub const KEY_SETUP: &str = "core.keySetup";
    pub const STATUS_INFO: &str = "core.statusInfo";
    pub const WIFI_SETUP: &str = "core.wifiSetup";
    pub const APRS_SETUP: &str = "core.aprsSetup";
    pub const DIGI_SETUP: &str = "core.digiSetup";
    pub const TRKLOG_SETUP: &str = "core.trklogSetup";

    /// Top-level menu buttons, in display order. The key-setup panel is not
    /// a button; it is reached through the lock indicator.
    pub const PANELS: [(&str, &str); 5] = [
        (STATUS_INFO, "Status"),
        (WIFI_SETUP, "Wifi"),
        (APRS_SETUP, "Aprs"),
        (DIGI_SETUP, "Digi/Igate"),
        (TRKLOG_SETUP, "Trklog"),
    ];
}

struct WidgetEntry {
    widget: Box<dyn Widget>,
    caps: Capabilities,
}

/// Mapping from stable string identifiers to widget instances. Populated
/// once at startup; registration collisions and unknown lookups fail loudly.
#[derive(Default)]
pub struct WidgetRegistry {
    widgets: HashMap<String, WidgetEntry>,
}

impl WidgetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a widget under `id`, snapshotting its capability flags.
    /// Rejects duplicates rather than silently aliasing an existing entry.
    pub fn register(&mut self, id: &str, widget: Box<dyn Widget>) -> Result<(), ConsoleError> {
        if self.widgets.contains_key(id) {
            return Err(ConsoleError::DuplicateId(id.to_string()));
        }
        let caps = widget.capabilities();
        log::debug!("registered widget {id} (refresh_hook: {})", caps.refresh_hook);
        self.widgets.insert(id.to_string(), WidgetEntry { widget, caps });
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<&dyn Widget, ConsoleError> {
        self.widgets
            .get(id)
            .map(|entry| entry.widget.as_ref())
            .ok_or_else(|| ConsoleError::NotFound(id.to_string()))
    }

    pub fn get_mut(&mut self, id: &str) -> Result<&mut (dyn Widget + 'static), ConsoleError> {
        self.widgets
            .get_mut(id)
            .map(|entry| entry.widget.as_mut())
            .ok_or_else(|| ConsoleError::NotFound(id.to_string()))
    }

    /// Capability flags captured when the widget was registered.
    pub fn capabilities(&self, id: &str) -> Result<Capabilities, ConsoleError> {
        self.widgets
            .get(id)
            .map(|entry| entry.caps)
            .ok_or_else(|| ConsoleError::NotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.widgets.contains_key(id)
    }
}
