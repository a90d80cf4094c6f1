use anyhow::Result;
use async_trait::async_trait;
use ratatui::{Frame, layout::Rect};
use serde::{Deserialize, Serialize};

use crate::console::theme::Theme;
use crate::store::Store;

/// Environment a widget is mounted into: the persistent store handle and
/// whatever else panels need to load their own state. The drawing surface is
/// not part of the mount; it is handed to `render` each frame.
#[derive(Clone)]
pub struct Mount {
    pub store: Store,
}

/// Optional capabilities a widget declares. Snapshotted by the registry at
/// registration time so the controller never probes for hooks per call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// Widget wants `refresh()` invoked after every tracker navigation step.
    pub refresh_hook: bool,
}

/// One configured tracking server for a tracker entry. The key is the API
/// key issued by that server and may be absent until the operator obtains
/// one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerMapping {
    pub url: String,
    pub key: Option<String>,
}

/// One element of the cyclic tracker sequence managed by the key-setup
/// widget. The id is the tracker callsign shown in the menu header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerEntry {
    pub id: String,
    pub srv: Option<ServerMapping>,
}

/// Cyclic entry navigation, exposed only by the key-setup widget. The
/// controller treats everything behind this trait as opaque state.
pub trait Navigable {
    fn select_next(&mut self);
    fn select_prev(&mut self);
    fn selected(&self) -> Option<&TrackerEntry>;
    fn selected_server(&self) -> Option<&ServerMapping>;
    fn is_authenticated(&self) -> bool;
}

/// A self-contained configuration panel.
///
/// `activate` is the mount/reset lifecycle step: the widget (re)loads its
/// state from the store and becomes ready to render. Re-activation of an
/// already active widget is legal and re-runs the load.
#[async_trait]
pub trait Widget: Send {
    fn capabilities(&self) -> Capabilities {
        Capabilities::default()
    }

    async fn activate(&mut self, mount: &Mount) -> Result<()>;

    /// Repaint hook, run after tracker navigation. Only called when the
    /// registration snapshot has `refresh_hook` set.
    fn refresh(&mut self) {}

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme);

    fn navigable(&self) -> Option<&dyn Navigable> {
        None
    }

    fn navigable_mut(&mut self) -> Option<&mut dyn Navigable> {
        None
    }
}

impl std::fmt::Debug for dyn Widget + '_ {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn Widget")
    }
}
