pub mod controller;
pub mod error;
pub mod menu;
pub mod registry;
pub mod shell;
pub mod theme;
pub mod widget;

pub use controller::NavigationController;
pub use error::ConsoleError;
pub use menu::{MenuHits, MenuTarget, MenuView, menu_view};
pub use registry::{WidgetRegistry, ids};
pub use shell::Shell;
pub use theme::{Theme, ThemeVariant};
pub use widget::{Capabilities, Mount, Navigable, ServerMapping, TrackerEntry, Widget};
