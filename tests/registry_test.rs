use anyhow::Result;
use async_trait::async_trait;
use ratatui::{Frame, layout::Rect};

use tracker_console::console::{ConsoleError, Mount, Theme, Widget, WidgetRegistry, ids};

struct TestWidget;

#[async_trait]
impl Widget for TestWidget {
    async fn activate(&mut self, _mount: &Mount) -> Result<()> {
        Ok(())
    }

    fn render(&self, _frame: &mut Frame, _area: Rect, _theme: &Theme) {}
}

#[test]
fn get_after_register_returns_the_same_widget() -> Result<()> {
    let widget = Box::new(TestWidget);
    let expected = &*widget as *const TestWidget as *const ();

    let mut registry = WidgetRegistry::new();
    registry.register(ids::KEY_SETUP, widget)?;

    let got = registry.get(ids::KEY_SETUP)?;
    assert_eq!(got as *const dyn Widget as *const (), expected);
    Ok(())
}

#[test]
fn unknown_id_fails_with_not_found() {
    let registry = WidgetRegistry::new();
    let err = registry.get("core.wifiSetup").unwrap_err();
    assert!(matches!(err, ConsoleError::NotFound(id) if id == "core.wifiSetup"));
}

#[test]
fn duplicate_registration_is_rejected() -> Result<()> {
    let mut registry = WidgetRegistry::new();
    registry.register(ids::STATUS_INFO, Box::new(TestWidget))?;

    let err = registry
        .register(ids::STATUS_INFO, Box::new(TestWidget))
        .unwrap_err();
    assert!(matches!(err, ConsoleError::DuplicateId(id) if id == ids::STATUS_INFO));

    // The original registration survives the failed attempt.
    assert!(registry.get(ids::STATUS_INFO).is_ok());
    Ok(())
}

#[test]
fn capabilities_are_snapshotted_per_widget() -> Result<()> {
    let mut registry = WidgetRegistry::new();
    registry.register(ids::WIFI_SETUP, Box::new(TestWidget))?;

    assert!(!registry.capabilities(ids::WIFI_SETUP)?.refresh_hook);
    assert!(matches!(
        registry.capabilities("core.nonexistent").unwrap_err(),
        ConsoleError::NotFound(_)
    ));
    Ok(())
}
