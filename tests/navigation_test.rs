use anyhow::Result;
use async_trait::async_trait;
use ratatui::{Frame, layout::Rect};

use tracker_console::console::{
    ConsoleError, Mount, NavigationController, ServerMapping, Theme, TrackerEntry, Widget,
    WidgetRegistry, ids,
};
use tracker_console::panels::key_setup::{AUTH_KEY, TRACKERS_KEY};
use tracker_console::panels::{KeySetup, StatusInfo};
use tracker_console::store::Store;

fn entry(id: &str, srv: Option<ServerMapping>) -> TrackerEntry {
    TrackerEntry {
        id: id.to_string(),
        srv,
    }
}

fn keyed_server() -> ServerMapping {
    ServerMapping {
        url: "https://aprs.example/api".to_string(),
        key: Some("secret".to_string()),
    }
}

/// Controller over a seeded in-memory store with the key-setup and status
/// panels registered.
async fn controller(entries: Vec<TrackerEntry>, auth: bool) -> Result<NavigationController> {
    let store = Store::in_memory().await?;
    store.put(ids::KEY_SETUP, TRACKERS_KEY, &entries).await?;
    store.put(ids::KEY_SETUP, AUTH_KEY, &auth).await?;

    let mut registry = WidgetRegistry::new();
    registry.register(ids::KEY_SETUP, Box::new(KeySetup::new()))?;
    registry.register(ids::STATUS_INFO, Box::new(StatusInfo::new()))?;
    Ok(NavigationController::new(registry, Mount { store }))
}

#[tokio::test]
async fn cyclic_navigation_over_three_entries() -> Result<()> {
    let entries = vec![
        entry("A", Some(keyed_server())),
        entry("B", Some(keyed_server())),
        entry("C", Some(keyed_server())),
    ];
    let mut ctrl = controller(entries, true).await?;
    ctrl.activate(ids::KEY_SETUP).await?;
    assert_eq!(ctrl.selected_label(), "A");

    let mut seen = Vec::new();
    for _ in 0..3 {
        ctrl.next()?;
        seen.push(ctrl.selected_label());
    }
    assert_eq!(seen, vec!["B", "C", "A"]);

    ctrl.prev()?;
    assert_eq!(ctrl.selected_label(), "C");
    Ok(())
}

#[tokio::test]
async fn navigation_before_activation_is_an_error() -> Result<()> {
    let mut ctrl = controller(vec![entry("A", None)], false).await?;

    assert!(matches!(ctrl.next(), Err(ConsoleError::NotActivated)));
    assert!(matches!(ctrl.prev(), Err(ConsoleError::NotActivated)));
    assert_eq!(ctrl.active_id(), None);
    Ok(())
}

#[tokio::test]
async fn activating_an_unknown_id_leaves_state_unchanged() -> Result<()> {
    let store = Store::in_memory().await?;
    store
        .put(
            ids::KEY_SETUP,
            TRACKERS_KEY,
            &vec![entry("A", Some(keyed_server()))],
        )
        .await?;

    let mut registry = WidgetRegistry::new();
    registry.register(ids::KEY_SETUP, Box::new(KeySetup::new()))?;
    let mut ctrl = NavigationController::new(registry, Mount { store });

    ctrl.activate(ids::KEY_SETUP).await?;
    let label_before = ctrl.selected_label();

    let err = ctrl.activate(ids::WIFI_SETUP).await.unwrap_err();
    assert!(matches!(err, ConsoleError::NotFound(id) if id == ids::WIFI_SETUP));
    assert_eq!(ctrl.active_id(), Some(ids::KEY_SETUP));
    assert_eq!(ctrl.selected_label(), label_before);
    Ok(())
}

struct BrokenWidget;

#[async_trait]
impl Widget for BrokenWidget {
    async fn activate(&mut self, _mount: &Mount) -> Result<()> {
        anyhow::bail!("panel not ready")
    }

    fn render(&self, _frame: &mut Frame, _area: Rect, _theme: &Theme) {}
}

#[tokio::test]
async fn failed_activation_keeps_the_previous_active_widget() -> Result<()> {
    let store = Store::in_memory().await?;
    let mut registry = WidgetRegistry::new();
    registry.register(ids::KEY_SETUP, Box::new(KeySetup::new()))?;
    registry.register(ids::STATUS_INFO, Box::new(BrokenWidget))?;
    let mut ctrl = NavigationController::new(registry, Mount { store });

    ctrl.activate(ids::KEY_SETUP).await?;
    let err = ctrl.activate(ids::STATUS_INFO).await.unwrap_err();
    assert!(matches!(err, ConsoleError::Activation { id, .. } if id == ids::STATUS_INFO));
    assert_eq!(ctrl.active_id(), Some(ids::KEY_SETUP));
    Ok(())
}

#[tokio::test]
async fn reactivation_of_the_active_widget_is_not_an_error() -> Result<()> {
    let mut ctrl = controller(vec![entry("A", Some(keyed_server()))], true).await?;
    ctrl.activate(ids::KEY_SETUP).await?;
    ctrl.activate(ids::KEY_SETUP).await?;
    assert_eq!(ctrl.active_id(), Some(ids::KEY_SETUP));
    assert_eq!(ctrl.selected_label(), "A");
    Ok(())
}

#[tokio::test]
async fn unlocked_requires_selection_mapping_key_and_auth() -> Result<()> {
    // No entries: nothing selected.
    let ctrl = controller(vec![], true).await?;
    assert!(!ctrl.is_unlocked());
    assert_eq!(ctrl.selected_label(), "NONE");

    // Entry without a server mapping.
    let mut ctrl = controller(vec![entry("A", None)], true).await?;
    ctrl.activate(ids::KEY_SETUP).await?;
    assert!(!ctrl.is_unlocked());

    // Mapping without a key.
    let unkeyed = ServerMapping {
        url: "https://aprs.example/api".to_string(),
        key: None,
    };
    let mut ctrl = controller(vec![entry("A", Some(unkeyed))], true).await?;
    ctrl.activate(ids::KEY_SETUP).await?;
    assert!(!ctrl.is_unlocked());

    // Keyed mapping but not authenticated.
    let mut ctrl = controller(vec![entry("A", Some(keyed_server()))], false).await?;
    ctrl.activate(ids::KEY_SETUP).await?;
    assert!(!ctrl.is_unlocked());

    // All four conditions hold.
    let mut ctrl = controller(vec![entry("A", Some(keyed_server()))], true).await?;
    ctrl.activate(ids::KEY_SETUP).await?;
    assert!(ctrl.is_unlocked());
    Ok(())
}

#[tokio::test]
async fn selected_label_is_the_entry_id_or_the_none_sentinel() -> Result<()> {
    let mut ctrl = controller(
        vec![entry("LD5QN-7", Some(keyed_server())), entry("LD5QN-9", None)],
        false,
    )
    .await?;
    assert_eq!(ctrl.selected_label(), "NONE");

    ctrl.activate(ids::KEY_SETUP).await?;
    assert_eq!(ctrl.selected_label(), "LD5QN-7");
    ctrl.next()?;
    assert_eq!(ctrl.selected_label(), "LD5QN-9");
    Ok(())
}

#[tokio::test]
async fn navigation_on_an_empty_sequence_is_a_noop() -> Result<()> {
    let mut ctrl = controller(vec![], true).await?;
    ctrl.activate(ids::KEY_SETUP).await?;

    ctrl.next()?;
    ctrl.prev()?;
    assert_eq!(ctrl.selected_label(), "NONE");
    assert!(!ctrl.is_unlocked());
    Ok(())
}
