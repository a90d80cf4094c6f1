use anyhow::Result;
use async_trait::async_trait;
use ratatui::{Frame, layout::Rect};
use ratatui::widgets::Paragraph;
use serde::{Deserialize, Serialize};

use crate::console::registry::ids;
use crate::console::theme::Theme;
use crate::console::widget::{Mount, Widget};
use crate::panels::{field, on_off, panel_block};

const CONFIG_KEY: &str = "config";

/// Digipeater and igate settings, firmware defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigiConfig {
    pub digi_on: bool,
    pub wide1: bool,
    pub igate_on: bool,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub passcode: Option<String>,
    pub filter: String,
}

impl Default for DigiConfig {
    fn default() -> Self {
        Self {
            digi_on: false,
            wide1: false,
            igate_on: false,
            host: "aprs.no".to_string(),
            port: 14580,
            user: "NOCALL".to_string(),
            passcode: None,
            filter: "m/10".to_string(),
        }
    }
}

#[derive(Default)]
pub struct DigiSetup {
    config: DigiConfig,
}

impl DigiSetup {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Widget for DigiSetup {
    async fn activate(&mut self, mount: &Mount) -> Result<()> {
        self.config = mount
            .store
            .get(ids::DIGI_SETUP, CONFIG_KEY)
            .await?
            .unwrap_or_default();
        Ok(())
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let c = &self.config;
        let lines = vec![
            field("digipeater", on_off(c.digi_on), theme),
            field("wide1 mode", on_off(c.wide1), theme),
            field("igate", on_off(c.igate_on), theme),
            field("server", format!("{}:{}", c.host, c.port), theme),
            field("user", c.user.clone(), theme),
            field(
                "passcode",
                if c.passcode.is_some() { "set" } else { "not set" },
                theme,
            ),
            field("filter", c.filter.clone(), theme),
        ];

        frame.render_widget(
            Paragraph::new(lines).block(panel_block("Digi/Igate", theme)),
            area,
        );
    }
}
