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

/// Track logger settings, firmware defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrklogConfig {
    pub on: bool,
    pub post_on: bool,
    pub interval: u16,
    pub ttl: u16,
    pub url: String,
}

impl Default for TrklogConfig {
    fn default() -> Self {
        Self {
            on: false,
            post_on: false,
            interval: 5,
            ttl: 24,
            url: "https://localhost/trklog".to_string(),
        }
    }
}

#[derive(Default)]
pub struct TrklogSetup {
    config: TrklogConfig,
}

impl TrklogSetup {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Widget for TrklogSetup {
    async fn activate(&mut self, mount: &Mount) -> Result<()> {
        self.config = mount
            .store
            .get(ids::TRKLOG_SETUP, CONFIG_KEY)
            .await?
            .unwrap_or_default();
        Ok(())
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let c = &self.config;
        let lines = vec![
            field("logging", on_off(c.on), theme),
            field("posting", on_off(c.post_on), theme),
            field("interval", format!("{} s", c.interval), theme),
            field("retention", format!("{} h", c.ttl), theme),
            field("post url", c.url.clone(), theme),
        ];

        frame.render_widget(
            Paragraph::new(lines).block(panel_block("Trklog", theme)),
            area,
        );
    }
}
