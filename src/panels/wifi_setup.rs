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

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApAlternative {
    pub ssid: String,
    pub passwd: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WifiConfig {
    pub enabled: bool,
    pub aps: Vec<ApAlternative>,
    pub softap_ssid: String,
    pub softap_passwd: String,
    pub softap_ip: String,
}

impl Default for WifiConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            aps: Vec::new(),
            softap_ssid: "ArcticTracker".to_string(),
            softap_passwd: "123456789".to_string(),
            softap_ip: "192.168.0.1".to_string(),
        }
    }
}

#[derive(Default)]
pub struct WifiSetup {
    config: WifiConfig,
}

impl WifiSetup {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Widget for WifiSetup {
    async fn activate(&mut self, mount: &Mount) -> Result<()> {
        self.config = mount
            .store
            .get(ids::WIFI_SETUP, CONFIG_KEY)
            .await?
            .unwrap_or_default();
        Ok(())
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let c = &self.config;
        let mut lines = vec![field("station mode", on_off(c.enabled), theme)];
        if c.aps.is_empty() {
            lines.push(field("access points", "none configured", theme));
        }
        for (i, ap) in c.aps.iter().enumerate() {
            let detail = if ap.passwd.is_some() {
                format!("{} (protected)", ap.ssid)
            } else {
                format!("{} (open)", ap.ssid)
            };
            lines.push(field(&format!("ap #{}", i + 1), detail, theme));
        }
        lines.push(field("softap ssid", c.softap_ssid.clone(), theme));
        lines.push(field("softap ip", c.softap_ip.clone(), theme));

        frame.render_widget(
            Paragraph::new(lines).block(panel_block("Wifi", theme)),
            area,
        );
    }
}
