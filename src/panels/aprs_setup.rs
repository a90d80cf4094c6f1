use anyhow::Result;
use async_trait::async_trait;
use ratatui::{Frame, layout::Rect};
use ratatui::widgets::Paragraph;
use serde::{Deserialize, Serialize};

use crate::console::registry::ids;
use crate::console::theme::Theme;
use crate::console::widget::{Mount, Widget};
use crate::panels::{field, mhz, panel_block};

const CONFIG_KEY: &str = "config";

/// APRS tracker settings. Defaults mirror the device firmware defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AprsConfig {
    pub mycall: String,
    pub dest: String,
    pub digipath: String,
    pub symbol: String,
    pub comment: String,
    pub txfreq: u32,
    pub rxfreq: u32,
    pub turnlimit: u16,
    pub maxpause: u16,
    pub minpause: u16,
    pub mindist: u16,
}

impl Default for AprsConfig {
    fn default() -> Self {
        Self {
            mycall: "NOCALL".to_string(),
            dest: "APAR40".to_string(),
            digipath: "WIDE1-1".to_string(),
            symbol: "/[".to_string(),
            comment: "Arctic Tracker".to_string(),
            txfreq: 144_800_000,
            rxfreq: 144_800_000,
            turnlimit: 35,
            maxpause: 120,
            minpause: 20,
            mindist: 100,
        }
    }
}

#[derive(Default)]
pub struct AprsSetup {
    config: AprsConfig,
}

impl AprsSetup {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Widget for AprsSetup {
    async fn activate(&mut self, mount: &Mount) -> Result<()> {
        self.config = mount
            .store
            .get(ids::APRS_SETUP, CONFIG_KEY)
            .await?
            .unwrap_or_default();
        Ok(())
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let c = &self.config;
        let lines = vec![
            field("callsign", c.mycall.clone(), theme),
            field("destination", c.dest.clone(), theme),
            field("digipath", c.digipath.clone(), theme),
            field("symbol", c.symbol.clone(), theme),
            field("comment", c.comment.clone(), theme),
            field("tx freq", mhz(c.txfreq), theme),
            field("rx freq", mhz(c.rxfreq), theme),
            field("turn limit", format!("{}°", c.turnlimit), theme),
            field("max pause", format!("{} s", c.maxpause), theme),
            field("min pause", format!("{} s", c.minpause), theme),
            field("min distance", format!("{} m", c.mindist), theme),
        ];

        frame.render_widget(
            Paragraph::new(lines).block(panel_block("Aprs", theme)),
            area,
        );
    }
}
