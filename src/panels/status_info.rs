use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Local, Utc};
use ratatui::{Frame, layout::Rect};
use ratatui::widgets::Paragraph;
use serde::{Deserialize, Serialize};

use crate::console::registry::ids;
use crate::console::theme::Theme;
use crate::console::widget::{Capabilities, Mount, Widget};
use crate::panels::{field, on_off, panel_block};

const REPORT_KEY: &str = "report";

/// Last status report received from the device, as persisted by the
/// device-communication collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusReport {
    pub mycall: String,
    pub fw_version: String,
    pub vbatt: f32,
    pub gps_fix: bool,
    pub heard: Option<DateTime<Utc>>,
}

impl Default for StatusReport {
    fn default() -> Self {
        Self {
            mycall: "NOCALL".to_string(),
            fw_version: "unknown".to_string(),
            vbatt: 0.0,
            gps_fix: false,
            heard: None,
        }
    }
}

#[derive(Default)]
pub struct StatusInfo {
    report: StatusReport,
    snapshot_at: Option<DateTime<Local>>,
}

impl StatusInfo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Widget for StatusInfo {
    fn capabilities(&self) -> Capabilities {
        Capabilities { refresh_hook: true }
    }

    async fn activate(&mut self, mount: &Mount) -> Result<()> {
        self.report = mount
            .store
            .get(ids::STATUS_INFO, REPORT_KEY)
            .await?
            .unwrap_or_default();
        self.snapshot_at = Some(Local::now());
        Ok(())
    }

    fn refresh(&mut self) {
        self.snapshot_at = Some(Local::now());
    }

    fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let heard = match self.report.heard {
            Some(at) => at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string(),
            None => "never".to_string(),
        };
        let snapshot = match self.snapshot_at {
            Some(at) => at.format("%H:%M:%S").to_string(),
            None => "-".to_string(),
        };

        let lines = vec![
            field("callsign", self.report.mycall.clone(), theme),
            field("firmware", self.report.fw_version.clone(), theme),
            field("battery", format!("{:.2} V", self.report.vbatt), theme),
            field("gps fix", on_off(self.report.gps_fix), theme),
            field("last heard", heard, theme),
            field("snapshot", snapshot, theme),
        ];

        frame.render_widget(
            Paragraph::new(lines).block(panel_block("Status", theme)),
            area,
        );
    }
}
