use serde::{Deserialize, Serialize};

use crate::models::Panel;

/// Messages pushed to dashboard browsers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DashboardEvent {
    /// A panel was re-rendered
    PanelUpdated { panel: Panel, timestamp: String },
}

impl DashboardEvent {
    pub fn panel_updated(panel: Panel) -> Self {
        DashboardEvent::PanelUpdated {
            panel,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
