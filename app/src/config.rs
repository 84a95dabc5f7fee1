//! FILENAME: app/src/config.rs
// PURPOSE: Startup configuration read from JSON.
// CONTEXT: Every field is optional; anything missing keeps its default.

use chart_engine::{ChartType, GanttRoles, StyleConfig};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::export::ExportSettings;

/// Initial chart settings for a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub chart_type: ChartType,
    pub style: StyleConfig,
    pub gantt: GanttRoles,
    pub export: ExportSettings,
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<AppConfig, AppError> {
        serde_json::from_str(json).map_err(|e| AppError::Config(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
