//! Scheduled-export configuration model.
//!
//! A `Schedule` is inert configuration: nothing in this service executes it.
//! Running the exports it describes belongs to a delivery component that does
//! not exist here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleFrequency {
    Daily,
    Weekly,
    Monthly,
}

impl ScheduleFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleFrequency::Daily => "daily",
            ScheduleFrequency::Weekly => "weekly",
            ScheduleFrequency::Monthly => "monthly",
        }
    }
}

impl std::fmt::Display for ScheduleFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScheduleFrequency {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(ScheduleFrequency::Daily),
            "weekly" => Ok(ScheduleFrequency::Weekly),
            "monthly" => Ok(ScheduleFrequency::Monthly),
            other => Err(anyhow::anyhow!("Invalid frequency: {}", other)),
        }
    }
}

/// Output format of an export, scheduled or one-off.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Excel,
    Both,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Excel => "excel",
            ExportFormat::Both => "both",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pdf" => Ok(ExportFormat::Pdf),
            "excel" => Ok(ExportFormat::Excel),
            "both" => Ok(ExportFormat::Both),
            other => Err(anyhow::anyhow!("Invalid export format: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: Uuid,
    pub frequency: ScheduleFrequency,
    /// Time of day in `HH:MM`.
    pub time: String,
    pub format: ExportFormat,
    pub email: Option<String>,
    pub auto_download: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a schedule.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateSchedule {
    pub frequency: Option<String>,
    pub time: Option<String>,
    pub format: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    pub auto_download: Option<bool>,
    pub is_active: Option<bool>,
}

/// Partial update for a schedule. `id` and `createdAt` have no fields here,
/// so clients sending them get them silently dropped by serde.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateSchedule {
    pub frequency: Option<String>,
    pub time: Option<String>,
    pub format: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    pub auto_download: Option<bool>,
    pub is_active: Option<bool>,
}
