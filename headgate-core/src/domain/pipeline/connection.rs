// headgate-core/src/domain/pipeline/connection.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Per-stream read mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    FullRefresh,
    Incremental,
}

impl SyncMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncMode::FullRefresh => "full_refresh",
            SyncMode::Incremental => "incremental",
        }
    }
}

/// Per-stream write mode on the destination side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DestinationSyncMode {
    Overwrite,
    Append,
    AppendDedup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    #[default]
    Active,
    Inactive,
}

impl ConnectionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::Active => "active",
            ConnectionStatus::Inactive => "inactive",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleUnit {
    Minutes,
    Hours,
    Days,
}

impl ScheduleUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleUnit::Minutes => "minutes",
            ScheduleUnit::Hours => "hours",
            ScheduleUnit::Days => "days",
        }
    }
}

/// Fixed-interval sync schedule.
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct Schedule {
    #[validate(range(min = 1))]
    pub every: u32,
    pub unit: ScheduleUnit,
}

/// One stream (table) to sync, with its sync modes.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct StreamSpec {
    #[validate(length(min = 1))]
    pub name: String,
    pub sync_mode: SyncMode,
    pub destination_sync_mode: DestinationSyncMode,
}

fn default_auto_propagate() -> bool {
    true
}

/// `configs/connection.yaml` — the sync connection document.
///
/// `source` and `destination` reference the other two documents by name;
/// the references are checked by `PipelineSpec::validate`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ConnectionSpec {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub source: String,
    #[validate(length(min = 1))]
    pub destination: String,
    #[validate(nested)]
    pub schedule: Schedule,
    #[validate(length(min = 1), nested)]
    pub streams: Vec<StreamSpec>,
    /// Remote-side namespace format. When absent the control plane's own
    /// `${SOURCE_NAMESPACE}` placeholder is injected at payload-build time.
    #[serde(default)]
    pub namespace_format: Option<String>,
    #[serde(default = "default_auto_propagate")]
    pub auto_propagate_schema: bool,
    #[serde(default)]
    pub status: ConnectionStatus,
}
