// headgate-core/src/infrastructure/api/types.rs
//
// Wire DTOs for the control-plane REST API (camelCase JSON), plus the
// mapping from the typed specs to the request payloads.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::pipeline::{
    ConnectionSpec, DestinationSpec, DiscoveredStream, ReplicationMode, SourceSpec, SyncCatalog,
};
use crate::ports::control_plane::{ConnectionSummary, ResourceSummary};

// ── Requests ──────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceScope {
    pub workspace_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceCreateRequest {
    pub name: String,
    pub workspace_id: String,
    pub source_type: String,
    pub connection_configuration: serde_json::Value,
}

impl SourceCreateRequest {
    pub fn from_spec(spec: &SourceSpec, workspace_id: &str) -> Self {
        let method = match spec.replication {
            ReplicationMode::Cdc => "CDC",
            ReplicationMode::FullRefresh => "STANDARD",
        };
        Self {
            name: spec.name.clone(),
            workspace_id: workspace_id.to_string(),
            source_type: spec.kind.as_str().to_string(),
            connection_configuration: json!({
                "host": spec.host,
                "port": spec.port,
                "database": spec.database,
                "username": spec.username,
                "password": spec.password,
                "schemas": spec.schemas,
                "replicationMethod": { "method": method },
            }),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationCreateRequest {
    pub name: String,
    pub workspace_id: String,
    pub destination_type: String,
    pub connection_configuration: serde_json::Value,
}

impl DestinationCreateRequest {
    pub fn from_spec(spec: &DestinationSpec, workspace_id: &str) -> Self {
        Self {
            name: spec.name.clone(),
            workspace_id: workspace_id.to_string(),
            // The destination document is warehouse-account shaped.
            destination_type: "snowflake".to_string(),
            connection_configuration: json!({
                "account": spec.account,
                "username": spec.username,
                "password": spec.password,
                "role": spec.role,
                "warehouse": spec.warehouse,
                "database": spec.database,
                "schema": spec.schema,
            }),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckSourceRequest {
    pub source_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckDestinationRequest {
    pub destination_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoverSchemaRequest {
    pub source_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaFilter>,
}

#[derive(Debug, Serialize)]
pub struct SchemaFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tables: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionCreateRequest {
    pub name: String,
    pub source_id: String,
    pub destination_id: String,
    pub namespace_format: String,
    pub schedule: WireSchedule,
    pub sync_catalog: SyncCatalog,
    pub auto_propagate_schema: bool,
    pub status: String,
}

impl ConnectionCreateRequest {
    pub fn from_spec(
        spec: &ConnectionSpec,
        source_id: &str,
        destination_id: &str,
        catalog: SyncCatalog,
    ) -> Self {
        Self {
            name: spec.name.clone(),
            source_id: source_id.to_string(),
            destination_id: destination_id.to_string(),
            // The service interpolates this placeholder itself.
            namespace_format: spec
                .namespace_format
                .clone()
                .unwrap_or_else(|| "${SOURCE_NAMESPACE}".to_string()),
            schedule: WireSchedule {
                units: spec.schedule.every,
                time_unit: spec.schedule.unit.as_str().to_string(),
            },
            sync_catalog: catalog,
            auto_propagate_schema: spec.auto_propagate_schema,
            status: spec.status.as_str().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireSchedule {
    pub units: u32,
    pub time_unit: String,
}

// ── Responses ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRead {
    pub source_id: String,
    pub name: String,
    #[serde(default)]
    pub source_type: String,
}

impl From<SourceRead> for ResourceSummary {
    fn from(read: SourceRead) -> Self {
        ResourceSummary {
            id: read.source_id,
            name: read.name,
            resource_type: read.source_type,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SourceListResponse {
    #[serde(default)]
    pub sources: Vec<SourceRead>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationRead {
    pub destination_id: String,
    pub name: String,
    #[serde(default)]
    pub destination_type: String,
}

impl From<DestinationRead> for ResourceSummary {
    fn from(read: DestinationRead) -> Self {
        ResourceSummary {
            id: read.destination_id,
            name: read.name,
            resource_type: read.destination_type,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DestinationListResponse {
    #[serde(default)]
    pub destinations: Vec<DestinationRead>,
}

#[derive(Debug, Deserialize)]
pub struct CheckRead {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DiscoverSchemaResponse {
    #[serde(default)]
    pub streams: Vec<DiscoveredStreamEntry>,
}

#[derive(Debug, Deserialize)]
pub struct DiscoveredStreamEntry {
    pub stream: WireStream,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireStream {
    pub name: String,
    pub json_schema: serde_json::Value,
    #[serde(default)]
    pub supported_sync_modes: Vec<String>,
    #[serde(default)]
    pub source_defined_cursor: Vec<String>,
    #[serde(default)]
    pub source_defined_primary_key: Vec<Vec<String>>,
}

impl From<WireStream> for DiscoveredStream {
    fn from(wire: WireStream) -> Self {
        DiscoveredStream {
            name: wire.name,
            json_schema: wire.json_schema,
            supported_sync_modes: wire.supported_sync_modes,
            source_defined_cursor: wire.source_defined_cursor,
            source_defined_primary_key: wire.source_defined_primary_key,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionRead {
    pub connection_id: String,
    pub name: String,
    #[serde(default)]
    pub source_id: String,
    #[serde(default)]
    pub destination_id: String,
}

impl From<ConnectionRead> for ConnectionSummary {
    fn from(read: ConnectionRead) -> Self {
        ConnectionSummary {
            id: read.connection_id,
            name: read.name,
            source_id: read.source_id,
            destination_id: read.destination_id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ConnectionListResponse {
    #[serde(default)]
    pub connections: Vec<ConnectionRead>,
}
