// headgate-core/src/domain/pipeline/catalog.rs
//
// Sync-catalog construction: intersect what the source advertises with
// what the connection document asks for.

use std::collections::HashMap;

use serde::Serialize;
use tracing::warn;

use crate::domain::error::DomainError;
use crate::domain::pipeline::connection::{DestinationSyncMode, StreamSpec, SyncMode};

/// A stream as reported by the control plane's schema discovery.
#[derive(Debug, Clone)]
pub struct DiscoveredStream {
    pub name: String,
    /// Opaque JSON schema of the stream; forwarded as-is.
    pub json_schema: serde_json::Value,
    pub supported_sync_modes: Vec<String>,
    /// Cursor column path defined by the source (empty when none).
    pub source_defined_cursor: Vec<String>,
    /// Primary key column paths defined by the source (empty when none).
    pub source_defined_primary_key: Vec<Vec<String>>,
}

/// The discovered half of a configured stream, echoed back to the service.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStream {
    pub name: String,
    pub json_schema: serde_json::Value,
    pub supported_sync_modes: Vec<String>,
}

/// One stream of the catalog: discovered schema + configured sync modes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfiguredStream {
    pub stream: CatalogStream,
    pub sync_mode: SyncMode,
    pub destination_sync_mode: DestinationSyncMode,
    pub cursor_field: Vec<String>,
    pub primary_key: Vec<Vec<String>>,
}

/// The per-connection sync catalog, in the shape the control plane accepts.
#[derive(Debug, Clone, Serialize)]
pub struct SyncCatalog {
    pub streams: Vec<ConfiguredStream>,
}

/// Build the catalog for a connection.
///
/// Keeps the requested streams in their configured order and attaches each
/// one's discovered schema, source-defined cursor, and primary key. Every
/// requested stream must have been discovered; the error lists all missing
/// names at once so a single run surfaces the full gap.
pub fn build_sync_catalog(
    discovered: &[DiscoveredStream],
    requested: &[StreamSpec],
) -> Result<SyncCatalog, DomainError> {
    let by_name: HashMap<&str, &DiscoveredStream> =
        discovered.iter().map(|s| (s.name.as_str(), s)).collect();

    let missing: Vec<String> = requested
        .iter()
        .filter(|r| !by_name.contains_key(r.name.as_str()))
        .map(|r| r.name.clone())
        .collect();
    if !missing.is_empty() {
        return Err(DomainError::UndiscoveredStreams { missing });
    }

    let streams = requested
        .iter()
        .map(|r| {
            let d = by_name[r.name.as_str()];
            if !d.supported_sync_modes.iter().any(|m| m == r.sync_mode.as_str()) {
                // The control plane is the final authority on supported modes.
                warn!(
                    stream = %r.name,
                    requested = r.sync_mode.as_str(),
                    supported = ?d.supported_sync_modes,
                    "Requested sync mode not advertised by the source"
                );
            }
            ConfiguredStream {
                stream: CatalogStream {
                    name: d.name.clone(),
                    json_schema: d.json_schema.clone(),
                    supported_sync_modes: d.supported_sync_modes.clone(),
                },
                sync_mode: r.sync_mode,
                destination_sync_mode: r.destination_sync_mode,
                cursor_field: d.source_defined_cursor.clone(),
                primary_key: d.source_defined_primary_key.clone(),
            }
        })
        .collect();

    Ok(SyncCatalog { streams })
}
