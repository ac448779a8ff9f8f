// headgate-core/src/ports/control_plane.rs

// This file defines what the orchestrator needs from the remote service,
// without knowing how it is reached. The HTTP client implements it; tests
// substitute an in-memory fake.

use async_trait::async_trait;

use crate::domain::pipeline::{
    ConnectionSpec, DestinationSpec, DiscoveredStream, SourceSpec, SyncCatalog,
};
use crate::error::HeadgateError;

/// A source or destination as it exists remotely.
#[derive(Debug, Clone)]
pub struct ResourceSummary {
    /// Service-assigned opaque ID.
    pub id: String,
    pub name: String,
    /// Remote connector type (e.g. "sqlserver", "snowflake").
    pub resource_type: String,
}

/// A connection as it exists remotely.
#[derive(Debug, Clone)]
pub struct ConnectionSummary {
    pub id: String,
    pub name: String,
    pub source_id: String,
    pub destination_id: String,
}

/// Result of a connector check.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub succeeded: bool,
    pub message: Option<String>,
}

/// Scope for schema discovery.
#[derive(Debug, Clone, Default)]
pub struct DiscoverFilter {
    pub database: Option<String>,
    pub schema: Option<String>,
    pub tables: Vec<String>,
}

#[async_trait]
pub trait ControlPlane: Send + Sync {
    async fn find_source_by_name(
        &self,
        name: &str,
    ) -> Result<Option<ResourceSummary>, HeadgateError>;

    async fn create_source(&self, spec: &SourceSpec) -> Result<ResourceSummary, HeadgateError>;

    async fn check_source(&self, id: &str) -> Result<CheckOutcome, HeadgateError>;

    async fn find_destination_by_name(
        &self,
        name: &str,
    ) -> Result<Option<ResourceSummary>, HeadgateError>;

    async fn create_destination(
        &self,
        spec: &DestinationSpec,
    ) -> Result<ResourceSummary, HeadgateError>;

    async fn check_destination(&self, id: &str) -> Result<CheckOutcome, HeadgateError>;

    async fn discover_streams(
        &self,
        source_id: &str,
        filter: &DiscoverFilter,
    ) -> Result<Vec<DiscoveredStream>, HeadgateError>;

    async fn find_connection_by_name(
        &self,
        name: &str,
    ) -> Result<Option<ConnectionSummary>, HeadgateError>;

    async fn create_connection(
        &self,
        spec: &ConnectionSpec,
        source_id: &str,
        destination_id: &str,
        catalog: &SyncCatalog,
    ) -> Result<ConnectionSummary, HeadgateError>;
}
