// headgate-core/src/application/setup.rs
//
// USE CASES: provision the pipeline (run_setup) and preview what a run
// would do (plan_setup). Strictly sequential; a failed step aborts before
// any later resource is touched. Re-running converges because every
// resource is looked up by name before being created.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::pipeline::{build_sync_catalog, PipelineSpec};
use crate::error::HeadgateError;
use crate::infrastructure::fs::atomic_write;
use crate::ports::control_plane::{ControlPlane, DiscoverFilter, ResourceSummary};

#[derive(Debug, Clone, Default)]
pub struct SetupOptions {
    /// Skip the post-resolution connector checks.
    pub skip_checks: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceOutcome {
    pub id: String,
    pub name: String,
    pub created: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetupReport {
    pub source: ResourceOutcome,
    pub destination: ResourceOutcome,
    pub connection: ResourceOutcome,
    pub stream_count: usize,
    pub completed_at: DateTime<Utc>,
}

impl SetupReport {
    /// Persist the report as pretty JSON (atomic rename).
    pub fn save(&self, path: &Path) -> Result<(), HeadgateError> {
        let json = serde_json::to_vec_pretty(self)
            .map_err(|e| HeadgateError::Internal(format!("Failed to serialize report: {e}")))?;
        atomic_write(path, json)?;
        Ok(())
    }
}

/// What `apply` would do for one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanAction {
    Create,
    Reuse { id: String },
}

#[derive(Debug, Clone)]
pub struct SetupPlan {
    pub source: PlanAction,
    pub destination: PlanAction,
    pub connection: PlanAction,
}

/// Provision the source, destination, and connection on the control plane.
pub async fn run_setup(
    control_plane: &dyn ControlPlane,
    pipeline: &PipelineSpec,
    options: &SetupOptions,
) -> Result<SetupReport, HeadgateError> {
    // 1. SOURCE
    println!("→ Resolving source '{}'...", pipeline.source.name);
    let (source, source_created) =
        match control_plane.find_source_by_name(&pipeline.source.name).await? {
            Some(existing) => {
                println!("   ♻️  Reusing source (id={})", existing.id);
                warn_on_type_drift(&existing, pipeline.source.kind.as_str());
                (existing, false)
            }
            None => {
                let created = control_plane.create_source(&pipeline.source).await?;
                println!("   ✅ Source created (id={})", created.id);
                (created, true)
            }
        };

    if !options.skip_checks {
        println!("→ Checking source connectivity...");
        let outcome = control_plane.check_source(&source.id).await?;
        if !outcome.succeeded {
            return Err(HeadgateError::CheckFailed {
                resource: "source".to_string(),
                name: source.name.clone(),
                message: outcome.message.unwrap_or_else(|| "check failed".to_string()),
            });
        }
    }

    // 2. DESTINATION
    println!("→ Resolving destination '{}'...", pipeline.destination.name);
    let (destination, destination_created) = match control_plane
        .find_destination_by_name(&pipeline.destination.name)
        .await?
    {
        Some(existing) => {
            println!("   ♻️  Reusing destination (id={})", existing.id);
            (existing, false)
        }
        None => {
            let created = control_plane
                .create_destination(&pipeline.destination)
                .await?;
            println!("   ✅ Destination created (id={})", created.id);
            (created, true)
        }
    };

    if !options.skip_checks {
        println!("→ Checking destination connectivity...");
        let outcome = control_plane.check_destination(&destination.id).await?;
        if !outcome.succeeded {
            return Err(HeadgateError::CheckFailed {
                resource: "destination".to_string(),
                name: destination.name.clone(),
                message: outcome.message.unwrap_or_else(|| "check failed".to_string()),
            });
        }
    }

    // 3. SYNC CATALOG
    println!("→ Discovering source schema...");
    let filter = DiscoverFilter {
        database: Some(pipeline.source.database.clone()),
        schema: pipeline.source.schemas.first().cloned(),
        tables: pipeline
            .connection
            .streams
            .iter()
            .map(|s| s.name.clone())
            .collect(),
    };
    let discovered = control_plane.discover_streams(&source.id, &filter).await?;
    let catalog = build_sync_catalog(&discovered, &pipeline.connection.streams)?;
    println!("   📋 Catalog ready ({} streams)", catalog.streams.len());

    // 4. CONNECTION
    println!("→ Resolving connection '{}'...", pipeline.connection.name);
    let (connection, connection_created) = match control_plane
        .find_connection_by_name(&pipeline.connection.name)
        .await?
    {
        Some(existing) => {
            println!("   ♻️  Reusing connection (id={})", existing.id);
            (existing, false)
        }
        None => {
            let created = control_plane
                .create_connection(
                    &pipeline.connection,
                    &source.id,
                    &destination.id,
                    &catalog,
                )
                .await?;
            println!("   ✅ Connection created (id={})", created.id);
            (created, true)
        }
    };

    Ok(SetupReport {
        source: ResourceOutcome {
            id: source.id,
            name: source.name,
            created: source_created,
        },
        destination: ResourceOutcome {
            id: destination.id,
            name: destination.name,
            created: destination_created,
        },
        connection: ResourceOutcome {
            id: connection.id,
            name: connection.name,
            created: connection_created,
        },
        stream_count: catalog.streams.len(),
        completed_at: Utc::now(),
    })
}

/// Read-only preview: the three name lookups, no mutation.
pub async fn plan_setup(
    control_plane: &dyn ControlPlane,
    pipeline: &PipelineSpec,
) -> Result<SetupPlan, HeadgateError> {
    let source = match control_plane.find_source_by_name(&pipeline.source.name).await? {
        Some(existing) => PlanAction::Reuse { id: existing.id },
        None => PlanAction::Create,
    };
    let destination = match control_plane
        .find_destination_by_name(&pipeline.destination.name)
        .await?
    {
        Some(existing) => PlanAction::Reuse { id: existing.id },
        None => PlanAction::Create,
    };
    let connection = match control_plane
        .find_connection_by_name(&pipeline.connection.name)
        .await?
    {
        Some(existing) => PlanAction::Reuse { id: existing.id },
        None => PlanAction::Create,
    };

    Ok(SetupPlan {
        source,
        destination,
        connection,
    })
}

fn warn_on_type_drift(existing: &ResourceSummary, configured: &str) {
    if !existing.resource_type.is_empty() && existing.resource_type != configured {
        warn!(
            name = %existing.name,
            remote = %existing.resource_type,
            configured,
            "Existing resource type differs from the configured kind; reusing anyway"
        );
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::pipeline::{
        connection::{Schedule, ScheduleUnit},
        ConnectionSpec, ConnectionStatus, DestinationSpec, DestinationSyncMode, DiscoveredStream,
        ReplicationMode, SourceKind, SourceSpec, StreamSpec, SyncCatalog, SyncMode,
    };
    use crate::ports::control_plane::{CheckOutcome, ConnectionSummary};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    fn pipeline() -> PipelineSpec {
        PipelineSpec {
            source: SourceSpec {
                name: "mssql".to_string(),
                kind: SourceKind::Sqlserver,
                host: "db.internal".to_string(),
                port: 1433,
                database: "LoanDataServices".to_string(),
                username: "reader".to_string(),
                password: "hunter2".to_string(),
                replication: ReplicationMode::Cdc,
                schemas: vec!["dbo".to_string()],
            },
            destination: DestinationSpec {
                name: "snowflake".to_string(),
                account: "abc-xyz".to_string(),
                username: "loader".to_string(),
                password: "hunter2".to_string(),
                role: "MY_APP_ROLE".to_string(),
                warehouse: "COMPUTE_WH".to_string(),
                database: "LOAN_ANALYTICS".to_string(),
                schema: "RAW".to_string(),
            },
            connection: ConnectionSpec {
                name: "mssql-to-snowflake".to_string(),
                source: "mssql".to_string(),
                destination: "snowflake".to_string(),
                schedule: Schedule {
                    every: 5,
                    unit: ScheduleUnit::Minutes,
                },
                streams: vec![
                    StreamSpec {
                        name: "loans".to_string(),
                        sync_mode: SyncMode::Incremental,
                        destination_sync_mode: DestinationSyncMode::AppendDedup,
                    },
                    StreamSpec {
                        name: "payments".to_string(),
                        sync_mode: SyncMode::Incremental,
                        destination_sync_mode: DestinationSyncMode::AppendDedup,
                    },
                ],
                namespace_format: None,
                auto_propagate_schema: true,
                status: ConnectionStatus::Active,
            },
        }
    }

    /// In-memory control plane: remote state behind a Mutex, create counters.
    #[derive(Default)]
    struct FakeControlPlane {
        state: Mutex<FakeState>,
        source_check_fails: bool,
        discovery_empty: bool,
    }

    #[derive(Default)]
    struct FakeState {
        sources: Vec<ResourceSummary>,
        destinations: Vec<ResourceSummary>,
        connections: Vec<ConnectionSummary>,
        source_creates: usize,
        destination_creates: usize,
        connection_creates: usize,
        last_catalog_streams: usize,
    }

    impl FakeControlPlane {
        fn with_existing(pipeline: &PipelineSpec) -> Self {
            let fake = Self::default();
            {
                let mut state = fake.state.lock().unwrap();
                state.sources.push(ResourceSummary {
                    id: "src-existing".to_string(),
                    name: pipeline.source.name.clone(),
                    resource_type: "sqlserver".to_string(),
                });
                state.destinations.push(ResourceSummary {
                    id: "dst-existing".to_string(),
                    name: pipeline.destination.name.clone(),
                    resource_type: "snowflake".to_string(),
                });
                state.connections.push(ConnectionSummary {
                    id: "conn-existing".to_string(),
                    name: pipeline.connection.name.clone(),
                    source_id: "src-existing".to_string(),
                    destination_id: "dst-existing".to_string(),
                });
            }
            fake
        }
    }

    #[async_trait]
    impl ControlPlane for FakeControlPlane {
        async fn find_source_by_name(
            &self,
            name: &str,
        ) -> Result<Option<ResourceSummary>, HeadgateError> {
            let state = self.state.lock().unwrap();
            Ok(state.sources.iter().find(|s| s.name == name).cloned())
        }

        async fn create_source(
            &self,
            spec: &SourceSpec,
        ) -> Result<ResourceSummary, HeadgateError> {
            let mut state = self.state.lock().unwrap();
            state.source_creates += 1;
            let summary = ResourceSummary {
                id: format!("src-{}", state.source_creates),
                name: spec.name.clone(),
                resource_type: spec.kind.as_str().to_string(),
            };
            state.sources.push(summary.clone());
            Ok(summary)
        }

        async fn check_source(&self, _id: &str) -> Result<CheckOutcome, HeadgateError> {
            Ok(CheckOutcome {
                succeeded: !self.source_check_fails,
                message: self
                    .source_check_fails
                    .then(|| "login failed for user".to_string()),
            })
        }

        async fn find_destination_by_name(
            &self,
            name: &str,
        ) -> Result<Option<ResourceSummary>, HeadgateError> {
            let state = self.state.lock().unwrap();
            Ok(state.destinations.iter().find(|d| d.name == name).cloned())
        }

        async fn create_destination(
            &self,
            spec: &DestinationSpec,
        ) -> Result<ResourceSummary, HeadgateError> {
            let mut state = self.state.lock().unwrap();
            state.destination_creates += 1;
            let summary = ResourceSummary {
                id: format!("dst-{}", state.destination_creates),
                name: spec.name.clone(),
                resource_type: "snowflake".to_string(),
            };
            state.destinations.push(summary.clone());
            Ok(summary)
        }

        async fn check_destination(&self, _id: &str) -> Result<CheckOutcome, HeadgateError> {
            Ok(CheckOutcome {
                succeeded: true,
                message: None,
            })
        }

        async fn discover_streams(
            &self,
            _source_id: &str,
            filter: &DiscoverFilter,
        ) -> Result<Vec<DiscoveredStream>, HeadgateError> {
            if self.discovery_empty {
                return Ok(vec![]);
            }
            Ok(filter
                .tables
                .iter()
                .map(|name| DiscoveredStream {
                    name: name.clone(),
                    json_schema: json!({"type": "object"}),
                    supported_sync_modes: vec![
                        "full_refresh".to_string(),
                        "incremental".to_string(),
                    ],
                    source_defined_cursor: vec!["_ab_cdc_lsn".to_string()],
                    source_defined_primary_key: vec![vec!["id".to_string()]],
                })
                .collect())
        }

        async fn find_connection_by_name(
            &self,
            name: &str,
        ) -> Result<Option<ConnectionSummary>, HeadgateError> {
            let state = self.state.lock().unwrap();
            Ok(state.connections.iter().find(|c| c.name == name).cloned())
        }

        async fn create_connection(
            &self,
            spec: &ConnectionSpec,
            source_id: &str,
            destination_id: &str,
            catalog: &SyncCatalog,
        ) -> Result<ConnectionSummary, HeadgateError> {
            // Invariant under test: never called with unresolved IDs.
            assert!(!source_id.is_empty() && !destination_id.is_empty());
            let mut state = self.state.lock().unwrap();
            state.connection_creates += 1;
            state.last_catalog_streams = catalog.streams.len();
            let summary = ConnectionSummary {
                id: format!("conn-{}", state.connection_creates),
                name: spec.name.clone(),
                source_id: source_id.to_string(),
                destination_id: destination_id.to_string(),
            };
            state.connections.push(summary.clone());
            Ok(summary)
        }
    }

    #[tokio::test]
    async fn test_setup_creates_all_three_on_empty_remote() {
        let fake = FakeControlPlane::default();
        let pipeline = pipeline();

        let report = run_setup(&fake, &pipeline, &SetupOptions::default())
            .await
            .unwrap();

        assert!(report.source.created);
        assert!(report.destination.created);
        assert!(report.connection.created);
        assert_eq!(report.stream_count, 2);

        let state = fake.state.lock().unwrap();
        assert_eq!(state.source_creates, 1);
        assert_eq!(state.destination_creates, 1);
        assert_eq!(state.connection_creates, 1);
        assert_eq!(state.last_catalog_streams, 2);
        // The connection references the freshly created resources.
        assert_eq!(state.connections[0].source_id, "src-1");
        assert_eq!(state.connections[0].destination_id, "dst-1");
    }

    #[tokio::test]
    async fn test_second_run_reuses_everything() {
        let fake = FakeControlPlane::default();
        let pipeline = pipeline();

        run_setup(&fake, &pipeline, &SetupOptions::default())
            .await
            .unwrap();
        let report = run_setup(&fake, &pipeline, &SetupOptions::default())
            .await
            .unwrap();

        assert!(!report.source.created);
        assert!(!report.destination.created);
        assert!(!report.connection.created);

        let state = fake.state.lock().unwrap();
        assert_eq!(state.source_creates, 1);
        assert_eq!(state.destination_creates, 1);
        assert_eq!(state.connection_creates, 1);
        assert_eq!(state.sources.len(), 1);
        assert_eq!(state.connections.len(), 1);
    }

    #[tokio::test]
    async fn test_existing_resources_keep_their_ids() {
        let pipeline = pipeline();
        let fake = FakeControlPlane::with_existing(&pipeline);

        let report = run_setup(&fake, &pipeline, &SetupOptions::default())
            .await
            .unwrap();

        assert_eq!(report.source.id, "src-existing");
        assert_eq!(report.destination.id, "dst-existing");
        assert_eq!(report.connection.id, "conn-existing");

        let state = fake.state.lock().unwrap();
        assert_eq!(state.source_creates, 0);
        assert_eq!(state.destination_creates, 0);
        assert_eq!(state.connection_creates, 0);
    }

    #[tokio::test]
    async fn test_failed_source_check_aborts_before_destination() {
        let fake = FakeControlPlane {
            source_check_fails: true,
            ..Default::default()
        };
        let pipeline = pipeline();

        let err = run_setup(&fake, &pipeline, &SetupOptions::default())
            .await
            .unwrap_err();
        match err {
            HeadgateError::CheckFailed { resource, message, .. } => {
                assert_eq!(resource, "source");
                assert!(message.contains("login failed"));
            }
            other => panic!("Expected CheckFailed, got {:?}", other),
        }

        let state = fake.state.lock().unwrap();
        assert_eq!(state.destination_creates, 0);
        assert_eq!(state.connection_creates, 0);
    }

    #[tokio::test]
    async fn test_skip_checks_ignores_failing_connector() {
        let fake = FakeControlPlane {
            source_check_fails: true,
            ..Default::default()
        };
        let pipeline = pipeline();

        let options = SetupOptions { skip_checks: true };
        assert!(run_setup(&fake, &pipeline, &options).await.is_ok());
    }

    #[tokio::test]
    async fn test_undiscovered_streams_block_connection_creation() {
        let fake = FakeControlPlane {
            discovery_empty: true,
            ..Default::default()
        };
        let pipeline = pipeline();

        let err = run_setup(&fake, &pipeline, &SetupOptions::default())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("loans"));
        assert!(err.to_string().contains("payments"));

        let state = fake.state.lock().unwrap();
        assert_eq!(state.connection_creates, 0);
    }

    #[tokio::test]
    async fn test_plan_reports_without_mutating() {
        let pipeline = pipeline();
        let fake = FakeControlPlane::default();
        {
            let mut state = fake.state.lock().unwrap();
            state.sources.push(ResourceSummary {
                id: "src-existing".to_string(),
                name: pipeline.source.name.clone(),
                resource_type: "sqlserver".to_string(),
            });
        }

        let plan = plan_setup(&fake, &pipeline).await.unwrap();
        assert_eq!(
            plan.source,
            PlanAction::Reuse {
                id: "src-existing".to_string()
            }
        );
        assert_eq!(plan.destination, PlanAction::Create);
        assert_eq!(plan.connection, PlanAction::Create);

        let state = fake.state.lock().unwrap();
        assert_eq!(state.source_creates, 0);
        assert_eq!(state.destination_creates, 0);
        assert_eq!(state.connection_creates, 0);
    }
}
