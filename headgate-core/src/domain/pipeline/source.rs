// headgate-core/src/domain/pipeline/source.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Database engine behind the source connector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Sqlserver,
    Postgres,
    Mysql,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Sqlserver => "sqlserver",
            SourceKind::Postgres => "postgres",
            SourceKind::Mysql => "mysql",
        }
    }
}

/// How the source replicates changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplicationMode {
    Cdc,
    FullRefresh,
}

/// `configs/source.yaml` — the source connector document.
///
/// Secrets (host, credentials) typically arrive through `${VAR}` environment
/// substitution performed by the loader before parsing.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SourceSpec {
    #[validate(length(min = 1))]
    pub name: String,
    pub kind: SourceKind,
    #[validate(length(min = 1))]
    pub host: String,
    #[validate(range(min = 1))]
    pub port: u16,
    #[validate(length(min = 1))]
    pub database: String,
    #[validate(length(min = 1))]
    pub username: String,
    pub password: String,
    pub replication: ReplicationMode,
    #[validate(length(min = 1))]
    pub schemas: Vec<String>,
}
