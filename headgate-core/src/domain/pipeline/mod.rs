// headgate-core/src/domain/pipeline/mod.rs
//
// The declarative pipeline model: three documents describing a source,
// a destination, and the sync connection between them.

pub mod catalog;
pub mod connection;
pub mod destination;
pub mod source;

pub use catalog::{build_sync_catalog, DiscoveredStream, SyncCatalog};
pub use connection::{ConnectionSpec, ConnectionStatus, DestinationSyncMode, StreamSpec, SyncMode};
pub use destination::DestinationSpec;
pub use source::{ReplicationMode, SourceKind, SourceSpec};

use std::collections::HashSet;
use validator::Validate;

use crate::domain::error::DomainError;

/// The three documents of one pipeline, loaded and immutable.
#[derive(Debug, Clone)]
pub struct PipelineSpec {
    pub source: SourceSpec,
    pub destination: DestinationSpec,
    pub connection: ConnectionSpec,
}

impl PipelineSpec {
    /// Field-level validation plus the cross-document reference checks.
    pub fn validate(&self) -> Result<(), DomainError> {
        self.source
            .validate()
            .map_err(|e| DomainError::Validation(format!("source: {e}")))?;
        self.destination
            .validate()
            .map_err(|e| DomainError::Validation(format!("destination: {e}")))?;
        self.connection
            .validate()
            .map_err(|e| DomainError::Validation(format!("connection: {e}")))?;

        // Name references must resolve inside the pipeline itself.
        if self.connection.source != self.source.name {
            return Err(DomainError::DanglingReference {
                connection: self.connection.name.clone(),
                resource: "source".to_string(),
                reference: self.connection.source.clone(),
            });
        }
        if self.connection.destination != self.destination.name {
            return Err(DomainError::DanglingReference {
                connection: self.connection.name.clone(),
                resource: "destination".to_string(),
                reference: self.connection.destination.clone(),
            });
        }

        let mut seen = HashSet::new();
        for stream in &self.connection.streams {
            if !seen.insert(stream.name.as_str()) {
                return Err(DomainError::DuplicateStream(stream.name.clone()));
            }
        }

        Ok(())
    }
}
