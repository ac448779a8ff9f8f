// headgate-core/src/infrastructure/config/mod.rs
//
// Loader for the three declarative documents under `<project>/configs/`.

pub mod env;

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{info, instrument};

use crate::domain::pipeline::{ConnectionSpec, DestinationSpec, PipelineSpec, SourceSpec};
use crate::error::HeadgateError;
use crate::infrastructure::error::InfrastructureError;

/// Load, env-expand, parse, and validate the pipeline documents.
#[instrument(skip(project_dir))]
pub fn load_pipeline(project_dir: &Path) -> Result<PipelineSpec, HeadgateError> {
    let source: SourceSpec = load_document(project_dir, "source")?;
    let destination: DestinationSpec = load_document(project_dir, "destination")?;
    let connection: ConnectionSpec = load_document(project_dir, "connection")?;

    let pipeline = PipelineSpec {
        source,
        destination,
        connection,
    };
    pipeline.validate()?;

    Ok(pipeline)
}

fn find_document(project_dir: &Path, stem: &str) -> Result<PathBuf, InfrastructureError> {
    // Support yml/yaml
    let configs_dir = project_dir.join("configs");
    let candidates = [
        configs_dir.join(format!("{stem}.yaml")),
        configs_dir.join(format!("{stem}.yml")),
    ];
    candidates
        .iter()
        .find(|p| p.exists())
        .cloned()
        .ok_or_else(|| {
            InfrastructureError::ConfigNotFound(format!(
                "No {stem} document found in {:?}. Checked: {:?}",
                configs_dir, candidates
            ))
        })
}

fn load_document<T: DeserializeOwned>(
    project_dir: &Path,
    stem: &str,
) -> Result<T, InfrastructureError> {
    let path = find_document(project_dir, stem)?;
    info!(path = ?path, "Loading pipeline document");

    let raw = fs::read_to_string(&path)?;
    let (expanded, missing) = env::expand_env(&raw);
    if !missing.is_empty() {
        return Err(InfrastructureError::MissingEnvVars { missing });
    }

    Ok(serde_yaml::from_str(&expanded)?)
}
