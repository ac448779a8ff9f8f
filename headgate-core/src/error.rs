// headgate-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum HeadgateError {
    // --- ERREURS DU DOMAINE (Références, Streams, Validation) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Domain(#[from] DomainError),

    // --- ERREURS D'INFRASTRUCTURE (IO, Parsing, HTTP) ---
    #[error(transparent)]
    #[diagnostic(transparent)]
    Infrastructure(#[from] InfrastructureError),

    // --- ÉCHEC D'UN CHECK CONNECTEUR ---
    #[error("{resource} check failed for '{name}': {message}")]
    #[diagnostic(
        code(headgate::check_failed),
        help("Verify the credentials and network reachability of the configured system.")
    )]
    CheckFailed {
        resource: String,
        name: String,
        message: String,
    },

    // --- ERREURS GÉNÉRIQUES / APPLICATIVES ---
    #[error("Internal Error: {0}")]
    Internal(String),
}

// Manual implementation to avoid duplicate enum variant but keep ergonomics
impl From<std::io::Error> for HeadgateError {
    fn from(err: std::io::Error) -> Self {
        HeadgateError::Infrastructure(InfrastructureError::Io(err))
    }
}
