// headgate-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Connection '{connection}' references unknown {resource} '{reference}'")]
    #[diagnostic(
        code(headgate::domain::dangling_reference),
        help("The reference must match the `name` field of the corresponding document.")
    )]
    DanglingReference {
        connection: String,
        resource: String,
        reference: String,
    },

    #[error("Duplicate stream '{0}' in connection configuration")]
    #[diagnostic(code(headgate::domain::duplicate_stream))]
    DuplicateStream(String),

    #[error("Streams not discovered on the source: {}", missing.join(", "))]
    #[diagnostic(
        code(headgate::domain::undiscovered_streams),
        help("Check that the tables exist and are visible to the configured database user.")
    )]
    UndiscoveredStreams { missing: Vec<String> },

    #[error("Invalid configuration: {0}")]
    #[diagnostic(code(headgate::domain::validation))]
    Validation(String),
}
