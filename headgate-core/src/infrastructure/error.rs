// headgate-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(headgate::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(headgate::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration document not found: {0}")]
    #[diagnostic(code(headgate::infra::config_missing))]
    ConfigNotFound(String),

    #[error("Missing environment variables: {}", missing.join(", "))]
    #[diagnostic(
        code(headgate::infra::missing_env),
        help("Export the listed variables, or give the placeholders ${{VAR:-default}} fallbacks.")
    )]
    MissingEnvVars { missing: Vec<String> },

    // --- HTTP / CONTROL PLANE ---
    #[error("HTTP transport error: {0}")]
    #[diagnostic(
        code(headgate::infra::http),
        help("Check the API URL and network connectivity.")
    )]
    Http(#[from] reqwest::Error),

    #[error("Control-plane API {path} returned HTTP {status}: {message}")]
    #[diagnostic(code(headgate::infra::api_status))]
    ApiStatus {
        status: u16,
        path: String,
        message: String,
    },

    #[error("Unexpected payload from {path}: {detail}")]
    #[diagnostic(code(headgate::infra::unexpected_payload))]
    UnexpectedPayload { path: String, detail: String },
}
