// headgate-core/src/infrastructure/api/mod.rs

pub mod client;
pub mod types;

pub use client::ControlPlaneClient;
