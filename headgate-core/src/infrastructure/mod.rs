// headgate-core/src/infrastructure/mod.rs

pub mod api;
pub mod config;
pub mod error;
pub mod fs;
