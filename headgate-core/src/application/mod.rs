// headgate-core/src/application/mod.rs

pub mod setup;

pub use setup::{plan_setup, run_setup, PlanAction, SetupOptions, SetupPlan, SetupReport};
