// headgate/src/commands/mod.rs

pub mod apply;
pub mod plan;
pub mod validate;
