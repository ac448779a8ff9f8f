// headgate-core/src/ports/mod.rs

pub mod control_plane;
