//! # Instances
//!
//! Instance directory and the status projection feeding it.

pub mod directory;
pub mod status;

pub use directory::InstanceDirectory;
pub use status::{name_patch, status_patch};
