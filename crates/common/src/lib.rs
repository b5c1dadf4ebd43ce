//! Shared plumbing for the product store workspace: logging setup,
//! startup environment checks and small response types.

pub mod env;
pub mod types;
pub mod utils;
