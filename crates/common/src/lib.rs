//! Shared building blocks for the admin backend crates: logging setup,
//! startup environment checks and small response types.

pub mod types;
pub mod utils;
pub mod env;
