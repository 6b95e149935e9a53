//! Shared building blocks used across the workspace: logging setup,
//! health payloads and pagination parameters.

pub mod types;
pub mod utils;
pub mod pagination;
