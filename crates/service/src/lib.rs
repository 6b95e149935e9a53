//! Service layer for the student registry.
//! - `student`: domain types, the repository abstraction and `StudentService`.
//! - `integration`: outbound joke and booking capabilities.
//! - Business errors are collected in `errors::ServiceError`.

pub mod errors;
pub mod integration;
pub mod student;
#[cfg(test)]
pub mod test_support;

pub use student::StudentService;
