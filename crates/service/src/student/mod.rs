//! Student module: three-layer architecture (domain, repository, service).

pub mod domain;
pub mod repository;
pub mod repo;
pub mod service;

pub use domain::{EnrichedStudent, Gender, NewStudent, Student};
pub use repository::StudentRepository;
pub use service::StudentService;
