//! Persistence of service settings and their collaborator sets.

pub mod domain;
pub mod repository;
pub mod repo;

pub use domain::ServiceRecord;
pub use repository::ServiceStore;
