//! Account directory: three-layer layout (domain, repository, implementations).
//!
//! Answers "which registered account owns this email address?" for the
//! collaborator field of the service form.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod repo;

pub use domain::Account;
pub use errors::DirectoryError;
pub use repository::AccountDirectory;
