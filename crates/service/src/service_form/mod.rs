//! Service settings form: field table, binding, validation, edit initials.
//!
//! Lifecycle is bind -> validate -> save. The collaborator field is the only
//! one checked against external state (the account directory).

pub mod errors;
pub mod fields;
pub mod form;
pub mod submission;

pub use errors::{FormError, FormErrors};
pub use fields::{FieldDef, SERVICE_FIELDS};
pub use form::{CleanedService, FormData, ServiceForm};
pub use submission::ServiceFormService;
