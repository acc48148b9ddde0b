//! Service layer for the service console.
//! - `collaborators`: comma-separated emails <-> registered accounts
//! - `directory`: account lookup abstraction (mock + SeaORM)
//! - `service_form`: settings form binding, validation and initial values
//! - `store`: persistence of validated settings (mock + SeaORM)

pub mod errors;
pub mod collaborators;
pub mod directory;
pub mod service_form;
pub mod store;
#[cfg(test)]
pub mod test_support;
