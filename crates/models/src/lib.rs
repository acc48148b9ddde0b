pub mod errors;
pub mod db;
pub mod user;
pub mod email_address;
pub mod service;
pub mod service_collaborator;
