//! Shared building blocks for the service console crates.
//!
//! - `types`: small wire types shared by the HTTP layer
//! - `utils::logging`: tracing subscriber setup

pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::types::{ErrorBody, Health};

    #[test]
    fn health_type_ok() {
        let h = Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn error_body_serializes_message() {
        let body = ErrorBody::new("boom");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"error": "boom"}));
    }
}
