use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::directory::DirectoryError;
use crate::errors::ServiceError;

/// Per-field validation messages of a rejected submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl FormErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool { self.fields.is_empty() }

    /// Messages attached to `field` (empty when it passed).
    pub fn get(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.fields {
            for msg in messages {
                if !first { f.write_str("; ")?; }
                write!(f, "{field}: {msg}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Outcome of a failed bind/validate/save cycle.
#[derive(Debug, Error)]
pub enum FormError {
    /// Submission rejected; redisplay with these messages.
    #[error("invalid form: {0}")]
    Invalid(FormErrors),
    #[error("directory lookup failed: {0}")]
    Lookup(#[from] DirectoryError),
    #[error(transparent)]
    Store(#[from] ServiceError),
}

impl FormError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            FormError::Invalid(_) => 2001,
            FormError::Store(ServiceError::NotFound(_)) => 2002,
            FormError::Lookup(_) => 2101,
            FormError::Store(_) => 2200,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_messages_per_field() {
        let mut errs = FormErrors::default();
        assert!(errs.is_empty());
        errs.add("name", "This field is required.");
        errs.add("collaborators", "Email 'x@y.z' is not registered");
        assert_eq!(errs.get("name"), ["This field is required."]);
        assert!(errs.get("link").is_empty());
        assert_eq!(errs.fields().collect::<Vec<_>>(), vec!["collaborators", "name"]);
        assert_eq!(
            errs.to_string(),
            "collaborators: Email 'x@y.z' is not registered; name: This field is required."
        );
    }

    #[test]
    fn serializes_as_plain_map() {
        let mut errs = FormErrors::default();
        errs.add("name", "This field is required.");
        let json = serde_json::to_value(&errs).unwrap();
        assert_eq!(json, serde_json::json!({"name": ["This field is required."]}));
    }
}
