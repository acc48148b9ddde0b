//! Collaborator field: a comma-separated list of emails on the way in,
//! registered accounts on the way out.
//!
//! Parsing is all-or-nothing. The first address that no account owns fails
//! the whole list and no partial result is produced.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, instrument};

use crate::directory::{Account, AccountDirectory, DirectoryError};

/// Separator between submitted addresses.
pub const SEPARATOR: char = ',';
/// Separator used when rendering accounts back into the field.
pub const DISPLAY_SEPARATOR: &str = ", ";

#[derive(Debug, Error)]
pub enum CollaboratorError {
    /// No registered account owns this address.
    #[error("Email '{email}' is not registered")]
    NotRegistered { email: String },
    #[error("directory lookup failed: {0}")]
    Lookup(#[from] DirectoryError),
}

/// Trimmed, non-empty candidate addresses in input order.
///
/// Blank entries (`"a@x.com,, b@y.com"`, trailing commas, whitespace-only
/// input) are skipped.
pub fn split_emails(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(SEPARATOR).map(str::trim).filter(|email| !email.is_empty())
}

/// Resolves collaborator input against an injected account directory.
pub struct CollaboratorResolver<D: AccountDirectory + ?Sized> {
    directory: Arc<D>,
}

impl<D: AccountDirectory + ?Sized> Clone for CollaboratorResolver<D> {
    fn clone(&self) -> Self {
        Self { directory: Arc::clone(&self.directory) }
    }
}

impl<D: AccountDirectory + ?Sized> CollaboratorResolver<D> {
    pub fn new(directory: Arc<D>) -> Self { Self { directory } }

    /// Resolve every address in `raw` to its account, keeping input order.
    ///
    /// `None` behaves like an empty field. Duplicate addresses resolve to
    /// duplicate entries; lookups ignore case.
    ///
    /// # Examples
    /// ```
    /// use service::collaborators::CollaboratorResolver;
    /// use service::directory::repository::mock::MockAccountDirectory;
    /// use std::sync::Arc;
    /// let dir = Arc::new(MockAccountDirectory::with_emails(&["alice@test.com", "bob@test.com"]));
    /// let resolver = CollaboratorResolver::new(dir);
    /// let found = tokio_test::block_on(resolver.parse_and_validate(Some("alice@test.com,, bob@test.com"))).unwrap();
    /// assert_eq!(found.len(), 2);
    /// assert_eq!(found[0].email, "alice@test.com");
    ///
    /// let err = tokio_test::block_on(resolver.parse_and_validate(Some("ghost@test.com"))).unwrap_err();
    /// assert_eq!(err.to_string(), "Email 'ghost@test.com' is not registered");
    /// ```
    #[instrument(skip(self, raw))]
    pub async fn parse_and_validate(&self, raw: Option<&str>) -> Result<Vec<Account>, CollaboratorError> {
        let mut resolved = Vec::new();
        for email in split_emails(raw.unwrap_or_default()) {
            match self.directory.find_account_by_email(email, true).await? {
                Some(account) => resolved.push(account),
                None => {
                    debug!(%email, "collaborator_not_registered");
                    return Err(CollaboratorError::NotRegistered { email: email.to_string() });
                }
            }
        }
        debug!(count = resolved.len(), "collaborators_resolved");
        Ok(resolved)
    }
}

/// Render accounts back into field text: primary emails joined by `", "`.
///
/// `None` renders as an empty string.
pub fn format_for_display(identities: Option<&[Account]>) -> String {
    identities
        .unwrap_or_default()
        .iter()
        .map(|account| account.email.as_str())
        .collect::<Vec<_>>()
        .join(DISPLAY_SEPARATOR)
}
