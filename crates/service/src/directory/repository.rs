use async_trait::async_trait;

use super::domain::Account;
use super::errors::DirectoryError;

/// Lookup abstraction over registered account/email links.
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// Account owning `email`, or `None` when no address matches.
    ///
    /// If several address rows match, the earliest registered one wins.
    async fn find_account_by_email(&self, email: &str, case_insensitive: bool) -> Result<Option<Account>, DirectoryError>;
}

/// Simple in-memory mock directory for tests and doc examples
pub mod mock {
    use super::*;
    use models::email_address::fold_case;
    use std::sync::Mutex;
    use uuid::Uuid;

    #[derive(Default)]
    pub struct MockAccountDirectory {
        links: Mutex<Vec<(String, Account)>>, // (linked address, owner) in registration order
    }

    impl MockAccountDirectory {
        /// Directory with one account per address; names are the local parts.
        pub fn with_emails(emails: &[&str]) -> Self {
            let dir = Self::default();
            for email in emails {
                let name = email.split('@').next().unwrap_or(email);
                dir.register(email, name);
            }
            dir
        }

        /// Create an account whose primary address is `email`.
        pub fn register(&self, email: &str, name: &str) -> Account {
            let account = Account { id: Uuid::new_v4(), email: email.to_string(), name: name.to_string() };
            self.link_address(&account, email);
            account
        }

        /// Link an additional address to an existing account.
        pub fn link_address(&self, account: &Account, email: &str) {
            let mut links = self.links.lock().unwrap_or_else(|e| e.into_inner());
            links.push((email.to_string(), account.clone()));
        }
    }

    #[async_trait]
    impl AccountDirectory for MockAccountDirectory {
        async fn find_account_by_email(&self, email: &str, case_insensitive: bool) -> Result<Option<Account>, DirectoryError> {
            let links = self.links.lock().map_err(|_| DirectoryError::Repository("directory lock poisoned".into()))?;
            let found = links.iter().find(|(linked, _)| {
                if case_insensitive { fold_case(linked) == fold_case(email) } else { linked == email }
            });
            Ok(found.map(|(_, account)| account.clone()))
        }
    }
}
