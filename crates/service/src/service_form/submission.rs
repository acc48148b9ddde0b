use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use super::errors::FormError;
use super::form::{FormData, ServiceForm};
use crate::collaborators::CollaboratorResolver;
use crate::directory::AccountDirectory;
use crate::store::{ServiceRecord, ServiceStore};

/// Bind -> validate -> save for the service settings form, independent of web framework
pub struct ServiceFormService<D: AccountDirectory + ?Sized, S: ServiceStore + ?Sized> {
    resolver: CollaboratorResolver<D>,
    store: Arc<S>,
}

impl<D: AccountDirectory + ?Sized, S: ServiceStore + ?Sized> ServiceFormService<D, S> {
    pub fn new(directory: Arc<D>, store: Arc<S>) -> Self {
        Self { resolver: CollaboratorResolver::new(directory), store }
    }

    /// Validate a submission and create the service.
    ///
    /// # Examples
    /// ```
    /// use service::directory::repository::mock::MockAccountDirectory;
    /// use service::store::repository::mock::MockServiceStore;
    /// use service::service_form::{FormData, ServiceFormService};
    /// use std::sync::Arc;
    /// let dir = Arc::new(MockAccountDirectory::with_emails(&["alice@test.com"]));
    /// let svc = ServiceFormService::new(dir, Arc::new(MockServiceStore::default()));
    /// let mut data = FormData::new();
    /// data.insert("name".into(), "Blog".into());
    /// data.insert("collaborators".into(), "Alice@test.com, ".into());
    /// let saved = tokio_test::block_on(svc.create(data)).unwrap();
    /// assert_eq!(saved.collaborators[0].email, "alice@test.com");
    /// ```
    #[instrument(skip(self, data))]
    pub async fn create(&self, data: FormData) -> Result<ServiceRecord, FormError> {
        let cleaned = ServiceForm::bind(data).validate(&self.resolver).await?;
        let record = self.store.create(&cleaned).await?;
        info!(service_id = %record.id, name = %record.settings.name, "service_form_saved");
        Ok(record)
    }

    /// Validate a submission and overwrite an existing service.
    #[instrument(skip(self, data), fields(service_id = %id))]
    pub async fn update(&self, id: Uuid, data: FormData) -> Result<ServiceRecord, FormError> {
        let cleaned = ServiceForm::bind(data).validate(&self.resolver).await?;
        let record = self.store.update(id, &cleaned).await?;
        info!(service_id = %record.id, name = %record.settings.name, "service_form_saved");
        Ok(record)
    }

    /// Initial values for editing `id`; `None` when the service does not exist.
    pub async fn edit_form(&self, id: Uuid) -> Result<Option<FormData>, FormError> {
        let record = self.store.get(id).await?;
        Ok(record.map(|r| ServiceForm::initial(Some(&r))))
    }

    /// Initial values for a new service.
    pub fn blank_form(&self) -> FormData {
        ServiceForm::initial(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::repository::mock::MockAccountDirectory;
    use crate::errors::ServiceError;
    use crate::store::repository::mock::MockServiceStore;

    fn data(pairs: &[(&str, &str)]) -> FormData {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn svc(emails: &[&str]) -> (ServiceFormService<MockAccountDirectory, MockServiceStore>, Arc<MockServiceStore>) {
        let store = Arc::new(MockServiceStore::default());
        let dir = Arc::new(MockAccountDirectory::with_emails(emails));
        (ServiceFormService::new(dir, Arc::clone(&store)), store)
    }

    #[tokio::test]
    async fn create_then_edit_form_shows_collaborators() {
        let (svc, _) = svc(&["a@x.com", "b@y.com"]);
        let saved = svc
            .create(data(&[("name", "Blog"), ("collaborators", "b@y.com, a@x.com, B@y.com")]))
            .await
            .unwrap();
        // stored as a set
        assert_eq!(saved.collaborators.len(), 2);

        let initial = svc.edit_form(saved.id).await.unwrap().expect("exists");
        assert_eq!(initial["collaborators"], "b@y.com, a@x.com");
        assert_eq!(initial["name"], "Blog");
    }

    #[tokio::test]
    async fn invalid_submission_saves_nothing() {
        let (svc, store) = svc(&["a@x.com"]);
        let err = svc
            .create(data(&[("name", "Blog"), ("collaborators", "a@x.com, ghost@test.com")]))
            .await
            .unwrap_err();
        assert_eq!(err.code(), 2001);
        let FormError::Invalid(errors) = err else { panic!("expected field errors") };
        assert_eq!(errors.get("collaborators"), ["Email 'ghost@test.com' is not registered"]);
        assert!(store.get(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_replaces_collaborators() {
        let (svc, _) = svc(&["a@x.com", "b@y.com"]);
        let saved = svc.create(data(&[("name", "Blog"), ("collaborators", "a@x.com")])).await.unwrap();
        let updated = svc
            .update(saved.id, data(&[("name", "Blog"), ("collaborators", "b@y.com")]))
            .await
            .unwrap();
        assert_eq!(updated.id, saved.id);
        assert_eq!(updated.collaborators[0].email, "b@y.com");
        assert_eq!(updated.collaborators.len(), 1);
    }

    #[tokio::test]
    async fn update_of_missing_service_is_not_found() {
        let (svc, _) = svc(&[]);
        let err = svc.update(Uuid::new_v4(), data(&[("name", "X")])).await.unwrap_err();
        assert!(matches!(err, FormError::Store(ServiceError::NotFound(_))));
        assert_eq!(err.code(), 2002);
        assert!(svc.edit_form(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[test]
    fn blank_form_has_every_field() {
        let (svc, _) = svc(&[]);
        let blank = svc.blank_form();
        assert_eq!(blank.len(), crate::service_form::SERVICE_FIELDS.len());
        assert_eq!(blank["collaborators"], "");
    }
}
