use std::collections::BTreeMap;

use models::service::{Settings, NAME_MAX_LEN};
use serde::Serialize;
use tracing::debug;

use super::errors::{FormError, FormErrors};
use super::fields::*;
use crate::collaborators::{format_for_display, CollaboratorError, CollaboratorResolver};
use crate::directory::{Account, AccountDirectory};
use crate::store::ServiceRecord;

/// Raw submitted (or initial) values keyed by field name.
pub type FormData = BTreeMap<String, String>;

pub const REQUIRED: &str = "This field is required.";

/// Validated form output, ready for the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanedService {
    pub settings: Settings,
    /// Resolved in input order; repeats kept.
    pub collaborators: Vec<Account>,
}

/// A bound service settings form.
#[derive(Debug, Clone, Default)]
pub struct ServiceForm {
    data: FormData,
}

impl ServiceForm {
    pub fn fields() -> &'static [FieldDef] { &SERVICE_FIELDS }

    pub fn bind(data: FormData) -> Self { Self { data } }

    pub fn data(&self) -> &FormData { &self.data }

    fn raw(&self, field: &str) -> Option<&str> {
        self.data.get(field).map(String::as_str)
    }

    fn text(&self, field: &str) -> String {
        self.raw(field).map(str::trim).unwrap_or_default().to_string()
    }

    fn boolean(&self, field: &str) -> bool {
        parse_bool(self.raw(field))
    }

    /// Clean every field; all field errors are reported together.
    ///
    /// A directory outage aborts with `FormError::Lookup` instead of a field error.
    pub async fn validate<D: AccountDirectory + ?Sized>(
        &self,
        resolver: &CollaboratorResolver<D>,
    ) -> Result<CleanedService, FormError> {
        let mut errors = FormErrors::default();

        let name = self.text(NAME);
        let name_len = name.chars().count();
        if name.is_empty() {
            errors.add(NAME, REQUIRED);
        } else if name_len > NAME_MAX_LEN {
            errors.add(NAME, format!("Ensure this value has at most {NAME_MAX_LEN} characters (it has {name_len})."));
        }

        let collaborators = match resolver.parse_and_validate(self.raw(COLLABORATORS)).await {
            Ok(accounts) => accounts,
            Err(e @ CollaboratorError::NotRegistered { .. }) => {
                errors.add(COLLABORATORS, e.to_string());
                Vec::new()
            }
            Err(CollaboratorError::Lookup(e)) => return Err(FormError::Lookup(e)),
        };

        if !errors.is_empty() {
            debug!(%errors, "service_form_invalid");
            return Err(FormError::Invalid(errors));
        }

        Ok(CleanedService {
            settings: Settings {
                name,
                link: self.text(LINK),
                respect_dnt: self.boolean(RESPECT_DNT),
                collect_ips: self.boolean(COLLECT_IPS),
                ignored_ips: self.text(IGNORED_IPS),
                ignore_robots: self.boolean(IGNORE_ROBOTS),
                hide_referrer_regex: self.text(HIDE_REFERRER_REGEX),
                origins: self.text(ORIGINS),
                script_inject: self.text(SCRIPT_INJECT),
            },
            collaborators,
        })
    }

    /// Initial value of one field when editing `record` (or creating, for `None`).
    pub fn initial_for_field(field: &str, record: Option<&ServiceRecord>) -> Option<String> {
        if field == COLLABORATORS {
            return Some(format_for_display(record.map(|r| r.collaborators.as_slice())));
        }
        let defaults = Settings::default();
        let s = record.map(|r| &r.settings).unwrap_or(&defaults);
        let value = match field {
            NAME => s.name.clone(),
            LINK => s.link.clone(),
            RESPECT_DNT => render_bool(s.respect_dnt),
            COLLECT_IPS => render_bool(s.collect_ips),
            IGNORED_IPS => s.ignored_ips.clone(),
            IGNORE_ROBOTS => render_bool(s.ignore_robots),
            HIDE_REFERRER_REGEX => s.hide_referrer_regex.clone(),
            ORIGINS => s.origins.clone(),
            SCRIPT_INJECT => s.script_inject.clone(),
            _ => return None,
        };
        Some(value)
    }

    /// Initial values for every field.
    pub fn initial(record: Option<&ServiceRecord>) -> FormData {
        SERVICE_FIELDS
            .iter()
            .filter_map(|f| Self::initial_for_field(f.name, record).map(|v| (f.name.to_string(), v)))
            .collect()
    }
}

/// Boolean coercion of submitted values: `false`/`0`/blank/absent are false.
pub fn parse_bool(raw: Option<&str>) -> bool {
    match raw.map(|v| v.trim().to_ascii_lowercase()) {
        None => false,
        Some(v) => !matches!(v.as_str(), "" | "false" | "0"),
    }
}

fn render_bool(v: bool) -> String {
    if v { "True".into() } else { "False".into() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::repository::mock::MockAccountDirectory;
    use chrono::Utc;
    use std::sync::Arc;
    use uuid::Uuid;

    fn data(pairs: &[(&str, &str)]) -> FormData {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn resolver(emails: &[&str]) -> CollaboratorResolver<MockAccountDirectory> {
        CollaboratorResolver::new(Arc::new(MockAccountDirectory::with_emails(emails)))
    }

    #[test]
    fn bool_coercion() {
        assert!(parse_bool(Some("True")));
        assert!(parse_bool(Some("on")));
        assert!(!parse_bool(Some("False")));
        assert!(!parse_bool(Some("FALSE")));
        assert!(!parse_bool(Some("0")));
        assert!(!parse_bool(Some(" ")));
        assert!(!parse_bool(None));
    }

    #[tokio::test]
    async fn valid_submission_is_cleaned() {
        let form = ServiceForm::bind(data(&[
            ("name", "  My Blog "),
            ("link", "https://blog.example.com"),
            ("respect_dnt", "True"),
            ("collect_ips", "False"),
            ("ignore_robots", "True"),
            ("origins", "*"),
            ("ignored_ips", "127.0.0.1/32"),
            ("collaborators", "Alice@Test.com, bob@test.com,"),
            ("script_inject", "  console.log(1);\n"),
        ]));
        let cleaned = form.validate(&resolver(&["alice@test.com", "bob@test.com"])).await.unwrap();

        assert_eq!(cleaned.settings.name, "My Blog");
        assert!(cleaned.settings.respect_dnt);
        assert!(!cleaned.settings.collect_ips);
        assert!(cleaned.settings.ignore_robots);
        assert_eq!(cleaned.settings.ignored_ips, "127.0.0.1/32");
        assert_eq!(cleaned.settings.hide_referrer_regex, "");
        assert_eq!(cleaned.settings.script_inject, "console.log(1);");
        let emails: Vec<_> = cleaned.collaborators.iter().map(|a| a.email.as_str()).collect();
        assert_eq!(emails, vec!["alice@test.com", "bob@test.com"]);
    }

    #[tokio::test]
    async fn collaborators_field_is_optional() {
        let form = ServiceForm::bind(data(&[("name", "Site")]));
        let cleaned = form.validate(&resolver(&[])).await.unwrap();
        assert!(cleaned.collaborators.is_empty());
        assert!(!cleaned.settings.respect_dnt);
    }

    #[tokio::test]
    async fn reports_all_field_errors_together() {
        let form = ServiceForm::bind(data(&[("name", "   "), ("collaborators", "ghost@test.com")]));
        let err = form.validate(&resolver(&[])).await.unwrap_err();
        let FormError::Invalid(errors) = err else { panic!("expected field errors") };
        assert_eq!(errors.get(NAME), [REQUIRED]);
        assert_eq!(errors.get(COLLABORATORS), ["Email 'ghost@test.com' is not registered"]);
    }

    #[tokio::test]
    async fn overlong_name_is_rejected() {
        let long = "n".repeat(NAME_MAX_LEN + 2);
        let form = ServiceForm::bind(data(&[("name", long.as_str())]));
        let FormError::Invalid(errors) = form.validate(&resolver(&[])).await.unwrap_err() else {
            panic!("expected field errors");
        };
        assert_eq!(errors.get(NAME), ["Ensure this value has at most 64 characters (it has 66)."]);
    }

    fn record(collaborators: Vec<Account>) -> ServiceRecord {
        let now = Utc::now().fixed_offset();
        ServiceRecord {
            id: Uuid::new_v4(),
            settings: Settings {
                name: "Shop".into(),
                link: "https://shop.example.com".into(),
                respect_dnt: false,
                collect_ips: true,
                ignore_robots: true,
                ..Default::default()
            },
            collaborators,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn initial_for_edit_renders_collaborators_and_flags() {
        let dir = MockAccountDirectory::default();
        let a = dir.register("a@x.com", "A");
        let b = dir.register("b@y.com", "B");
        let rec = record(vec![a, b]);

        let initial = ServiceForm::initial(Some(&rec));
        assert_eq!(initial["collaborators"], "a@x.com, b@y.com");
        assert_eq!(initial["name"], "Shop");
        assert_eq!(initial["respect_dnt"], "False");
        assert_eq!(initial["ignore_robots"], "True");
        assert_eq!(initial.len(), SERVICE_FIELDS.len());
    }

    #[test]
    fn initial_for_create_uses_defaults() {
        let initial = ServiceForm::initial(None);
        assert_eq!(initial["collaborators"], "");
        assert_eq!(initial["origins"], "*");
        assert_eq!(initial["respect_dnt"], "True");
        assert_eq!(initial["name"], "");
        assert_eq!(ServiceForm::initial_for_field("owner", None), None);
    }

    #[tokio::test]
    async fn initial_values_validate_back_to_the_same_record() {
        let dir = Arc::new(MockAccountDirectory::default());
        let a = dir.register("a@x.com", "A");
        let rec = record(vec![a]);
        let r = CollaboratorResolver::new(Arc::clone(&dir));

        let cleaned = ServiceForm::bind(ServiceForm::initial(Some(&rec))).validate(&r).await.unwrap();
        assert_eq!(cleaned.settings, rec.settings);
        assert_eq!(cleaned.collaborators, rec.collaborators);
    }
}
