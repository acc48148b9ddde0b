use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};
use service::service_form::{FieldDef, FormData, FormErrors, ServiceForm};
use service::store::ServiceRecord;
use tracing::info;
use uuid::Uuid;

use crate::{errors::ApiError, state::AppState};

/// Field metadata plus the values a client should prefill.
#[derive(Debug, Serialize)]
pub struct FormView {
    pub fields: &'static [FieldDef],
    pub initial: FormData,
}

pub const NOT_A_SCALAR: &str = "Enter a single text, number or boolean value.";

/// Flatten a JSON object into raw form values.
///
/// Booleans become `True`/`False`, numbers their decimal text; `null` drops the key.
/// Arrays and objects are rejected as field errors.
pub fn form_data_from_json(body: Map<String, Value>) -> Result<FormData, ApiError> {
    let mut data = FormData::new();
    let mut errors = FormErrors::default();
    for (key, value) in body {
        let raw = match value {
            Value::Null => continue,
            Value::String(s) => s,
            Value::Bool(true) => "True".to_string(),
            Value::Bool(false) => "False".to_string(),
            Value::Number(n) => n.to_string(),
            Value::Array(_) | Value::Object(_) => {
                errors.add(&key, NOT_A_SCALAR);
                continue;
            }
        };
        data.insert(key, raw);
    }
    if !errors.is_empty() {
        return Err(ApiError::Invalid(errors));
    }
    Ok(data)
}

pub async fn blank_form(State(state): State<AppState>) -> Json<FormView> {
    Json(FormView { fields: ServiceForm::fields(), initial: state.forms.blank_form() })
}

pub async fn edit_form(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<FormView>, ApiError> {
    let initial = state
        .forms
        .edit_form(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("service {} not found", id)))?;
    Ok(Json(FormView { fields: ServiceForm::fields(), initial }))
}

pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Map<String, Value>>,
) -> Result<(StatusCode, Json<ServiceRecord>), ApiError> {
    let record = state.forms.create(form_data_from_json(body)?).await?;
    info!(id = %record.id, collaborators = record.collaborators.len(), "created service");
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<Map<String, Value>>,
) -> Result<Json<ServiceRecord>, ApiError> {
    let record = state.forms.update(id, form_data_from_json(body)?).await?;
    info!(id = %record.id, collaborators = record.collaborators.len(), "updated service");
    Ok(Json(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_body_flattens_to_form_values() {
        let Value::Object(body) = json!({
            "name": "Blog",
            "respect_dnt": false,
            "collect_ips": true,
            "link": null,
            "origins": 42,
        }) else {
            unreachable!()
        };
        let data = form_data_from_json(body).unwrap();
        assert_eq!(data["name"], "Blog");
        assert_eq!(data["respect_dnt"], "False");
        assert_eq!(data["collect_ips"], "True");
        assert_eq!(data["origins"], "42");
        assert!(!data.contains_key("link"));
    }

    #[test]
    fn arrays_and_objects_are_field_errors() {
        let Value::Object(body) = json!({
            "name": "Blog",
            "collaborators": ["a@x.com"],
            "origins": {"host": "*"},
        }) else {
            unreachable!()
        };
        let Err(ApiError::Invalid(errors)) = form_data_from_json(body) else {
            panic!("expected field errors");
        };
        assert_eq!(errors.get("collaborators"), [NOT_A_SCALAR]);
        assert_eq!(errors.get("origins"), [NOT_A_SCALAR]);
        assert!(errors.get("name").is_empty());
    }
}
