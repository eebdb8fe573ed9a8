use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Key for messages that belong to the form rather than one field.
pub const NON_FIELD: &str = "__all__";

/// Validation messages keyed by form field, rendered next to each input.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, field: &str) -> bool {
        !self.get(field).is_empty()
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Folds serde_valid output in. Its `Display` is JSON of the shape
    /// `{"errors": [..], "properties": {"field": {"errors": [..]}}}`.
    pub fn extend_from_validation(&mut self, errors: serde_valid::validation::Errors) {
        let value: Value = match serde_json::from_str(&errors.to_string()) {
            Ok(value) => value,
            Err(_) => {
                self.add(NON_FIELD, errors.to_string());
                return;
            }
        };

        for message in messages(value.get("errors")) {
            self.add(NON_FIELD, message);
        }
        if let Some(properties) = value.get("properties").and_then(Value::as_object) {
            for (field, nested) in properties {
                for message in messages(nested.get("errors")) {
                    self.add(field, message);
                }
            }
        }
    }
}

fn messages(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect()
        })
        .unwrap_or_default()
}

impl From<serde_valid::validation::Errors> for FieldErrors {
    fn from(errors: serde_valid::validation::Errors) -> Self {
        let mut field_errors = FieldErrors::new();
        field_errors.extend_from_validation(errors);
        field_errors
    }
}
