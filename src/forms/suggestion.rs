use crate::forms::FieldErrors;
use crate::models;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;

/// Site suggestion. `poohbear` is rendered as a hidden input; people leave
/// it empty, form-filling bots usually do not.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Validate)]
pub struct SuggestionForm {
    #[serde(default)]
    #[validate(min_length = 1)]
    #[validate(max_length = 100)]
    pub name: String,
    #[serde(default)]
    #[validate(pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$")]
    pub email: String,
    #[serde(default)]
    pub email_confirm: String,
    #[serde(default)]
    #[validate(min_length = 1)]
    #[validate(max_length = 2000)]
    pub suggestion: String,
    #[serde(default)]
    pub poohbear: String,
}

impl SuggestionForm {
    /// Surrounding whitespace is not part of any value.
    pub fn clean(mut self) -> Self {
        for field in [
            &mut self.name,
            &mut self.email,
            &mut self.email_confirm,
            &mut self.suggestion,
            &mut self.poohbear,
        ] {
            *field = field.trim().to_string();
        }
        self
    }

    pub fn check(&self) -> Result<(), FieldErrors> {
        let cleaned = self.clone().clean();
        let mut errors = match cleaned.validate() {
            Ok(()) => FieldErrors::new(),
            Err(errors) => FieldErrors::from(errors),
        };

        if cleaned.email != cleaned.email_confirm {
            errors.add("email_confirm", "Emails must match.");
        }
        if !cleaned.poohbear.is_empty() {
            errors.add("poohbear", "poohbear field should be left empty. Bad bot!");
        }

        errors.into_result()
    }
}

impl From<SuggestionForm> for models::Suggestion {
    fn from(form: SuggestionForm) -> Self {
        let form = form.clean();
        models::Suggestion {
            id: 0,
            name: form.name,
            email: form.email,
            suggestion: form.suggestion,
            created_at: Utc::now(),
        }
    }
}
