use crate::forms::movie::parse_integer;
use crate::forms::FieldErrors;
use crate::models;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;

/// One form for both review kinds. Only the note field of the kind being
/// written is read; the other one is ignored. `rating` stays text until
/// [`ReviewForm::check`] parses it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Validate)]
#[serde(default)]
pub struct ReviewForm {
    #[validate(min_length = 1)]
    #[validate(max_length = 200)]
    pub review_text: String,
    pub rating: String,
    #[validate(max_length = 200)]
    pub watch_for: Option<String>, // initial
    #[validate(max_length = 200)]
    pub discovery: Option<String>, // rewatch
}

const RATINGS: std::ops::RangeInclusive<i32> = 0..=10;

impl Default for ReviewForm {
    fn default() -> Self {
        Self {
            review_text: String::new(),
            rating: models::Review::default().rating.to_string(),
            watch_for: None,
            discovery: None,
        }
    }
}

impl ReviewForm {
    /// Surrounding whitespace is not part of any value.
    pub fn clean(mut self) -> Self {
        self.review_text = self.review_text.trim().to_string();
        self.rating = self.rating.trim().to_string();
        for note in [&mut self.watch_for, &mut self.discovery] {
            if let Some(value) = note.as_mut() {
                *value = value.trim().to_string();
            }
        }
        self
    }

    pub fn note(&self, kind: models::ReviewKind) -> &str {
        let note = match kind {
            models::ReviewKind::Initial => &self.watch_for,
            models::ReviewKind::Rewatch => &self.discovery,
        };
        note.as_deref().unwrap_or("")
    }

    pub fn rating(&self) -> Result<i32, String> {
        let rating = parse_integer(&self.rating)?;
        if rating < *RATINGS.start() {
            return Err(format!("Ensure this value is greater than or equal to {}.", RATINGS.start()));
        }
        if rating > *RATINGS.end() {
            return Err(format!("Ensure this value is less than or equal to {}.", RATINGS.end()));
        }
        Ok(rating)
    }

    pub fn check(&self, kind: models::ReviewKind) -> Result<(), FieldErrors> {
        let cleaned = self.clone().clean();
        let mut errors = match cleaned.validate() {
            Ok(()) => FieldErrors::new(),
            Err(errors) => FieldErrors::from(errors),
        };
        if let Err(message) = cleaned.rating() {
            errors.add("rating", message);
        }
        if cleaned.note(kind).is_empty() && !errors.contains(kind.note_field()) {
            errors.add(kind.note_field(), "This field is required.");
        }

        errors.into_result()
    }

    /// A fresh review of `kind`; the caller stamps movie, reviewer and `pub_date`.
    pub fn into_review(self, kind: models::ReviewKind) -> models::Review {
        let mut review = models::Review {
            kind,
            ..Default::default()
        };
        self.update(&mut review);
        review
    }

    pub fn update(self, review: &mut models::Review) {
        let form = self.clean();
        if let Ok(rating) = form.rating() {
            review.rating = rating;
        }
        let note = form.note(review.kind).to_string();
        review.review_text = form.review_text;
        review.set_note(note);
    }
}

impl From<&models::Review> for ReviewForm {
    fn from(review: &models::Review) -> Self {
        Self {
            review_text: review.review_text.clone(),
            rating: review.rating.to_string(),
            watch_for: review.watch_for.clone(),
            discovery: review.discovery.clone(),
        }
    }
}
