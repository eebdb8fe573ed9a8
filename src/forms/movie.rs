use crate::forms::FieldErrors;
use crate::models;
use serde::{Deserialize, Serialize};
use serde_valid::Validate;

/// Fields arrive as posted. `year` stays text until [`MovieForm::check`]
/// parses it, so a blank or non-numeric year is a field error rather than a
/// rejected request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Validate)]
#[serde(default)]
pub struct MovieForm {
    #[validate(min_length = 1)]
    #[validate(max_length = 10)]
    pub imdb_id: String,
    #[validate(min_length = 1)]
    #[validate(max_length = 80)]
    pub title: String,
    pub plot: String,
    #[validate(min_length = 1)]
    #[validate(max_length = 10)]
    pub runtime: String,
    #[validate(min_length = 1)]
    #[validate(max_length = 10)]
    pub rated: String,
    pub year: String,
    #[validate(max_length = 100)]
    pub genre: String,
}

const YEARS: std::ops::RangeInclusive<i32> = 1888..=2100;

impl Default for MovieForm {
    fn default() -> Self {
        Self {
            imdb_id: String::new(),
            title: String::new(),
            plot: String::new(),
            runtime: String::new(),
            rated: String::new(),
            year: models::Movie::default().year.to_string(),
            genre: String::new(),
        }
    }
}

impl MovieForm {
    /// Surrounding whitespace is not part of any value.
    pub fn clean(mut self) -> Self {
        for field in [
            &mut self.imdb_id,
            &mut self.title,
            &mut self.plot,
            &mut self.runtime,
            &mut self.rated,
            &mut self.year,
            &mut self.genre,
        ] {
            *field = field.trim().to_string();
        }
        self
    }

    pub fn year(&self) -> Result<i32, String> {
        let year = parse_integer(&self.year)?;
        if year < *YEARS.start() {
            return Err(format!("Ensure this value is greater than or equal to {}.", YEARS.start()));
        }
        if year > *YEARS.end() {
            return Err(format!("Ensure this value is less than or equal to {}.", YEARS.end()));
        }
        Ok(year)
    }

    pub fn check(&self) -> Result<(), FieldErrors> {
        let cleaned = self.clone().clean();
        let mut errors = match cleaned.validate() {
            Ok(()) => FieldErrors::new(),
            Err(errors) => FieldErrors::from(errors),
        };
        if let Err(message) = cleaned.year() {
            errors.add("year", message);
        }

        errors.into_result()
    }

    /// Copies the editable fields onto a stored movie.
    pub fn update(self, movie: &mut models::Movie) {
        let form = self.clean();
        if let Ok(year) = form.year() {
            movie.year = year;
        }
        movie.imdb_id = form.imdb_id;
        movie.title = form.title;
        movie.plot = form.plot;
        movie.runtime = form.runtime;
        movie.rated = form.rated;
        movie.genre = form.genre;
    }
}

/// Whole number as typed into a number input.
pub(crate) fn parse_integer(value: &str) -> Result<i32, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err("This field is required.".to_string());
    }
    value
        .parse::<i32>()
        .map_err(|_| "Enter a whole number.".to_string())
}

impl From<MovieForm> for models::Movie {
    fn from(form: MovieForm) -> Self {
        let mut movie = models::Movie::default();
        form.update(&mut movie);
        movie
    }
}

impl From<&models::Movie> for MovieForm {
    fn from(movie: &models::Movie) -> Self {
        Self {
            imdb_id: movie.imdb_id.clone(),
            title: movie.title.clone(),
            plot: movie.plot.clone(),
            runtime: movie.runtime.clone(),
            rated: movie.rated.clone(),
            year: movie.year.to_string(),
            genre: movie.genre.clone(),
        }
    }
}
