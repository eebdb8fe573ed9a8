use crate::forms::{FieldErrors, MovieForm};
use crate::models;
use serde::Serialize;

#[derive(Debug, Serialize, Default, Clone, PartialEq)]
pub struct MovieItem {
    pub id: i32,
    pub display: String, // "Title - PG (2014)"
    pub imdb_id: String,
    pub title: String,
    pub plot: String,
    pub runtime: String,
    pub rated: String,
    pub year: i32,
    pub genre: String,
    pub last_reviewed: Option<String>,
    pub url: String,
}

impl From<&models::Movie> for MovieItem {
    fn from(movie: &models::Movie) -> Self {
        Self {
            id: movie.id,
            display: movie.to_string(),
            imdb_id: movie.imdb_id.clone(),
            title: movie.title.clone(),
            plot: movie.plot.clone(),
            runtime: movie.runtime.clone(),
            rated: movie.rated.clone(),
            year: movie.year,
            genre: movie.genre.clone(),
            last_reviewed: movie
                .last_reviewed
                .map(|at| at.format("%I:%M%p %d%b%Y").to_string()),
            url: movie.absolute_url(),
        }
    }
}

/// One input of the movie form with its current value and messages.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct MovieFormField {
    pub name: &'static str,
    pub label: &'static str,
    pub input: &'static str,
    pub value: String,
    pub errors: Vec<String>,
}

impl MovieFormField {
    pub fn all(form: &MovieForm, errors: &FieldErrors) -> Vec<Self> {
        let field = |name: &'static str, label: &'static str, input: &'static str, value: String| Self {
            name,
            label,
            input,
            value,
            errors: errors.get(name).to_vec(),
        };

        vec![
            field("title", "Title", "text", form.title.clone()),
            field("plot", "Plot", "text", form.plot.clone()),
            field("runtime", "Runtime", "text", form.runtime.clone()),
            field("rated", "Rated", "text", form.rated.clone()),
            field("year", "Year", "number", form.year.clone()),
            field("genre", "Genre", "text", form.genre.clone()),
            field("imdb_id", "IMDb id", "text", form.imdb_id.clone()),
        ]
    }
}
