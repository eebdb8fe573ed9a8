mod add;
mod delete;
mod get;
mod update;

pub use add::*;
pub use delete::*;
pub use get::*;
pub use update::*;

use crate::forms::{FieldErrors, MovieForm};
use crate::helpers::ViewError;
use crate::views::{MovieFormField, Templates};
use actix_web::HttpResponse;
use tera::Context;

/// Create form when `movie_id` is `None`, edit form otherwise.
pub(crate) fn render_form(
    templates: &Templates,
    form: &MovieForm,
    errors: &FieldErrors,
    movie_id: Option<i32>,
) -> Result<HttpResponse, ViewError> {
    let action = match movie_id {
        Some(id) => format!("/review/movie/{id}/edit/"),
        None => "/review/movies/new/".to_string(),
    };

    let mut context = Context::new();
    context.insert("fields", &MovieFormField::all(form, errors));
    context.insert("movie_id", &movie_id);
    context.insert("action", &action);
    templates.render("movie_form.html", &context)
}
