use crate::db::Repository;
use crate::forms::{FieldErrors, MovieForm};
use crate::helpers::ViewError;
use crate::middleware::authentication::LoggedUser;
use crate::routes::see_other;
use crate::views::Templates;
use actix_web::{get, post, web, HttpResponse};

#[tracing::instrument(name = "Edit movie form.", skip_all)]
#[get("/movie/{id:\\d+}/edit/")]
pub async fn update_form_handler(
    _user: LoggedUser,
    path: web::Path<(i32,)>,
    repository: web::Data<dyn Repository>,
    templates: web::Data<Templates>,
) -> Result<HttpResponse, ViewError> {
    let movie = repository.fetch_movie(path.0).await?.ok_or(ViewError::NotFound)?;

    super::render_form(
        &templates,
        &MovieForm::from(&movie),
        &FieldErrors::new(),
        Some(movie.id),
    )
}

#[tracing::instrument(name = "Update movie.", skip_all)]
#[post("/movie/{id:\\d+}/edit/")]
pub async fn update_handler(
    user: LoggedUser,
    path: web::Path<(i32,)>,
    form: web::Form<MovieForm>,
    repository: web::Data<dyn Repository>,
    templates: web::Data<Templates>,
) -> Result<HttpResponse, ViewError> {
    let mut movie = repository.fetch_movie(path.0).await?.ok_or(ViewError::NotFound)?;

    let form = form.into_inner();
    if let Err(errors) = form.check() {
        return super::render_form(&templates, &form, &errors, Some(movie.id));
    }

    form.update(&mut movie);
    let movie = repository.update_movie(movie).await?;
    tracing::info!("Movie {} updated by {}", movie.id, user.username);

    Ok(see_other(&movie.absolute_url()))
}
