use crate::db::Repository;
use crate::forms::{FieldErrors, MovieForm};
use crate::helpers::ViewError;
use crate::middleware::authentication::LoggedUser;
use crate::models;
use crate::routes::see_other;
use crate::views::Templates;
use actix_web::{get, post, web, HttpResponse};

#[tracing::instrument(name = "New movie form.", skip_all)]
#[get("/movies/new/")]
pub async fn add_form_handler(
    _user: LoggedUser,
    templates: web::Data<Templates>,
) -> Result<HttpResponse, ViewError> {
    super::render_form(&templates, &MovieForm::default(), &FieldErrors::new(), None)
}

#[tracing::instrument(name = "Add movie.", skip_all)]
#[post("/movies/new/")]
pub async fn add_handler(
    user: LoggedUser,
    form: web::Form<MovieForm>,
    repository: web::Data<dyn Repository>,
    templates: web::Data<Templates>,
) -> Result<HttpResponse, ViewError> {
    let form = form.into_inner();
    if let Err(errors) = form.check() {
        return super::render_form(&templates, &form, &errors, None);
    }

    let movie = repository.insert_movie(models::Movie::from(form)).await?;
    tracing::info!("Movie {} added by {}", movie.id, user.username);

    Ok(see_other(&movie.absolute_url()))
}
