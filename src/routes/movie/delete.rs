use crate::db::Repository;
use crate::helpers::ViewError;
use crate::middleware::authentication::LoggedUser;
use crate::models;
use crate::routes::see_other;
use crate::views::{MovieItem, Templates};
use actix_web::{get, post, web, HttpResponse};
use tera::Context;

/// Movies are only removable by superusers; for anyone else they do not exist.
async fn fetch_deletable(
    user: &models::User,
    id: i32,
    repository: &dyn Repository,
) -> Result<models::Movie, ViewError> {
    if !user.is_superuser {
        return Err(ViewError::NotFound);
    }
    repository.fetch_movie(id).await?.ok_or(ViewError::NotFound)
}

#[tracing::instrument(name = "Confirm movie delete.", skip_all)]
#[get("/movie/{id:\\d+}/delete/")]
pub async fn delete_form_handler(
    user: LoggedUser,
    path: web::Path<(i32,)>,
    repository: web::Data<dyn Repository>,
    templates: web::Data<Templates>,
) -> Result<HttpResponse, ViewError> {
    let movie = fetch_deletable(&user, path.0, repository.get_ref()).await?;

    let mut context = Context::new();
    context.insert("movie", &MovieItem::from(&movie));
    templates.render("movie_confirm_delete.html", &context)
}

#[tracing::instrument(name = "Delete movie.", skip_all)]
#[post("/movie/{id:\\d+}/delete/")]
pub async fn delete_handler(
    user: LoggedUser,
    path: web::Path<(i32,)>,
    repository: web::Data<dyn Repository>,
) -> Result<HttpResponse, ViewError> {
    let movie = fetch_deletable(&user, path.0, repository.get_ref()).await?;

    if !repository.delete_movie(movie.id).await? {
        return Err(ViewError::NotFound);
    }
    tracing::info!("Movie {} and its reviews deleted by {}", movie.id, user.username);

    Ok(see_other("/review/movies/"))
}
