use crate::db::Repository;
use crate::helpers::ViewError;
use crate::middleware::authentication::LoggedUser;
use crate::models::ReviewKind;
use crate::routes::see_other;
use crate::services::ReviewFeed;
use crate::views::{ReviewItem, Templates};
use actix_web::{get, post, web, HttpResponse};
use chrono::Utc;
use tera::Context;

#[tracing::instrument(name = "Confirm review delete.", skip_all)]
#[get("/{kind:initial|rewatch}/{id:\\d+}/delete/")]
pub async fn delete_form_handler(
    user: LoggedUser,
    path: web::Path<(ReviewKind, i32)>,
    repository: web::Data<dyn Repository>,
    feed: web::Data<ReviewFeed>,
    templates: web::Data<Templates>,
) -> Result<HttpResponse, ViewError> {
    let (kind, id) = path.into_inner();
    let review = feed
        .scoped_review(&user, kind, id)
        .await?
        .ok_or(ViewError::NotFound)?;
    let movie = repository.fetch_movie(review.movie_id).await?;

    let mut context = Context::new();
    context.insert("review", &ReviewItem::new(&review, movie.as_ref(), Utc::now()));
    templates.render("review_confirm_delete.html", &context)
}

#[tracing::instrument(name = "Delete review.", skip_all)]
#[post("/{kind:initial|rewatch}/{id:\\d+}/delete/")]
pub async fn delete_handler(
    user: LoggedUser,
    path: web::Path<(ReviewKind, i32)>,
    repository: web::Data<dyn Repository>,
    feed: web::Data<ReviewFeed>,
) -> Result<HttpResponse, ViewError> {
    let (kind, id) = path.into_inner();
    let review = feed
        .scoped_review(&user, kind, id)
        .await?
        .ok_or(ViewError::NotFound)?;

    if !repository.delete_review(review.kind, review.id).await? {
        return Err(ViewError::NotFound);
    }
    tracing::info!("{} {} deleted by {}", review.kind.label(), review.id, user.username);

    Ok(see_other("/review/"))
}
