use crate::configuration::Settings;
use crate::db::Repository;
use crate::helpers::ViewError;
use crate::routes::review::review_items;
use crate::services::ReviewFeed;
use crate::views::{MovieItem, Templates};
use actix_web::{get, web, HttpResponse};
use chrono::Utc;
use tera::Context;

#[tracing::instrument(name = "List recently reviewed movies.", skip_all)]
#[get("/movies/")]
pub async fn list_handler(
    feed: web::Data<ReviewFeed>,
    settings: web::Data<Settings>,
    templates: web::Data<Templates>,
) -> Result<HttpResponse, ViewError> {
    let movies = feed
        .recently_reviewed_movies(settings.pagination.feed_size)
        .await?
        .iter()
        .map(MovieItem::from)
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("latest_movie_list", &movies);
    templates.render("movie_list.html", &context)
}

#[tracing::instrument(name = "Get movie.", skip_all)]
#[get("/movie/{id:\\d+}/")]
pub async fn item_handler(
    path: web::Path<(i32,)>,
    repository: web::Data<dyn Repository>,
    feed: web::Data<ReviewFeed>,
    settings: web::Data<Settings>,
    templates: web::Data<Templates>,
) -> Result<HttpResponse, ViewError> {
    let id = path.0;
    let movie = repository.fetch_movie(id).await?.ok_or(ViewError::NotFound)?;

    let now = Utc::now();
    let reviews = feed
        .movie_reviews(movie.id, now, settings.pagination.movie_review_size)
        .await?;

    let mut context = Context::new();
    context.insert("movie", &MovieItem::from(&movie));
    context.insert(
        "reviews",
        &review_items(repository.get_ref(), &reviews, now).await?,
    );
    templates.render("movie_detail.html", &context)
}
