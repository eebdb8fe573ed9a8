use crate::configuration::Settings;
use crate::db::Repository;
use crate::helpers::ViewError;
use crate::models::ReviewKind;
use crate::services::ReviewFeed;
use crate::views::{ReviewItem, Templates};
use actix_web::{get, web, HttpResponse};
use chrono::Utc;
use serde::Deserialize;
use tera::Context;

use super::review_items;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[tracing::instrument(name = "Combined review feed.", skip_all)]
#[get("/")]
pub async fn feed_handler(
    repository: web::Data<dyn Repository>,
    feed: web::Data<ReviewFeed>,
    settings: web::Data<Settings>,
    templates: web::Data<Templates>,
) -> Result<HttpResponse, ViewError> {
    let now = Utc::now();
    let reviews = feed.combined_feed(now, settings.pagination.feed_size).await?;

    let mut context = Context::new();
    context.insert("heading", "Latest Reviews");
    context.insert(
        "latest_review_list",
        &review_items(repository.get_ref(), &reviews, now).await?,
    );
    templates.render("review_list.html", &context)
}

#[tracing::instrument(name = "Search reviews.", skip_all)]
#[get("/search/")]
pub async fn search_handler(
    query: web::Query<SearchQuery>,
    repository: web::Data<dyn Repository>,
    feed: web::Data<ReviewFeed>,
    templates: web::Data<Templates>,
) -> Result<HttpResponse, ViewError> {
    let now = Utc::now();
    let term = query.q.as_deref().unwrap_or("").trim();
    let reviews = feed.search(Some(term), now).await?;
    tracing::debug!("Search {:?} matched {} reviews", term, reviews.len());

    let mut context = Context::new();
    context.insert("heading", &format!("Results for \"{term}\""));
    context.insert("query", term);
    context.insert(
        "latest_review_list",
        &review_items(repository.get_ref(), &reviews, now).await?,
    );
    templates.render("review_list.html", &context)
}

#[tracing::instrument(name = "Reviews by reviewer.", skip_all)]
#[get("/by/{username}/")]
pub async fn by_reviewer_handler(
    path: web::Path<(String,)>,
    repository: web::Data<dyn Repository>,
    feed: web::Data<ReviewFeed>,
    templates: web::Data<Templates>,
) -> Result<HttpResponse, ViewError> {
    let username = path.into_inner().0;
    let now = Utc::now();
    let reviews = feed.reviews_by_reviewer(&username, now).await?;

    let mut context = Context::new();
    context.insert("heading", &format!("Reviews by {username}"));
    context.insert(
        "latest_review_list",
        &review_items(repository.get_ref(), &reviews, now).await?,
    );
    templates.render("review_list.html", &context)
}

#[tracing::instrument(name = "Get review.", skip_all)]
#[get("/{kind:initial|rewatch}/{id:\\d+}/")]
pub async fn item_handler(
    path: web::Path<(ReviewKind, i32)>,
    repository: web::Data<dyn Repository>,
    feed: web::Data<ReviewFeed>,
    templates: web::Data<Templates>,
) -> Result<HttpResponse, ViewError> {
    let (kind, id) = path.into_inner();
    let now = Utc::now();
    let review = feed
        .published_review(kind, id, now)
        .await?
        .ok_or(ViewError::NotFound)?;
    let movie = repository.fetch_movie(review.movie_id).await?;

    let mut context = Context::new();
    context.insert("review", &ReviewItem::new(&review, movie.as_ref(), now));
    templates.render("review_detail.html", &context)
}
