mod delete;
mod get;
mod upsert;

pub use delete::*;
pub use get::*;
pub use upsert::*;

use crate::db::Repository;
use crate::helpers::ViewError;
use crate::models;
use crate::views::ReviewItem;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Display items for `reviews`, each movie fetched once.
pub(crate) async fn review_items(
    repository: &dyn Repository,
    reviews: &[models::Review],
    now: DateTime<Utc>,
) -> Result<Vec<ReviewItem>, ViewError> {
    let mut movies: HashMap<i32, models::Movie> = HashMap::new();
    for review in reviews {
        if movies.contains_key(&review.movie_id) {
            continue;
        }
        if let Some(movie) = repository.fetch_movie(review.movie_id).await? {
            movies.insert(movie.id, movie);
        }
    }

    Ok(reviews
        .iter()
        .map(|review| ReviewItem::new(review, movies.get(&review.movie_id), now))
        .collect())
}
