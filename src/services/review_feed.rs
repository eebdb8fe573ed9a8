//! Review feed - the read side of reviews.
//!
//! Every listing here goes through the published filter (`pub_date <= now`)
//! and comes back newest first. `now` is passed in so callers pin one
//! instant per request.

use crate::db::{Repository, RepositoryError, ReviewQuery};
use crate::models::{Movie, Review, ReviewKind, User};
use chrono::{DateTime, Utc};
use std::cmp::Reverse;
use std::sync::Arc;

pub type Result<T> = std::result::Result<T, RepositoryError>;

#[derive(Clone)]
pub struct ReviewFeed {
    repository: Arc<dyn Repository>,
}

impl ReviewFeed {
    pub fn new(repository: Arc<dyn Repository>) -> Self {
        Self { repository }
    }

    /// Published reviews of one kind, newest first, at most `limit`.
    pub async fn published_reviews(
        &self,
        kind: ReviewKind,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<Review>> {
        let query = ReviewQuery::new().kind(kind).published_at(now).limit(limit);
        self.repository.fetch_reviews(&query).await
    }

    /// Each kind truncated to `per_kind` on its own, then merged newest first.
    pub async fn combined_feed(&self, now: DateTime<Utc>, per_kind: usize) -> Result<Vec<Review>> {
        let mut lists = Vec::with_capacity(ReviewKind::ALL.len());
        for kind in ReviewKind::ALL {
            lists.push(self.published_reviews(kind, now, per_kind).await?);
        }
        Ok(merge_newest_first(lists))
    }

    /// A single review, hidden until its publication date.
    pub async fn published_review(
        &self,
        kind: ReviewKind,
        id: i32,
        now: DateTime<Utc>,
    ) -> Result<Option<Review>> {
        let query = ReviewQuery::new().kind(kind).id(id).published_at(now).limit(1);
        Ok(self.repository.fetch_reviews(&query).await?.into_iter().next())
    }

    pub async fn movie_reviews(
        &self,
        movie_id: i32,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<Review>> {
        let query = ReviewQuery::new().movie(movie_id).published_at(now).limit(limit);
        self.repository.fetch_reviews(&query).await
    }

    pub async fn reviews_by_reviewer(&self, username: &str, now: DateTime<Utc>) -> Result<Vec<Review>> {
        let query = ReviewQuery::new().reviewer(username).published_at(now);
        self.repository.fetch_reviews(&query).await
    }

    /// Case-insensitive match on review text and the kind's note, across
    /// both kinds. A blank term finds nothing.
    pub async fn search(&self, term: Option<&str>, now: DateTime<Utc>) -> Result<Vec<Review>> {
        let term = match term.map(str::trim) {
            Some(term) if !term.is_empty() => term,
            _ => return Ok(Vec::new()),
        };

        let mut lists = Vec::with_capacity(ReviewKind::ALL.len());
        for kind in ReviewKind::ALL {
            let query = ReviewQuery::new().kind(kind).published_at(now).search(term);
            lists.push(self.repository.fetch_reviews(&query).await?);
        }
        Ok(merge_newest_first(lists))
    }

    pub async fn recently_reviewed_movies(&self, limit: usize) -> Result<Vec<Movie>> {
        self.repository.recently_reviewed_movies(limit).await
    }

    /// The review as `user` may manage it: superusers reach every review,
    /// everyone else only their own. Out-of-scope reviews come back `None`.
    pub async fn scoped_review(&self, user: &User, kind: ReviewKind, id: i32) -> Result<Option<Review>> {
        let mut query = ReviewQuery::new().kind(kind).id(id).limit(1);
        if !user.is_superuser {
            query = query.reviewer_id(user.id);
        }
        Ok(self.repository.fetch_reviews(&query).await?.into_iter().next())
    }
}

fn kind_rank(kind: ReviewKind) -> usize {
    ReviewKind::ALL
        .iter()
        .position(|k| *k == kind)
        .unwrap_or(ReviewKind::ALL.len())
}

/// Concatenates the lists and sorts by `pub_date` descending. Ties keep
/// initial before rewatch, then the newer id first.
pub fn merge_newest_first(lists: Vec<Vec<Review>>) -> Vec<Review> {
    let mut merged: Vec<Review> = lists.into_iter().flatten().collect();
    merged.sort_by_key(|review| (Reverse(review.pub_date), kind_rank(review.kind), Reverse(review.id)));
    merged
}
