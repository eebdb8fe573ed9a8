//! Persistence for movies, reviews, users and suggestions.
//!
//! Handlers only see the [`Repository`] trait. [`PgRepository`] forwards to
//! the per-table query modules; [`InMemoryRepository`] keeps everything in
//! process and backs the HTTP tests and the `memory` storage setting.

mod memory;
pub mod movie;
pub mod review;
pub mod suggestion;
pub mod user;

pub use memory::InMemoryRepository;
pub use review::ReviewQuery;

use crate::models;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait Repository: Send + Sync {
    async fn fetch_movie(&self, id: i32) -> Result<Option<models::Movie>, RepositoryError>;

    /// Movies ordered by `last_reviewed` descending, never-reviewed last.
    async fn recently_reviewed_movies(&self, limit: usize) -> Result<Vec<models::Movie>, RepositoryError>;

    async fn insert_movie(&self, movie: models::Movie) -> Result<models::Movie, RepositoryError>;

    async fn update_movie(&self, movie: models::Movie) -> Result<models::Movie, RepositoryError>;

    /// Deletes the movie and its reviews. `false` when nothing matched.
    async fn delete_movie(&self, id: i32) -> Result<bool, RepositoryError>;

    /// Reviews matching `query`, newest `pub_date` first.
    async fn fetch_reviews(&self, query: &ReviewQuery) -> Result<Vec<models::Review>, RepositoryError>;

    /// Stores a new review and stamps its movie's `last_reviewed` with `reviewed_at`.
    async fn insert_review(
        &self,
        review: models::Review,
        reviewed_at: DateTime<Utc>,
    ) -> Result<models::Review, RepositoryError>;

    /// Writes text, rating and notes of an existing review.
    async fn update_review(&self, review: models::Review) -> Result<models::Review, RepositoryError>;

    async fn delete_review(&self, kind: models::ReviewKind, id: i32) -> Result<bool, RepositoryError>;

    async fn fetch_user_by_token_hash(&self, token_hash: &str) -> Result<Option<models::User>, RepositoryError>;

    async fn insert_user(&self, user: models::User) -> Result<models::User, RepositoryError>;

    async fn insert_suggestion(
        &self,
        suggestion: models::Suggestion,
    ) -> Result<models::Suggestion, RepositoryError>;

    async fn fetch_review(
        &self,
        kind: models::ReviewKind,
        id: i32,
    ) -> Result<Option<models::Review>, RepositoryError> {
        let query = ReviewQuery::new().kind(kind).id(id).limit(1);
        Ok(self.fetch_reviews(&query).await?.into_iter().next())
    }
}

#[derive(Clone, Debug)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Repository for PgRepository {
    async fn fetch_movie(&self, id: i32) -> Result<Option<models::Movie>, RepositoryError> {
        movie::fetch(&self.pool, id).await
    }

    async fn recently_reviewed_movies(&self, limit: usize) -> Result<Vec<models::Movie>, RepositoryError> {
        movie::fetch_recently_reviewed(&self.pool, limit).await
    }

    async fn insert_movie(&self, movie: models::Movie) -> Result<models::Movie, RepositoryError> {
        movie::insert(&self.pool, movie).await
    }

    async fn update_movie(&self, movie: models::Movie) -> Result<models::Movie, RepositoryError> {
        movie::update(&self.pool, movie).await
    }

    async fn delete_movie(&self, id: i32) -> Result<bool, RepositoryError> {
        movie::delete(&self.pool, id).await
    }

    async fn fetch_reviews(&self, query: &ReviewQuery) -> Result<Vec<models::Review>, RepositoryError> {
        review::fetch(&self.pool, query).await
    }

    async fn insert_review(
        &self,
        review: models::Review,
        reviewed_at: DateTime<Utc>,
    ) -> Result<models::Review, RepositoryError> {
        review::insert(&self.pool, review, reviewed_at).await
    }

    async fn update_review(&self, review: models::Review) -> Result<models::Review, RepositoryError> {
        review::update(&self.pool, review).await
    }

    async fn delete_review(&self, kind: models::ReviewKind, id: i32) -> Result<bool, RepositoryError> {
        review::delete(&self.pool, kind, id).await
    }

    async fn fetch_user_by_token_hash(&self, token_hash: &str) -> Result<Option<models::User>, RepositoryError> {
        user::fetch_by_token_hash(&self.pool, token_hash).await
    }

    async fn insert_user(&self, user: models::User) -> Result<models::User, RepositoryError> {
        user::insert(&self.pool, user).await
    }

    async fn insert_suggestion(
        &self,
        suggestion: models::Suggestion,
    ) -> Result<models::Suggestion, RepositoryError> {
        suggestion::insert(&self.pool, suggestion).await
    }
}
