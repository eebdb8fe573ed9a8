use crate::db::RepositoryError;
use crate::models;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::Instrument;

const SELECT_REVIEW: &str = r#"
    SELECT
        r.id, r.kind, r.movie_id, r.review_text, r.rating, r.pub_date,
        r.reviewer_id, u.username AS reviewer, r.watch_for, r.discovery
    FROM review r
    JOIN users u ON u.id = r.reviewer_id
    WHERE TRUE"#;

/// Filter over the review table. Every result is ordered newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewQuery {
    pub id: Option<i32>,
    pub kind: Option<models::ReviewKind>,
    pub movie_id: Option<i32>,
    pub reviewer_id: Option<i32>,
    pub reviewer: Option<String>,
    /// Only reviews with `pub_date <= published_at`.
    pub published_at: Option<DateTime<Utc>>,
    /// Case-insensitive substring of the text or the kind's note.
    pub search: Option<String>,
    pub limit: Option<usize>,
}

impl ReviewQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }

    pub fn kind(mut self, kind: models::ReviewKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn movie(mut self, movie_id: i32) -> Self {
        self.movie_id = Some(movie_id);
        self
    }

    pub fn reviewer_id(mut self, reviewer_id: i32) -> Self {
        self.reviewer_id = Some(reviewer_id);
        self
    }

    pub fn reviewer(mut self, username: &str) -> Self {
        self.reviewer = Some(username.to_string());
        self
    }

    pub fn published_at(mut self, now: DateTime<Utc>) -> Self {
        self.published_at = Some(now);
        self
    }

    pub fn search(mut self, term: &str) -> Self {
        self.search = Some(term.to_string());
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Same predicate as the SQL built by [`fetch`], for in-process stores.
    pub fn matches(&self, review: &models::Review) -> bool {
        if self.id.is_some_and(|id| id != review.id) {
            return false;
        }
        if self.kind.is_some_and(|kind| kind != review.kind) {
            return false;
        }
        if self.movie_id.is_some_and(|id| id != review.movie_id) {
            return false;
        }
        if self.reviewer_id.is_some_and(|id| id != review.reviewer_id) {
            return false;
        }
        if let Some(username) = &self.reviewer {
            if username != &review.reviewer {
                return false;
            }
        }
        if let Some(now) = self.published_at {
            if !review.is_published(now) {
                return false;
            }
        }
        if let Some(term) = &self.search {
            let term = term.to_lowercase();
            let in_text = review.review_text.to_lowercase().contains(&term);
            let in_note = review
                .note()
                .is_some_and(|note| note.to_lowercase().contains(&term));
            if !in_text && !in_note {
                return false;
            }
        }

        true
    }
}

fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

pub async fn fetch(pool: &PgPool, query: &ReviewQuery) -> Result<Vec<models::Review>, RepositoryError> {
    let query_span = tracing::info_span!("Fetch reviews.", ?query);
    let mut builder = QueryBuilder::<Postgres>::new(SELECT_REVIEW);

    if let Some(id) = query.id {
        builder.push(" AND r.id = ").push_bind(id);
    }
    if let Some(kind) = query.kind {
        builder.push(" AND r.kind = ").push_bind(kind);
    }
    if let Some(movie_id) = query.movie_id {
        builder.push(" AND r.movie_id = ").push_bind(movie_id);
    }
    if let Some(reviewer_id) = query.reviewer_id {
        builder.push(" AND r.reviewer_id = ").push_bind(reviewer_id);
    }
    if let Some(username) = &query.reviewer {
        builder.push(" AND u.username = ").push_bind(username.clone());
    }
    if let Some(now) = query.published_at {
        builder.push(" AND r.pub_date <= ").push_bind(now);
    }
    if let Some(term) = &query.search {
        let pattern = like_pattern(term);
        builder
            .push(" AND (r.review_text ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR (r.kind = 'initial' AND r.watch_for ILIKE ")
            .push_bind(pattern.clone())
            .push(") OR (r.kind = 'rewatch' AND r.discovery ILIKE ")
            .push_bind(pattern)
            .push("))");
    }
    builder.push(" ORDER BY r.pub_date DESC, r.id DESC");
    if let Some(limit) = query.limit {
        builder.push(" LIMIT ").push_bind(limit as i64);
    }

    builder
        .build_query_as::<models::Review>()
        .fetch_all(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch reviews: {:?}", err);
            RepositoryError::from(err)
        })
}

/// Inserts the review and stamps its movie's `last_reviewed` in one transaction.
pub async fn insert(
    pool: &PgPool,
    mut review: models::Review,
    reviewed_at: DateTime<Utc>,
) -> Result<models::Review, RepositoryError> {
    let query_span = tracing::info_span!("Saving new review into the database");
    async move {
        let mut tx = pool.begin().await?;

        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO review (kind, movie_id, review_text, rating, pub_date, reviewer_id, watch_for, discovery)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(review.kind)
        .bind(review.movie_id)
        .bind(&review.review_text)
        .bind(review.rating)
        .bind(review.pub_date)
        .bind(review.reviewer_id)
        .bind(&review.watch_for)
        .bind(&review.discovery)
        .fetch_one(&mut *tx)
        .await?;

        let stamped = sqlx::query("UPDATE movie SET last_reviewed = $2 WHERE id = $1")
            .bind(review.movie_id)
            .bind(reviewed_at)
            .execute(&mut *tx)
            .await?;
        if stamped.rows_affected() == 0 {
            return Err(RepositoryError::NotFound("movie"));
        }

        tx.commit().await?;
        review.id = id;
        Ok(review)
    }
    .instrument(query_span)
    .await
    .map_err(|err: RepositoryError| {
        tracing::error!("Failed to insert review: {:?}", err);
        err
    })
}

pub async fn update(pool: &PgPool, review: models::Review) -> Result<models::Review, RepositoryError> {
    let query_span = tracing::info_span!("Updating review", id = review.id);
    sqlx::query(
        r#"
        UPDATE review
        SET
            review_text=$2,
            rating=$3,
            watch_for=$4,
            discovery=$5
        WHERE id = $1
        "#,
    )
    .bind(review.id)
    .bind(&review.review_text)
    .bind(review.rating)
    .bind(&review.watch_for)
    .bind(&review.discovery)
    .execute(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        RepositoryError::from(err)
    })
    .and_then(|result| match result.rows_affected() {
        0 => Err(RepositoryError::NotFound("review")),
        _ => Ok(review),
    })
}

#[tracing::instrument(name = "Delete review.", skip(pool))]
pub async fn delete(pool: &PgPool, kind: models::ReviewKind, id: i32) -> Result<bool, RepositoryError> {
    sqlx::query::<Postgres>("DELETE FROM review WHERE id = $1 AND kind = $2;")
        .bind(id)
        .bind(kind)
        .execute(pool)
        .await
        .map(|result| result.rows_affected() > 0)
        .map_err(|err| {
            tracing::error!("Failed to delete review: {:?}", err);
            RepositoryError::from(err)
        })
}
