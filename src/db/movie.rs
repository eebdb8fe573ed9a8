use crate::db::RepositoryError;
use crate::models;
use sqlx::{PgPool, Postgres};
use tracing::Instrument;

pub async fn fetch(pool: &PgPool, id: i32) -> Result<Option<models::Movie>, RepositoryError> {
    tracing::info!("Fetch movie {}", id);
    sqlx::query_as::<_, models::Movie>(r#"SELECT * FROM movie WHERE id=$1 LIMIT 1"#)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|err| {
            tracing::error!("Failed to fetch movie, error: {:?}", err);
            RepositoryError::from(err)
        })
}

/// Most recently reviewed first; movies never reviewed sort last.
pub async fn fetch_recently_reviewed(
    pool: &PgPool,
    limit: usize,
) -> Result<Vec<models::Movie>, RepositoryError> {
    let query_span = tracing::info_span!("Fetch recently reviewed movies.");
    sqlx::query_as::<_, models::Movie>(
        r#"
        SELECT
            *
        FROM movie
        ORDER BY last_reviewed DESC NULLS LAST, id DESC
        LIMIT $1
        "#,
    )
    .bind(limit as i64)
    .fetch_all(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to fetch movies, error: {:?}", err);
        RepositoryError::from(err)
    })
}

pub async fn insert(pool: &PgPool, mut movie: models::Movie) -> Result<models::Movie, RepositoryError> {
    let query_span = tracing::info_span!("Saving new movie into the database");
    sqlx::query_as::<_, (i32,)>(
        r#"
        INSERT INTO movie (
        imdb_id,
        title,
        plot,
        runtime,
        rated,
        year,
        last_reviewed,
        genre
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id;
        "#,
    )
    .bind(&movie.imdb_id)
    .bind(&movie.title)
    .bind(&movie.plot)
    .bind(&movie.runtime)
    .bind(&movie.rated)
    .bind(movie.year)
    .bind(movie.last_reviewed)
    .bind(&movie.genre)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map(move |(id,)| {
        movie.id = id;
        movie
    })
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        RepositoryError::from(err)
    })
}

/// Writes the editable fields. `last_reviewed` is owned by review creation.
pub async fn update(pool: &PgPool, movie: models::Movie) -> Result<models::Movie, RepositoryError> {
    let query_span = tracing::info_span!("Updating movie", id = movie.id);
    sqlx::query_as::<_, models::Movie>(
        r#"
        UPDATE movie
        SET
            imdb_id=$2,
            title=$3,
            plot=$4,
            runtime=$5,
            rated=$6,
            year=$7,
            genre=$8
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(movie.id)
    .bind(&movie.imdb_id)
    .bind(&movie.title)
    .bind(&movie.plot)
    .bind(&movie.runtime)
    .bind(&movie.rated)
    .bind(movie.year)
    .bind(&movie.genre)
    .fetch_optional(pool)
    .instrument(query_span)
    .await
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        RepositoryError::from(err)
    })?
    .ok_or(RepositoryError::NotFound("movie"))
}

/// Reviews of the movie go with it (ON DELETE CASCADE).
#[tracing::instrument(name = "Delete movie.", skip(pool))]
pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, RepositoryError> {
    sqlx::query::<Postgres>("DELETE FROM movie WHERE id = $1;")
        .bind(id)
        .execute(pool)
        .await
        .map(|result| result.rows_affected() > 0)
        .map_err(|err| {
            tracing::error!("Failed to delete movie: {:?}", err);
            RepositoryError::from(err)
        })
}
