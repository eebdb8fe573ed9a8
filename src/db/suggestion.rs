use crate::db::RepositoryError;
use crate::models;
use sqlx::PgPool;
use tracing::Instrument;

pub async fn insert(
    pool: &PgPool,
    mut suggestion: models::Suggestion,
) -> Result<models::Suggestion, RepositoryError> {
    let query_span = tracing::info_span!("Saving suggestion into the database");
    sqlx::query_as::<_, (i32,)>(
        r#"
        INSERT INTO suggestion (name, email, suggestion, created_at)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(&suggestion.name)
    .bind(&suggestion.email)
    .bind(&suggestion.suggestion)
    .bind(suggestion.created_at)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map(move |(id,)| {
        suggestion.id = id;
        suggestion
    })
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        RepositoryError::from(err)
    })
}
