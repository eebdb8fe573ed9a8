use crate::db::RepositoryError;
use crate::models;
use sqlx::PgPool;
use tracing::Instrument;

pub async fn fetch_by_token_hash(
    pool: &PgPool,
    token_hash: &str,
) -> Result<Option<models::User>, RepositoryError> {
    let query_span = tracing::info_span!("Fetching the user by token");
    sqlx::query_as::<_, models::User>(r#"SELECT * FROM users WHERE token_hash = $1 LIMIT 1"#)
        .bind(token_hash)
        .fetch_optional(pool)
        .instrument(query_span)
        .await
        .map_err(|err| {
            tracing::error!("Failed to execute fetch query: {:?}", err);
            RepositoryError::from(err)
        })
}

pub async fn insert(pool: &PgPool, mut user: models::User) -> Result<models::User, RepositoryError> {
    let query_span = tracing::info_span!("Saving new user into the database", username = %user.username);
    sqlx::query_as::<_, (i32,)>(
        r#"
        INSERT INTO users (username, email, is_superuser, token_hash, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(&user.username)
    .bind(&user.email)
    .bind(user.is_superuser)
    .bind(&user.token_hash)
    .bind(user.created_at)
    .fetch_one(pool)
    .instrument(query_span)
    .await
    .map(move |(id,)| {
        user.id = id;
        user
    })
    .map_err(|err| {
        tracing::error!("Failed to execute query: {:?}", err);
        RepositoryError::from(err)
    })
}
