use anyhow::Context;
use movie_review::configuration::{get_configuration, StorageBackend};
use movie_review::db::{InMemoryRepository, PgRepository, Repository};
use movie_review::startup::run;
use movie_review::telemetry::{get_subscriber, init_subscriber};
use sqlx::postgres::PgPoolOptions;
use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("movie-review".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber).map_err(|err| anyhow::anyhow!("Failed to set up tracing: {err}"))?;

    let settings = get_configuration().context("Failed to read configuration.")?;

    let repository: Arc<dyn Repository> = match settings.storage {
        StorageBackend::Postgres => {
            tracing::info!(
                db_host = %settings.database.host,
                db_port = settings.database.port,
                db_name = %settings.database.database_name,
                "Connecting to PostgreSQL"
            );
            let pg_pool = PgPoolOptions::new()
                .max_connections(settings.database.max_connections)
                .acquire_timeout(Duration::from_secs(30))
                .connect(&settings.database.connection_string())
                .await
                .context("Failed to connect to database.")?;
            sqlx::migrate!("./migrations")
                .run(&pg_pool)
                .await
                .context("Failed to run migrations.")?;

            Arc::new(PgRepository::new(pg_pool))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage, data is lost on shutdown");
            Arc::new(InMemoryRepository::new())
        }
    };

    let address = format!("{}:{}", settings.app_host, settings.app_port);
    tracing::info!("Start server at {:?}", &address);
    let listener =
        TcpListener::bind(&address).with_context(|| format!("failed to bind to {address}"))?;

    run(listener, repository, settings).await?.await?;
    Ok(())
}
