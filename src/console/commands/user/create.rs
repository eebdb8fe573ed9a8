use crate::configuration::get_configuration;
use crate::db::{PgRepository, Repository, RepositoryError};
use crate::helpers::token::make_token;
use crate::models;
use actix_web::rt;
use chrono::Utc;
use sqlx::PgPool;

const TOKEN_LENGTH: usize = 40;

pub struct CreateCommand {
    username: String,
    email: String,
    superuser: bool,
}

impl CreateCommand {
    pub fn new(username: String, email: String, superuser: bool) -> Self {
        Self {
            username,
            email,
            superuser,
        }
    }

    /// Stores the account and returns it with its plain token, which is not
    /// recoverable afterwards.
    pub async fn create(
        &self,
        repository: &dyn Repository,
    ) -> Result<(models::User, String), RepositoryError> {
        let token = make_token(TOKEN_LENGTH);
        let user = models::User {
            id: 0,
            username: self.username.clone(),
            email: self.email.clone(),
            is_superuser: self.superuser,
            token_hash: models::user::hash_token(&token),
            created_at: Utc::now(),
        };

        let user = repository.insert_user(user).await?;
        Ok((user, token))
    }
}

impl crate::console::commands::CallableTrait for CreateCommand {
    fn call(&self) -> Result<(), Box<dyn std::error::Error>> {
        rt::System::new().block_on(async {
            let settings = get_configuration()?;
            let db_pool = PgPool::connect(&settings.database.connection_string()).await?;
            let repository = PgRepository::new(db_pool);

            let (user, token) = self.create(&repository).await?;
            println!("Created user {} (id {})", user.username, user.id);
            println!("API token: {token}");

            Ok::<(), Box<dyn std::error::Error>>(())
        })
    }
}
