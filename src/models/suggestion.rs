use chrono::{DateTime, Utc};
use serde_derive::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, sqlx::FromRow)]
pub struct Suggestion {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub suggestion: String,
    pub created_at: DateTime<Utc>,
}
