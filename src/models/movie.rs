use chrono::{DateTime, Utc};
use serde_derive::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Movie {
    pub id: i32,
    pub imdb_id: String, // e.g. tt2262227
    pub title: String,
    pub plot: String,
    pub runtime: String, // free text, "1h 35min"
    pub rated: String,   // certificate, "PG"
    pub year: i32,
    pub last_reviewed: Option<DateTime<Utc>>, // stamped when a review is added
    pub genre: String,
}

impl Default for Movie {
    fn default() -> Self {
        Self {
            id: 0,
            imdb_id: String::new(),
            title: String::new(),
            plot: String::new(),
            runtime: String::new(),
            rated: String::new(),
            year: 1900,
            last_reviewed: None,
            genre: String::new(),
        }
    }
}

impl Movie {
    pub fn absolute_url(&self) -> String {
        format!("/review/movie/{}/", self.id)
    }
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} ({})", self.title, self.rated, self.year)
    }
}
