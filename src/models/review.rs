use crate::models::{Movie, ReviewKind};
use chrono::{DateTime, Duration, Utc};
use serde_derive::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, sqlx::FromRow)]
pub struct Review {
    pub id: i32,
    pub kind: ReviewKind,
    pub movie_id: i32,
    pub review_text: String,
    pub rating: i32,
    pub pub_date: DateTime<Utc>,
    pub reviewer_id: i32,
    #[sqlx(default)]
    pub reviewer: String, // username, joined from users
    pub watch_for: Option<String>, // initial reviews only
    pub discovery: Option<String>, // rewatch reviews only
}

impl Review {
    /// A review is visible once its publication time is reached.
    pub fn is_published(&self, now: DateTime<Utc>) -> bool {
        self.pub_date <= now
    }

    pub fn was_published_recently(&self, now: DateTime<Utc>) -> bool {
        now - Duration::days(1) <= self.pub_date && self.pub_date <= now
    }

    /// The kind-specific note.
    pub fn note(&self) -> Option<&str> {
        match self.kind {
            ReviewKind::Initial => self.watch_for.as_deref(),
            ReviewKind::Rewatch => self.discovery.as_deref(),
        }
    }

    pub fn set_note(&mut self, note: String) {
        match self.kind {
            ReviewKind::Initial => {
                self.watch_for = Some(note);
                self.discovery = None;
            }
            ReviewKind::Rewatch => {
                self.discovery = Some(note);
                self.watch_for = None;
            }
        }
    }

    pub fn absolute_url(&self) -> String {
        format!("/review/{}/{}/", self.kind, self.id)
    }

    pub fn describe(&self, movie: &Movie) -> String {
        format!(
            "{}: {} - {}",
            movie,
            self.review_text,
            self.pub_date.format("%I:%M%p %d%b%Y")
        )
    }
}
