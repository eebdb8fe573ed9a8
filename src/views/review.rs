use crate::models;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize, Default, Clone, PartialEq)]
pub struct ReviewItem {
    pub id: i32,
    pub kind: models::ReviewKind,
    pub kind_label: &'static str,
    pub movie_id: i32,
    pub movie_title: String,
    pub review_text: String,
    pub rating: i32,
    pub pub_date: String,
    pub reviewer: String,
    pub note: String,
    pub note_label: &'static str,
    pub url: String,
    pub recent: bool, // published within the last day
}

impl ReviewItem {
    pub fn new(review: &models::Review, movie: Option<&models::Movie>, now: DateTime<Utc>) -> Self {
        Self {
            id: review.id,
            kind: review.kind,
            kind_label: review.kind.label(),
            movie_id: review.movie_id,
            movie_title: movie.map(ToString::to_string).unwrap_or_default(),
            review_text: review.review_text.clone(),
            rating: review.rating,
            pub_date: review.pub_date.format("%I:%M%p %d%b%Y").to_string(),
            reviewer: review.reviewer.clone(),
            note: review.note().unwrap_or_default().to_string(),
            note_label: review.kind.note_label(),
            url: review.absolute_url(),
            recent: review.was_published_recently(now),
        }
    }
}
