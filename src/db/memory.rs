use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::{Repository, RepositoryError, ReviewQuery};
use crate::models;

#[derive(Default)]
struct Tables {
    movies: BTreeMap<i32, models::Movie>,
    reviews: BTreeMap<i32, models::Review>,
    users: BTreeMap<i32, models::User>,
    suggestions: BTreeMap<i32, models::Suggestion>,
    last_id: i32,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.last_id += 1;
        self.last_id
    }

    fn username(&self, user_id: i32) -> String {
        self.users
            .get(&user_id)
            .map(|user| user.username.clone())
            .unwrap_or_default()
    }
}

/// Process-local store. Everything is lost on restart.
#[derive(Default)]
pub struct InMemoryRepository {
    tables: RwLock<Tables>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Suggestions received so far, oldest first.
    pub async fn suggestions(&self) -> Vec<models::Suggestion> {
        self.tables.read().await.suggestions.values().cloned().collect()
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn fetch_movie(&self, id: i32) -> Result<Option<models::Movie>, RepositoryError> {
        Ok(self.tables.read().await.movies.get(&id).cloned())
    }

    async fn recently_reviewed_movies(&self, limit: usize) -> Result<Vec<models::Movie>, RepositoryError> {
        let tables = self.tables.read().await;
        let mut movies: Vec<models::Movie> = tables.movies.values().cloned().collect();
        // None sorts below Some, so reversing puts never-reviewed movies last
        movies.sort_by(|a, b| (b.last_reviewed, b.id).cmp(&(a.last_reviewed, a.id)));
        movies.truncate(limit);
        Ok(movies)
    }

    async fn insert_movie(&self, mut movie: models::Movie) -> Result<models::Movie, RepositoryError> {
        let mut tables = self.tables.write().await;
        movie.id = tables.next_id();
        tables.movies.insert(movie.id, movie.clone());
        Ok(movie)
    }

    async fn update_movie(&self, movie: models::Movie) -> Result<models::Movie, RepositoryError> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .movies
            .get_mut(&movie.id)
            .ok_or(RepositoryError::NotFound("movie"))?;
        let last_reviewed = stored.last_reviewed;
        *stored = models::Movie {
            last_reviewed,
            ..movie
        };
        Ok(stored.clone())
    }

    async fn delete_movie(&self, id: i32) -> Result<bool, RepositoryError> {
        let mut tables = self.tables.write().await;
        if tables.movies.remove(&id).is_none() {
            return Ok(false);
        }
        tables.reviews.retain(|_, review| review.movie_id != id);
        Ok(true)
    }

    async fn fetch_reviews(&self, query: &ReviewQuery) -> Result<Vec<models::Review>, RepositoryError> {
        let tables = self.tables.read().await;
        let mut reviews: Vec<models::Review> = tables
            .reviews
            .values()
            .map(|review| models::Review {
                reviewer: tables.username(review.reviewer_id),
                ..review.clone()
            })
            .filter(|review| query.matches(review))
            .collect();
        reviews.sort_by(|a, b| (b.pub_date, b.id).cmp(&(a.pub_date, a.id)));
        if let Some(limit) = query.limit {
            reviews.truncate(limit);
        }
        Ok(reviews)
    }

    async fn insert_review(
        &self,
        mut review: models::Review,
        reviewed_at: DateTime<Utc>,
    ) -> Result<models::Review, RepositoryError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&review.reviewer_id) {
            return Err(RepositoryError::NotFound("user"));
        }
        let movie = tables
            .movies
            .get_mut(&review.movie_id)
            .ok_or(RepositoryError::NotFound("movie"))?;
        movie.last_reviewed = Some(reviewed_at);

        review.id = tables.next_id();
        review.reviewer = tables.username(review.reviewer_id);
        tables.reviews.insert(review.id, review.clone());
        Ok(review)
    }

    async fn update_review(&self, review: models::Review) -> Result<models::Review, RepositoryError> {
        let mut tables = self.tables.write().await;
        let stored = tables
            .reviews
            .get_mut(&review.id)
            .ok_or(RepositoryError::NotFound("review"))?;
        stored.review_text = review.review_text.clone();
        stored.rating = review.rating;
        stored.watch_for = review.watch_for.clone();
        stored.discovery = review.discovery.clone();
        Ok(review)
    }

    async fn delete_review(&self, kind: models::ReviewKind, id: i32) -> Result<bool, RepositoryError> {
        let mut tables = self.tables.write().await;
        match tables.reviews.get(&id) {
            Some(review) if review.kind == kind => Ok(tables.reviews.remove(&id).is_some()),
            _ => Ok(false),
        }
    }

    async fn fetch_user_by_token_hash(&self, token_hash: &str) -> Result<Option<models::User>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|user| user.token_hash == token_hash)
            .cloned())
    }

    async fn insert_user(&self, mut user: models::User) -> Result<models::User, RepositoryError> {
        let mut tables = self.tables.write().await;
        user.id = tables.next_id();
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn insert_suggestion(
        &self,
        mut suggestion: models::Suggestion,
    ) -> Result<models::Suggestion, RepositoryError> {
        let mut tables = self.tables.write().await;
        suggestion.id = tables.next_id();
        tables.suggestions.insert(suggestion.id, suggestion.clone());
        Ok(suggestion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    async fn seed(repo: &InMemoryRepository) -> (models::Movie, models::User) {
        let movie = repo
            .insert_movie(models::Movie {
                title: "The Book of Life".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        let user = repo
            .insert_user(models::User {
                username: "clark".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        (movie, user)
    }

    fn review_for(movie: &models::Movie, user: &models::User, pub_date: DateTime<Utc>) -> models::Review {
        models::Review {
            kind: models::ReviewKind::Initial,
            movie_id: movie.id,
            review_text: "Great".to_string(),
            pub_date,
            reviewer_id: user.id,
            watch_for: Some("Colours".to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn insert_review_stamps_movie() {
        let repo = InMemoryRepository::new();
        let (movie, user) = seed(&repo).await;
        let now = Utc::now();

        let review = repo.insert_review(review_for(&movie, &user, now), now).await.unwrap();

        assert_eq!(review.reviewer, "clark");
        let movie = repo.fetch_movie(movie.id).await.unwrap().unwrap();
        assert_eq!(movie.last_reviewed, Some(now));
    }

    #[tokio::test]
    async fn insert_review_for_missing_movie_fails() {
        let repo = InMemoryRepository::new();
        let (movie, user) = seed(&repo).await;
        let mut review = review_for(&movie, &user, Utc::now());
        review.movie_id = 999;

        let result = repo.insert_review(review, Utc::now()).await;

        assert!(matches!(result, Err(RepositoryError::NotFound("movie"))));
    }

    #[tokio::test]
    async fn deleting_movie_cascades_to_reviews() {
        let repo = InMemoryRepository::new();
        let (movie, user) = seed(&repo).await;
        let now = Utc::now();
        repo.insert_review(review_for(&movie, &user, now), now).await.unwrap();

        assert!(repo.delete_movie(movie.id).await.unwrap());

        let reviews = repo.fetch_reviews(&ReviewQuery::new()).await.unwrap();
        assert!(reviews.is_empty());
        assert!(!repo.delete_movie(movie.id).await.unwrap());
    }

    #[tokio::test]
    async fn fetch_reviews_orders_newest_first_and_limits() {
        let repo = InMemoryRepository::new();
        let (movie, user) = seed(&repo).await;
        let now = Utc::now();
        for days in [3, 1, 2] {
            repo.insert_review(review_for(&movie, &user, now - Duration::days(days)), now)
                .await
                .unwrap();
        }

        let reviews = repo
            .fetch_reviews(&ReviewQuery::new().limit(2))
            .await
            .unwrap();

        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].pub_date, now - Duration::days(1));
        assert_eq!(reviews[1].pub_date, now - Duration::days(2));
    }

    #[tokio::test]
    async fn delete_review_checks_kind() {
        let repo = InMemoryRepository::new();
        let (movie, user) = seed(&repo).await;
        let now = Utc::now();
        let review = repo.insert_review(review_for(&movie, &user, now), now).await.unwrap();

        assert!(!repo.delete_review(models::ReviewKind::Rewatch, review.id).await.unwrap());
        assert!(repo.delete_review(models::ReviewKind::Initial, review.id).await.unwrap());
    }

    #[tokio::test]
    async fn update_movie_keeps_last_reviewed() {
        let repo = InMemoryRepository::new();
        let (movie, user) = seed(&repo).await;
        let now = Utc::now();
        repo.insert_review(review_for(&movie, &user, now), now).await.unwrap();

        let updated = repo
            .update_movie(models::Movie {
                title: "Coco".to_string(),
                last_reviewed: None,
                ..movie
            })
            .await
            .unwrap();

        assert_eq!(updated.title, "Coco");
        assert_eq!(updated.last_reviewed, Some(now));
    }
}
