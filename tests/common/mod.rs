#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use movie_review::configuration::Settings;
use movie_review::db::{InMemoryRepository, Repository};
use movie_review::models::{self, ReviewKind};
use std::sync::Arc;

pub const CLARK_TOKEN: &str = "clark-secret-token";
pub const LOIS_TOKEN: &str = "lois-secret-token";
pub const BRUCE_TOKEN: &str = "bruce-secret-token";

pub struct TestApp {
    pub address: String,
    pub repository: Arc<InMemoryRepository>,
    pub client: reqwest::Client,
    pub clark: models::User, // regular reviewer
    pub bruce: models::User, // regular reviewer
    pub lois: models::User,  // superuser
}

pub async fn spawn_app() -> TestApp {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let repository = Arc::new(InMemoryRepository::new());
    let clark = add_user(&repository, "clark", CLARK_TOKEN, false).await;
    let bruce = add_user(&repository, "bruce", BRUCE_TOKEN, false).await;
    let lois = add_user(&repository, "lois", LOIS_TOKEN, true).await;

    let server = movie_review::startup::run(listener, repository.clone(), Settings::in_memory())
        .await
        .expect("Failed to bind address.");
    let _ = tokio::spawn(server);

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        address,
        repository,
        client,
        clark,
        bruce,
        lois,
    }
}

async fn add_user(repository: &InMemoryRepository, username: &str, token: &str, is_superuser: bool) -> models::User {
    repository
        .insert_user(models::User {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            is_superuser,
            token_hash: models::user::hash_token(token),
            created_at: Utc::now(),
            ..Default::default()
        })
        .await
        .unwrap()
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> reqwest::Response {
        let mut request = self.client.get(self.url(path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to execute request.")
    }

    pub async fn post_form(&self, path: &str, token: Option<&str>, form: &[(&str, &str)]) -> reqwest::Response {
        let mut request = self.client.post(self.url(path)).form(form);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        request.send().await.expect("Failed to execute request.")
    }

    pub async fn add_movie(&self, title: &str) -> models::Movie {
        self.repository
            .insert_movie(models::Movie {
                imdb_id: "tt2262227".to_string(),
                title: title.to_string(),
                runtime: "1h 35min".to_string(),
                rated: "PG".to_string(),
                year: 2014,
                ..Default::default()
            })
            .await
            .unwrap()
    }

    /// Stores a review published `days` from now (negative for the past).
    pub async fn add_review(
        &self,
        movie: &models::Movie,
        kind: ReviewKind,
        text: &str,
        days: i64,
        reviewer: &models::User,
    ) -> models::Review {
        let now = Utc::now();
        let mut review = models::Review {
            kind,
            movie_id: movie.id,
            review_text: text.to_string(),
            rating: 7,
            pub_date: now + Duration::days(days),
            reviewer_id: reviewer.id,
            ..Default::default()
        };
        review.set_note(format!("{text} note"));
        self.repository.insert_review(review, now).await.unwrap()
    }

    pub async fn movie(&self, id: i32) -> Option<models::Movie> {
        self.repository.fetch_movie(id).await.unwrap()
    }

    pub async fn review(&self, kind: ReviewKind, id: i32) -> Option<models::Review> {
        self.repository.fetch_review(kind, id).await.unwrap()
    }
}

pub fn location(response: &reqwest::Response) -> String {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .expect("no Location header")
        .to_str()
        .unwrap()
        .to_string()
}

pub fn recent(at: Option<DateTime<Utc>>, within: Duration) -> bool {
    at.map(|at| Utc::now() - at < within).unwrap_or(false)
}
