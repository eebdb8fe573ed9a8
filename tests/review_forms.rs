mod common;

use chrono::Duration;
use common::{location, CLARK_TOKEN};
use movie_review::db::Repository;
use movie_review::models::ReviewKind;

#[tokio::test]
async fn anonymous_review_form_redirects_to_login() {
    let app = common::spawn_app().await;
    let movie = app.add_movie("The Book of Life").await;
    let path = format!("/review/movie/{}/initial/new/", movie.id);

    let response = app.get(&path, None).await;

    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(
        location(&response),
        format!("/accounts/login/?next=%2Freview%2Fmovie%2F{}%2Finitial%2Fnew%2F", movie.id)
    );

    let response = app
        .post_form(&path, None, &[("review_text", "Sneaky"), ("rating", "5"), ("watch_for", "x")])
        .await;
    assert_eq!(response.status().as_u16(), 303);
    assert!(app.repository.fetch_reviews(&Default::default()).await.unwrap().is_empty());
}

#[tokio::test]
async fn review_form_renders_the_kind_note_field() {
    let app = common::spawn_app().await;
    let movie = app.add_movie("The Book of Life").await;

    let body = app
        .get(&format!("/review/movie/{}/rewatch/new/", movie.id), Some(CLARK_TOKEN))
        .await
        .text()
        .await
        .unwrap();

    assert!(body.contains("name=\"discovery\""));
    assert!(!body.contains("name=\"watch_for\""));
}

#[tokio::test]
async fn creating_a_review_stamps_the_movie_and_redirects_to_it() {
    let app = common::spawn_app().await;
    let movie = app.add_movie("The Book of Life").await;
    assert!(movie.last_reviewed.is_none());

    let response = app
        .post_form(
            &format!("/review/movie/{}/initial/new/", movie.id),
            Some(CLARK_TOKEN),
            &[
                ("review_text", "A feast for the eyes"),
                ("rating", "8"),
                ("watch_for", "The candle maker"),
                ("discovery", "ignored for initial reviews"),
            ],
        )
        .await;

    assert_eq!(response.status().as_u16(), 303);
    let reviews = app.repository.fetch_reviews(&Default::default()).await.unwrap();
    assert_eq!(reviews.len(), 1);
    let review = &reviews[0];
    assert_eq!(location(&response), format!("/review/initial/{}/", review.id));
    assert_eq!(review.kind, ReviewKind::Initial);
    assert_eq!(review.reviewer_id, app.clark.id);
    assert_eq!(review.watch_for.as_deref(), Some("The candle maker"));
    assert_eq!(review.discovery, None);

    let movie = app.movie(movie.id).await.unwrap();
    assert_eq!(movie.last_reviewed, Some(review.pub_date));
    assert!(common::recent(movie.last_reviewed, Duration::minutes(1)));

    // the new review is published immediately
    let detail = app.get(&location(&response), None).await;
    assert_eq!(detail.status().as_u16(), 200);
}

#[tokio::test]
async fn cookie_token_authenticates_too() {
    let app = common::spawn_app().await;
    let movie = app.add_movie("The Book of Life").await;

    let response = app
        .client
        .get(app.url(&format!("/review/movie/{}/initial/new/", movie.id)))
        .header(reqwest::header::COOKIE, format!("access_token={CLARK_TOKEN}"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn unknown_bearer_token_is_rejected() {
    let app = common::spawn_app().await;

    let response = app.get("/review/", Some("not-a-real-token")).await;

    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn invalid_review_is_rendered_again_with_errors() {
    let app = common::spawn_app().await;
    let movie = app.add_movie("The Book of Life").await;

    let response = app
        .post_form(
            &format!("/review/movie/{}/rewatch/new/", movie.id),
            Some(CLARK_TOKEN),
            &[("review_text", "Kept text"), ("rating", "11"), ("discovery", "")],
        )
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("This field is required."));
    assert!(body.contains("Kept text"));
    assert!(app.repository.fetch_reviews(&Default::default()).await.unwrap().is_empty());
    assert!(app.movie(movie.id).await.unwrap().last_reviewed.is_none());
}

#[tokio::test]
async fn unparsable_rating_is_rendered_again_with_errors() {
    let app = common::spawn_app().await;
    let movie = app.add_movie("The Book of Life").await;
    let path = format!("/review/movie/{}/initial/new/", movie.id);

    for (rating, message) in [("ten", "Enter a whole number."), ("", "This field is required.")] {
        let response = app
            .post_form(
                &path,
                Some(CLARK_TOKEN),
                &[("review_text", "Fine"), ("rating", rating), ("watch_for", "x")],
            )
            .await;

        assert_eq!(response.status().as_u16(), 200, "{rating:?}");
        let body = response.text().await.unwrap();
        assert!(body.contains(message), "{rating:?}");
        assert!(body.contains("Fine"));
    }
    assert!(app.repository.fetch_reviews(&Default::default()).await.unwrap().is_empty());
}

#[tokio::test]
async fn whitespace_only_review_text_is_rejected() {
    let app = common::spawn_app().await;
    let movie = app.add_movie("The Book of Life").await;

    let response = app
        .post_form(
            &format!("/review/movie/{}/initial/new/", movie.id),
            Some(CLARK_TOKEN),
            &[("review_text", "   "), ("rating", "5"), ("watch_for", "x")],
        )
        .await;

    assert_eq!(response.status().as_u16(), 200);
    assert!(app.repository.fetch_reviews(&Default::default()).await.unwrap().is_empty());
}

#[tokio::test]
async fn saved_review_text_is_trimmed() {
    let app = common::spawn_app().await;
    let movie = app.add_movie("The Book of Life").await;

    let response = app
        .post_form(
            &format!("/review/movie/{}/initial/new/", movie.id),
            Some(CLARK_TOKEN),
            &[("review_text", "  Lovely  "), ("rating", " 9 "), ("watch_for", " Skulls ")],
        )
        .await;

    assert_eq!(response.status().as_u16(), 303);
    let reviews = app.repository.fetch_reviews(&Default::default()).await.unwrap();
    assert_eq!(reviews[0].review_text, "Lovely");
    assert_eq!(reviews[0].rating, 9);
    assert_eq!(reviews[0].watch_for.as_deref(), Some("Skulls"));
}

#[tokio::test]
async fn review_of_missing_movie_is_not_found() {
    let app = common::spawn_app().await;

    let response = app.get("/review/movie/9999/initial/new/", Some(CLARK_TOKEN)).await;

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn editing_keeps_date_and_movie_stamp() {
    let app = common::spawn_app().await;
    let movie = app.add_movie("The Book of Life").await;
    let review = app.add_review(&movie, ReviewKind::Rewatch, "First take", -3, &app.clark).await;
    let stamped = app.movie(movie.id).await.unwrap().last_reviewed;
    let path = format!("/review/movie/{}/rewatch/{}/edit/", movie.id, review.id);

    let form = app.get(&path, Some(CLARK_TOKEN)).await.text().await.unwrap();
    assert!(form.contains("First take"));
    assert!(form.contains("First take note"));

    let response = app
        .post_form(
            &path,
            Some(CLARK_TOKEN),
            &[("review_text", "Second take"), ("rating", "10"), ("discovery", "The twist")],
        )
        .await;

    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(location(&response), format!("/review/rewatch/{}/", review.id));
    let edited = app.review(ReviewKind::Rewatch, review.id).await.unwrap();
    assert_eq!(edited.review_text, "Second take");
    assert_eq!(edited.rating, 10);
    assert_eq!(edited.discovery.as_deref(), Some("The twist"));
    assert_eq!(edited.pub_date, review.pub_date);
    assert_eq!(app.movie(movie.id).await.unwrap().last_reviewed, stamped);
}

#[tokio::test]
async fn editing_through_another_movie_is_not_found() {
    let app = common::spawn_app().await;
    let movie = app.add_movie("The Book of Life").await;
    let other = app.add_movie("Coco").await;
    let review = app.add_review(&movie, ReviewKind::Initial, "Mine", -1, &app.clark).await;

    let response = app
        .get(
            &format!("/review/movie/{}/initial/{}/edit/", other.id, review.id),
            Some(CLARK_TOKEN),
        )
        .await;

    assert_eq!(response.status().as_u16(), 404);
}
