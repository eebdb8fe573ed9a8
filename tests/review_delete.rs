mod common;

use common::{location, BRUCE_TOKEN, CLARK_TOKEN, LOIS_TOKEN};
use movie_review::models::ReviewKind;

#[tokio::test]
async fn reviewer_cannot_see_or_delete_someone_elses_review() {
    let app = common::spawn_app().await;
    let movie = app.add_movie("The Book of Life").await;
    let review = app.add_review(&movie, ReviewKind::Initial, "Clark's", -1, &app.clark).await;
    let path = format!("/review/initial/{}/delete/", review.id);

    let confirm = app.get(&path, Some(BRUCE_TOKEN)).await;
    assert_eq!(confirm.status().as_u16(), 404);

    let response = app.post_form(&path, Some(BRUCE_TOKEN), &[]).await;
    assert_eq!(response.status().as_u16(), 404);
    assert!(app.review(ReviewKind::Initial, review.id).await.is_some());
}

#[tokio::test]
async fn reviewer_deletes_own_review() {
    let app = common::spawn_app().await;
    let movie = app.add_movie("The Book of Life").await;
    let review = app.add_review(&movie, ReviewKind::Rewatch, "Clark's", -1, &app.clark).await;
    let path = format!("/review/rewatch/{}/delete/", review.id);

    let confirm = app.get(&path, Some(CLARK_TOKEN)).await;
    assert_eq!(confirm.status().as_u16(), 200);
    assert!(confirm.text().await.unwrap().contains("Are you sure"));

    let response = app.post_form(&path, Some(CLARK_TOKEN), &[]).await;
    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(location(&response), "/review/");
    assert!(app.review(ReviewKind::Rewatch, review.id).await.is_none());
}

#[tokio::test]
async fn superuser_deletes_any_review() {
    let app = common::spawn_app().await;
    let movie = app.add_movie("The Book of Life").await;
    let review = app.add_review(&movie, ReviewKind::Initial, "Clark's", 5, &app.clark).await;

    let response = app
        .post_form(&format!("/review/initial/{}/delete/", review.id), Some(LOIS_TOKEN), &[])
        .await;

    assert_eq!(response.status().as_u16(), 303);
    assert!(app.review(ReviewKind::Initial, review.id).await.is_none());
}

#[tokio::test]
async fn delete_needs_the_right_kind() {
    let app = common::spawn_app().await;
    let movie = app.add_movie("The Book of Life").await;
    let review = app.add_review(&movie, ReviewKind::Initial, "Clark's", -1, &app.clark).await;

    let response = app
        .post_form(&format!("/review/rewatch/{}/delete/", review.id), Some(LOIS_TOKEN), &[])
        .await;

    assert_eq!(response.status().as_u16(), 404);
    assert!(app.review(ReviewKind::Initial, review.id).await.is_some());
}

#[tokio::test]
async fn anonymous_delete_redirects_to_login() {
    let app = common::spawn_app().await;
    let movie = app.add_movie("The Book of Life").await;
    let review = app.add_review(&movie, ReviewKind::Initial, "Clark's", -1, &app.clark).await;

    let response = app
        .post_form(&format!("/review/initial/{}/delete/", review.id), None, &[])
        .await;

    assert_eq!(response.status().as_u16(), 303);
    assert!(location(&response).starts_with("/accounts/login/?next="));
    assert!(app.review(ReviewKind::Initial, review.id).await.is_some());
}
