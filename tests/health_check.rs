mod common;

#[tokio::test]
async fn health_check_works() {
    let app = common::spawn_app().await;

    let response = app.get("/health_check", None).await;

    assert!(response.status().is_success());
    assert_eq!(Some(0), response.content_length());
}

#[tokio::test]
async fn home_page_links_to_latest_lists() {
    let app = common::spawn_app().await;

    let response = app.get("/", None).await;

    assert_eq!(response.status().as_u16(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("Welcome!"));
    assert!(body.contains("href=\"/review/movies/\""));
    assert!(body.contains("href=\"/review/\""));
}
