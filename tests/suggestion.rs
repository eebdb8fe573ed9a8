mod common;

use common::location;

fn suggestion<'a>() -> Vec<(&'a str, &'a str)> {
    vec![
        ("name", "Lois"),
        ("email", "lois@example.com"),
        ("email_confirm", "lois@example.com"),
        ("suggestion", "Add a watchlist."),
        ("poohbear", ""),
    ]
}

#[tokio::test]
async fn suggestion_form_renders() {
    let app = common::spawn_app().await;

    let response = app.get("/suggest/", None).await;

    assert_eq!(response.status().as_u16(), 200);
    assert!(response.text().await.unwrap().contains("name=\"poohbear\""));
}

#[tokio::test]
async fn valid_suggestion_is_stored() {
    let app = common::spawn_app().await;

    let response = app.post_form("/suggest/", None, &suggestion()).await;

    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(location(&response), "/");
    let stored = app.repository.suggestions().await;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].suggestion, "Add a watchlist.");
}

#[tokio::test]
async fn honeypot_rejects_bots() {
    let app = common::spawn_app().await;
    let mut form = suggestion();
    form.retain(|(name, _)| *name != "poohbear");
    form.push(("poohbear", "I am a bot"));

    let response = app.post_form("/suggest/", None, &form).await;

    assert_eq!(response.status().as_u16(), 200);
    assert!(response.text().await.unwrap().contains("Bad bot!"));
    assert!(app.repository.suggestions().await.is_empty());
}

#[tokio::test]
async fn emails_must_match() {
    let app = common::spawn_app().await;
    let mut form = suggestion();
    form.retain(|(name, _)| *name != "email_confirm");
    form.push(("email_confirm", "lane@example.com"));

    let response = app.post_form("/suggest/", None, &form).await;

    assert_eq!(response.status().as_u16(), 200);
    assert!(response.text().await.unwrap().contains("Emails must match."));
    assert!(app.repository.suggestions().await.is_empty());
}
