mod common;

use anyhow::Result;
use book_api::database::BookStore;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn create_and_fetch_book() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.token().await?;

    let created = server.create_book(&token, "Dune", "Frank Herbert", 1965).await?;
    assert!(created["id"].as_i64().unwrap_or(0) > 0, "{created}");
    assert!(created["created_at"].is_string());

    let res = server
        .client
        .get(server.url(&format!("/book/{}", created["id"])))
        .header("Authorization", &token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "Book retrieved successfully");
    assert_eq!(body["data"], created);
    Ok(())
}

#[tokio::test]
async fn list_returns_books_in_insertion_order() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.token().await?;

    server.create_book(&token, "First", "A", 1).await?;
    server.create_book(&token, "Second", "B", 2).await?;

    let res = server
        .client
        .get(server.url("/books"))
        .header("Authorization", &token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    let titles: Vec<&str> = body["data"]
        .as_array()
        .map(|books| books.iter().filter_map(|b| b["title"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(titles, vec!["First", "Second"]);
    Ok(())
}

#[tokio::test]
async fn create_validates_payload() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.token().await?;

    let cases = [
        (json!({ "title": "", "author": "A", "year": 1 }), "Title, Author, and Year are required"),
        (json!({ "title": "T", "year": 1 }), "Title, Author, and Year are required"),
        (json!({ "title": "T", "author": "A", "year": 0 }), "Title, Author, and Year are required"),
        (json!({ "title": "T", "author": "A", "year": "1999" }), "Invalid input"),
    ];
    for (payload, message) in cases {
        let res = server
            .client
            .post(server.url("/book"))
            .header("Authorization", &token)
            .json(&payload)
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{payload}");
        let body = res.json::<Value>().await?;
        assert_eq!(body, json!({ "message": message, "data": null }));
    }

    assert!(server.store.find_all().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn unknown_book_is_not_found() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.token().await?;

    let res = server
        .client
        .get(server.url("/book/999999"))
        .header("Authorization", &token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let body = res.json::<Value>().await?;
    assert_eq!(body, json!({ "message": "Book not found", "data": null }));
    Ok(())
}

#[tokio::test]
async fn invalid_id_is_bad_request() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.token().await?;

    for id in ["abc", "0", "-4"] {
        let res = server
            .client
            .get(server.url(&format!("/book/{id}")))
            .header("Authorization", &token)
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{id}");
        let body = res.json::<Value>().await?;
        assert_eq!(body["message"], "Invalid id");
    }
    Ok(())
}

#[tokio::test]
async fn partial_update_keeps_absent_fields() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.token().await?;
    let created = server.create_book(&token, "T", "Old Author", 1999).await?;

    let res = server
        .client
        .put(server.url(&format!("/book/{}", created["id"])))
        .header("Authorization", &token)
        .json(&json!({ "author": "New Author" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "Book updated successfully");
    assert_eq!(body["data"]["author"], "New Author");
    assert_eq!(body["data"]["title"], "T");
    assert_eq!(body["data"]["year"], 1999);
    Ok(())
}

#[tokio::test]
async fn invalid_update_changes_nothing() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.token().await?;
    let created = server.create_book(&token, "T", "A", 1999).await?;
    let id = created["id"].as_i64().unwrap_or_default();
    let before = server.store.find_by_id(id).await?;

    let res = server
        .client
        .put(server.url(&format!("/book/{id}")))
        .header("Authorization", &token)
        .json(&json!({ "title": "Changed", "year": -1 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    assert_eq!(server.store.find_by_id(id).await?, before);
    Ok(())
}

#[tokio::test]
async fn update_unknown_book_is_not_found_even_with_bad_body() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.token().await?;

    let res = server
        .client
        .put(server.url("/book/424242"))
        .header("Authorization", &token)
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn delete_twice_then_not_found() -> Result<()> {
    let server = common::spawn_server().await?;
    let token = server.token().await?;
    let created = server.create_book(&token, "T", "A", 1999).await?;
    let path = format!("/book/{}", created["id"]);

    let res = server
        .client
        .delete(server.url(&path))
        .header("Authorization", &token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body, json!({ "message": "Book deleted successfully", "data": null }));

    for _ in 0..2 {
        let res = server
            .client
            .delete(server.url(&path))
            .header("Authorization", &token)
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    let res = server
        .client
        .get(server.url(&path))
        .header("Authorization", &token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}
