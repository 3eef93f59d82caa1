use anyhow::Result;
use async_drills::adapters::placeholder_api::PlaceholderClient;
use async_drills::app::posts::{run_posts, PostsRequest};
use async_drills::domain::model::NewPost;
use async_drills::{AppConfig, AppError, HttpClient};
use httpmock::prelude::*;

fn posts_body() -> serde_json::Value {
    serde_json::json!([
        {"userId": 1, "id": 1, "title": "sunt aut facere", "body": "quia et suscipit\nsuscipit recusandae"},
        {"userId": 1, "id": 2, "title": "qui est esse", "body": "est rerum tempore vitae"},
        {"userId": 2, "id": 3, "title": "ea molestias quasi", "body": "et iusto sed quo iure"}
    ])
}

fn users_body() -> serde_json::Value {
    serde_json::json!([
        {
            "id": 1, "name": "Leanne Graham", "username": "Bret", "email": "Sincere@april.biz",
            "phone": "1-770-736-8031 x56442", "website": "hildegard.org",
            "company": {"name": "Romaguera-Crona", "catchPhrase": "Multi-layered client-server neural-net", "bs": "harness"},
            "address": {"street": "Kulas Light", "city": "Gwenborough"}
        },
        {"id": 2, "name": "Ervin Howell", "username": "Antonette", "email": "Shanna@melissa.tv"}
    ])
}

fn config_for(server: &MockServer) -> AppConfig {
    let mut config = AppConfig::default();
    config.http.placeholder_base_url = server.base_url();
    config
}

#[tokio::test]
async fn test_run_posts_collects_statistics() -> Result<()> {
    let server = MockServer::start();
    let posts_mock = server.mock(|when, then| {
        when.method(GET).path("/posts");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(posts_body());
    });
    let post_mock = server.mock(|when, then| {
        when.method(GET).path("/posts/1");
        then.status(200).json_body(posts_body()[0].clone());
    });
    let missing_mock = server.mock(|when, then| {
        when.method(GET).path("/posts/9999");
        then.status(404).json_body(serde_json::json!({}));
    });
    let users_mock = server.mock(|when, then| {
        when.method(GET).path("/users");
        then.status(200).json_body(users_body());
    });

    let report = run_posts(&config_for(&server), &PostsRequest::default()).await?;

    posts_mock.assert();
    post_mock.assert();
    missing_mock.assert();
    users_mock.assert();

    assert_eq!(report.stats.total_posts, 3);
    assert_eq!(report.stats.distinct_users, 2);
    assert_eq!(report.stats.most_active_user(), Some((1, 2)));
    assert_eq!(report.post.as_ref().map(|p| p.id), Some(1));
    assert!(report.missing_post_absent);
    assert!(report.user_posts.is_none());
    assert_eq!(report.user_count, 2);
    assert_eq!(report.average_posts_per_user, 1.5);
    assert_eq!(report.email_domains, vec!["april.biz", "melissa.tv"]);
    assert!(report.created.is_none());
    Ok(())
}

#[tokio::test]
async fn test_posts_by_user_uses_query_parameter() -> Result<()> {
    let server = MockServer::start();
    let user_posts_mock = server.mock(|when, then| {
        when.method(GET).path("/posts").query_param("userId", "2");
        then.status(200)
            .json_body(serde_json::json!([posts_body()[2].clone()]));
    });

    let client = PlaceholderClient::new(
        HttpClient::new(&AppConfig::default().http)?,
        server.base_url(),
    );
    let posts = client.posts_by_user(2).await?;

    user_posts_mock.assert();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].user_id, 2);
    Ok(())
}

#[tokio::test]
async fn test_run_posts_fails_on_server_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/posts");
        then.status(500);
    });

    let err = run_posts(&config_for(&server), &PostsRequest::default())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::HttpStatus { status: 500, .. }));
    assert!(err.is_upstream());
}

#[tokio::test]
async fn test_create_post_sends_json_body() -> Result<()> {
    let server = MockServer::start();
    let create_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/posts")
            .json_body(serde_json::json!({
                "userId": 7,
                "title": "hello",
                "body": "world"
            }));
        then.status(201).json_body(serde_json::json!({
            "userId": 7, "id": 101, "title": "hello", "body": "world"
        }));
    });

    let client = PlaceholderClient::new(
        HttpClient::new(&AppConfig::default().http)?,
        server.base_url(),
    );
    let created = client
        .create_post(&NewPost {
            user_id: 7,
            title: "hello".to_string(),
            body: "world".to_string(),
        })
        .await?;

    create_mock.assert();
    assert_eq!(created.id, 101);
    assert_eq!(created.user_id, 7);
    Ok(())
}

#[tokio::test]
async fn test_unexpected_shape_is_serialization_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/users");
        then.status(200).json_body(serde_json::json!({"users": []}));
    });

    let client = PlaceholderClient::new(
        HttpClient::new(&AppConfig::default().http).unwrap(),
        server.base_url(),
    );
    let err = client.list_users().await.unwrap_err();
    assert!(matches!(err, AppError::Serialization(_)));
}
