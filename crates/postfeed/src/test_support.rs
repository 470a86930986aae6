//! In-process mock of the posts/auth API for shell tests.

use std::collections::HashMap;

use axum::extract::{Path, Query};
use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use postfeed_core::config::Config;
use serde_json::{json, Value};

pub const TOTAL_POSTS: usize = 25;
pub const VALID_TOKEN: &str = "access-123";
pub const USERNAME: &str = "emilys";
pub const PASSWORD: &str = "emilyspass";

type ApiError = (StatusCode, Json<Value>);

fn post_json(id: usize) -> Value {
    json!({
        "id": id,
        "title": format!("Post number {id}"),
        "body": format!("Body of post {id}"),
        "tags": ["test"],
        "reactions": { "likes": id * 2, "dislikes": id % 3 },
        "views": 100,
        "userId": 100 + id
    })
}

fn profile_json() -> Value {
    json!({
        "id": 1,
        "username": USERNAME,
        "email": "emily.johnson@x.dummyjson.com",
        "firstName": "Emily",
        "lastName": "Johnson",
        "maidenName": "Smith",
        "age": 28,
        "gender": "female",
        "image": "https://dummyjson.com/icon/emilys/128"
    })
}

async fn list_posts(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let limit: usize = params
        .get("limit")
        .and_then(|v| v.parse().ok())
        .unwrap_or(30);
    let skip: usize = params.get("skip").and_then(|v| v.parse().ok()).unwrap_or(0);

    let end = (skip + limit).min(TOTAL_POSTS);
    let posts: Vec<Value> = (skip + 1..=end).map(post_json).collect();

    Json(json!({
        "posts": posts,
        "total": TOTAL_POSTS,
        "skip": skip,
        "limit": limit
    }))
}

async fn find_post(Path(id): Path<usize>) -> Result<Json<Value>, ApiError> {
    if (1..=TOTAL_POSTS).contains(&id) {
        Ok(Json(post_json(id)))
    } else {
        Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "message": format!("Post with id '{id}' not found") })),
        ))
    }
}

async fn login(Json(body): Json<Value>) -> Result<Json<Value>, ApiError> {
    if body["username"] != USERNAME || body["password"] != PASSWORD {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "Invalid credentials" })),
        ));
    }

    let mut response = profile_json();
    response["accessToken"] = json!(VALID_TOKEN);
    response["refreshToken"] = json!("refresh-456");
    Ok(Json(response))
}

async fn me(headers: HeaderMap) -> Result<Json<Value>, ApiError> {
    let expected = format!("Bearer {VALID_TOKEN}");
    match headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(Json(profile_json())),
        _ => Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid/Expired Token!" })),
        )),
    }
}

/// Start the mock API on an ephemeral port and return its base URL
pub async fn spawn_mock_api() -> String {
    let app = Router::new()
        .route("/posts", get(list_posts))
        .route("/posts/{id}", get(find_post))
        .route("/auth/login", post(login))
        .route("/user/me", get(me));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

pub fn test_config(base_url: &str) -> Config {
    Config {
        api_url: base_url.to_string(),
        page_size: 10,
        timeout_secs: 5,
    }
}
