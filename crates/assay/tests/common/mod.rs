//! In-process stand-in for the ReqRes demo API.
//!
//! Serves the subset of routes the end-to-end tests exercise, on a random
//! local port. `?delay=<seconds>` on list routes postpones the response.

#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use assay::{Assay, DefaultConfig, ReqwestHttpClient};
use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};

pub const TOKEN: &str = "QpwL5tke4Pnpja7X4";
pub const PER_PAGE: usize = 6;

const USERS: [(u64, &str, &str, &str); 12] = [
    (1, "george.bluth@reqres.in", "George", "Bluth"),
    (2, "janet.weaver@reqres.in", "Janet", "Weaver"),
    (3, "emma.wong@reqres.in", "Emma", "Wong"),
    (4, "eve.holt@reqres.in", "Eve", "Holt"),
    (5, "charles.morris@reqres.in", "Charles", "Morris"),
    (6, "tracey.ramos@reqres.in", "Tracey", "Ramos"),
    (7, "michael.lawson@reqres.in", "Michael", "Lawson"),
    (8, "lindsay.ferguson@reqres.in", "Lindsay", "Ferguson"),
    (9, "tobias.funke@reqres.in", "Tobias", "Funke"),
    (10, "byron.fields@reqres.in", "Byron", "Fields"),
    (11, "george.edwards@reqres.in", "George", "Edwards"),
    (12, "rachel.howell@reqres.in", "Rachel", "Howell"),
];

const RESOURCES: [(u64, &str, u64, &str, &str); 6] = [
    (1, "cerulean", 2000, "#98B2D1", "15-4020"),
    (2, "fuchsia rose", 2001, "#C74375", "17-2031"),
    (3, "true red", 2002, "#BF1932", "19-1664"),
    (4, "aqua sky", 2003, "#7BC4C4", "14-4811"),
    (5, "tigerlily", 2004, "#E2583E", "17-1456"),
    (6, "blue turquoise", 2005, "#53B0AE", "15-5217"),
];

/// A running mock server.
pub struct MockServer {
    base: String,
}

impl MockServer {
    /// Starts the server on `127.0.0.1:0`.
    pub async fn start() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, router()).await;
        });
        Self {
            base: format!("http://{addr}/api"),
        }
    }

    /// Absolute URL for an API path such as `/users/2`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }
}

/// An `Assay` over a real reqwest client with the given defaults.
pub fn assay_with(config: DefaultConfig) -> Assay {
    Assay::with_client(Arc::new(ReqwestHttpClient::new().unwrap()), config)
}

fn router() -> Router {
    Router::new()
        .route("/api/register", axum::routing::post(register))
        .route("/api/users", get(list_users).post(create_user))
        .route(
            "/api/users/{id}",
            get(get_user).put(update_user).patch(update_user).delete(delete_user),
        )
        .route("/api/unknown", get(list_resources))
        .route("/api/unknown/{id}", get(get_resource))
        .route("/api/echo/headers", get(echo_headers))
        .route("/api/users-legacy/{id}", get(legacy_user))
}

fn user_json(id: u64) -> Option<Value> {
    USERS
        .iter()
        .find(|(user_id, ..)| *user_id == id)
        .map(|(id, email, first, last)| {
            json!({
                "id": id,
                "email": email,
                "first_name": first,
                "last_name": last,
                "avatar": format!("https://reqres.in/img/faces/{id}-image.jpg")
            })
        })
}

fn resource_json(id: u64) -> Option<Value> {
    RESOURCES
        .iter()
        .find(|(resource_id, ..)| *resource_id == id)
        .map(|(id, name, year, color, pantone)| {
            json!({
                "id": id,
                "name": name,
                "year": year,
                "color": color,
                "pantone_value": pantone
            })
        })
}

fn page_of(items: Vec<Value>, params: &HashMap<String, String>) -> Value {
    let page = params
        .get("page")
        .and_then(|p| p.parse::<usize>().ok())
        .unwrap_or(1)
        .max(1);
    let total = items.len();
    let data: Vec<Value> = items
        .into_iter()
        .skip((page - 1) * PER_PAGE)
        .take(PER_PAGE)
        .collect();
    json!({
        "page": page,
        "per_page": PER_PAGE,
        "total": total,
        "total_pages": total.div_ceil(PER_PAGE),
        "data": data
    })
}

async fn apply_delay(params: &HashMap<String, String>) {
    if let Some(seconds) = params.get("delay").and_then(|d| d.parse::<f64>().ok()) {
        tokio::time::sleep(Duration::from_secs_f64(seconds)).await;
    }
}

async fn register(Json(body): Json<Value>) -> Response {
    let email = body.get("email").and_then(Value::as_str);
    let password = body.get("password").and_then(Value::as_str);
    match (email, password) {
        (None, _) => (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Missing email or username"})),
        )
            .into_response(),
        (Some(_), None) => (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Missing password"})),
        )
            .into_response(),
        (Some(email), Some(_)) => match USERS.iter().find(|(_, e, ..)| *e == email) {
            Some((id, ..)) => Json(json!({"id": id, "token": TOKEN})).into_response(),
            None => (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Note: Only defined users succeed registration"})),
            )
                .into_response(),
        },
    }
}

async fn list_users(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    apply_delay(&params).await;
    let users = USERS.iter().filter_map(|(id, ..)| user_json(*id)).collect();
    Json(page_of(users, &params))
}

async fn create_user(Json(body): Json<Value>) -> Response {
    let mut created = body;
    if let Value::Object(map) = &mut created {
        map.insert("id".into(), json!("853"));
        map.insert("createdAt".into(), json!("2024-01-15T10:30:00.000Z"));
    }
    (StatusCode::CREATED, Json(created)).into_response()
}

async fn get_user(Path(id): Path<u64>) -> Response {
    match user_json(id) {
        Some(user) => Json(json!({
            "data": user,
            "support": {
                "url": "https://contentcaddy.io",
                "text": "Tired of writing endless social media content?"
            }
        }))
        .into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({}))).into_response(),
    }
}

async fn update_user(Path(_id): Path<u64>, Json(body): Json<Value>) -> Json<Value> {
    let mut updated = body;
    if let Value::Object(map) = &mut updated {
        map.insert("updatedAt".into(), json!("2024-01-15T10:30:00.000Z"));
    }
    Json(updated)
}

async fn delete_user(Path(_id): Path<u64>) -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn list_resources(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    apply_delay(&params).await;
    let resources = RESOURCES
        .iter()
        .filter_map(|(id, ..)| resource_json(*id))
        .collect();
    Json(page_of(resources, &params))
}

async fn get_resource(Path(id): Path<u64>) -> Response {
    match resource_json(id) {
        Some(resource) => Json(json!({"data": resource})).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({}))).into_response(),
    }
}

async fn legacy_user(Path(id): Path<u64>) -> Redirect {
    Redirect::to(&format!("/api/users/{id}"))
}

async fn echo_headers(headers: HeaderMap) -> Json<Value> {
    let map: serde_json::Map<String, Value> = headers
        .iter()
        .map(|(name, value)| {
            (
                name.to_string(),
                Value::String(value.to_str().unwrap_or_default().to_string()),
            )
        })
        .collect();
    Json(Value::Object(map))
}
