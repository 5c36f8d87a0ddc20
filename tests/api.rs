use axum::body::Body;
use axum::http::{Request, StatusCode};
use directory_api::{app, AppState, MemoryStore};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn build_app(page_size: u64) -> axum::Router {
    let state = AppState::new(Arc::new(MemoryStore::new()), page_size);
    app(state, 16 * 1024)
}

async fn body_json(resp: axum::http::Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &axum::Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(b) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&b).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    (status, body_json(resp).await)
}

fn business(name: &str) -> Value {
    json!({
        "ownerid": 1,
        "name": name,
        "address": "300 SW Jefferson Ave.",
        "city": "Corvallis",
        "state": "OR",
        "zip": "97333",
        "phone": "541-758-2077",
        "category": "Restaurant",
        "subcategory": "Brewpub",
        "website": "http://block15.com"
    })
}

#[tokio::test]
async fn create_business_and_read_it_back() {
    let app = build_app(2);
    let mut body = business("Block 15");
    body["secret"] = json!("dropped");
    let (status, created) = send(&app, "POST", "/businesses", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 1);
    assert_eq!(created["links"]["business"], "/businesses/1");

    let (status, got) = send(&app, "GET", "/businesses/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(got["name"], "Block 15");
    assert_eq!(got["email"], Value::Null);
    assert!(got.get("secret").is_none());
    assert_eq!(got["reviews"], json!([]));
    assert_eq!(got["photos"], json!([]));
}

#[tokio::test]
async fn invalid_body_is_400() {
    let app = build_app(2);
    let mut body = business("x");
    body.as_object_mut().unwrap().remove("city");
    let (status, err) = send(&app, "POST", "/businesses", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["error"]["code"], "schema_invalid");
    assert_eq!(err["error"]["message"], "Request body is not a valid business object");

    let (status, err) = send(&app, "POST", "/photos", Some(json!([1, 2]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["error"]["code"], "bad_request");
}

#[tokio::test]
async fn values_keep_their_column_type() {
    let app = build_app(2);
    let review = json!({"userid": 7, "businessid": "1", "dollars": 1, "stars": 5});
    let (status, err) = send(&app, "POST", "/reviews", Some(review)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["error"]["code"], "invalid_value");
    assert_eq!(err["error"]["details"]["field"], "businessid");

    let mut body = business("x");
    body["zip"] = json!(97333);
    let (status, err) = send(&app, "POST", "/businesses", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["error"]["code"], "invalid_value");

    let (_, page) = send(&app, "GET", "/reviews", None).await;
    assert_eq!(page["count"], 0);

    let review = json!({"userid": 7, "businessid": 1, "dollars": 1, "stars": 5});
    let (status, _) = send(&app, "POST", "/reviews", Some(review.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, _) = send(&app, "PUT", "/reviews/1", Some(review)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn listing_clamps_requested_page() {
    let app = build_app(2);
    for i in 0..5 {
        let (status, _) = send(&app, "POST", "/businesses", Some(business(&format!("b{i}")))).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, page) = send(&app, "GET", "/businesses?page=10", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["page"], 3);
    assert_eq!(page["totalPages"], 3);
    assert_eq!(page["pageSize"], 2);
    assert_eq!(page["count"], 5);
    assert_eq!(page["items"].as_array().unwrap().len(), 1);
    assert_eq!(page["items"][0]["name"], "b4");
    assert_eq!(page["links"]["prev"], "/businesses?page=2");
    assert!(page["links"].get("next").is_none());

    let (_, first) = send(&app, "GET", "/businesses?page=-2", None).await;
    assert_eq!(first["page"], 1);
    assert_eq!(first["items"][0]["name"], "b0");
    assert_eq!(first["items"][1]["name"], "b1");

    let (_, default) = send(&app, "GET", "/businesses?page=abc", None).await;
    assert_eq!(default["page"], 1);
}

#[tokio::test]
async fn empty_listing_is_first_page() {
    let app = build_app(2);
    let (status, page) = send(&app, "GET", "/reviews", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["page"], 1);
    assert_eq!(page["totalPages"], 0);
    assert_eq!(page["count"], 0);
    assert_eq!(page["items"], json!([]));
}

#[tokio::test]
async fn review_owner_fields_are_immutable() {
    let app = build_app(2);
    let review = json!({"userid": 7, "businessid": 1, "dollars": 1, "stars": 5, "review": "old"});
    let (status, created) = send(&app, "POST", "/reviews", Some(review)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["links"]["review"], "/reviews/1");
    assert_eq!(created["links"]["business"], "/businesses/1");

    let moved = json!({"userid": 9, "businessid": 1, "dollars": 1, "stars": 5, "review": "new"});
    let (status, err) = send(&app, "PUT", "/reviews/1", Some(moved)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(err["error"]["code"], "immutable_field");
    assert_eq!(err["error"]["details"]["field"], "userid");

    let (_, stored) = send(&app, "GET", "/reviews/1", None).await;
    assert_eq!(stored["review"], "old");

    let edit = json!({"userid": 7, "businessid": 1, "dollars": 2, "stars": 4});
    let (status, ok) = send(&app, "PUT", "/reviews/1", Some(edit)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ok["links"]["review"], "/reviews/1");
    let (_, stored) = send(&app, "GET", "/reviews/1", None).await;
    assert_eq!(stored["stars"], 4.0);
    assert_eq!(stored["review"], Value::Null);
}

#[tokio::test]
async fn business_detail_embeds_children() {
    let app = build_app(10);
    send(&app, "POST", "/businesses", Some(business("a"))).await;
    send(&app, "POST", "/photos", Some(json!({"userid": 3, "businessid": 1, "caption": "front"}))).await;
    send(&app, "POST", "/photos", Some(json!({"userid": 3, "businessid": 2}))).await;
    send(
        &app,
        "POST",
        "/reviews",
        Some(json!({"userid": 3, "businessid": 1, "dollars": 2, "stars": 3})),
    )
    .await;

    let (status, detail) = send(&app, "GET", "/businesses/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["photos"].as_array().unwrap().len(), 1);
    assert_eq!(detail["photos"][0]["caption"], "front");
    assert_eq!(detail["reviews"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn delete_then_not_found() {
    let app = build_app(2);
    send(&app, "POST", "/photos", Some(json!({"userid": 1, "businessid": 1}))).await;
    let (status, _) = send(&app, "DELETE", "/photos/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, err) = send(&app, "GET", "/photos/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(err["error"]["code"], "not_found");
    let (status, _) = send(&app, "DELETE", "/photos/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(
        &app,
        "PUT",
        "/photos/1",
        Some(json!({"userid": 1, "businessid": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unknown_kind_and_bad_id() {
    let app = build_app(2);
    let (status, _) = send(&app, "GET", "/users", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, err) = send(&app, "GET", "/photos/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["error"]["code"], "bad_request");
}

#[tokio::test]
async fn health_and_ready() {
    let app = build_app(2);
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    let (status, body) = send(&app, "GET", "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "memory");
    let (_, body) = send(&app, "GET", "/version", None).await;
    assert_eq!(body["name"], "directory-api");
}
