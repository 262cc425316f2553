use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use tower::ServiceExt;
use vitrin::api::AppState;
use vitrin::config::Config;
use vitrin::db::NewProduct;

const BOUNDARY: &str = "vitrin-test-boundary-7MA4YWxkTrZu0gW";

/// Password of the admin account seeded by the initial migration
const ADMIN_PASSWORD: &str = "password";

fn temp_uploads_dir() -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("vitrin-api-tests-{nanos}"))
}

async fn spawn_app_with(mutate: impl FnOnce(&mut Config)) -> (Router, Arc<AppState>, PathBuf) {
    let uploads = temp_uploads_dir();

    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.auth.token_secret = "integration-test-secret".to_string();
    config.server.secure_cookies = false;
    config.uploads.uploads_path = uploads.to_string_lossy().into_owned();
    mutate(&mut config);

    let state = vitrin::api::create_app_state_from_config(config)
        .await
        .expect("Failed to create app state");
    let app = vitrin::api::router(state.clone()).await;

    (app, state, uploads)
}

async fn spawn_app() -> (Router, Arc<AppState>, PathBuf) {
    spawn_app_with(|_| {}).await
}

fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, mime::APPLICATION_WWW_FORM_URLENCODED.as_ref())
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn multipart_body(fields: &[(&str, &str)], image: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }

    if let Some((filename, bytes)) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{filename}\"\r\nContent-Type: image/jpeg\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn multipart_request(uri: &str, body: Vec<u8>, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri(uri).header(
        header::CONTENT_TYPE,
        format!("multipart/form-data; boundary={BOUNDARY}"),
    );

    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie.to_string());
    }

    builder.body(Body::from(body)).unwrap()
}

fn session_cookie(response: &axum::http::Response<axum::body::Body>) -> String {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("expected a Set-Cookie header")
        .to_str()
        .unwrap();

    set_cookie
        .split(';')
        .next()
        .expect("cookie pair")
        .to_string()
}

fn location(response: &axum::http::Response<axum::body::Body>) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("expected a Location header")
        .to_str()
        .unwrap()
        .to_string()
}

async fn login(app: &Router, username: &str, password: &str) -> String {
    let response = app
        .clone()
        .oneshot(form_request(
            "/api/auth/login",
            &format!("username={username}&password={password}"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER, "login failed");
    session_cookie(&response)
}

async fn json_body(response: axum::http::Response<axum::body::Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_register_login_and_me() {
    let (app, _state, _uploads) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(form_request(
            "/api/auth/register",
            "username=alice&password=hunter42&confirm_password=hunter42",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    let cookie = session_cookie(&response);
    assert!(cookie.starts_with("auth_token="));

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/auth/me")
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["auth"], "user");
}

#[tokio::test]
async fn test_me_without_session_is_unauthorized() {
    let (app, _state, _uploads) = spawn_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/auth/me")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_duplicate_registration_is_rejected() {
    let (app, _state, _uploads) = spawn_app().await;

    let body = "username=bob&password=hunter42&confirm_password=hunter42";

    let response = app.clone().oneshot(form_request("/api/auth/register", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app.clone().oneshot(form_request("/api/auth/register", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = json_body(response).await;
    assert_eq!(body["error"], "Username is already taken");
}

#[tokio::test]
async fn test_register_validation_reports_field_errors() {
    let (app, _state, _uploads) = spawn_app().await;

    let response = app
        .oneshot(form_request(
            "/api/auth/register",
            "username=al&password=short&confirm_password=different",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["field_errors"]["username"].is_string());
    assert!(body["field_errors"]["password"].is_string());
}

#[tokio::test]
async fn test_login_with_wrong_password_is_generic() {
    let (app, _state, _uploads) = spawn_app().await;

    let response = app
        .oneshot(form_request(
            "/api/auth/login",
            "username=admin&password=wrong-password",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Invalid username or password");
}

#[tokio::test]
async fn test_blocked_user_gets_blocked_message() {
    let (app, state, _uploads) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(form_request(
            "/api/auth/register",
            "username=mallory&password=hunter42&confirm_password=hunter42",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let mallory = state
        .store()
        .get_user_by_username("mallory")
        .await
        .unwrap()
        .unwrap();

    let admin_cookie = login(&app, "admin", ADMIN_PASSWORD).await;
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/users")
                .header(header::CONTENT_TYPE, mime::APPLICATION_WWW_FORM_URLENCODED.as_ref())
                .header(header::COOKIE, admin_cookie)
                .body(Body::from(format!("user_id={}&intent=block", mallory.id)))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Correct credentials, but the account is blocked
    let response = app
        .oneshot(form_request(
            "/api/auth/login",
            "username=mallory&password=hunter42",
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    assert_eq!(body["error"], "This account has been blocked");
}

#[tokio::test]
async fn test_user_admin_endpoints_require_admin_role() {
    let (app, _state, _uploads) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(form_request(
            "/api/auth/register",
            "username=carol&password=hunter42&confirm_password=hunter42",
        ))
        .await
        .unwrap();
    let user_cookie = session_cookie(&response);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/users")
                .header(header::COOKIE, user_cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let admin_cookie = login(&app, "admin", ADMIN_PASSWORD).await;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/users")
                .header(header::COOKIE, admin_cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let usernames: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap())
        .collect();
    assert!(usernames.contains(&"admin"));
    assert!(usernames.contains(&"carol"));
}

#[tokio::test]
async fn test_create_product_and_fetch_by_slug() {
    let (app, state, uploads) = spawn_app().await;

    let cookie = login(&app, "admin", ADMIN_PASSWORD).await;

    let body = multipart_body(
        &[
            ("name", "Dell 7480!"),
            ("description", "A sturdy refurbished laptop"),
            ("price", "349.99"),
            ("category", "Technology"),
        ],
        Some(("laptop.jpg", b"jpeg-bytes-go-here")),
    );

    let response = app
        .clone()
        .oneshot(multipart_request("/api/products", body, Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let slug = location(&response)
        .strip_prefix("/products/")
        .unwrap()
        .to_string();
    assert!(slug.starts_with("dell-7480-"));

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/products/{slug}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"]["name"], "Dell 7480!");
    assert_eq!(body["data"]["price"].as_f64().unwrap(), 349.99);
    assert_eq!(body["data"]["category"], "Technology");

    // Owner comes from the session
    let admin = state.store().get_user_by_username("admin").await.unwrap().unwrap();
    assert_eq!(body["data"]["owner_id"].as_i64().unwrap(), i64::from(admin.id));

    // The uploaded image landed in the uploads directory
    let image_url = body["data"]["image_url"].as_str().unwrap().to_string();
    let filename = image_url.strip_prefix("/assets/").unwrap();
    assert!(uploads.join(filename).exists());
}

#[tokio::test]
async fn test_create_product_accepts_multi_megabyte_image() {
    let (app, _state, uploads) = spawn_app().await;

    let cookie = login(&app, "admin", ADMIN_PASSWORD).await;

    // Well under the 5 MiB default cap, but over axum's built-in body limit
    let image = vec![0x42u8; 3 * 1024 * 1024];
    let body = multipart_body(
        &[
            ("name", "Big Picture"),
            ("description", "High resolution"),
            ("price", "20.00"),
            ("category", "Technology"),
        ],
        Some(("big.jpg", &image)),
    );

    let response = app
        .clone()
        .oneshot(multipart_request("/api/products", body, Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let slug = location(&response).strip_prefix("/products/").unwrap().to_string();

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/products/{slug}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = json_body(response).await;
    let filename = body["data"]["image_url"]
        .as_str()
        .unwrap()
        .strip_prefix("/assets/")
        .unwrap()
        .to_string();
    assert_eq!(
        uploads.join(filename).metadata().unwrap().len(),
        image.len() as u64
    );
}

#[tokio::test]
async fn test_create_product_rejects_image_over_cap() {
    let (app, _state, _uploads) =
        spawn_app_with(|config| config.uploads.max_image_bytes = 64 * 1024).await;

    let cookie = login(&app, "admin", ADMIN_PASSWORD).await;

    let image = vec![0x42u8; 128 * 1024];
    let body = multipart_body(
        &[
            ("name", "Too Big"),
            ("description", "Oversized"),
            ("price", "20.00"),
            ("category", "Technology"),
        ],
        Some(("huge.jpg", &image)),
    );

    let response = app
        .oneshot(multipart_request("/api/products", body, Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("Image exceeds the maximum size")
    );
}

#[tokio::test]
async fn test_create_product_without_image_is_rejected() {
    let (app, _state, _uploads) = spawn_app().await;

    let body = multipart_body(
        &[
            ("name", "No Image"),
            ("description", "Missing its picture"),
            ("price", "10"),
            ("category", "Food"),
        ],
        None,
    );

    let response = app
        .oneshot(multipart_request("/api/products", body, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["field_errors"]["image"], "Image is required");
}

#[tokio::test]
async fn test_update_keeps_omitted_fields() {
    let (app, _state, _uploads) = spawn_app().await;

    let cookie = login(&app, "admin", ADMIN_PASSWORD).await;

    let body = multipart_body(
        &[
            ("name", "Wool Sweater"),
            ("description", "Warm"),
            ("price", "59.90"),
            ("category", "Clothing"),
        ],
        Some(("sweater.png", b"png-bytes")),
    );
    let response = app
        .clone()
        .oneshot(multipart_request("/api/products", body, Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let slug = location(&response).strip_prefix("/products/").unwrap().to_string();

    // Update only the description; name and price must survive
    let body = multipart_body(
        &[("intent", "update"), ("description", "Warm and itchy")],
        None,
    );
    let response = app
        .clone()
        .oneshot(multipart_request(
            &format!("/api/products/{slug}"),
            body,
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/products/{slug}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["data"]["name"], "Wool Sweater");
    assert_eq!(body["data"]["price"].as_f64().unwrap(), 59.90);
    assert_eq!(body["data"]["description"], "Warm and itchy");
    assert_eq!(body["data"]["slug"], slug);
}

#[tokio::test]
async fn test_update_replaces_image_and_removes_old_file() {
    let (app, _state, uploads) = spawn_app().await;

    let cookie = login(&app, "admin", ADMIN_PASSWORD).await;

    let body = multipart_body(
        &[
            ("name", "Espresso Beans"),
            ("description", "Dark roast"),
            ("price", "14.00"),
            ("category", "Food"),
        ],
        Some(("beans.jpg", b"original-image")),
    );
    let response = app
        .clone()
        .oneshot(multipart_request("/api/products", body, Some(&cookie)))
        .await
        .unwrap();
    let slug = location(&response).strip_prefix("/products/").unwrap().to_string();

    let old_image = {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/api/products/{slug}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = json_body(response).await;
        body["data"]["image_url"].as_str().unwrap().to_string()
    };

    let body = multipart_body(&[("intent", "update")], Some(("new.jpg", b"replacement-image")));
    let response = app
        .clone()
        .oneshot(multipart_request(
            &format!("/api/products/{slug}"),
            body,
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let old_filename = old_image.strip_prefix("/assets/").unwrap();
    assert!(!uploads.join(old_filename).exists(), "old image should be unlinked");

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/products/{slug}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = json_body(response).await;
    let new_image = body["data"]["image_url"].as_str().unwrap();
    assert_ne!(new_image, old_image);
    let new_filename = new_image.strip_prefix("/assets/").unwrap();
    assert!(uploads.join(new_filename).exists());
}

#[tokio::test]
async fn test_delete_removes_row_and_image() {
    let (app, _state, uploads) = spawn_app().await;

    let cookie = login(&app, "admin", ADMIN_PASSWORD).await;

    let body = multipart_body(
        &[
            ("name", "Going Away"),
            ("description", "Short-lived"),
            ("price", "1.00"),
            ("category", "Food"),
        ],
        Some(("gone.jpg", b"soon-to-be-deleted")),
    );
    let response = app
        .clone()
        .oneshot(multipart_request("/api/products", body, Some(&cookie)))
        .await
        .unwrap();
    let slug = location(&response).strip_prefix("/products/").unwrap().to_string();

    let image_filename = {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/api/products/{slug}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = json_body(response).await;
        body["data"]["image_url"]
            .as_str()
            .unwrap()
            .strip_prefix("/assets/")
            .unwrap()
            .to_string()
    };
    assert!(uploads.join(&image_filename).exists());

    let body = multipart_body(&[("intent", "delete")], None);
    let response = app
        .clone()
        .oneshot(multipart_request(
            &format!("/api/products/{slug}"),
            body,
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");

    assert!(!uploads.join(&image_filename).exists(), "image should be unlinked");

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/products/{slug}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_product_without_image_succeeds() {
    let (app, state, _uploads) = spawn_app().await;

    // Seed a row with no stored image, as early revisions allowed
    let product = state
        .store()
        .add_product(&NewProduct {
            name: "Imageless".to_string(),
            slug: "imageless-abc123".to_string(),
            description: None,
            price: 5.0,
            image_url: None,
            category: None,
            owner_id: None,
        })
        .await
        .unwrap();

    let cookie = login(&app, "admin", ADMIN_PASSWORD).await;

    let body = multipart_body(&[("intent", "delete")], None);
    let response = app
        .oneshot(multipart_request(
            &format!("/api/products/{}", product.slug),
            body,
            Some(&cookie),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(
        state
            .store()
            .get_product_by_slug(&product.slug)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_mutations_without_session_redirect_to_login() {
    let (app, _state, _uploads) = spawn_app().await;

    let body = multipart_body(&[("intent", "delete")], None);
    let response = app
        .oneshot(multipart_request("/api/products/some-slug", body, None))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[tokio::test]
async fn test_unknown_intent_is_rejected() {
    let (app, state, _uploads) = spawn_app().await;

    state
        .store()
        .add_product(&NewProduct {
            name: "Target".to_string(),
            slug: "target-xyz".to_string(),
            description: None,
            price: 2.0,
            image_url: None,
            category: None,
            owner_id: None,
        })
        .await
        .unwrap();

    let cookie = login(&app, "admin", ADMIN_PASSWORD).await;

    let body = multipart_body(&[("intent", "promote")], None);
    let response = app
        .oneshot(multipart_request("/api/products/target-xyz", body, Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_products() {
    let (app, _state, _uploads) = spawn_app().await;

    let cookie = login(&app, "admin", ADMIN_PASSWORD).await;

    for name in ["First Item", "Second Item"] {
        let body = multipart_body(
            &[
                ("name", name),
                ("description", "listed"),
                ("price", "9.99"),
                ("category", "Food"),
            ],
            Some(("item.jpg", b"img")),
        );
        let response = app
            .clone()
            .oneshot(multipart_request("/api/products", body, Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/products")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_store_lookups_by_id() {
    let (_app, state, _uploads) = spawn_app().await;

    let admin = state
        .store()
        .get_user_by_username("admin")
        .await
        .unwrap()
        .unwrap();
    let by_id = state.store().get_user_by_id(admin.id).await.unwrap().unwrap();
    assert_eq!(by_id.username, "admin");
    assert!(state.store().get_user_by_id(9999).await.unwrap().is_none());

    let product = state
        .store()
        .add_product(&NewProduct {
            name: "By Id".to_string(),
            slug: "by-id-abc123".to_string(),
            description: None,
            price: 3.0,
            image_url: None,
            category: None,
            owner_id: Some(admin.id),
        })
        .await
        .unwrap();

    let by_id = state
        .store()
        .get_product_by_id(product.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_id.slug, "by-id-abc123");
    assert!(state.store().get_product_by_id(9999).await.unwrap().is_none());
}

#[tokio::test]
async fn test_password_hash_update_changes_login() {
    let (app, state, _uploads) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(form_request(
            "/api/auth/register",
            "username=dave&password=hunter42&confirm_password=hunter42",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let dave = state
        .store()
        .get_user_by_username("dave")
        .await
        .unwrap()
        .unwrap();

    let security = vitrin::config::SecurityConfig {
        argon2_memory_cost_kib: 1024,
        argon2_time_cost: 1,
        argon2_parallelism: 1,
    };
    let new_hash =
        vitrin::db::repositories::user::hash_password("newpass99", &security).unwrap();

    state
        .store()
        .update_user_password_hash(dave.id, &new_hash)
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(form_request(
            "/api/auth/login",
            "username=dave&password=hunter42",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(form_request(
            "/api/auth/login",
            "username=dave&password=newpass99",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}
