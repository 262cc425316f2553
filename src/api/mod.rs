use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::services::{AuthService, ImageStore};
use crate::state::SharedState;

pub mod auth;
mod error;
mod products;
pub mod token;
mod types;
pub mod validation;
mod users;

pub use error::ApiError;
pub use token::TokenManager;
pub use types::*;

use tokio::sync::RwLock;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub tokens: Arc<TokenManager>,

    pub images: Arc<ImageStore>,

    pub auth: Arc<AuthService>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<RwLock<Config>> {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    #[must_use]
    pub fn images(&self) -> &ImageStore {
        &self.images
    }

    #[must_use]
    pub fn auth_service(&self) -> &AuthService {
        &self.auth
    }
}

pub async fn create_app_state(shared: Arc<SharedState>) -> anyhow::Result<Arc<AppState>> {
    let config = shared.config.read().await.clone();

    let tokens = Arc::new(TokenManager::new(&config.auth, &config.server));
    let images = Arc::new(ImageStore::new(&config.uploads));
    let auth = Arc::new(AuthService::new(
        shared.store.clone(),
        config.security.clone(),
    ));

    Ok(Arc::new(AppState {
        shared,
        tokens,
        images,
        auth,
    }))
}

pub async fn create_app_state_from_config(config: Config) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    create_app_state(shared).await
}

/// Headroom on top of the image cap for the multipart framing and text
/// fields, so an oversized image reaches the size check instead of failing
/// mid-parse.
const FORM_OVERHEAD_BYTES: usize = 1024 * 1024;

pub async fn router(state: Arc<AppState>) -> Router {
    let (uploads_path, public_prefix, cors_origins, max_image_bytes) = {
        let config = state.config().read().await;
        (
            config.uploads.uploads_path.clone(),
            config.uploads.public_prefix.clone(),
            config.server.cors_allowed_origins.clone(),
            config.uploads.max_image_bytes,
        )
    };

    let api_router = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .route("/products", get(products::list_products))
        .route("/products", post(products::create_product))
        .route("/products/{slug}", get(products::get_product))
        .route("/products/{slug}", post(products::mutate_product))
        .route("/users", get(users::list_users))
        .route("/users", post(users::update_user))
        .layer(DefaultBodyLimit::max(
            max_image_bytes.saturating_add(FORM_OVERHEAD_BYTES),
        ))
        .with_state(state);

    let cors_layer = if cors_origins.contains(&"*".to_string()) {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .nest_service(
            &public_prefix,
            tower_http::services::ServeDir::new(uploads_path),
        )
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
