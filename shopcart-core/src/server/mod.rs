//! Server initialization and routing

use crate::api;
use crate::config::Config;
use crate::jwt::JwtManager;
use crate::middleware::{ObservabilityLayer, SanitizedMakeSpan};
use crate::repository::{
    cart::CartRepositoryImpl, category::CategoryRepositoryImpl, product::ProductRepositoryImpl,
    user::UserRepositoryImpl,
};
use crate::service::{AuthService, CartService, CategoryService, ProductService, UserService};
use crate::state::HasServices;
use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sqlx::{mysql::MySqlPoolOptions, MySqlPool};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db_pool: MySqlPool,
    pub jwt_manager: JwtManager,
    pub auth_service: Arc<AuthService<UserRepositoryImpl>>,
    pub user_service: Arc<UserService<UserRepositoryImpl>>,
    pub category_service: Arc<CategoryService<CategoryRepositoryImpl>>,
    pub product_service: Arc<ProductService<ProductRepositoryImpl, CategoryRepositoryImpl>>,
    pub cart_service: Arc<CartService<CartRepositoryImpl>>,
}

impl AppState {
    /// Wire repositories and services over one connection pool
    pub fn new(config: Config, db_pool: MySqlPool) -> Self {
        let jwt_manager = JwtManager::new(config.jwt.clone());

        let user_repo = Arc::new(UserRepositoryImpl::new(db_pool.clone()));
        let category_repo = Arc::new(CategoryRepositoryImpl::new(db_pool.clone()));
        let product_repo = Arc::new(ProductRepositoryImpl::new(db_pool.clone()));
        let cart_repo = Arc::new(CartRepositoryImpl::new(db_pool.clone()));

        Self {
            config: Arc::new(config),
            db_pool,
            auth_service: Arc::new(AuthService::new(user_repo.clone(), jwt_manager.clone())),
            user_service: Arc::new(UserService::new(user_repo)),
            category_service: Arc::new(CategoryService::new(category_repo.clone())),
            product_service: Arc::new(ProductService::new(product_repo, category_repo)),
            cart_service: Arc::new(CartService::new(cart_repo)),
            jwt_manager,
        }
    }
}

/// Implement HasServices trait for production AppState
impl HasServices for AppState {
    type UserRepo = UserRepositoryImpl;
    type CategoryRepo = CategoryRepositoryImpl;
    type ProductRepo = ProductRepositoryImpl;
    type CartRepo = CartRepositoryImpl;

    fn config(&self) -> &Config {
        &self.config
    }

    fn jwt_manager(&self) -> &JwtManager {
        &self.jwt_manager
    }

    fn auth_service(&self) -> &AuthService<Self::UserRepo> {
        &self.auth_service
    }

    fn user_service(&self) -> &UserService<Self::UserRepo> {
        &self.user_service
    }

    fn category_service(&self) -> &CategoryService<Self::CategoryRepo> {
        &self.category_service
    }

    fn product_service(&self) -> &ProductService<Self::ProductRepo, Self::CategoryRepo> {
        &self.product_service
    }

    fn cart_service(&self) -> &CartService<Self::CartRepo> {
        &self.cart_service
    }

    async fn check_ready(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.db_pool).await.is_ok()
    }
}

/// Run the HTTP server
pub async fn run(config: Config, prometheus_handle: Option<PrometheusHandle>) -> Result<()> {
    // Create database connection pool
    let db_pool = MySqlPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await?;

    info!("Connected to database");

    let http_addr = config.http_addr();
    let state = AppState::new(config, db_pool);

    let metrics_router = Router::new()
        .route("/metrics", get(api::metrics::metrics_handler))
        .with_state(Arc::new(prometheus_handle));

    let app = build_router(state).merge(metrics_router);

    let listener = TcpListener::bind(&http_addr).await?;
    info!("HTTP server started on {}", http_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}

/// Build the HTTP router with generic state type
///
/// This function is generic over the state type, allowing it to work with
/// both production `AppState` and test implementations that implement `HasServices`.
pub fn build_router<S: HasServices>(state: S) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health endpoints
        .route("/health", get(api::health::health))
        .route("/ready", get(api::health::ready::<S>))
        // Auth endpoints
        .route("/api/auth/signup", post(api::auth::signup::<S>))
        .route("/api/auth/login", post(api::auth::login::<S>))
        .route("/api/auth/logout", post(api::auth::logout))
        // Profile
        .route(
            "/api/users",
            get(api::user::get_profile::<S>).patch(api::user::update_profile::<S>),
        )
        // Catalog
        .route(
            "/api/categories",
            get(api::category::list::<S>).post(api::category::create::<S>),
        )
        .route(
            "/api/categories/{id}",
            get(api::category::get::<S>)
                .patch(api::category::update::<S>)
                .delete(api::category::delete::<S>),
        )
        .route(
            "/api/products",
            get(api::product::list::<S>).post(api::product::create::<S>),
        )
        .route(
            "/api/products/{id}",
            get(api::product::get::<S>)
                .patch(api::product::update::<S>)
                .delete(api::product::delete::<S>),
        )
        // Carts
        .route(
            "/api/cart",
            get(api::cart::get_own::<S>)
                .post(api::cart::create::<S>)
                .delete(api::cart::delete_own::<S>),
        )
        .route(
            "/api/cart/items/{cart_id}",
            get(api::cart::list_items::<S>),
        )
        // POST takes a cart id, the other verbs a cart item id
        .route(
            "/api/cartItems/{id}",
            post(api::cart_item::create::<S>)
                .get(api::cart_item::get::<S>)
                .patch(api::cart_item::update::<S>)
                .delete(api::cart_item::delete::<S>),
        )
        // Add middleware
        .layer(ObservabilityLayer)
        .layer(TraceLayer::new_for_http().make_span_with(SanitizedMakeSpan))
        .layer(cors)
        .with_state(state)
}
