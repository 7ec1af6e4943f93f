//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use super::common::ErrorBody;
use super::middleware::{auth_middleware, AuthState};
use super::modules::request_id::request_id_middleware;
use super::modules::{auth, health, info, items, metrics, users};
use crate::application::identity::UserService;
use crate::application::items::ItemService;
use crate::config::AppConfig;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::database::repositories::{ItemRepository, UserRepository};

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token from POST /token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        info::index,
        info::version,
        health::health_check,
        auth::login,
        users::get_me,
        users::create_user,
        users::list_users,
        users::get_user,
        items::create_item,
        items::list_items,
        items::get_item,
    ),
    components(
        schemas(
            ErrorBody,
            info::MessageResponse,
            info::VersionResponse,
            health::HealthResponse,
            health::HealthStatus,
            health::DatabaseHealth,
            auth::LoginForm,
            auth::TokenResponse,
            users::UserDto,
            users::CreateUserRequest,
            items::ItemDto,
            items::CreateItemRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Info", description = "Greeting and version"),
        (name = "Health", description = "Server health check endpoints"),
        (name = "Authentication", description = "OAuth2 password grant: exchange username and password for a bearer token"),
        (name = "Users", description = "User registration and lookup"),
        (name = "Items", description = "Items owned by the authenticated user"),
    ),
    info(
        title = "Hello Fastapi",
        description = "Users and their items behind bearer-token authentication",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

fn cors_layer(app_cfg: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = app_cfg
        .cors
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    // Credentials rule out wildcards, so methods and headers are mirrored.
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

/// Create the API router with all routes
pub fn create_api_router(
    db: DatabaseConnection,
    jwt_config: JwtConfig,
    app_cfg: &AppConfig,
    prometheus_handle: PrometheusHandle,
) -> Router {
    let user_service = Arc::new(UserService::new(
        Arc::new(UserRepository::new(db.clone())),
        jwt_config,
        app_cfg.security.bcrypt_cost,
    ));
    let item_service = Arc::new(ItemService::new(Arc::new(ItemRepository::new(db.clone()))));

    let auth_state = AuthState {
        user_service: user_service.clone(),
    };
    let require_auth = || middleware::from_fn_with_state(auth_state.clone(), auth_middleware);

    // Token endpoint (public)
    let token_routes = Router::new()
        .route("/token", post(auth::login))
        .with_state(auth_state.clone());

    // Users: registration is public, everything else needs a token.
    // `route_layer` only wraps the routes registered before it.
    let user_routes = Router::new()
        .route("/me", get(users::get_me))
        .route("/", get(users::list_users))
        .route("/{user_id}", get(users::get_user))
        .route_layer(require_auth())
        .route("/", post(users::create_user))
        .with_state(users::UserHandlerState { user_service });

    // Items (protected)
    let item_routes = Router::new()
        .route("/", get(items::list_items).post(items::create_item))
        .route("/{item_id}", get(items::get_item))
        .route_layer(require_auth())
        .with_state(items::ItemHandlerState { item_service });

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health::HealthState {
            db,
            started_at: Arc::new(Instant::now()),
        });

    let metrics_routes = Router::new()
        .route("/metrics", get(metrics::prometheus_metrics))
        .with_state(metrics::MetricsState {
            handle: prometheus_handle,
        });

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .route("/", get(info::index))
        .route("/version", get(info::version))
        .merge(health_routes)
        .merge(metrics_routes)
        .merge(token_routes)
        .nest("/users", user_routes)
        .nest("/items", item_routes)
        .layer(middleware::from_fn(metrics::http_metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(app_cfg))
        .layer(middleware::from_fn(request_id_middleware))
}
