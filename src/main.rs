use axum::http::HeaderValue;
use axum::{routing::get, Router};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use contact_api_rust::config;
use contact_api_rust::database::DatabaseManager;
use contact_api_rust::handlers;
use contact_api_rust::middleware::token_auth_middleware;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting contact API in {:?} mode", config.environment);

    // A database that is down at startup should not keep the server from
    // binding; /health reports degraded until it comes back.
    if let Err(e) = DatabaseManager::migrate().await {
        tracing::warn!("migrations not applied at startup: {}", e);
    }

    let app = app();

    // Allow tests or deployments to override port via env
    let port = std::env::var("CONTACT_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("contact API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app() -> Router {
    let config = config::config();

    let mut app = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_routes())
        .merge(protected_routes());

    if config.security.enable_cors {
        app = app.layer(cors_layer());
    }
    if config.api.enable_request_logging {
        app = app.layer(TraceLayer::new_for_http());
    }
    app
}

fn public_routes() -> Router {
    use axum::routing::post;

    Router::new()
        // Registration and token acquisition need no session
        .route("/api/users", post(handlers::users::register))
        .route("/api/auth/login", post(handlers::auth::login))
}

fn protected_routes() -> Router {
    use axum::routing::{delete, get, post};

    Router::new()
        .route(
            "/api/users/current",
            get(handlers::users::current_get).patch(handlers::users::current_update),
        )
        .route("/api/auth/logout", delete(handlers::auth::logout))
        // Contact collection and record operations
        .route(
            "/api/contacts",
            post(handlers::contacts::create).get(handlers::contacts::search),
        )
        .route(
            "/api/contacts/:contact_id",
            get(handlers::contacts::get)
                .put(handlers::contacts::update)
                .delete(handlers::contacts::delete),
        )
        // Addresses, nested under their owning contact
        .route(
            "/api/contacts/:contact_id/addresses",
            post(handlers::addresses::create).get(handlers::addresses::list),
        )
        .route(
            "/api/contacts/:contact_id/addresses/:address_id",
            get(handlers::addresses::get)
                .put(handlers::addresses::update)
                .delete(handlers::addresses::delete),
        )
        // Every route above requires a valid session token
        .route_layer(axum::middleware::from_fn(token_auth_middleware))
}

fn cors_layer() -> CorsLayer {
    let security = &config::config().security;
    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "data": {
            "name": "Contact API (Rust)",
            "version": version,
            "description": "Contact book REST API with per-user ownership scoping",
            "endpoints": {
                "home": "/ (public)",
                "register": "POST /api/users (public)",
                "login": "POST /api/auth/login (public)",
                "logout": "DELETE /api/auth/logout (protected)",
                "users": "GET|PATCH /api/users/current (protected)",
                "contacts": "/api/contacts[/:contactId] (protected)",
                "addresses": "/api/contacts/:contactId/addresses[/:addressId] (protected)",
            }
        }
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "errors": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}
