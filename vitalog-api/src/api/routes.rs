use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::api::auth::auth_middleware;
use crate::api::handlers::{health, health_data};
use crate::api::AppState;
use crate::openapi::configure_swagger_routes;

/// Create the application router.
///
/// All collaborators arrive through `state`; the hosting layer decides
/// what backs them (SQLite in production, in-memory stores in tests).
pub fn create_app(state: AppState) -> Router {
    debug!("Creating application router");

    // Health data routes sit behind the bearer authentication middleware
    let healthdata_routes = Router::new()
        .route(
            "/",
            get(health_data::list_health_data).post(health_data::submit_health_data),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Public routes that don't require authentication
    let public_routes = Router::new().route("/health", get(health::health_check));

    let app = Router::new()
        .merge(public_routes)
        .nest("/healthdata/", healthdata_routes)
        .with_state(state)
        .merge(configure_swagger_routes());

    // Initialize health check uptime reporting
    health::initialize_server_start_time();

    configure_http_layers(app)
}

/// Apply CORS, request tracing, and security headers.
fn configure_http_layers(app: Router) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT]);

    app.layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::if_not_present(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=63072000; includeSubDomains"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
}
