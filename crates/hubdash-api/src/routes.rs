use axum::{
    http::{header, request::Parts, HeaderValue, Method},
    middleware,
    routing::{get, patch, post, put},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::warn;

use hubdash_shared::config::CorsSettings;

use crate::handlers::{auth, client_error, documentation, health, menu, network_test};
use crate::middleware::security_headers;
use crate::state::AppState;

/// Origins on the local machine (`localhost`, `127.0.0.1`, `[::1]`, any port).
fn is_local_origin(origin: &HeaderValue) -> bool {
    let Ok(origin) = origin.to_str() else {
        return false;
    };
    let Some((_, authority)) = origin.split_once("://") else {
        return false;
    };
    let authority = authority.split('/').next().unwrap_or_default();
    let host = if authority.starts_with('[') {
        authority.split_once(']').map(|(h, _)| &h[1..]).unwrap_or_default()
    } else {
        authority.split(':').next().unwrap_or_default()
    };
    matches!(host, "localhost" | "127.0.0.1" | "::1")
}

fn cors_layer(settings: &CorsSettings) -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE];

    if settings.allows_any_origin() {
        // Credentialed wildcard CORS is narrowed to local callers.
        let origin = if settings.credentials {
            AllowOrigin::predicate(|origin: &HeaderValue, _parts: &Parts| is_local_origin(origin))
        } else {
            AllowOrigin::any()
        };
        let layer = CorsLayer::new().allow_origin(origin).allow_methods(methods);
        return if settings.credentials {
            layer
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
                .allow_credentials(true)
        } else {
            layer.allow_headers(Any)
        };
    }

    let layer = CorsLayer::new()
        .allow_methods(methods)
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(settings.credentials);
    match settings.origin.parse::<HeaderValue>() {
        Ok(origin) => layer.allow_origin(origin),
        Err(_) => {
            warn!("Invalid CORS origin {:?}; cross-origin requests disabled", settings.origin);
            layer
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/system", get(health::system_health));

    let api_routes = Router::new()
        .route("/api/config", get(menu::get_config).post(menu::save_config))
        .route("/api/client-error", post(client_error::report_client_error))
        .route("/api/network-test", post(network_test::run_network_test))
        .route("/api/login", post(auth::login))
        .route("/api/logout", post(auth::logout))
        .route("/api/check-session", get(auth::check_session))
        .route("/api/user-info", get(auth::user_info))
        .route("/api/documentation", get(documentation::list_documentation))
        .route("/api/documentation/{id}", get(documentation::get_documentation))
        .route(
            "/api/menu-items",
            get(menu::list_menu_items).post(menu::create_menu_item),
        )
        .route(
            "/api/menu-items/{id}",
            put(menu::update_menu_item).delete(menu::delete_menu_item),
        )
        .route(
            "/api/documents",
            get(documentation::list_documents).post(documentation::create_document),
        )
        .route(
            "/api/documents/{id}",
            put(documentation::update_document).delete(documentation::delete_document),
        )
        .route(
            "/api/documents/{id}/publish",
            patch(documentation::publish_document),
        );

    Router::new()
        .merge(health_routes)
        .merge(api_routes)
        .layer(middleware::from_fn(security_headers))
        .layer(cors_layer(&state.config.cors))
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .with_state(state)
}
