use axum::{
    Router,
    http::{HeaderName, HeaderValue, Method},
    routing::get,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use std::sync::Arc;

use crate::{
    config::{Config, ConfigError},
    handlers::rest,
    service::NoteService,
};

pub fn build_router(service: Arc<NoteService>, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(rest::health_check))
        .route("/notes", get(rest::get_all_notes).post(rest::create_note))
        .route(
            "/notes/{id}",
            get(rest::get_one_note)
                .put(rest::update_note)
                .delete(rest::delete_note),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", rest::ApiDoc::openapi()))
        .with_state(service)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn invalid(kind: &'static str, value: &str) -> ConfigError {
    ConfigError::Cors {
        kind,
        value: value.to_string(),
    }
}

/// Builds the CORS layer from the configured allow-lists.
///
/// # Errors
///
/// Returns an error if an origin, method or header does not parse. A `*`
/// origin is rejected since credentials may be enabled.
pub fn cors_layer(config: &Config) -> Result<CorsLayer, ConfigError> {
    let mut origins = vec![];
    for origin in config.cors_allowed_origins.iter().map(|o| o.trim()) {
        if origin == "*" {
            return Err(invalid("origin", origin));
        }
        origins.push(
            origin
                .parse::<HeaderValue>()
                .map_err(|_| invalid("origin", origin))?,
        );
    }

    let mut methods = vec![];
    for method in config.cors_allowed_methods.iter().map(|m| m.trim()) {
        methods.push(
            method
                .parse::<Method>()
                .map_err(|_| invalid("method", method))?,
        );
    }

    let mut headers = vec![];
    for header in config.cors_allowed_headers.iter().map(|h| h.trim()) {
        headers.push(
            header
                .parse::<HeaderName>()
                .map_err(|_| invalid("header", header))?,
        );
    }

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers(headers)
        .allow_credentials(config.cors_allow_credentials))
}
