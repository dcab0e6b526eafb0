use axum::{
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use axum::http::header::CACHE_CONTROL;
use axum::http::HeaderValue;

use crate::models::AppState;
use crate::handlers;

pub fn build_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/", get(handlers::create::create_get).post(handlers::create::create_post))
        .route("/manage", get(handlers::manage::manage_get).post(handlers::manage::manage_post))
        .route_layer(axum::middleware::from_fn_with_state(state.clone(), handlers::middleware::auth_middleware));

    Router::new()
        .route("/logout", get(handlers::auth::logout_get))
        .route("/static/styles.css", get(handlers::system::stylesheet_get))
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                // Pages reflect live host state; never serve them from cache.
                .layer(SetResponseHeaderLayer::if_not_present(
                    CACHE_CONTROL,
                    HeaderValue::from_static("no-store"),
                )),
        )
        .with_state(state)
}
