use axum::{http::Method, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod state;
pub mod submissions;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // Forms are posted from the public site, so allow any origin.
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    Router::new()
        .merge(submissions::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
