use axum::Router;

pub mod medicines;
pub mod system;

/// Router for all inventory endpoints.
pub fn router() -> Router {
    Router::new().nest("/medicines", medicines::router())
}
