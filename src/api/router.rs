use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, add_comment, approve_booking, create_booking, get_booking, get_item, list_bookings,
    list_items, list_owner_bookings,
};

/// Creates the API router with all booking and item endpoints
///
/// Booking endpoints:
/// - POST /bookings - Request a booking
/// - PATCH /bookings/:id?approved= - Approve or reject a booking
/// - GET /bookings/:id - Get booking details
/// - GET /bookings - List bookings as booker
/// - GET /bookings/owner - List bookings as item owner
///
/// Item endpoints:
/// - GET /items/:id - Item with last/next booking and comments
/// - GET /items - Owner's items
/// - POST /items/:id/comment - Post a comment
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        // Booking endpoints
        .route("/bookings", post(create_booking).get(list_bookings))
        .route("/bookings/owner", get(list_owner_bookings))
        .route("/bookings/:id", get(get_booking).patch(approve_booking))
        // Item endpoints
        .route("/items", get(list_items))
        .route("/items/:id", get(get_item))
        .route("/items/:id/comment", post(add_comment))
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
