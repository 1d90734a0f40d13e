//! Route definitions for the spare-parts inventory API

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes (public)
        .nest("/auth", auth_routes())
        // Public stock board (unauthenticated, read-only)
        .route("/public/stock", get(handlers::get_public_stock))
        // Protected routes - spare-part catalog
        .nest("/spare-parts", spare_part_routes())
        // Protected routes - stock movements
        .nest("/stock-movements", stock_movement_routes())
        // Protected routes - purchasing need analysis
        .nest("/need-analysis", need_analysis_routes())
        // Protected routes - dashboard
        .nest("/dashboard", dashboard_routes())
        // Protected routes - stock notifications
        .nest("/notifications", notification_routes())
        // Protected routes - system settings
        .nest("/settings", settings_routes())
}

/// Authentication routes (public)
fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(handlers::login))
}

/// Spare-part catalog routes (protected)
fn spare_part_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_spare_parts).post(handlers::create_spare_part),
        )
        .route(
            "/:part_id",
            get(handlers::get_spare_part)
                .put(handlers::update_spare_part)
                .delete(handlers::delete_spare_part),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Stock-movement routes (protected)
fn stock_movement_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_stock_movements).post(handlers::record_stock_movement),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Need-analysis routes (protected)
fn need_analysis_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_need_analysis))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Dashboard routes (protected)
fn dashboard_routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(handlers::get_dashboard_stats))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Notification routes (protected)
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_notifications))
        .route("/count", get(handlers::get_notification_count))
        .route("/mark-all-read", put(handlers::mark_all_notifications_read))
        .route(
            "/:notification_key/read",
            put(handlers::mark_notification_read),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// System settings routes (protected, admin checked in handlers)
fn settings_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::get_settings).put(handlers::update_settings),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}
