pub mod handlers;
pub mod state;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::TraceLayer,
};
use std::sync::Arc;

use crate::{
    config::Settings,
    service::ServiceContext,
};
use state::AppState;

pub fn create_app(service_context: Arc<ServiceContext>, settings: Arc<Settings>) -> Router {
    let webhook_route = format!("/{}", settings.bot.webhook_function.trim_matches('/'));
    let app_state = AppState::new(service_context, settings);

    Router::new()
        // Root and health endpoints
        .route("/", get(handlers::root::root))
        .route("/health", get(handlers::root::health_check))

        // Stateless function endpoints
        .nest("/functions/v1", function_routes(&webhook_route))

        // Announcement lifecycle
        .nest("/api/announcements", announcement_routes())

        .with_state(app_state)

        // Every response, preflight included, carries `Access-Control-Allow-Origin: *`
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn function_routes(webhook_route: &str) -> Router<AppState> {
    Router::new()
        .route("/validate-announcement", post(handlers::functions::validate_announcement))
        .route("/enhance-announcement", post(handlers::functions::enhance_announcement))
        .route("/sync-bot-commands", post(handlers::functions::sync_bot_commands))
        .route("/configure-bot", post(handlers::functions::configure_bot))
        .route(
            "/init-storage",
            get(handlers::functions::init_storage).post(handlers::functions::init_storage),
        )
        // Receiver path follows `bot.webhook_function`, the name used in the registered URL
        .route(webhook_route, post(handlers::functions::bot_webhook))
}

fn announcement_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::announcements::list).post(handlers::announcements::create))
        .route(
            "/:id",
            get(handlers::announcements::get)
                .put(handlers::announcements::update)
                .delete(handlers::announcements::delete),
        )
        .route("/:id/submit", post(handlers::announcements::submit))
}
