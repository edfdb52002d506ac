//! Authenticated HTTP route registration for the dev server.

use super::*;

use axum::routing::{patch, post};

pub(super) fn authed_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/me", get(me))
        .route("/api/auth/logout", post(logout))
        .route("/api/commands", get(list_commands))
        .route("/api/commands/:name", patch(set_command_enabled))
        .route("/api/channel/list", get(list_channels))
        .route("/api/channel/:id/commands", patch(patch_channel_command))
        .route("/api/stats/overview", get(stats_overview))
        .route("/api/stats/commands", get(command_stats))
        .route("/api/stats/activity", get(activity))
        .layer(middleware::from_fn_with_state(state, require_bearer))
}
