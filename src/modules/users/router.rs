use axum::{
    Router,
    routing::{get, put},
};

use crate::modules::users::controller::{get_accounts, get_profile, update_subscription};
use crate::state::AppState;

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_accounts))
        .route("/{id}/subscription", put(update_subscription))
}

pub fn init_profile_router() -> Router<AppState> {
    Router::new().route("/", get(get_profile))
}
