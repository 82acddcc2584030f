use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get},
};

use crate::modules::materials::controller::{
    delete_material, list_materials, list_premium_materials, upload_material,
};
use crate::state::AppState;

pub fn init_materials_router(state: &AppState) -> Router<AppState> {
    // Body limit = configured max file size plus headroom for multipart
    // framing and the text fields, so an oversized body is cut off while
    // streaming instead of being buffered whole.
    let body_limit = state.upload_config.max_file_size + 64 * 1024;

    Router::new()
        .route("/", get(list_materials).post(upload_material))
        .route("/premium", get(list_premium_materials))
        .route("/{id}", delete(delete_material))
        .layer(DefaultBodyLimit::max(body_limit))
}
