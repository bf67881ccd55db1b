use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::contacts::handlers::contact_handler;
use crate::features::contacts::services::ContactService;

/// Contact form routes (public)
pub fn routes(service: Arc<ContactService>) -> Router {
    Router::new()
        .route(
            "/contacts",
            get(contact_handler::contact_form).post(contact_handler::submit_contact),
        )
        .with_state(service)
}
