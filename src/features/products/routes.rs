use axum::{routing::get, Router};

use crate::features::products::handlers::product_handler;
use crate::features::products::handlers::ProductsState;

/// Public product pages
pub fn routes(state: ProductsState) -> Router {
    Router::new()
        .route("/", get(product_handler::list_products))
        .route("/products/{id}", get(product_handler::product_detail))
        .with_state(state)
}

/// Product pages requiring a session (the auth middleware is layered on by
/// the caller)
pub fn protected_routes(state: ProductsState) -> Router {
    Router::new()
        .route(
            "/products/create",
            get(product_handler::new_product_form).post(product_handler::create_product),
        )
        .route(
            "/products/{id}/update",
            get(product_handler::edit_product_form).post(product_handler::update_product),
        )
        .with_state(state)
}
