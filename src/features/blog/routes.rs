use axum::{routing::get, Router};

use crate::features::blog::handlers::blog_handler;
use crate::features::blog::handlers::BlogState;

/// Blog pages. The publish toggle answers GET as well as POST, matching the
/// links the list page renders.
pub fn routes(state: BlogState) -> Router {
    Router::new()
        .route("/blog", get(blog_handler::list_posts))
        .route(
            "/blog/create",
            get(blog_handler::new_post_form).post(blog_handler::create_post),
        )
        .route("/blog/{id}", get(blog_handler::post_detail))
        .route(
            "/blog/{id}/update",
            get(blog_handler::edit_post_form).post(blog_handler::update_post),
        )
        .route(
            "/blog/{id}/delete",
            get(blog_handler::delete_post_confirm).post(blog_handler::delete_post),
        )
        .route(
            "/blog/{id}/toggle",
            get(blog_handler::toggle_publish).post(blog_handler::toggle_publish),
        )
        .with_state(state)
}
