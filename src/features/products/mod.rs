//! Product catalog feature.
//!
//! Products carry an embedded batch of version records, edited together with
//! the parent in one transaction. Editing is permission-gated: the owner gets
//! the full field set, a full-capability moderator a restricted one.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/` | No | Product list |
//! | GET | `/products/{id}` | No | Product detail with versions |
//! | GET+POST | `/products/create` | Yes | Create product + initial versions |
//! | GET+POST | `/products/{id}/update` | Yes | Edit product + versions |

pub mod dtos;
pub mod formset;
pub mod handlers;
pub mod models;
pub mod policy;
pub mod routes;
pub mod services;

pub use handlers::ProductsState;
pub use services::ProductService;
