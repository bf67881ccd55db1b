//! Blog feature: published-post listing, view-counted detail reads, create
//! and update with a slug derived from the title, delete with confirmation,
//! and a publish toggle.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/blog` | Published posts |
//! | GET | `/blog/{id}` | Post detail (bumps the view counter) |
//! | GET+POST | `/blog/create` | Create post |
//! | GET+POST | `/blog/{id}/update` | Edit post |
//! | GET+POST | `/blog/{id}/delete` | Confirm + delete post |
//! | GET+POST | `/blog/{id}/toggle` | Flip the published flag |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use handlers::BlogState;
pub use services::BlogService;
