pub mod cache;
pub mod models;
pub mod services;

pub use cache::CategoryCache;
pub use services::CategoryService;
