//! Actor identity for the workflow layer.
//!
//! The auth middleware in `core::middleware` resolves a session token through
//! [`SessionService`] and inserts an [`model::AuthenticatedUser`] into the
//! request extensions. Credential verification and session issuance live
//! outside this service.

pub mod model;
pub mod services;

pub use services::SessionService;
