use axum::{
    extract::{FromRequestParts, Multipart},
    http::request::Parts,
};

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use crate::modules::storage::UploadedPhoto;

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))
    }
}

/// Extractor for routes that render differently for signed-in visitors but
/// stay reachable without a session.
pub struct OptionalUser(pub Option<AuthenticatedUser>);

impl<S> FromRequestParts<S> for OptionalUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalUser(
            parts.extensions.get::<AuthenticatedUser>().cloned(),
        ))
    }
}

/// Drain a multipart form into plain text fields plus an optional uploaded
/// photo taken from `photo_field`. A file part with no filename or no bytes
/// (an untouched file input) counts as absent.
pub async fn read_form_fields(
    multipart: &mut Multipart,
    photo_field: &str,
) -> Result<(Vec<(String, String)>, Option<UploadedPhoto>), AppError> {
    let mut fields = Vec::new();
    let mut photo = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read multipart data: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();

        if name == photo_field {
            let file_name = field.file_name().map(|s| s.to_string()).unwrap_or_default();
            let content_type = field
                .content_type()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "application/octet-stream".to_string());
            let data = field.bytes().await.map_err(|e| {
                AppError::BadRequest(format!("Failed to read uploaded file: {}", e))
            })?;

            if !file_name.is_empty() && !data.is_empty() {
                photo = Some(UploadedPhoto {
                    data: data.to_vec(),
                    file_name,
                    content_type,
                });
            }
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read field '{}': {}", name, e)))?;
            fields.push((name, value));
        }
    }

    Ok((fields, photo))
}
