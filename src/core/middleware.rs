use crate::core::error::AppError;
use crate::features::auth::services::SessionService;
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::Span;
use uuid::Uuid;

/// Name of the session cookie set by the (external) login surface.
pub const SESSION_COOKIE: &str = "lavka_session";

/// Request ID generator using UUID v7 (time-ordered)
#[derive(Clone, Copy)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string();
        Some(RequestId::new(HeaderValue::from_str(&id).unwrap()))
    }
}

/// Custom MakeSpan that includes request_id in the tracing span
#[derive(Clone, Debug)]
pub struct MakeSpanWithRequestId;

impl<B> tower_http::trace::MakeSpan<B> for MakeSpanWithRequestId {
    fn make_span(&mut self, request: &axum::http::Request<B>) -> Span {
        let request_id = request
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");

        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    }
}

/// Pull the session token from the request: `Authorization: Bearer <token>`
/// wins, falling back to the session cookie.
fn extract_session_token(req: &Request) -> Option<String> {
    if let Some(auth_header) = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
    {
        if let Some(token) = auth_header.strip_prefix("Bearer ") {
            if !token.is_empty() {
                return Some(token.to_string());
            }
        }
    }

    req.headers()
        .get(header::COOKIE)
        .and_then(|h| h.to_str().ok())
        .and_then(|cookies| {
            cookies.split(';').find_map(|pair| {
                let (name, value) = pair.trim().split_once('=')?;
                (name == SESSION_COOKIE && !value.is_empty()).then(|| value.to_string())
            })
        })
}

pub async fn auth_middleware(
    State(sessions): State<Arc<SessionService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_session_token(&req)
        .ok_or_else(|| AppError::Unauthorized("Authentication required".to_string()))?;

    let user = sessions.authenticate(&token).await?;

    // Insert authenticated user into request extensions
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request_with_headers(headers: &[(header::HeaderName, &str)]) -> Request {
        let mut builder = axum::http::Request::builder().uri("/");
        for (name, value) in headers {
            builder = builder.header(name, *value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_bearer_token_extracted() {
        let req = request_with_headers(&[(header::AUTHORIZATION, "Bearer abc123")]);
        assert_eq!(extract_session_token(&req), Some("abc123".to_string()));
    }

    #[test]
    fn test_cookie_token_extracted() {
        let req = request_with_headers(&[(header::COOKIE, "theme=dark; lavka_session=tok-9")]);
        assert_eq!(extract_session_token(&req), Some("tok-9".to_string()));
    }

    #[test]
    fn test_bearer_wins_over_cookie() {
        let req = request_with_headers(&[
            (header::AUTHORIZATION, "Bearer header-token"),
            (header::COOKIE, "lavka_session=cookie-token"),
        ]);
        assert_eq!(
            extract_session_token(&req),
            Some("header-token".to_string())
        );
    }

    #[test]
    fn test_missing_token() {
        let req = request_with_headers(&[(header::COOKIE, "theme=dark")]);
        assert_eq!(extract_session_token(&req), None);
    }
}
