#[cfg(test)]
use crate::features::auth::model::{
    AuthenticatedUser, PERM_CANCEL_PUBLICATION, PERM_EDIT_CATEGORY, PERM_EDIT_DESCRIPTION,
};

#[cfg(test)]
use axum::{extract::Request, middleware::Next, response::Response, Router};

#[cfg(test)]
pub fn create_user(id: i64) -> AuthenticatedUser {
    AuthenticatedUser {
        id,
        username: format!("user-{}", id),
        permissions: vec![],
    }
}

#[cfg(test)]
pub fn create_moderator(id: i64) -> AuthenticatedUser {
    AuthenticatedUser {
        id,
        username: format!("moderator-{}", id),
        permissions: vec![
            PERM_EDIT_DESCRIPTION.to_string(),
            PERM_EDIT_CATEGORY.to_string(),
            PERM_CANCEL_PUBLICATION.to_string(),
        ],
    }
}

/// An actor holding only two of the three product capabilities.
#[cfg(test)]
pub fn create_partial_moderator(id: i64) -> AuthenticatedUser {
    AuthenticatedUser {
        id,
        username: format!("partial-{}", id),
        permissions: vec![
            PERM_EDIT_DESCRIPTION.to_string(),
            PERM_EDIT_CATEGORY.to_string(),
        ],
    }
}

#[cfg(test)]
async fn inject_user_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(create_user(1));
    next.run(request).await
}

#[cfg(test)]
#[allow(dead_code)]
pub fn with_user_auth(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_user_middleware))
}
