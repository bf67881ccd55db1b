use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;

/// Resolves session tokens into authenticated users. Session issuance (login)
/// happens outside this service.
pub struct SessionService {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    user_id: i64,
    username: String,
}

impl SessionService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Look up a session token and load the owning user with their
    /// capability set. Expired sessions are treated the same as unknown ones.
    pub async fn authenticate(&self, token: &str) -> Result<AuthenticatedUser> {
        let session = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT u.id AS user_id, u.username
            FROM sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.token = $1 AND s.expires_at > NOW()
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up session: {:?}", e);
            AppError::Database(e)
        })?;

        let session = session
            .ok_or_else(|| AppError::Unauthorized("Session is invalid or expired".to_string()))?;

        let permissions = sqlx::query_scalar::<_, String>(
            r#"
            SELECT permission
            FROM user_permissions
            WHERE user_id = $1
            ORDER BY permission
            "#,
        )
        .bind(session.user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load user permissions: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(AuthenticatedUser {
            id: session.user_id,
            username: session.username,
            permissions,
        })
    }
}
