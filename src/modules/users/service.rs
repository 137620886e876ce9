use tracing::instrument;

use journal_auth::AuthKey;
use journal_core::{AppError, Role, UserId};
use journal_db::DbPool;
use journal_models::User;

pub struct UserService;

impl UserService {
    /// Looks up the (id, email, role) descriptor for the given email.
    #[instrument(skip(db))]
    pub async fn resolve_user_role(db: &DbPool, email: &str) -> Result<AuthKey, AppError> {
        let row = sqlx::query_as::<_, (UserId, String, Role)>(
            "SELECT id, email, role FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(db)
        .await?;

        row.map(|(id, email, role)| AuthKey { id, email, role })
            .ok_or_else(|| AppError::not_found("user not found"))
    }

    #[instrument(skip(db))]
    pub async fn get_user(db: &DbPool, user_id: UserId) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"SELECT id, last_name, first_name, patronymic, email, role
               FROM users
               WHERE id = ?"#,
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found("user not found"))
    }
}
