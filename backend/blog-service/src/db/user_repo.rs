use crate::models::User;
use sqlx::PgPool;
use uuid::Uuid;

pub async fn find_user_by_id(pool: &PgPool, user_id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>("SELECT id, username, is_staff FROM auth_user WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Staff users, the only valid post authors
pub async fn get_staff_users(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT id, username, is_staff FROM auth_user WHERE is_staff ORDER BY username",
    )
    .fetch_all(pool)
    .await
}
