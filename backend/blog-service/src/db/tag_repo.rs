use crate::error::AppError;
use crate::models::{Tag, TagWithCount};
use sqlx::PgPool;
use uuid::Uuid;

/// Create a tag. A title collision is reported as a conflict.
pub async fn create_tag(pool: &PgPool, title: &str) -> Result<Tag, AppError> {
    let created = sqlx::query_as::<_, Tag>(
        r#"
        INSERT INTO blog_tag (title)
        VALUES ($1)
        RETURNING id, title
        "#,
    )
    .bind(title)
    .fetch_one(pool)
    .await;

    match created {
        Ok(tag) => Ok(tag),
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
            AppError::Conflict(format!("tag `{}` already exists", title)),
        ),
        Err(e) => Err(e.into()),
    }
}

pub async fn find_tag_by_title(
    pool: &PgPool,
    title: &str,
) -> Result<Option<Tag>, sqlx::Error> {
    sqlx::query_as::<_, Tag>("SELECT id, title FROM blog_tag WHERE title = $1")
        .bind(title)
        .fetch_optional(pool)
        .await
}

pub async fn find_tags_by_ids(pool: &PgPool, tag_ids: &[Uuid]) -> Result<Vec<Tag>, sqlx::Error> {
    sqlx::query_as::<_, Tag>("SELECT id, title FROM blog_tag WHERE id = ANY($1) ORDER BY title")
        .bind(tag_ids)
        .fetch_all(pool)
        .await
}

/// Tags ordered by how many posts carry them
pub async fn get_popular_tags(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<TagWithCount>, sqlx::Error> {
    sqlx::query_as::<_, TagWithCount>(
        r#"
        SELECT t.id, t.title, COUNT(pt.post_id) AS amount_posts
        FROM blog_tag t
        LEFT JOIN blog_post_tags pt ON pt.tag_id = t.id
        GROUP BY t.id, t.title
        ORDER BY amount_posts DESC, t.title
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await
}

/// Tags of a single post, most used across the blog first
pub async fn get_post_tags_by_popularity(
    pool: &PgPool,
    post_id: Uuid,
) -> Result<Vec<TagWithCount>, sqlx::Error> {
    sqlx::query_as::<_, TagWithCount>(
        r#"
        SELECT t.id, t.title, COUNT(tagged.post_id) AS amount_posts
        FROM blog_post_tags pt
        JOIN blog_tag t ON t.id = pt.tag_id
        JOIN blog_post_tags tagged ON tagged.tag_id = t.id
        WHERE pt.post_id = $1
        GROUP BY t.id, t.title
        ORDER BY amount_posts DESC, t.title
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await
}
