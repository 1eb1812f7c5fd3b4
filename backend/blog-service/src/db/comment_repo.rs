use crate::models::{Comment, CommentWithAuthor, NewComment};
use sqlx::PgPool;
use uuid::Uuid;

/// Create a new comment on a post
pub async fn create_comment(pool: &PgPool, comment: &NewComment) -> Result<Comment, sqlx::Error> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        INSERT INTO blog_comment (post_id, author_id, text, published_at)
        VALUES ($1, $2, $3, $4)
        RETURNING id, post_id, author_id, text, published_at
        "#,
    )
    .bind(comment.post_id)
    .bind(comment.author_id)
    .bind(&comment.text)
    .bind(comment.published_at)
    .fetch_one(pool)
    .await?;

    Ok(comment)
}

/// Get all comments for a post with their authors, oldest first
pub async fn get_comments_by_post(
    pool: &PgPool,
    post_id: Uuid,
) -> Result<Vec<CommentWithAuthor>, sqlx::Error> {
    let comments = sqlx::query_as::<_, CommentWithAuthor>(
        r#"
        SELECT c.id, c.text, c.published_at, u.username AS author
        FROM blog_comment c
        JOIN auth_user u ON u.id = c.author_id
        WHERE c.post_id = $1
        ORDER BY c.published_at ASC, c.id
        "#,
    )
    .bind(post_id)
    .fetch_all(pool)
    .await?;

    Ok(comments)
}

/// Count comments for a post
pub async fn count_comments_by_post(pool: &PgPool, post_id: Uuid) -> Result<i64, sqlx::Error> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM blog_comment WHERE post_id = $1")
        .bind(post_id)
        .fetch_one(pool)
        .await?;

    Ok(count)
}
