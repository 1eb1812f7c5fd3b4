use crate::db::{PostOrder, PostQuery};
use crate::models::{NewPost, Post, PostSummary, Tag};
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::collections::HashMap;
use uuid::Uuid;

/// Aggregates are joined as pre-grouped subqueries so that likes and comments
/// don't multiply each other's counts.
const POST_LISTING_SELECT: &str = r#"
    SELECT p.id, p.title, p.text, p.slug, p.image, p.published_at,
           u.username AS author,
           COALESCE(l.amount, 0) AS amount_likes,
           COALESCE(c.amount, 0) AS amount_comments
    FROM blog_post p
    JOIN auth_user u ON u.id = p.author_id
    LEFT JOIN (
        SELECT post_id, COUNT(*) AS amount FROM blog_post_likes GROUP BY post_id
    ) l ON l.post_id = p.id
    LEFT JOIN (
        SELECT post_id, COUNT(*) AS amount FROM blog_comment GROUP BY post_id
    ) c ON c.post_id = p.id
    WHERE TRUE"#;

#[derive(Debug, sqlx::FromRow)]
struct PostRow {
    id: Uuid,
    title: String,
    text: String,
    slug: String,
    image: Option<String>,
    published_at: DateTime<Utc>,
    author: String,
    amount_likes: i64,
    amount_comments: i64,
}

impl PostRow {
    fn into_summary(self, tags: Vec<Tag>) -> PostSummary {
        PostSummary {
            id: self.id,
            title: self.title,
            text: self.text,
            slug: self.slug,
            image: self.image,
            published_at: self.published_at,
            author: self.author,
            amount_likes: self.amount_likes,
            amount_comments: self.amount_comments,
            tags,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PostTagRow {
    post_id: Uuid,
    id: Uuid,
    title: String,
}

/// Build the single statement behind a post listing
pub fn build_post_listing(query: &PostQuery) -> QueryBuilder<'static, Postgres> {
    let mut builder = QueryBuilder::new(POST_LISTING_SELECT);

    if let Some(tag) = &query.tag {
        builder.push(
            " AND EXISTS (SELECT 1 FROM blog_post_tags pt JOIN blog_tag t ON t.id = pt.tag_id \
             WHERE pt.post_id = p.id AND t.title = ",
        );
        builder.push_bind(tag.clone());
        builder.push(")");
    }

    if let Some(slug) = &query.slug {
        builder.push(" AND p.slug = ");
        builder.push_bind(slug.clone());
    }

    if let Some(year) = query.year {
        builder.push(" AND CAST(EXTRACT(YEAR FROM p.published_at AT TIME ZONE 'UTC') AS INTEGER) = ");
        builder.push_bind(year);
    }

    builder.push(match query.order {
        PostOrder::Popular => " ORDER BY amount_likes DESC, p.published_at DESC, p.id",
        PostOrder::Recent => " ORDER BY p.published_at DESC, p.id",
        PostOrder::Chronological => " ORDER BY p.published_at ASC, p.id",
    });

    if let Some(limit) = query.limit {
        builder.push(" LIMIT ");
        builder.push_bind(limit);
    }

    builder
}

/// Run a post listing: one statement for posts and counts, one for the tags
/// of the whole page
pub async fn list_posts(pool: &PgPool, query: &PostQuery) -> Result<Vec<PostSummary>, sqlx::Error> {
    let mut builder = build_post_listing(query);
    let rows = builder
        .build_query_as::<PostRow>()
        .fetch_all(pool)
        .await?;

    let post_ids: Vec<Uuid> = rows.iter().map(|row| row.id).collect();
    let mut tags = get_tags_for_posts(pool, &post_ids).await?;

    let posts = rows
        .into_iter()
        .map(|row| {
            let post_tags = tags.remove(&row.id).unwrap_or_default();
            row.into_summary(post_tags)
        })
        .collect();

    Ok(posts)
}

/// Tags of several posts at once, each list ordered by title
pub async fn get_tags_for_posts(
    pool: &PgPool,
    post_ids: &[Uuid],
) -> Result<HashMap<Uuid, Vec<Tag>>, sqlx::Error> {
    if post_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = sqlx::query_as::<_, PostTagRow>(
        r#"
        SELECT pt.post_id, t.id, t.title
        FROM blog_post_tags pt
        JOIN blog_tag t ON t.id = pt.tag_id
        WHERE pt.post_id = ANY($1)
        ORDER BY t.title
        "#,
    )
    .bind(post_ids)
    .fetch_all(pool)
    .await?;

    let mut grouped: HashMap<Uuid, Vec<Tag>> = HashMap::with_capacity(post_ids.len());
    for row in rows {
        grouped.entry(row.post_id).or_default().push(Tag {
            id: row.id,
            title: row.title,
        });
    }

    Ok(grouped)
}

pub async fn find_post_by_id(pool: &PgPool, post_id: Uuid) -> Result<Option<Post>, sqlx::Error> {
    sqlx::query_as::<_, Post>(
        r#"
        SELECT id, title, text, slug, image, published_at, author_id
        FROM blog_post
        WHERE id = $1
        "#,
    )
    .bind(post_id)
    .fetch_optional(pool)
    .await
}

/// Create a post and link its tags in one transaction
pub async fn create_post(pool: &PgPool, post: &NewPost) -> Result<Post, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let created = sqlx::query_as::<_, Post>(
        r#"
        INSERT INTO blog_post (title, text, slug, image, published_at, author_id)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, title, text, slug, image, published_at, author_id
        "#,
    )
    .bind(&post.title)
    .bind(&post.text)
    .bind(&post.slug)
    .bind(&post.image)
    .bind(post.published_at)
    .bind(post.author_id)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO blog_post_tags (post_id, tag_id)
        SELECT $1, UNNEST($2::uuid[])
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(created.id)
    .bind(&post.tag_ids)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    Ok(created)
}
