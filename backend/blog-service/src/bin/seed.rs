//! Database seed script: staff author, readers, tags, posts, comments and likes
//! Run with: cargo run --bin seed

use blog_service::admin::AdminService;
use blog_service::db::{PgBlogRepository, MIGRATOR};
use blog_service::models::{NewComment, NewPost};
use chrono::{Duration, TimeZone, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

const TAGS: &[&str] = &["Путешествия", "Природа", "Tech", "Рецепты"];

const POSTS: &[(&str, &str, &[&str])] = &[
    ("Осень в горах", "autumn-in-the-mountains", &["путешествия", "природа"]),
    ("Лучший борщ", "best-borscht", &["рецепты"]),
    ("Почему Rust", "why-rust", &["tech"]),
    ("Побережье Байкала", "baikal-shore", &["путешествия"]),
    ("Грибной сезон", "mushroom-season", &["природа", "рецепты"]),
    ("Домашний сервер", "home-server", &["tech"]),
];

async fn upsert_user(pool: &PgPool, username: &str, is_staff: bool) -> anyhow::Result<Uuid> {
    let (id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO auth_user (username, is_staff)
        VALUES ($1, $2)
        ON CONFLICT (username) DO UPDATE SET is_staff = EXCLUDED.is_staff
        RETURNING id
        "#,
    )
    .bind(username)
    .bind(is_staff)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "postgresql://localhost/sensive_blog".to_string());

    println!("Connecting to database...");

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await?;

    println!("Connected successfully!");

    MIGRATOR.run(&pool).await?;

    let (existing,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM blog_post")
        .fetch_one(&pool)
        .await?;
    if existing > 0 {
        println!("Database already has {} posts, nothing to do.", existing);
        return Ok(());
    }

    let editor = upsert_user(&pool, "editor", true).await?;
    let mut readers = Vec::new();
    for name in ["anna", "boris", "vera"] {
        readers.push(upsert_user(&pool, name, false).await?);
    }

    let admin = AdminService::new(Arc::new(PgBlogRepository::new(pool.clone())));

    println!("Creating tags...");
    let mut tags = Vec::new();
    for title in TAGS {
        tags.push(admin.save_tag(title).await?);
    }

    println!("Creating posts...");
    let start = Utc
        .with_ymd_and_hms(2023, 9, 1, 10, 0, 0)
        .single()
        .ok_or_else(|| anyhow::anyhow!("invalid seed start date"))?;

    for (index, (title, slug, tag_titles)) in POSTS.iter().enumerate() {
        let tag_ids = tags
            .iter()
            .filter(|tag| tag_titles.contains(&tag.title.as_str()))
            .map(|tag| tag.id)
            .collect();
        let published_at = start + Duration::days(index as i64 * 45);

        let post = admin
            .save_post(NewPost {
                title: title.to_string(),
                text: format!("{}.\nТекст публикации «{}».", title, title),
                slug: slug.to_string(),
                image: None,
                published_at,
                author_id: editor,
                tag_ids,
            })
            .await?;

        // Earlier posts collect more likes and comments
        for reader in readers.iter().take(readers.len().saturating_sub(index % 4)) {
            admin.add_like(post.id, *reader).await?;
        }
        for (offset, reader) in readers.iter().take(index % 3 + 1).enumerate() {
            admin
                .save_comment(NewComment {
                    post_id: post.id,
                    author_id: *reader,
                    text: format!("Комментарий №{} к «{}»", offset + 1, title),
                    published_at: published_at + Duration::hours(offset as i64 + 1),
                })
                .await?;
        }
    }

    println!("\n========================================");
    println!("Seed data ready!");
    println!("========================================");
    println!("Tags:  {}", tags.len());
    println!("Posts: {}", POSTS.len());
    println!("Staff author: editor");

    Ok(())
}
