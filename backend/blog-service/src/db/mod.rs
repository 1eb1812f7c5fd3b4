/// Database access layer
///
/// This module provides:
/// - [`BlogRepository`]: the capability set the page assemblers and the admin
///   service depend on
/// - [`PostQuery`]: a composable description of a post listing (ordering,
///   tag / slug / year filters, limit)
/// - [`PgBlogRepository`]: the PostgreSQL implementation, built from the
///   per-table query functions in the `*_repo` modules
/// - [`MIGRATOR`]: the embedded schema migrations
pub mod comment_repo;
pub mod like_repo;
pub mod post_repo;
pub mod tag_repo;
pub mod user_repo;

use crate::error::Result;
use crate::models::{
    Comment, CommentWithAuthor, NewComment, NewPost, Post, PostSummary, Tag, TagWithCount, User,
};
use async_trait::async_trait;
use sqlx::migrate::Migrator;
use sqlx::PgPool;
use uuid::Uuid;

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Ordering of a post listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostOrder {
    /// Like count descending; ties broken by newest first
    Popular,
    /// Publication time descending (the default post ordering)
    #[default]
    Recent,
    /// Publication time ascending
    Chronological,
}

/// Composable post listing.
///
/// Filters commute with each other and with the ordering; the last ordering
/// call wins. E.g. `PostQuery::all().popular().with_tag("travel").limit(20)`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PostQuery {
    pub order: PostOrder,
    pub tag: Option<String>,
    pub slug: Option<String>,
    pub year: Option<i32>,
    pub limit: Option<i64>,
}

impl PostQuery {
    /// Every post, newest first
    pub fn all() -> Self {
        Self::default()
    }

    /// Order by total like count, descending
    pub fn popular(mut self) -> Self {
        self.order = PostOrder::Popular;
        self
    }

    /// Order by publication time, descending
    pub fn recent(mut self) -> Self {
        self.order = PostOrder::Recent;
        self
    }

    /// Restrict to posts published in calendar year `year` (UTC), oldest first
    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self.order = PostOrder::Chronological;
        self
    }

    /// Restrict to posts carrying the tag with this exact title
    pub fn with_tag(mut self, title: impl Into<String>) -> Self {
        self.tag = Some(title.into());
        self
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Storage capabilities used by the blog.
///
/// Listing operations return projections with every related row the pages
/// need already attached, so callers never go back to storage per item.
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// Posts matching `query`, each with author name, like and comment
    /// counts and its tags (ordered by title)
    async fn list_posts(&self, query: &PostQuery) -> Result<Vec<PostSummary>>;

    /// Resolve a post by slug within the popular listing.
    /// When several posts share a slug the most liked one wins.
    async fn find_post_by_slug(&self, slug: &str) -> Result<Option<PostSummary>> {
        let query = PostQuery::all().popular().with_slug(slug).limit(1);
        Ok(self.list_posts(&query).await?.into_iter().next())
    }

    async fn find_post(&self, post_id: Uuid) -> Result<Option<Post>>;

    /// Comments of a post, oldest first
    async fn list_comments(&self, post_id: Uuid) -> Result<Vec<CommentWithAuthor>>;

    /// Direct comment count for a single post
    async fn count_comments(&self, post_id: Uuid) -> Result<i64>;

    /// Tags ordered by number of posts, descending
    async fn list_popular_tags(&self, limit: i64) -> Result<Vec<TagWithCount>>;

    /// Tags of one post, ordered by their number of posts across the blog
    async fn list_post_tags_popular(&self, post_id: Uuid) -> Result<Vec<TagWithCount>>;

    /// Tag with exactly this title
    async fn find_tag_by_title(&self, title: &str) -> Result<Option<Tag>>;

    /// Tags among `tag_ids` that exist
    async fn find_tags(&self, tag_ids: &[Uuid]) -> Result<Vec<Tag>>;

    async fn find_user(&self, user_id: Uuid) -> Result<Option<User>>;

    /// Users allowed to author posts
    async fn list_staff_users(&self) -> Result<Vec<User>>;

    /// Insert a tag; the title is stored as given
    async fn insert_tag(&self, title: &str) -> Result<Tag>;

    /// Insert a post and its tag links atomically
    async fn insert_post(&self, post: &NewPost) -> Result<Post>;

    async fn insert_comment(&self, comment: &NewComment) -> Result<Comment>;

    /// Record a like; returns false when the user already liked the post
    async fn add_like(&self, post_id: Uuid, user_id: Uuid) -> Result<bool>;
}

/// PostgreSQL-backed [`BlogRepository`]
#[derive(Clone)]
pub struct PgBlogRepository {
    pool: PgPool,
}

impl PgBlogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl BlogRepository for PgBlogRepository {
    async fn list_posts(&self, query: &PostQuery) -> Result<Vec<PostSummary>> {
        Ok(post_repo::list_posts(&self.pool, query).await?)
    }

    async fn find_post(&self, post_id: Uuid) -> Result<Option<Post>> {
        Ok(post_repo::find_post_by_id(&self.pool, post_id).await?)
    }

    async fn list_comments(&self, post_id: Uuid) -> Result<Vec<CommentWithAuthor>> {
        Ok(comment_repo::get_comments_by_post(&self.pool, post_id).await?)
    }

    async fn count_comments(&self, post_id: Uuid) -> Result<i64> {
        Ok(comment_repo::count_comments_by_post(&self.pool, post_id).await?)
    }

    async fn list_popular_tags(&self, limit: i64) -> Result<Vec<TagWithCount>> {
        Ok(tag_repo::get_popular_tags(&self.pool, limit).await?)
    }

    async fn list_post_tags_popular(&self, post_id: Uuid) -> Result<Vec<TagWithCount>> {
        Ok(tag_repo::get_post_tags_by_popularity(&self.pool, post_id).await?)
    }

    async fn find_tag_by_title(&self, title: &str) -> Result<Option<Tag>> {
        Ok(tag_repo::find_tag_by_title(&self.pool, title).await?)
    }

    async fn find_tags(&self, tag_ids: &[Uuid]) -> Result<Vec<Tag>> {
        Ok(tag_repo::find_tags_by_ids(&self.pool, tag_ids).await?)
    }

    async fn find_user(&self, user_id: Uuid) -> Result<Option<User>> {
        Ok(user_repo::find_user_by_id(&self.pool, user_id).await?)
    }

    async fn list_staff_users(&self) -> Result<Vec<User>> {
        Ok(user_repo::get_staff_users(&self.pool).await?)
    }

    async fn insert_tag(&self, title: &str) -> Result<Tag> {
        tag_repo::create_tag(&self.pool, title).await
    }

    async fn insert_post(&self, post: &NewPost) -> Result<Post> {
        Ok(post_repo::create_post(&self.pool, post).await?)
    }

    async fn insert_comment(&self, comment: &NewComment) -> Result<Comment> {
        Ok(comment_repo::create_comment(&self.pool, comment).await?)
    }

    async fn add_like(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        Ok(like_repo::create_like(&self.pool, post_id, user_id).await?)
    }
}
