/// Data models for blog-service
///
/// - Entities mirror the tables in `migrations/`: [`User`], [`Post`], [`Tag`], [`Comment`]
/// - Projections are what the query layer hands back to the page assemblers,
///   with aggregates and related rows already attached
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Slugs use the URL-safe alphabet: ASCII letters, digits, `-` and `_`
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if slug
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_slug"))
    }
}

pub fn validate_not_blank(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        Err(ValidationError::new("blank"))
    } else {
        Ok(())
    }
}

/// User entity, owned by the authentication layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub is_staff: bool,
}

/// Post entity
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    pub slug: String,
    /// Path relative to the media root
    pub image: Option<String>,
    pub published_at: DateTime<Utc>,
    pub author_id: Uuid,
}

/// Tag entity. Titles are stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tag {
    pub id: Uuid,
    pub title: String,
}

/// Comment entity
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub text: String,
    pub published_at: DateTime<Utc>,
}

/// A post as returned by listings: author name, aggregate counts and the
/// tag set (ordered by title) are loaded together with the post.
#[derive(Debug, Clone, Serialize)]
pub struct PostSummary {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    pub slug: String,
    pub image: Option<String>,
    pub published_at: DateTime<Utc>,
    pub author: String,
    pub amount_likes: i64,
    pub amount_comments: i64,
    pub tags: Vec<Tag>,
}

impl PostSummary {
    /// First tag in title order, if the post has any.
    pub fn first_tag(&self) -> Option<&Tag> {
        self.tags.first()
    }
}

/// Tag with the number of posts carrying it (its popularity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct TagWithCount {
    pub id: Uuid,
    pub title: String,
    pub amount_posts: i64,
}

/// Comment joined with its author's display name
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CommentWithAuthor {
    pub id: Uuid,
    pub text: String,
    pub published_at: DateTime<Utc>,
    pub author: String,
}

/// Insert payload for a post together with its tag set
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewPost {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub text: String,
    #[validate(
        length(min = 1, max = 200),
        custom(function = "crate::models::validate_slug")
    )]
    pub slug: String,
    #[validate(length(min = 1, max = 100))]
    pub image: Option<String>,
    pub published_at: DateTime<Utc>,
    pub author_id: Uuid,
    pub tag_ids: Vec<Uuid>,
}

/// Insert payload for a tag; the title is normalized on construction
#[derive(Debug, Clone, Validate)]
pub struct NewTag {
    #[validate(length(min = 1, max = 20))]
    pub title: String,
}

impl NewTag {
    /// Tag titles are stored trimmed and lowercase
    pub fn new(title: &str) -> Self {
        Self {
            title: title.trim().to_lowercase(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewComment {
    pub post_id: Uuid,
    pub author_id: Uuid,
    #[validate(custom(function = "crate::models::validate_not_blank"))]
    pub text: String,
    pub published_at: DateTime<Utc>,
}
