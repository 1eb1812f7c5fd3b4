/// Flat, template-ready records built from query projections
use crate::config::MediaConfig;
use crate::models::{CommentWithAuthor, PostSummary, Tag, TagWithCount};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Number of characters of the body shown on listing pages
pub const TEASER_LENGTH: usize = 200;

#[derive(Debug, Clone, Serialize)]
pub struct SerializedPost {
    pub title: String,
    pub teaser_text: String,
    pub author: String,
    pub comments_amount: i64,
    pub image_url: Option<String>,
    pub published_at: DateTime<Utc>,
    pub slug: String,
    pub tags: Vec<Tag>,
    /// `None` for a post without tags
    pub first_tag_title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SerializedTag {
    pub title: String,
    pub posts_with_tag: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SerializedComment {
    pub text: String,
    pub published_at: DateTime<Utc>,
    pub author: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SerializedPostDetail {
    pub title: String,
    pub text: String,
    pub author: String,
    pub comments: Vec<SerializedComment>,
    pub likes_amount: i64,
    pub image_url: Option<String>,
    pub published_at: DateTime<Utc>,
    pub slug: String,
    pub tags: Vec<SerializedTag>,
}

/// First [`TEASER_LENGTH`] characters of `text`
pub fn teaser(text: &str) -> String {
    text.chars().take(TEASER_LENGTH).collect()
}

pub fn serialize_post(post: &PostSummary, media: &MediaConfig) -> SerializedPost {
    SerializedPost {
        title: post.title.clone(),
        teaser_text: teaser(&post.text),
        author: post.author.clone(),
        comments_amount: post.amount_comments,
        image_url: post.image.as_deref().map(|image| media.url_for(image)),
        published_at: post.published_at,
        slug: post.slug.clone(),
        tags: post.tags.clone(),
        first_tag_title: post.first_tag().map(|tag| tag.title.clone()),
    }
}

pub fn serialize_tag(tag: &TagWithCount) -> SerializedTag {
    SerializedTag {
        title: tag.title.clone(),
        posts_with_tag: tag.amount_posts,
    }
}

pub fn serialize_comment(comment: &CommentWithAuthor) -> SerializedComment {
    SerializedComment {
        text: comment.text.clone(),
        published_at: comment.published_at,
        author: comment.author.clone(),
    }
}

/// Full post page record. `tags` are expected in popularity order.
pub fn serialize_post_detail(
    post: &PostSummary,
    comments: &[CommentWithAuthor],
    tags: &[TagWithCount],
    media: &MediaConfig,
) -> SerializedPostDetail {
    SerializedPostDetail {
        title: post.title.clone(),
        text: post.text.clone(),
        author: post.author.clone(),
        comments: comments.iter().map(serialize_comment).collect(),
        likes_amount: post.amount_likes,
        image_url: post.image.as_deref().map(|image| media.url_for(image)),
        published_at: post.published_at,
        slug: post.slug.clone(),
        tags: tags.iter().map(serialize_tag).collect(),
    }
}
