/// Blog service - assembles the context of every public page
use crate::config::MediaConfig;
use crate::db::{BlogRepository, PostQuery};
use crate::error::{AppError, Result};
use crate::services::serializers::{
    serialize_post, serialize_post_detail, serialize_tag, SerializedPost, SerializedPostDetail,
    SerializedTag,
};
use serde::Serialize;
use std::sync::Arc;

/// Size of each sidebar / home page list
pub const SIDEBAR_LIMIT: i64 = 5;
/// Maximum number of posts on a tag page
pub const TAG_PAGE_LIMIT: i64 = 20;

#[derive(Debug, Clone, Serialize)]
pub struct IndexContext {
    pub most_popular_posts: Vec<SerializedPost>,
    pub page_posts: Vec<SerializedPost>,
    pub popular_tags: Vec<SerializedTag>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostDetailContext {
    pub post: SerializedPostDetail,
    pub popular_tags: Vec<SerializedTag>,
    pub most_popular_posts: Vec<SerializedPost>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TagFilterContext {
    pub tag: String,
    pub popular_tags: Vec<SerializedTag>,
    pub posts: Vec<SerializedPost>,
    pub most_popular_posts: Vec<SerializedPost>,
}

#[derive(Clone)]
pub struct BlogService {
    repo: Arc<dyn BlogRepository>,
    media: MediaConfig,
}

impl BlogService {
    pub fn new(repo: Arc<dyn BlogRepository>, media: MediaConfig) -> Self {
        Self { repo, media }
    }

    pub fn repository(&self) -> &Arc<dyn BlogRepository> {
        &self.repo
    }

    /// Home page: most liked posts, freshest posts and most used tags
    #[tracing::instrument(skip(self))]
    pub async fn index(&self) -> Result<IndexContext> {
        let most_popular_posts = self.most_popular_posts().await?;
        let page_posts = self
            .list(&PostQuery::all().recent().limit(SIDEBAR_LIMIT))
            .await?;
        let popular_tags = self.popular_tags().await?;

        Ok(IndexContext {
            most_popular_posts,
            page_posts,
            popular_tags,
        })
    }

    /// Post page for `slug`, resolved within the popular listing
    #[tracing::instrument(skip(self))]
    pub async fn post_detail(&self, slug: &str) -> Result<PostDetailContext> {
        let post = self
            .repo
            .find_post_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::not_found(format!("post `{}`", slug)))?;

        let comments = self.repo.list_comments(post.id).await?;
        let related_tags = self.repo.list_post_tags_popular(post.id).await?;

        tracing::debug!(
            post_id = %post.id,
            comments = comments.len(),
            tags = related_tags.len(),
            "resolved post"
        );

        Ok(PostDetailContext {
            post: serialize_post_detail(&post, &comments, &related_tags, &self.media),
            popular_tags: self.popular_tags().await?,
            most_popular_posts: self.most_popular_posts().await?,
        })
    }

    /// Posts carrying the tag titled exactly `tag_title`, most liked first
    #[tracing::instrument(skip(self))]
    pub async fn tag_filter(&self, tag_title: &str) -> Result<TagFilterContext> {
        let tag = self
            .repo
            .find_tag_by_title(tag_title)
            .await?
            .ok_or_else(|| AppError::not_found(format!("tag `{}`", tag_title)))?;

        let posts = self
            .list(
                &PostQuery::all()
                    .popular()
                    .with_tag(tag.title.as_str())
                    .limit(TAG_PAGE_LIMIT),
            )
            .await?;

        Ok(TagFilterContext {
            tag: tag.title,
            popular_tags: self.popular_tags().await?,
            posts,
            most_popular_posts: self.most_popular_posts().await?,
        })
    }

    async fn most_popular_posts(&self) -> Result<Vec<SerializedPost>> {
        self.list(&PostQuery::all().popular().limit(SIDEBAR_LIMIT))
            .await
    }

    async fn popular_tags(&self) -> Result<Vec<SerializedTag>> {
        let tags = self.repo.list_popular_tags(SIDEBAR_LIMIT).await?;
        Ok(tags.iter().map(serialize_tag).collect())
    }

    async fn list(&self, query: &PostQuery) -> Result<Vec<SerializedPost>> {
        let posts = self.repo.list_posts(query).await?;
        Ok(posts
            .iter()
            .map(|post| serialize_post(post, &self.media))
            .collect())
    }
}
