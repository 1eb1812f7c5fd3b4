/// Admin service - validated writes for posts, tags, comments and likes
use crate::admin::{AdminRegistry, ChoiceFilter, Entity};
use crate::db::BlogRepository;
use crate::error::{AppError, Result};
use crate::models::{Comment, NewComment, NewPost, NewTag, Post, Tag, User};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// Tag titles are stored trimmed and lowercase
pub fn normalize_tag_title(title: &str) -> String {
    NewTag::new(title).title
}

#[derive(Clone)]
pub struct AdminService {
    repo: Arc<dyn BlogRepository>,
    registry: AdminRegistry,
}

impl AdminService {
    pub fn new(repo: Arc<dyn BlogRepository>) -> Self {
        Self {
            repo,
            registry: AdminRegistry::blog(),
        }
    }

    pub fn registry(&self) -> &AdminRegistry {
        &self.registry
    }

    /// Users selectable as post author (staff only)
    pub async fn author_choices(&self) -> Result<Vec<User>> {
        self.repo.list_staff_users().await
    }

    /// Save a tag under its normalized title
    pub async fn save_tag(&self, title: &str) -> Result<Tag> {
        let tag = NewTag::new(title);
        tag.validate()?;

        if self.repo.find_tag_by_title(&tag.title).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "tag `{}` already exists",
                tag.title
            )));
        }

        let tag = self.repo.insert_tag(&tag.title).await?;
        tracing::info!(tag_id = %tag.id, title = %tag.title, "tag saved");
        Ok(tag)
    }

    /// Save a post. The author must pass the author choice filter and the
    /// post must carry at least one tag.
    pub async fn save_post(&self, mut post: NewPost) -> Result<Post> {
        post.validate()?;

        let author = self
            .repo
            .find_user(post.author_id)
            .await?
            .ok_or_else(|| AppError::Validation(format!("unknown author {}", post.author_id)))?;
        if self.author_filter() == Some(ChoiceFilter::StaffOnly) && !author.is_staff {
            return Err(AppError::Validation(format!(
                "author `{}` is not a staff user",
                author.username
            )));
        }

        post.tag_ids.sort();
        post.tag_ids.dedup();
        if post.tag_ids.is_empty() {
            return Err(AppError::Validation(
                "a post needs at least one tag".to_string(),
            ));
        }
        let known = self.repo.find_tags(&post.tag_ids).await?;
        if known.len() != post.tag_ids.len() {
            let missing: Vec<String> = post
                .tag_ids
                .iter()
                .filter(|id| !known.iter().any(|tag| tag.id == **id))
                .map(|id| id.to_string())
                .collect();
            return Err(AppError::Validation(format!(
                "unknown tags: {}",
                missing.join(", ")
            )));
        }

        let created = self.repo.insert_post(&post).await?;
        tracing::info!(post_id = %created.id, slug = %created.slug, "post saved");
        Ok(created)
    }

    pub async fn save_comment(&self, comment: NewComment) -> Result<Comment> {
        comment.validate()?;
        self.require_post(comment.post_id).await?;
        self.require_user(comment.author_id).await?;

        self.repo.insert_comment(&comment).await
    }

    /// Add `user_id` to the users who liked `post_id`
    pub async fn add_like(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        self.require_post(post_id).await?;
        self.require_user(user_id).await?;
        self.repo.add_like(post_id, user_id).await
    }

    fn author_filter(&self) -> Option<ChoiceFilter> {
        self.registry
            .get(Entity::Post)
            .and_then(|post| post.choice_filter("author"))
    }

    async fn require_post(&self, post_id: Uuid) -> Result<Post> {
        self.repo
            .find_post(post_id)
            .await?
            .ok_or_else(|| AppError::Validation(format!("unknown post {}", post_id)))
    }

    async fn require_user(&self, user_id: Uuid) -> Result<User> {
        self.repo
            .find_user(user_id)
            .await?
            .ok_or_else(|| AppError::Validation(format!("unknown user {}", user_id)))
    }
}
