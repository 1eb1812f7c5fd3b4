//! In-memory BlogRepository for integration tests
//!
//! Mirrors the ordering and filtering rules of the PostgreSQL queries so the
//! page assemblers can be exercised without a database.

use async_trait::async_trait;
use blog_service::db::{BlogRepository, PostOrder, PostQuery};
use blog_service::error::{AppError, Result};
use blog_service::models::{
    Comment, CommentWithAuthor, NewComment, NewPost, Post, PostSummary, Tag, TagWithCount, User,
};
use chrono::{DateTime, Datelike, Utc};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

#[derive(Default)]
struct State {
    users: Vec<User>,
    tags: Vec<Tag>,
    posts: Vec<Post>,
    post_tags: Vec<(Uuid, Uuid)>,
    likes: HashSet<(Uuid, Uuid)>,
    comments: Vec<Comment>,
}

impl State {
    fn username(&self, user_id: Uuid) -> String {
        self.users
            .iter()
            .find(|user| user.id == user_id)
            .map(|user| user.username.clone())
            .unwrap_or_default()
    }

    fn tags_of(&self, post_id: Uuid) -> Vec<Tag> {
        let mut tags: Vec<Tag> = self
            .post_tags
            .iter()
            .filter(|(post, _)| *post == post_id)
            .filter_map(|(_, tag_id)| self.tags.iter().find(|tag| tag.id == *tag_id).cloned())
            .collect();
        tags.sort_by(|a, b| a.title.cmp(&b.title));
        tags
    }

    fn tag_usage(&self, tag_id: Uuid) -> i64 {
        self.post_tags.iter().filter(|(_, tag)| *tag == tag_id).count() as i64
    }

    fn likes_of(&self, post_id: Uuid) -> i64 {
        self.likes.iter().filter(|(post, _)| *post == post_id).count() as i64
    }

    fn comments_of(&self, post_id: Uuid) -> i64 {
        self.comments.iter().filter(|c| c.post_id == post_id).count() as i64
    }

    fn summary(&self, post: &Post) -> PostSummary {
        PostSummary {
            id: post.id,
            title: post.title.clone(),
            text: post.text.clone(),
            slug: post.slug.clone(),
            image: post.image.clone(),
            published_at: post.published_at,
            author: self.username(post.author_id),
            amount_likes: self.likes_of(post.id),
            amount_comments: self.comments_of(post.id),
            tags: self.tags_of(post.id),
        }
    }
}

/// In-memory repository; clones share the same data
#[derive(Clone, Default)]
pub struct MemoryBlogRepository {
    state: Arc<Mutex<State>>,
    /// Number of list_posts calls, to check pages don't query per item
    list_posts_calls: Arc<AtomicUsize>,
}

impl MemoryBlogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list_posts_calls(&self) -> usize {
        self.list_posts_calls.load(Ordering::SeqCst)
    }

    pub fn add_user(&self, username: &str, is_staff: bool) -> Uuid {
        let id = Uuid::new_v4();
        self.state.lock().unwrap().users.push(User {
            id,
            username: username.to_string(),
            is_staff,
        });
        id
    }

    pub fn add_tag(&self, title: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.state.lock().unwrap().tags.push(Tag {
            id,
            title: title.to_string(),
        });
        id
    }

    /// Add a post directly, bypassing admin validation
    pub fn add_post(
        &self,
        title: &str,
        slug: &str,
        author_id: Uuid,
        published_at: DateTime<Utc>,
        tag_ids: &[Uuid],
    ) -> Uuid {
        let id = Uuid::new_v4();
        let mut state = self.state.lock().unwrap();
        state.posts.push(Post {
            id,
            title: title.to_string(),
            text: format!("Text of {}", title),
            slug: slug.to_string(),
            image: None,
            published_at,
            author_id,
        });
        state.post_tags.extend(tag_ids.iter().map(|tag_id| (id, *tag_id)));
        id
    }

    pub fn add_likes(&self, post_id: Uuid, user_ids: &[Uuid]) {
        let mut state = self.state.lock().unwrap();
        state.likes.extend(user_ids.iter().map(|user| (post_id, *user)));
    }

    pub fn add_comment(
        &self,
        post_id: Uuid,
        author_id: Uuid,
        text: &str,
        published_at: DateTime<Utc>,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.state.lock().unwrap().comments.push(Comment {
            id,
            post_id,
            author_id,
            text: text.to_string(),
            published_at,
        });
        id
    }
}

#[async_trait]
impl BlogRepository for MemoryBlogRepository {
    async fn list_posts(&self, query: &PostQuery) -> Result<Vec<PostSummary>> {
        self.list_posts_calls.fetch_add(1, Ordering::SeqCst);
        let state = self.state.lock().unwrap();

        let mut posts: Vec<PostSummary> = state
            .posts
            .iter()
            .map(|post| state.summary(post))
            .filter(|post| {
                query
                    .tag
                    .as_ref()
                    .map_or(true, |title| post.tags.iter().any(|tag| &tag.title == title))
            })
            .filter(|post| query.slug.as_ref().map_or(true, |slug| &post.slug == slug))
            .filter(|post| query.year.map_or(true, |year| post.published_at.year() == year))
            .collect();

        match query.order {
            PostOrder::Popular => posts.sort_by(|a, b| {
                b.amount_likes
                    .cmp(&a.amount_likes)
                    .then(b.published_at.cmp(&a.published_at))
                    .then(a.id.cmp(&b.id))
            }),
            PostOrder::Recent => posts.sort_by(|a, b| {
                b.published_at
                    .cmp(&a.published_at)
                    .then(a.id.cmp(&b.id))
            }),
            PostOrder::Chronological => posts.sort_by(|a, b| {
                a.published_at
                    .cmp(&b.published_at)
                    .then(a.id.cmp(&b.id))
            }),
        }

        if let Some(limit) = query.limit {
            posts.truncate(limit.max(0) as usize);
        }
        Ok(posts)
    }

    async fn find_post(&self, post_id: Uuid) -> Result<Option<Post>> {
        let state = self.state.lock().unwrap();
        Ok(state.posts.iter().find(|post| post.id == post_id).cloned())
    }

    async fn list_comments(&self, post_id: Uuid) -> Result<Vec<CommentWithAuthor>> {
        let state = self.state.lock().unwrap();
        let mut comments: Vec<&Comment> = state
            .comments
            .iter()
            .filter(|comment| comment.post_id == post_id)
            .collect();
        comments.sort_by(|a, b| a.published_at.cmp(&b.published_at).then(a.id.cmp(&b.id)));

        Ok(comments
            .into_iter()
            .map(|comment| CommentWithAuthor {
                id: comment.id,
                text: comment.text.clone(),
                published_at: comment.published_at,
                author: state.username(comment.author_id),
            })
            .collect())
    }

    async fn count_comments(&self, post_id: Uuid) -> Result<i64> {
        Ok(self.state.lock().unwrap().comments_of(post_id))
    }

    async fn list_popular_tags(&self, limit: i64) -> Result<Vec<TagWithCount>> {
        let state = self.state.lock().unwrap();
        let mut tags: Vec<TagWithCount> = state
            .tags
            .iter()
            .map(|tag| TagWithCount {
                id: tag.id,
                title: tag.title.clone(),
                amount_posts: state.tag_usage(tag.id),
            })
            .collect();
        tags.sort_by(|a, b| b.amount_posts.cmp(&a.amount_posts).then(a.title.cmp(&b.title)));
        tags.truncate(limit.max(0) as usize);
        Ok(tags)
    }

    async fn list_post_tags_popular(&self, post_id: Uuid) -> Result<Vec<TagWithCount>> {
        let state = self.state.lock().unwrap();
        let mut tags: Vec<TagWithCount> = state
            .tags_of(post_id)
            .into_iter()
            .map(|tag| TagWithCount {
                amount_posts: state.tag_usage(tag.id),
                id: tag.id,
                title: tag.title,
            })
            .collect();
        tags.sort_by(|a, b| b.amount_posts.cmp(&a.amount_posts).then(a.title.cmp(&b.title)));
        Ok(tags)
    }

    async fn find_tag_by_title(&self, title: &str) -> Result<Option<Tag>> {
        let state = self.state.lock().unwrap();
        Ok(state.tags.iter().find(|tag| tag.title == title).cloned())
    }

    async fn find_tags(&self, tag_ids: &[Uuid]) -> Result<Vec<Tag>> {
        let state = self.state.lock().unwrap();
        let mut tags: Vec<Tag> = state
            .tags
            .iter()
            .filter(|tag| tag_ids.contains(&tag.id))
            .cloned()
            .collect();
        tags.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(tags)
    }

    async fn find_user(&self, user_id: Uuid) -> Result<Option<User>> {
        let state = self.state.lock().unwrap();
        Ok(state.users.iter().find(|user| user.id == user_id).cloned())
    }

    async fn list_staff_users(&self) -> Result<Vec<User>> {
        let state = self.state.lock().unwrap();
        let mut staff: Vec<User> = state.users.iter().filter(|u| u.is_staff).cloned().collect();
        staff.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(staff)
    }

    async fn insert_tag(&self, title: &str) -> Result<Tag> {
        let mut state = self.state.lock().unwrap();
        if state.tags.iter().any(|tag| tag.title == title) {
            return Err(AppError::Conflict(format!("tag `{}` already exists", title)));
        }
        let tag = Tag {
            id: Uuid::new_v4(),
            title: title.to_string(),
        };
        state.tags.push(tag.clone());
        Ok(tag)
    }

    async fn insert_post(&self, post: &NewPost) -> Result<Post> {
        let mut state = self.state.lock().unwrap();
        let created = Post {
            id: Uuid::new_v4(),
            title: post.title.clone(),
            text: post.text.clone(),
            slug: post.slug.clone(),
            image: post.image.clone(),
            published_at: post.published_at,
            author_id: post.author_id,
        };
        state.posts.push(created.clone());
        for tag_id in &post.tag_ids {
            if !state.post_tags.contains(&(created.id, *tag_id)) {
                state.post_tags.push((created.id, *tag_id));
            }
        }
        Ok(created)
    }

    async fn insert_comment(&self, comment: &NewComment) -> Result<Comment> {
        let created = Comment {
            id: Uuid::new_v4(),
            post_id: comment.post_id,
            author_id: comment.author_id,
            text: comment.text.clone(),
            published_at: comment.published_at,
        };
        self.state.lock().unwrap().comments.push(created.clone());
        Ok(created)
    }

    async fn add_like(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        Ok(self.state.lock().unwrap().likes.insert((post_id, user_id)))
    }
}
