//! Shared fixtures for blog-service integration tests
#![allow(dead_code)]

pub mod memory_repo;

use chrono::{DateTime, Duration, TimeZone, Utc};
pub use memory_repo::MemoryBlogRepository;
use uuid::Uuid;

/// Build an initialized actix test service around a repository
#[allow(unused_macros)]
macro_rules! blog_app {
    ($repo:expr) => {{
        let repo: std::sync::Arc<dyn blog_service::db::BlogRepository> =
            std::sync::Arc::new($repo);
        let media = blog_service::config::MediaConfig::default();
        let site = blog_service::config::SiteConfig {
            title: "Sensive Test".to_string(),
        };
        let blog = blog_service::services::BlogService::new(repo, media.clone());

        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new(blog))
                .app_data(actix_web::web::Data::new(site))
                .app_data(actix_web::web::Data::new(media.clone()))
                .app_data(actix_web::web::Data::new(
                    blog_service::admin::AdminRegistry::blog(),
                ))
                .configure(|cfg| blog_service::handlers::configure_routes(cfg, &media.url)),
        )
        .await
    }};
}

pub fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
}

/// Blog fixture: one staff author, ten readers, a few tags
pub struct Fixture {
    pub repo: MemoryBlogRepository,
    pub author: Uuid,
    pub readers: Vec<Uuid>,
}

impl Fixture {
    pub fn new() -> Self {
        let repo = MemoryBlogRepository::new();
        let author = repo.add_user("editor", true);
        let readers = (0..10)
            .map(|i| repo.add_user(&format!("reader{}", i), false))
            .collect();
        Self {
            repo,
            author,
            readers,
        }
    }

    /// Post `slug` with `likes` likes, published `days` days after 2021-01-01
    pub fn post(&self, slug: &str, likes: usize, days: i64, tags: &[Uuid]) -> Uuid {
        let published_at = at(2021, 1, 1) + Duration::days(days);
        let id = self
            .repo
            .add_post(&format!("Post {}", slug), slug, self.author, published_at, tags);
        self.repo.add_likes(id, &self.readers[..likes]);
        id
    }
}
