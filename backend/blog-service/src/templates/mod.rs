/// HTML rendering
///
/// Pages are maud functions over the page contexts built by
/// [`crate::services::BlogService`]; every interpolation is escaped.
mod pages;

pub use pages::{admin_index, contacts, index, post_detail, posts_list};

use crate::services::serializers::{SerializedPost, SerializedTag};
use actix_web::http::StatusCode;
use chrono::{DateTime, Utc};
use maud::{html, Markup, DOCTYPE};

pub fn post_url(slug: &str) -> String {
    format!("/post/{}", urlencoding::encode(slug))
}

pub fn tag_url(title: &str) -> String {
    format!("/tag/{}", urlencoding::encode(title))
}

pub fn format_date(published_at: &DateTime<Utc>) -> String {
    published_at.format("%d %B %Y, %H:%M").to_string()
}

/// Shared page frame: header navigation, content and footer
pub fn layout(site_title: &str, page_title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="ru" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title {
                    @if page_title.is_empty() {
                        (site_title)
                    } @else {
                        (page_title) " | " (site_title)
                    }
                }
            }
            body {
                header.site-header {
                    a.brand href="/" { (site_title) }
                    nav {
                        a href="/" { "Главная" }
                        " "
                        a href="/contacts/" { "Контакты" }
                    }
                }
                main { (content) }
                footer.site-footer {
                    p { "© " (site_title) }
                }
            }
        }
    }
}

/// Card used by every post listing
pub fn post_card(post: &SerializedPost) -> Markup {
    html! {
        article.post-card {
            @if let Some(image_url) = &post.image_url {
                a href=(post_url(&post.slug)) {
                    img.post-card-image src=(image_url) alt=(post.title);
                }
            }
            @if let Some(first_tag) = &post.first_tag_title {
                a.post-card-tag href=(tag_url(first_tag)) { (first_tag) }
            }
            h3 { a href=(post_url(&post.slug)) { (post.title) } }
            p.post-card-meta {
                (post.author) " · " (format_date(&post.published_at))
                " · комментариев: " (post.comments_amount)
            }
            p.post-card-teaser { (post.teaser_text) }
            @if !post.tags.is_empty() {
                ul.post-card-tags {
                    @for tag in &post.tags {
                        li { a href=(tag_url(&tag.title)) { "#" (tag.title) } }
                    }
                }
            }
        }
    }
}

pub fn tag_cloud(tags: &[SerializedTag]) -> Markup {
    html! {
        ul.tag-cloud {
            @for tag in tags {
                li {
                    a href=(tag_url(&tag.title)) { "#" (tag.title) }
                    " (" (tag.posts_with_tag) ")"
                }
            }
        }
    }
}

/// Popular posts and tags shown next to the main content
pub fn sidebar(most_popular_posts: &[SerializedPost], popular_tags: &[SerializedTag]) -> Markup {
    html! {
        aside.sidebar {
            section {
                h2 { "Популярные посты" }
                ol.popular-posts {
                    @for post in most_popular_posts {
                        li {
                            a href=(post_url(&post.slug)) { (post.title) }
                            " · " (post.author)
                        }
                    }
                }
            }
            section {
                h2 { "Популярные теги" }
                (tag_cloud(popular_tags))
            }
        }
    }
}

pub fn not_found() -> Markup {
    error_page(StatusCode::NOT_FOUND, "Страница не найдена.")
}

/// Standalone error page; rendered without configuration
pub fn error_page(status: StatusCode, message: &str) -> Markup {
    let heading = format!(
        "{} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Error")
    );

    html! {
        (DOCTYPE)
        html lang="ru" {
            head {
                meta charset="utf-8";
                title { (heading) }
            }
            body {
                main.error {
                    h1 { (heading) }
                    p { (message) }
                    a href="/" { "На главную" }
                }
            }
        }
    }
}
