/// Public page handlers
use super::html;
use crate::config::SiteConfig;
use crate::error::Result;
use crate::services::BlogService;
use crate::templates;
use actix_web::{web, HttpResponse};

/// Home page
pub async fn index(
    blog: web::Data<BlogService>,
    site: web::Data<SiteConfig>,
) -> Result<HttpResponse> {
    let context = blog.index().await?;
    Ok(html(templates::index(&site.title, &context)))
}

/// Paginated home page; every page currently renders the first one
pub async fn index_page(
    blog: web::Data<BlogService>,
    site: web::Data<SiteConfig>,
    page: web::Path<u32>,
) -> Result<HttpResponse> {
    tracing::debug!(page = page.into_inner(), "rendering home page for page request");
    index(blog, site).await
}

pub async fn post_detail(
    blog: web::Data<BlogService>,
    site: web::Data<SiteConfig>,
    slug: web::Path<String>,
) -> Result<HttpResponse> {
    let context = blog.post_detail(&slug).await?;
    Ok(html(templates::post_detail(&site.title, &context)))
}

pub async fn tag_filter(
    blog: web::Data<BlogService>,
    site: web::Data<SiteConfig>,
    tag_title: web::Path<String>,
) -> Result<HttpResponse> {
    let context = blog.tag_filter(&tag_title).await?;
    Ok(html(templates::posts_list(&site.title, &context)))
}

pub async fn contacts(site: web::Data<SiteConfig>) -> HttpResponse {
    html(templates::contacts(&site.title))
}
