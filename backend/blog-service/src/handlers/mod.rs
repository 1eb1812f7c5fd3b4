/// HTTP handlers for blog-service
///
/// Every public page is rendered server side; handlers only extract the
/// request parameters, ask [`crate::services::BlogService`] for the page
/// context and hand it to [`crate::templates`].
pub mod admin;
pub mod media;
pub mod pages;

pub use admin::admin_index;
pub use media::serve_media;
pub use pages::{contacts, index, index_page, post_detail, tag_filter};

use actix_web::web;

/// Register the blog routes. `media_url` is the public prefix of uploaded
/// files (e.g. `/media/`).
pub fn configure_routes(cfg: &mut web::ServiceConfig, media_url: &str) {
    cfg.route("/", web::get().to(index))
        .route("/page/{page}", web::get().to(index_page))
        .route("/post/{slug}", web::get().to(post_detail))
        .route("/tag/{tag_title}", web::get().to(tag_filter))
        .route("/contacts/", web::get().to(contacts))
        .route("/admin/", web::get().to(admin_index))
        .route(
            &format!("{}{{path:.*}}", media_url),
            web::get().to(serve_media),
        );
}

fn html(markup: maud::Markup) -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok()
        .content_type(mime::TEXT_HTML_UTF_8)
        .body(markup.into_string())
}
