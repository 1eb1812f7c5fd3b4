/// Read-only admin overview
use super::html;
use crate::admin::AdminRegistry;
use crate::config::SiteConfig;
use crate::templates;
use actix_web::{web, HttpResponse};

pub async fn admin_index(
    registry: web::Data<AdminRegistry>,
    site: web::Data<SiteConfig>,
) -> HttpResponse {
    html(templates::admin_index(&site.title, &registry))
}
