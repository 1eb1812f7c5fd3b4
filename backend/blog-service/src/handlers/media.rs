/// Uploaded media files (post images)
use crate::config::MediaConfig;
use crate::error::{AppError, Result};
use actix_web::{web, HttpResponse};
use std::path::{Component, Path, PathBuf};

/// Resolve `relative` inside `root`; only plain path segments are accepted
pub fn resolve_media_path(root: &str, relative: &str) -> Option<PathBuf> {
    let relative = Path::new(relative);
    if relative.as_os_str().is_empty()
        || !relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
    {
        return None;
    }
    Some(Path::new(root).join(relative))
}

pub fn content_type_for(path: &Path) -> mime::Mime {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => mime::IMAGE_JPEG,
        Some("png") => mime::IMAGE_PNG,
        Some("gif") => mime::IMAGE_GIF,
        Some("svg") => mime::IMAGE_SVG,
        Some("bmp") => mime::IMAGE_BMP,
        _ => mime::APPLICATION_OCTET_STREAM,
    }
}

pub async fn serve_media(
    media: web::Data<MediaConfig>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let relative = path.into_inner();
    let file_path = resolve_media_path(&media.root, &relative)
        .ok_or_else(|| AppError::not_found(format!("media `{}`", relative)))?;

    let bytes = match tokio::fs::read(&file_path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::not_found(format!("media `{}`", relative)))
        }
        Err(e) => {
            return Err(AppError::Internal(format!(
                "failed to read {}: {}",
                file_path.display(),
                e
            )))
        }
    };

    Ok(HttpResponse::Ok()
        .content_type(content_type_for(&file_path))
        .body(bytes))
}
