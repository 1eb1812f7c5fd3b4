use actix_web::{web, App, HttpResponse, HttpServer};
use blog_service::admin::AdminRegistry;
use blog_service::db::{PgBlogRepository, MIGRATOR};
use blog_service::handlers;
use blog_service::services::BlogService;
use db_pool::{create_pool, DbConfig};
use sqlx::PgPool;
use std::io;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn health_summary(pool: web::Data<PgPool>) -> HttpResponse {
    match sqlx::query("SELECT 1").fetch_one(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "blog-service",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("PostgreSQL connection failed: {}", e),
            "service": "blog-service"
        })),
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = terminate.recv() => {},
                }
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", e);
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

/// Blog Service
///
/// # Routes
///
/// - `/`, `/page/{page}` - home page
/// - `/post/{slug}` - post with comments
/// - `/tag/{tag_title}` - posts of a tag
/// - `/contacts/` - contacts page
/// - `/admin/` - admin registrations overview
/// - `/health` - liveness and database check
/// - `MEDIA_URL*` - uploaded post images
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("WARNING: failed to read .env file: {}", e);
        }
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match blog_service::Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Configuration loading failed: {}", e);
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!("Starting blog-service v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);

    let mut db_cfg = DbConfig::from_env("blog-service", &config.database.url);
    if std::env::var("DB_MAX_CONNECTIONS").is_err() {
        db_cfg.max_connections = config.database.max_connections;
    }
    db_cfg.log_config();

    let db_pool = match create_pool(db_cfg).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Database pool creation failed: {}", e);
            eprintln!("ERROR: Failed to create database pool: {}", e);
            std::process::exit(1);
        }
    };

    MIGRATOR.run(&db_pool).await.map_err(|e| {
        io::Error::new(
            io::ErrorKind::Other,
            format!("Failed to run database migrations: {e}"),
        )
    })?;
    tracing::info!("Database migrations applied");

    let repository = Arc::new(PgBlogRepository::new(db_pool.clone()));
    let blog = web::Data::new(BlogService::new(repository, config.media.clone()));
    let site = web::Data::new(config.site.clone());
    let media = web::Data::new(config.media.clone());
    let registry = web::Data::new(AdminRegistry::blog());
    let pool_data = web::Data::new(db_pool.clone());
    let media_url = config.media.url.clone();

    let bind_address = config.bind_address();
    tracing::info!("Starting HTTP server at {}", bind_address);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(blog.clone())
            .app_data(site.clone())
            .app_data(media.clone())
            .app_data(registry.clone())
            .app_data(pool_data.clone())
            .wrap(tracing_actix_web::TracingLogger::default())
            .route("/health", web::get().to(health_summary))
            .configure(|cfg| handlers::configure_routes(cfg, &media_url))
    })
    .bind(&bind_address)?
    .disable_signals()
    .run();

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    shutdown_signal().await;
    tracing::info!("Shutdown signal received, stopping HTTP server");
    server_handle.stop(true).await;

    match server_task.await {
        Ok(result) => result?,
        Err(e) => {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!("HTTP server task failed: {e}"),
            ))
        }
    }

    db_pool.close().await;
    tracing::info!("blog-service stopped");
    Ok(())
}
