mod core;
mod features;
mod modules;
mod shared;

use crate::core::config::Config;
use crate::core::{database, middleware};
use crate::features::auth::SessionService;
use crate::features::blog::{routes as blog_routes, BlogService, BlogState};
use crate::features::categories::{CategoryCache, CategoryService};
use crate::features::contacts::{routes as contacts_routes, ContactService};
use crate::features::products::{routes as products_routes, ProductService, ProductsState};
use crate::modules::storage::PhotoStore;
use axum::{extract::DefaultBodyLimit, Router};
use std::sync::Arc;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .max_blocking_threads(worker_threads * 4)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(worker_threads))
}

async fn async_main(worker_threads: usize) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;

    // Log system info
    let available_cpus = std::thread::available_parallelism()
        .map(|p| p.get())
        .unwrap_or(1);
    tracing::info!(
        "System info: available_cpus={}, tokio_worker_threads={}, pid={}",
        available_cpus,
        worker_threads,
        std::process::id()
    );

    tracing::info!("Configuration loaded successfully");

    // Create database connection pool
    let pool = database::create_pool(&config.database).await?;
    tracing::info!("Database connection pool created");

    // Run migrations automatically
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(|e| anyhow::anyhow!("Migration failed: {}", e))?;
    tracing::info!("Database migrations completed successfully");

    // Load page templates eagerly so a broken template directory fails loudly
    let template_count = shared::templates::init();
    tracing::info!("Template environment loaded: {} templates", template_count);

    // Initialize photo storage
    let photo_store = Arc::new(PhotoStore::new(config.media.clone()));
    photo_store
        .ensure_photo_dir()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to prepare photo directory: {}", e))?;
    tracing::info!("Photo store initialized at {:?}", config.media.photo_dir);

    // Initialize Session Service (auth middleware state)
    let session_service = Arc::new(SessionService::new(pool.clone()));
    tracing::info!("Session service initialized");

    // Initialize Category Service with its injected cache
    let category_cache = Arc::new(CategoryCache::new(config.cache.category_ttl));
    let category_service = Arc::new(CategoryService::new(
        pool.clone(),
        Arc::clone(&category_cache),
    ));
    tracing::info!(
        "Category service initialized (cache TTL: {:?})",
        config.cache.category_ttl
    );

    // Initialize Product Service
    let product_service = Arc::new(ProductService::new(pool.clone()));
    tracing::info!("Product service initialized");

    // Initialize Blog Service
    let blog_service = Arc::new(BlogService::new(pool.clone()));
    tracing::info!("Blog service initialized");

    // Initialize Contact Service
    let contact_service = Arc::new(ContactService::new(pool.clone()));
    tracing::info!("Contact service initialized");

    let products_state = ProductsState {
        products: Arc::clone(&product_service),
        categories: Arc::clone(&category_service),
        photos: Arc::clone(&photo_store),
    };
    let blog_state = BlogState {
        blog: Arc::clone(&blog_service),
        photos: Arc::clone(&photo_store),
    };

    // Protected routes (require a valid session)
    let protected_routes = products_routes::protected_routes(products_state.clone()).route_layer(
        axum::middleware::from_fn_with_state(
            Arc::clone(&session_service),
            middleware::auth_middleware,
        ),
    );

    // Simple health check endpoint (no auth required)
    async fn health_check() -> axum::http::StatusCode {
        axum::http::StatusCode::OK
    }
    let health_route = Router::new().route("/health", axum::routing::get(health_check));

    // Public routes
    let public_routes = Router::new()
        .merge(products_routes::routes(products_state))
        .merge(blog_routes::routes(blog_state))
        .merge(contacts_routes::routes(contact_service));

    let app = Router::new()
        .merge(protected_routes)
        .merge(public_routes)
        .merge(health_route)
        .layer(DefaultBodyLimit::max(config.app.max_request_body_size))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid));

    // Start server
    let addr = config.app.server_address();
    let socket_addr: std::net::SocketAddr = addr
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid address: {}", e))?;

    // Use socket2 for TCP listener configuration
    let socket = socket2::Socket::new(
        socket2::Domain::for_address(socket_addr),
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nodelay(true)?;

    socket.set_recv_buffer_size(256 * 1024)?;
    socket.set_send_buffer_size(256 * 1024)?;

    #[cfg(target_os = "linux")]
    {
        let keepalive = socket2::TcpKeepalive::new()
            .with_time(std::time::Duration::from_secs(60))
            .with_interval(std::time::Duration::from_secs(10))
            .with_retries(3);
        socket.set_tcp_keepalive(&keepalive)?;
    }
    #[cfg(not(target_os = "linux"))]
    {
        let keepalive = socket2::TcpKeepalive::new().with_time(std::time::Duration::from_secs(60));
        socket.set_tcp_keepalive(&keepalive)?;
    }

    socket.set_nonblocking(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(65535)?;

    let listener = tokio::net::TcpListener::from_std(socket.into())?;
    tracing::info!("Server listening on {}", format!("http://{}", addr));

    axum::serve(listener, app).await?;

    Ok(())
}
