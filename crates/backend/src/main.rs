pub mod dashboards;
pub mod domain;
pub mod handlers;
pub mod shared;
pub mod system;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use axum::http::{header, Method};
    use axum::middleware;
    use axum::{
        routing::{get, post, put},
        Router,
    };
    use std::net::SocketAddr;
    use tokio::net::TcpListener;
    use tower_http::cors::{Any, CorsLayer};

    system::tracing::initialize()?;

    // Initialize database (loads config from config.toml)
    shared::data::db::initialize_database()
        .await
        .map_err(|e| anyhow::anyhow!("db init failed: {e}"))?;

    // Ensure admin user exists
    system::initialization::ensure_admin_user_exists().await?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION]);

    let require_auth = || middleware::from_fn(system::auth::middleware::require_auth);
    let require_admin = || middleware::from_fn(system::auth::middleware::require_admin);

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // SYSTEM AUTH ROUTES (PUBLIC)
        // ========================================
        .route(
            "/api/system/auth/login",
            post(system::handlers::auth::login),
        )
        .route(
            "/api/system/auth/register",
            post(system::handlers::auth::register),
        )
        .route(
            "/api/system/auth/refresh",
            post(system::handlers::auth::refresh),
        )
        .route(
            "/api/system/auth/logout",
            post(system::handlers::auth::logout),
        )
        // System auth routes (protected)
        .route(
            "/api/system/auth/me",
            get(system::handlers::auth::current_user).layer(require_auth()),
        )
        // System users management (admin only)
        .route(
            "/api/system/users",
            get(system::handlers::users::list)
                .post(system::handlers::users::create)
                .layer(require_admin()),
        )
        .route(
            "/api/system/users/:id",
            get(system::handlers::users::get_by_id)
                .put(system::handlers::users::update)
                .delete(system::handlers::users::delete)
                .layer(require_admin()),
        )
        .route(
            "/api/system/users/:id/change-password",
            post(system::handlers::users::change_password).layer(require_auth()),
        )
        // ========================================
        // PRODUCER ROUTES
        // ========================================
        .route(
            "/api/producer/batches",
            get(handlers::producer::list)
                .post(handlers::producer::register)
                .layer(require_auth()),
        )
        .route(
            "/api/producer/batches/:id",
            get(handlers::producer::get_by_id)
                .put(handlers::producer::update)
                .delete(handlers::producer::delete)
                .layer(require_auth()),
        )
        .route(
            "/api/producer/batches/:id/harvest",
            post(handlers::producer::harvest).layer(require_auth()),
        )
        .route(
            "/api/producer/batches/:id/quality-check",
            post(handlers::producer::quality_check).layer(require_auth()),
        )
        .route(
            "/api/producer/batches/:id/status",
            post(handlers::producer::update_status).layer(require_auth()),
        )
        .route(
            "/api/producer/dashboard",
            get(handlers::producer::dashboard).layer(require_auth()),
        )
        // ========================================
        // DISTRIBUTOR ROUTES
        // ========================================
        .route(
            "/api/distributor/batches",
            get(handlers::distributor::holdings).layer(require_auth()),
        )
        .route(
            "/api/distributor/batches/available",
            get(handlers::distributor::available).layer(require_auth()),
        )
        .route(
            "/api/distributor/batches/:id/claim",
            post(handlers::distributor::claim).layer(require_auth()),
        )
        .route(
            "/api/distributor/batches/:id/send-to-retailer",
            post(handlers::distributor::send_to_retailer).layer(require_auth()),
        )
        .route(
            "/api/distributor/batches/:id/price",
            put(handlers::distributor::update_price).layer(require_auth()),
        )
        .route(
            "/api/distributor/dashboard",
            get(handlers::distributor::dashboard).layer(require_auth()),
        )
        // ========================================
        // RETAILER ROUTES
        // ========================================
        .route(
            "/api/retailer/batches",
            get(handlers::retailer::holdings).layer(require_auth()),
        )
        .route(
            "/api/retailer/batches/available",
            get(handlers::retailer::available).layer(require_auth()),
        )
        .route(
            "/api/retailer/batches/:id/claim",
            post(handlers::retailer::claim).layer(require_auth()),
        )
        .route(
            "/api/retailer/batches/:id/price",
            put(handlers::retailer::update_price).layer(require_auth()),
        )
        .route(
            "/api/retailer/batches/:id/sell",
            post(handlers::retailer::sell).layer(require_auth()),
        )
        .route(
            "/api/retailer/dashboard",
            get(handlers::retailer::dashboard).layer(require_auth()),
        )
        // ========================================
        // CONSUMER ROUTES (PUBLIC)
        // ========================================
        .route("/api/consumer/batches", get(handlers::consumer::browse))
        .route(
            "/api/consumer/batches/:id",
            get(handlers::consumer::get_by_id),
        )
        .route(
            "/api/consumer/batches/:id/journey",
            get(handlers::consumer::journey_by_id),
        )
        .route(
            "/api/consumer/batches/qr/:qr",
            get(handlers::consumer::journey_by_qr),
        )
        .route(
            "/api/consumer/batches/code/:code",
            get(handlers::consumer::journey_by_code),
        )
        // ========================================
        // ADMIN ROUTES
        // ========================================
        .route(
            "/api/admin/batches",
            get(handlers::admin::list_all).layer(require_admin()),
        )
        .route(
            "/api/admin/batches/:id",
            put(handlers::admin::update)
                .delete(handlers::admin::delete)
                .layer(require_admin()),
        )
        // purge is open to the originating producer too; the service checks
        .route(
            "/api/admin/batches/:id/purge",
            axum::routing::delete(handlers::admin::purge).layer(require_auth()),
        )
        .route(
            "/api/admin/batches/:id/status",
            post(handlers::admin::override_status).layer(require_admin()),
        )
        .route(
            "/api/admin/batches/:id/events",
            get(handlers::admin::events).layer(require_admin()),
        )
        .route(
            "/api/admin/stats",
            get(handlers::admin::stats).layer(require_admin()),
        )
        .layer(middleware::from_fn(
            system::middleware::request_logger::request_logger,
        ))
        .layer(cors);

    let port = shared::config::load_config()
        .map(|c| c.server.port)
        .unwrap_or(3000);
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    port
                );
            } else {
                tracing::error!("Failed to bind to port {}. Error: {}", port, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
