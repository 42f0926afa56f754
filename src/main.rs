use jewelry_storefront::auth::spawn_session_logger;
use jewelry_storefront::cart::spawn_session_pruner;
use jewelry_storefront::config::StorefrontConfig;
use jewelry_storefront::router::create_app_router;
use jewelry_storefront::state::AppState;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("jewelry_storefront=info,tower_http=debug")),
        )
        .init();

    let config = StorefrontConfig::from_env()?;

    // Initialize application state
    let state = AppState::from_config(&config)?.into_shared();
    spawn_session_logger(state.auth.as_ref());
    spawn_session_pruner(state.clone(), config.session_prune_interval);

    let live_coupons = state.coupons.live_count(state.clock.now());
    tracing::info!(
        products = state.products.len(),
        coupons = state.coupons.coupons().len(),
        live_coupons,
        "catalog loaded"
    );
    if live_coupons == 0 {
        tracing::warn!("every seeded coupon has expired; coupon codes will be rejected");
    }

    // Build application router with all routes and middleware
    let app = create_app_router(state);

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
