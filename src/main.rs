use anyhow::Context;
use tokio::net::TcpListener;

use flips::config::Config;
use flips::logging::init_logging;
use flips::{AppState, build_router, db};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let config = Config::from_env();
    init_logging(&config.log_level);

    let pool = db::build_pool(&config)
        .with_context(|| format!("Failed to create DB pool for {}", config.database_url))?;
    {
        let mut conn = pool.get().context("Failed to get DB connection")?;
        db::init_schema(&mut conn).context("Failed to initialise schema")?;
    }

    let addr = config.bind_addr();
    let app = build_router(AppState::new(pool, config));

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;
    log::info!("Server running on http://{}", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
