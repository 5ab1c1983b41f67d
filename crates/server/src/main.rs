mod api;
mod handlers;
mod router;
mod runner;
mod state;

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use uhrwerk_jobs::{CronScheduler, HandlerRegistry, JobRuntime};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    uhrwerk_core::config::load_dotenv();
    let config = uhrwerk_core::Config::from_env();
    config.log_summary();

    // Handlers are bound before the server accepts requests; the registry
    // is immutable afterwards.
    let mut registry = HandlerRegistry::new();
    handlers::register_builtin_handlers(&mut registry, &config)?;
    let registry = Arc::new(registry);
    info!("Registered {} job handler(s)", registry.len());

    let scheduler = Arc::new(CronScheduler::new());
    let runtime = Arc::new(JobRuntime::new(registry, scheduler.clone()));

    tokio::spawn(runner::run_scheduler_loop(
        scheduler.clone(),
        Duration::from_secs(config.jobs.tick_interval_secs),
    ));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = Arc::new(state::AppState { runtime, scheduler });

    let app = router::build_router(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
