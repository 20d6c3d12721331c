use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use resume_analyzer::analysis::{JobMatcher, SkillOverlapMatcher};
use resume_analyzer::config::Config;
use resume_analyzer::routes::build_router;
use resume_analyzer::rubric::loader::load_rubric;
use resume_analyzer::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting resume analyzer v{}", env!("CARGO_PKG_VERSION"));

    let rubric = Arc::new(
        load_rubric(config.rubric_path.as_deref()).context("Failed to load scoring rubric")?,
    );

    let job_matcher: Arc<dyn JobMatcher> = Arc::new(SkillOverlapMatcher::new(rubric.clone()));
    info!("Job matcher backend: {}", job_matcher.backend());

    let state = AppState {
        rubric,
        job_matcher,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
