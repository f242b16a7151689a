use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roleta_core::EngineParams;
use roleta_server::{
    build_router,
    config::{LogFormat, ServerConfig},
    AppState,
};

fn init_tracing(format: LogFormat) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "roleta_server=info,roleta_core=info,tower_http=info".into());
    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    init_tracing(config.log_format);

    let params = EngineParams::standard();
    params.validate()?;
    info!(
        prizes = params.prizes.entries().len(),
        symbols = params.symbols.len(),
        static_dir = %config.static_dir.display(),
        "game data loaded"
    );

    let app = build_router(AppState::new(params), &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    info!("listening on {}", config.bind);
    axum::serve(listener, app).await?;
    Ok(())
}
