use std::sync::Arc;

use tokio::net::TcpListener;

use crate::chart::TypeChart;
use crate::config::ServerConfig;
use crate::error::ServerError;

pub mod api;
pub mod routes;

#[derive(Clone)]
pub struct AppState {
    pub chart: Arc<TypeChart>,
}

impl AppState {
    pub fn new(chart: TypeChart) -> Self {
        Self {
            chart: Arc::new(chart),
        }
    }
}

/// Load the chart once and serve it until ctrl-c.
pub fn run_server(config: &ServerConfig) -> Result<(), ServerError> {
    let chart = TypeChart::load(&config.chart_path)?;
    tracing::info!(
        path = %config.chart_path.display(),
        types = chart.len(),
        "type chart loaded"
    );

    let app = routes::create_router(AppState::new(chart), &config.static_dir);
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let listener = TcpListener::bind(config.bind_addr.as_str()).await?;
        tracing::info!("manytypes server listening on http://{}", config.bind_addr);
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok::<(), ServerError>(())
    })
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for ctrl-c: {err}");
    }
}
