use axum::Router;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::state::AppState;
use crate::{catalog, energy};

pub const DEFAULT_LOG_FILTER: &str = "nutrition_tracker=debug,axum=info,tower_http=info";

/// `RUST_LOG` wins over `default_filter`; `LOG_FORMAT=json` switches to JSON lines.
pub fn init_tracing(default_filter: &str, to_stderr: bool) {
    let env_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    let builder = tracing_subscriber::fmt().with_env_filter(env_filter);
    let result = match (json_logs, to_stderr) {
        (true, true) => builder
            .with_target(false)
            .json()
            .with_writer(std::io::stderr)
            .try_init(),
        (true, false) => builder.with_target(false).json().try_init(),
        (false, true) => builder.with_writer(std::io::stderr).try_init(),
        (false, false) => builder.try_init(),
    };
    if let Err(e) = result {
        eprintln!("tracing already initialised: {e}");
    }
}

pub fn build_app(state: AppState) -> Router {
    let assets = ServeDir::new(&state.config.server.static_dir);
    Router::new()
        .nest(
            "/api",
            Router::new()
                .merge(energy::router())
                .merge(catalog::router()),
        )
        .fallback_service(assets)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!("http_request", %method, uri = %uri, status = tracing::field::Empty)
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     _latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        if status.is_server_error() {
                            tracing::error!(%status, "response");
                        } else {
                            tracing::info!(%status, "response");
                        }
                    },
                ),
        )
}

pub async fn serve(app: Router, addr: &str) -> anyhow::Result<()> {
    let addr: std::net::SocketAddr = addr.parse()?;
    tracing::info!("listening on {}", addr);
    tracing::info!("bmr api: POST http://{}/api/calculate-bmr", addr);
    tracing::info!("health check: GET http://{}/api/test", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
