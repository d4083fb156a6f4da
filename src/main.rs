use nutrition_tracker::{
    app::{self, DEFAULT_LOG_FILTER},
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    app::init_tracing(DEFAULT_LOG_FILTER, false);

    let state = AppState::init()?;
    tracing::info!(
        foods = state.catalog.len(),
        static_dir = %state.config.server.static_dir.display(),
        "catalog ready"
    );

    let addr = state.config.bind_addr();
    app::serve(app::build_app(state), &addr).await
}
