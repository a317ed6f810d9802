mod rate_limit;
mod routes;
mod services;
mod state;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");
    let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| "sessions".into());

    let state = state::AppState::new(data_dir.into());

    match services::persistence::load_all_sessions(&state).await {
        Ok(count) => tracing::info!(count, "loaded persisted sessions"),
        Err(e) => tracing::warn!(error = %e, "could not load persisted sessions"),
    }

    // Spawn background persistence task.
    let _persistence = services::persistence::spawn_persistence_task(state.clone());

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "areacheck listening");
    axum::serve(listener, app).await.expect("server failed");
}
