#[tokio::main]
async fn main() {
    shiftcrew_observability::init();

    let token_secret = std::env::var("TOKEN_SECRET").unwrap_or_else(|_| {
        tracing::warn!("TOKEN_SECRET not set; using insecure dev default");
        "dev-secret".to_string()
    });
    let addr = std::env::var("SHIFTCREW_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let app = shiftcrew_api::app::build_app(token_secret).await;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {addr}: {e}"));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
