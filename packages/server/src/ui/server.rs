//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::{
    error::ServerError,
    handler::{
        create_room, debug_room_state, health_check, join_room, list_rooms, room_page,
        websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Fastest-clicker game server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(AppState::in_memory(&GameConfig::default()));
/// server.run("127.0.0.1", 8080).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    pub fn new(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// Build the application router.
    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/ws/{room}", get(websocket_handler))
            // HTTP エンドポイント
            .route("/create", post(create_room))
            .route("/join", post(join_room))
            .route("/room/{room}", get(room_page))
            .route("/api/health", get(health_check))
            .route("/api/rooms", get(list_rooms))
            .route("/debug/rooms/{room}", get(debug_room_state))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Bind to `host:port` and serve until a shutdown signal arrives.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound or serving fails.
    pub async fn run(self, host: &str, port: u16) -> Result<(), ServerError> {
        let addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener until a shutdown signal arrives.
    pub async fn serve(self, listener: TcpListener) -> Result<(), ServerError> {
        let local_addr = listener.local_addr()?;
        tracing::info!("Clickrush server listening on {}", local_addr);
        tracing::info!("Join a room at: ws://{}/ws/{{room}}?username={{name}}", local_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}
