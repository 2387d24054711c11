//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{Router, routing::get};
use parley_shared::time::SystemClock;
use tokio::{net::TcpListener, sync::Mutex};
use tower_http::trace::TraceLayer;

use crate::{
    domain::Lobby,
    infrastructure::{message_pusher::WebSocketMessagePusher, repository::InMemoryLobbyRepository},
    usecase::{
        BroadcastPresenceUseCase, ConnectConnectionUseCase, DisconnectConnectionUseCase,
        GetPresenceUseCase, JoinChatUseCase, RelaySignalUseCase, RequeuePeerUseCase,
    },
};

use super::{
    config::ServerConfig,
    handler::{get_presence, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Matchmaking and signaling relay server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(ServerConfig::default());
/// server.run().await?;
/// ```
pub struct Server {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl Server {
    /// Create a new Server backed by the in-memory lobby
    ///
    /// Dependencies are wired in order: Repository, MessagePusher, UseCases, AppState.
    pub fn new(config: ServerConfig) -> Self {
        // 1. Repository（プロセス内メモリ）
        let repository = Arc::new(InMemoryLobbyRepository::new(Arc::new(Mutex::new(
            Lobby::new(),
        ))));

        // 2. MessagePusher（WebSocket 実装）
        let message_pusher = Arc::new(WebSocketMessagePusher::default());

        // 3. UseCases
        let presence = Arc::new(BroadcastPresenceUseCase::new(
            repository.clone(),
            message_pusher.clone(),
        ));
        let requeue = Arc::new(RequeuePeerUseCase::new(
            repository.clone(),
            message_pusher.clone(),
            presence.clone(),
        ));
        let connect_connection_usecase = Arc::new(ConnectConnectionUseCase::new(
            repository.clone(),
            message_pusher.clone(),
            presence.clone(),
        ));
        let join_chat_usecase = Arc::new(JoinChatUseCase::new(
            repository.clone(),
            message_pusher.clone(),
            presence.clone(),
        ));
        let relay_signal_usecase = Arc::new(RelaySignalUseCase::new(
            repository.clone(),
            message_pusher.clone(),
            Arc::new(SystemClock),
        ));
        let disconnect_connection_usecase = Arc::new(DisconnectConnectionUseCase::new(
            repository.clone(),
            message_pusher,
            presence,
            requeue,
            config.requeue_delay,
        ));
        let get_presence_usecase = Arc::new(GetPresenceUseCase::new(repository));

        // 4. AppState
        let state = Arc::new(AppState {
            connect_connection_usecase,
            join_chat_usecase,
            relay_signal_usecase,
            disconnect_connection_usecase,
            get_presence_usecase,
        });

        Self { config, state }
    }

    /// Build the router
    pub fn router(&self) -> Router {
        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/presence", get(get_presence))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Run the server on the configured address until Ctrl+C / SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the configured address or
    /// if there's an error during server execution.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = self.config.bind_addr();
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Parley server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!(
            "Orphaned peers are requeued after {:?}",
            self.config.requeue_delay
        );
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Serve on an already-bound listener until `shutdown` completes
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let app = self.router();
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await
    }
}
