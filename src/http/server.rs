//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the gateway handlers
//! - Wire up middleware (tracing, request ID, timeout, CORS headers)
//! - Bind server to listener and serve until shutdown

use axum::{routing::post, Router};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::http::handler::{preflight, process_text};
use crate::http::response::cors_headers;
use crate::upstream::{TypografClient, UpstreamError};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub client: TypografClient,
    pub max_body_size: usize,
    /// Deadline for receiving the inbound body.
    pub body_timeout: Duration,
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, UpstreamError> {
        let state = AppState {
            client: TypografClient::new(&config.upstream)?,
            max_body_size: config.security.max_body_size,
            body_timeout: Duration::from_secs(config.timeouts.request_secs),
        };

        let router = Self::build_router(state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(state: AppState) -> Router {
        let [origin, allow_headers, allow_methods] = cors_headers();
        // The handler answers body and upstream timeouts itself; this layer
        // only fires if it hangs past both.
        let backstop = state.body_timeout + state.client.deadline() + Duration::from_secs(1);

        Router::new()
            .route("/", post(process_text).options(preflight))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(SetResponseHeaderLayer::overriding(origin.0, origin.1))
                    .layer(SetResponseHeaderLayer::overriding(allow_headers.0, allow_headers.1))
                    .layer(SetResponseHeaderLayer::overriding(allow_methods.0, allow_methods.1))
                    .layer(TimeoutLayer::new(backstop)),
            )
    }

    /// Run the server, accepting connections on the given listener until
    /// the shutdown channel fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.url,
            upstream_timeout_ms = self.config.upstream.timeout_ms,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
