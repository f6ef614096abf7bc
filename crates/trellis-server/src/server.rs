use std::sync::Arc;

use tokio::net::TcpListener;

use trellis_content::{ContentFixture, InMemoryContentSource};

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::{AppState, SharedSource};

/// Trellis HTTP server.
pub struct TrellisServer {
    state: AppState,
}

impl TrellisServer {
    pub fn new(config: ServerConfig, source: SharedSource) -> Self {
        Self {
            state: AppState::new(config, source),
        }
    }

    /// Build a server backed by the config's content fixture, or by an
    /// empty source when none is configured.
    pub fn from_config(config: ServerConfig) -> ServerResult<Self> {
        let source = match &config.content_fixture {
            Some(path) => {
                let fixture = ContentFixture::load(path)?;
                tracing::info!(path = %path.display(), objects = fixture.len(), "loaded content fixture");
                fixture.into_source()?
            }
            None => {
                tracing::warn!("no content fixture configured, serving an empty repository");
                InMemoryContentSource::new()
            }
        };
        Ok(Self::new(config, Arc::new(source)))
    }

    pub fn config(&self) -> &ServerConfig {
        self.state.config()
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> axum::Router {
        build_router(self.state.clone())
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let addr = self.state.config().bind_addr;
        let app = build_router(self.state);
        let listener = TcpListener::bind(&addr).await?;
        tracing::info!("Trellis server listening on {}", addr);
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}
