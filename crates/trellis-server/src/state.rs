use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use trellis_content::ContentSource;
use trellis_present::{MapConfigStore, PageBuilder, PageContext, ThemeResolver};
use trellis_resolve::ObjectDispatcher;

use crate::config::ServerConfig;
use crate::error::ServerError;

/// Content source shared across request tasks.
pub type SharedSource = Arc<dyn ContentSource>;

/// Read-only state shared by all handlers. Nothing in it changes per request.
#[derive(Clone)]
pub struct AppState {
    dispatcher: Arc<ObjectDispatcher<SharedSource>>,
    themes: Arc<ThemeResolver<MapConfigStore>>,
    config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig, source: SharedSource) -> Self {
        let themes = ThemeResolver::new(config.theme_store()).with_setting(config.theme_setting.as_str());
        Self {
            dispatcher: Arc::new(ObjectDispatcher::new(source)),
            themes: Arc::new(themes),
            config: Arc::new(config),
        }
    }

    pub fn dispatcher(&self) -> &ObjectDispatcher<SharedSource> {
        &self.dispatcher
    }

    pub fn themes(&self) -> &ThemeResolver<MapConfigStore> {
        &self.themes
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// A page builder for one request.
    pub fn pages(&self) -> PageBuilder<'_, SharedSource, MapConfigStore> {
        PageBuilder::new(self.dispatcher.source(), &self.themes, self.config.application_name.as_str())
            .with_default_theme(&self.config.default_theme)
            .with_page_size(self.config.page_size)
    }

    /// Turn an error into a themed error page with the matching status.
    pub fn error_page(&self, error: ServerError) -> ErrorPage {
        let status = error.status();
        if status.is_server_error() {
            tracing::error!(error = %error, "request failed");
        } else {
            tracing::debug!(error = %error, %status, "request rejected");
        }
        ErrorPage {
            status,
            context: self.pages().error(error.to_string()),
        }
    }
}

/// An error response carrying a themed [`PageContext`].
#[derive(Debug)]
pub struct ErrorPage {
    pub status: StatusCode,
    pub context: PageContext,
}

impl IntoResponse for ErrorPage {
    fn into_response(self) -> Response {
        (self.status, Json(self.context)).into_response()
    }
}
