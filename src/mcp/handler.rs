use crate::error::ScraperError;
use crate::scrape::{ScrapeSession, ScraperOptions};
use crate::tools::{ToolContext, ToolRegistry, ToolResult};
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::router::tool::ToolRouter,
    model::{ServerCapabilities, ServerInfo},
    tool_handler,
};
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard};

/// MCP server exposing one scraping session
#[derive(Clone)]
pub struct ScraperServer {
    session: Arc<Mutex<ScrapeSession>>,
    registry: Arc<ToolRegistry>,
    tool_router: ToolRouter<Self>,
}

impl ScraperServer {
    /// Create a server with default options
    pub fn new() -> Self {
        Self::with_options(ScraperOptions::default())
    }

    /// Create a server whose session uses `options`
    pub fn with_options(options: ScraperOptions) -> Self {
        log::debug!(
            "Creating scraper server (default threshold {})",
            options.default_threshold
        );
        Self {
            session: Arc::new(Mutex::new(ScrapeSession::new(options))),
            registry: Arc::new(ToolRegistry::with_defaults()),
            tool_router: Self::tool_router(),
        }
    }

    /// Lock the session
    pub fn session(&self) -> Result<MutexGuard<'_, ScrapeSession>, McpError> {
        self.session
            .lock()
            .map_err(|_| McpError::internal_error("Scrape session lock poisoned", None))
    }

    /// Run a registered tool against the session
    pub(super) fn execute(&self, name: &str, params: Value) -> Result<ToolResult, McpError> {
        let mut session = self.session()?;
        let mut context = ToolContext::new(&mut *session);

        self.registry
            .execute(name, params, &mut context)
            .map_err(|e| match e {
                ScraperError::InvalidParams(_) | ScraperError::InvalidThreshold(_) => {
                    McpError::invalid_params(e.to_string(), None)
                }
                _ => McpError::internal_error(e.to_string(), None),
            })
    }
}

impl Default for ScraperServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_handler]
impl ServerHandler for ScraperServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(
                "Example-driven scraping: load a page, pick a few elements as examples, \
                 then match to collect every similar element and export the rows."
                    .to_string(),
            ),
            ..Default::default()
        }
    }
}
