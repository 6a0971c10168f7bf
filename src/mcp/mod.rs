//! MCP (Model Context Protocol) server for example-driven scraping
//!
//! This module provides rmcp-compatible tools by wrapping the session tools
//! in [`crate::tools`]. Every MCP tool is named after its session tool with a
//! `scraper_` prefix.

pub mod handler;
pub use handler::ScraperServer;

use crate::capture::PickedElement;
use crate::tools::{
    ClearSelectionsParams, ExportParams, ListElementsParams, ListSelectionsParams, LoadDocumentParams,
    MatchParams, RemoveSelectionsParams, SelectionModeParams, ToolResult as InternalToolResult,
};
use rmcp::{
    ErrorData as McpError,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    tool, tool_router,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Pick tool parameters
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PickElementParams {
    /// Element index from scraper_list_elements
    #[serde(default)]
    pub index: Option<usize>,
    /// Structural path of the element
    #[serde(default)]
    pub selector: Option<String>,
    /// Element record captured by a browser-side click handler
    #[serde(default)]
    pub element: Option<PickedElement>,
}

/// Convert internal ToolResult to MCP CallToolResult
fn convert_result(result: InternalToolResult) -> Result<CallToolResult, McpError> {
    if result.success {
        let text = if let Some(data) = result.data {
            serde_json::to_string_pretty(&data).unwrap_or_else(|_| data.to_string())
        } else {
            "Success".to_string()
        };
        Ok(CallToolResult::success(vec![Content::text(text)]))
    } else {
        let error_msg = result.error.unwrap_or_else(|| "Unknown error".to_string());
        Err(McpError::internal_error(error_msg, None))
    }
}

fn to_params<T: Serialize>(params: &T) -> Result<serde_json::Value, McpError> {
    serde_json::to_value(params).map_err(|e| McpError::invalid_params(e.to_string(), None))
}

#[tool_router]
impl ScraperServer {
    /// Load a page snapshot
    #[tool(description = "Load the page to scrape from HTML markup, an HTML file path, or a JSON element-tree snapshot")]
    fn scraper_load_document(&self, params: Parameters<LoadDocumentParams>) -> Result<CallToolResult, McpError> {
        convert_result(self.execute("load_document", to_params(&params.0)?)?)
    }

    /// List pickable elements
    #[tool(description = "List the indexed text-bearing elements of the loaded page with their structural paths")]
    fn scraper_list_elements(&self, params: Parameters<ListElementsParams>) -> Result<CallToolResult, McpError> {
        convert_result(self.execute("list_elements", to_params(&params.0)?)?)
    }

    /// Toggle selection mode
    #[tool(description = "Enable or disable selection mode; picks are ignored while it is disabled")]
    fn scraper_set_selection_mode(&self, params: Parameters<SelectionModeParams>) -> Result<CallToolResult, McpError> {
        convert_result(self.execute("set_selection_mode", to_params(&params.0)?)?)
    }

    /// Pick an example element
    #[tool(description = "Select an element as an example, by index, structural path, or captured element record")]
    fn scraper_pick_element(&self, params: Parameters<PickElementParams>) -> Result<CallToolResult, McpError> {
        let tool_params = if let Some(index) = params.0.index {
            serde_json::json!({ "index": index })
        } else if let Some(selector) = params.0.selector {
            serde_json::json!({ "selector": selector })
        } else if let Some(element) = params.0.element {
            serde_json::json!({ "element": element })
        } else {
            return Err(McpError::invalid_params(
                "One of index, selector or element must be provided",
                None,
            ));
        };

        convert_result(self.execute("pick_element", tool_params)?)
    }

    /// Match the page against the examples
    #[tool(description = "Find elements similar to the selected examples and add them to the selections. Threshold is a decimal between 0 and 1")]
    fn scraper_match_elements(&self, params: Parameters<MatchParams>) -> Result<CallToolResult, McpError> {
        convert_result(self.execute("match_elements", to_params(&params.0)?)?)
    }

    /// List selections
    #[tool(description = "List the selected elements in order")]
    fn scraper_list_selections(&self, params: Parameters<ListSelectionsParams>) -> Result<CallToolResult, McpError> {
        convert_result(self.execute("list_selections", to_params(&params.0)?)?)
    }

    /// Remove selections
    #[tool(description = "Remove selected elements by row index")]
    fn scraper_remove_selections(&self, params: Parameters<RemoveSelectionsParams>) -> Result<CallToolResult, McpError> {
        convert_result(self.execute("remove_selections", to_params(&params.0)?)?)
    }

    /// Clear selections
    #[tool(description = "Remove every selected element")]
    fn scraper_clear_selections(&self, params: Parameters<ClearSelectionsParams>) -> Result<CallToolResult, McpError> {
        convert_result(self.execute("clear_selections", to_params(&params.0)?)?)
    }

    /// Export selections
    #[tool(description = "Export the selected elements as text, selector and href rows to a .csv or .json file, or inline when no path is given")]
    fn scraper_export_selections(&self, params: Parameters<ExportParams>) -> Result<CallToolResult, McpError> {
        convert_result(self.execute("export_selections", to_params(&params.0)?)?)
    }
}
