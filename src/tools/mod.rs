//! Typed tools over a scraping session
//!
//! Every user-facing operation is a [`Tool`] with `schemars`-described
//! parameters. The [`ToolRegistry`] executes tools by name with JSON
//! parameters, which is how the MCP server drives the session.

pub mod elements;
pub mod export;
pub mod load;
pub mod match_elements;
pub mod pick;
pub mod selections;

pub use elements::{ListElementsParams, ListElementsTool};
pub use export::{ExportParams, ExportTool};
pub use load::{LoadDocumentParams, LoadDocumentTool};
pub use match_elements::{MatchParams, MatchTool};
pub use pick::{PickParams, PickTarget, PickTool, SelectionModeParams, SelectionModeTool};
pub use selections::{
    ClearSelectionsParams, ClearSelectionsTool, ListSelectionsParams, ListSelectionsTool,
    RemoveSelectionsParams, RemoveSelectionsTool,
};

use crate::error::{Result, ScraperError};
use crate::scrape::ScrapeSession;
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Execution context handed to tools
pub struct ToolContext<'a> {
    pub session: &'a mut ScrapeSession,
}

impl<'a> ToolContext<'a> {
    pub fn new(session: &'a mut ScrapeSession) -> Self {
        Self { session }
    }
}

/// Outcome of a tool call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolResult {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ToolResult {
    pub fn success() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
        }
    }

    pub fn success_with(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// A session operation with typed parameters
pub trait Tool: Send + Sync {
    type Params: DeserializeOwned + JsonSchema;

    fn name(&self) -> &str;

    /// JSON schema of the parameters
    fn parameters_schema(&self) -> Value {
        serde_json::to_value(schemars::schema_for!(Self::Params)).unwrap_or_else(|_| serde_json::json!({}))
    }

    fn execute_typed(&self, params: Self::Params, context: &mut ToolContext) -> Result<ToolResult>;
}

/// Object-safe view of a [`Tool`], used by the registry
pub trait DynTool: Send + Sync {
    fn tool_name(&self) -> &str;

    fn schema(&self) -> Value;

    fn execute_json(&self, params: Value, context: &mut ToolContext) -> Result<ToolResult>;
}

impl<T: Tool> DynTool for T {
    fn tool_name(&self) -> &str {
        self.name()
    }

    fn schema(&self) -> Value {
        self.parameters_schema()
    }

    fn execute_json(&self, params: Value, context: &mut ToolContext) -> Result<ToolResult> {
        let typed: T::Params = serde_json::from_value(params)
            .map_err(|e| ScraperError::InvalidParams(format!("{}: {}", self.name(), e)))?;
        self.execute_typed(typed, context)
    }
}

/// Tools by name, in registration order
#[derive(Default)]
pub struct ToolRegistry {
    tools: IndexMap<String, Box<dyn DynTool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in tool
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(LoadDocumentTool);
        registry.register(ListElementsTool);
        registry.register(SelectionModeTool);
        registry.register(PickTool);
        registry.register(MatchTool);
        registry.register(ListSelectionsTool);
        registry.register(RemoveSelectionsTool);
        registry.register(ClearSelectionsTool);
        registry.register(ExportTool);
        registry
    }

    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        self.tools.insert(tool.name().to_string(), Box::new(tool));
    }

    pub fn get(&self, name: &str) -> Option<&dyn DynTool> {
        self.tools.get(name).map(|tool| tool.as_ref())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Execute a tool by name with JSON parameters
    pub fn execute(&self, name: &str, params: Value, context: &mut ToolContext) -> Result<ToolResult> {
        let tool = self
            .get(name)
            .ok_or_else(|| ScraperError::InvalidParams(format!("Unknown tool '{}'", name)))?;
        log::debug!("Executing tool '{}'", name);
        tool.execute_json(params, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_registry_defaults() {
        let registry = ToolRegistry::with_defaults();
        let names: Vec<_> = registry.names().collect();
        assert_eq!(
            names,
            vec![
                "load_document",
                "list_elements",
                "set_selection_mode",
                "pick_element",
                "match_elements",
                "list_selections",
                "remove_selections",
                "clear_selections",
                "export_selections",
            ]
        );
        for name in names {
            assert!(registry.get(name).unwrap().schema().is_object());
        }
    }

    #[test]
    fn test_unknown_tool() {
        let registry = ToolRegistry::with_defaults();
        let mut session = ScrapeSession::default();
        let mut context = ToolContext::new(&mut session);

        let result = registry.execute("navigate", json!({}), &mut context);
        assert!(matches!(result, Err(ScraperError::InvalidParams(_))));
    }

    #[test]
    fn test_bad_params() {
        let registry = ToolRegistry::with_defaults();
        let mut session = ScrapeSession::default();
        let mut context = ToolContext::new(&mut session);

        let result = registry.execute("remove_selections", json!({"indices": "all"}), &mut context);
        assert!(matches!(result, Err(ScraperError::InvalidParams(_))));
    }

    #[test]
    fn test_tool_result_constructors() {
        assert!(ToolResult::success().success);
        let ok = ToolResult::success_with(json!({"count": 1}));
        assert_eq!(ok.data.unwrap()["count"], 1);
        let failed = ToolResult::failure("Nothing to match");
        assert!(!failed.success);
        assert_eq!(failed.error.as_deref(), Some("Nothing to match"));
    }
}
