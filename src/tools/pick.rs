use crate::capture::PickedElement;
use crate::error::{Result, ScraperError};
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the pick tool
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PickParams {
    /// Element index, structural path, or a full capture record
    #[serde(flatten)]
    pub target: PickTarget,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum PickTarget {
    /// Select by index from list_elements
    Index {
        /// Element index
        index: usize,
    },
    /// Select by structural path
    Path {
        /// Structural path, e.g. "html > body > ul > li:nth-of-type(2)"
        selector: String,
    },
    /// Record captured by an external click handler
    Record {
        element: PickedElement,
    },
}

/// Tool registering an element as an example
#[derive(Default)]
pub struct PickTool;

impl Tool for PickTool {
    type Params = PickParams;

    fn name(&self) -> &str {
        "pick_element"
    }

    fn execute_typed(&self, params: PickParams, context: &mut ToolContext) -> Result<ToolResult> {
        let outcome = match params.target {
            PickTarget::Index { index } => context.session.pick_index(index)?,
            PickTarget::Path { selector } => context.session.pick_path(&selector)?,
            PickTarget::Record { element } => context.session.pick_record(element),
        };

        let data = serde_json::to_value(&outcome).map_err(|e| ScraperError::ToolExecutionFailed {
            tool: self.name().to_string(),
            reason: e.to_string(),
        })?;
        Ok(ToolResult::success_with(data))
    }
}

/// Parameters for toggling selection mode
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SelectionModeParams {
    /// Accept picks when true
    pub enabled: bool,
}

/// Tool toggling whether picks are accepted
#[derive(Default)]
pub struct SelectionModeTool;

impl Tool for SelectionModeTool {
    type Params = SelectionModeParams;

    fn name(&self) -> &str {
        "set_selection_mode"
    }

    fn execute_typed(&self, params: SelectionModeParams, context: &mut ToolContext) -> Result<ToolResult> {
        context.session.set_selection_mode(params.enabled);
        let message = if params.enabled {
            "Selection mode enabled, pick elements to select them"
        } else {
            "Selection mode disabled"
        };
        Ok(ToolResult::success_with(serde_json::json!({
            "enabled": params.enabled,
            "message": message
        })))
    }
}
