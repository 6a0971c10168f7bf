use crate::error::Result;
use crate::tools::{Tool, ToolContext, ToolResult};
use crate::utils::truncate_display;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for listing the selections (none)
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ListSelectionsParams {}

/// Tool listing the confirmed selections in store order
#[derive(Default)]
pub struct ListSelectionsTool;

impl Tool for ListSelectionsTool {
    type Params = ListSelectionsParams;

    fn name(&self) -> &str {
        "list_selections"
    }

    fn execute_typed(&self, _params: ListSelectionsParams, context: &mut ToolContext) -> Result<ToolResult> {
        let display_len = context.session.options().display_text_len;
        let rows: Vec<_> = context
            .session
            .selections()
            .iter()
            .enumerate()
            .map(|(index, example)| {
                serde_json::json!({
                    "index": index,
                    "text": truncate_display(&example.text, display_len),
                    "selector": example.structural_path,
                    "href": example.href
                })
            })
            .collect();

        Ok(ToolResult::success_with(serde_json::json!({
            "count": rows.len(),
            "selections": rows
        })))
    }
}

/// Parameters for deleting selections
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct RemoveSelectionsParams {
    /// Row indices from list_selections; out-of-range indices are ignored
    pub indices: Vec<usize>,
}

/// Tool deleting selected rows
#[derive(Default)]
pub struct RemoveSelectionsTool;

impl Tool for RemoveSelectionsTool {
    type Params = RemoveSelectionsParams;

    fn name(&self) -> &str {
        "remove_selections"
    }

    fn execute_typed(&self, params: RemoveSelectionsParams, context: &mut ToolContext) -> Result<ToolResult> {
        let removed = context.session.remove_selections(&params.indices);
        Ok(ToolResult::success_with(serde_json::json!({
            "removed": removed.len(),
            "remaining": context.session.selections().len()
        })))
    }
}

/// Parameters for clearing the selections (none)
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ClearSelectionsParams {}

/// Tool emptying the selection store
#[derive(Default)]
pub struct ClearSelectionsTool;

impl Tool for ClearSelectionsTool {
    type Params = ClearSelectionsParams;

    fn name(&self) -> &str {
        "clear_selections"
    }

    fn execute_typed(&self, _params: ClearSelectionsParams, context: &mut ToolContext) -> Result<ToolResult> {
        let cleared = context.session.selections().len();
        context.session.clear_selections();
        Ok(ToolResult::success_with(serde_json::json!({ "cleared": cleared })))
    }
}
