use crate::error::Result;
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for listing pickable elements
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ListElementsParams {
    /// Skip this many elements (default: 0)
    #[serde(default)]
    pub offset: usize,

    /// Return at most this many elements (default: all)
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Tool listing the indexed text-bearing elements of the current page
#[derive(Default)]
pub struct ListElementsTool;

impl Tool for ListElementsTool {
    type Params = ListElementsParams;

    fn name(&self) -> &str {
        "list_elements"
    }

    fn execute_typed(&self, params: ListElementsParams, context: &mut ToolContext) -> Result<ToolResult> {
        let document = context.session.document()?;
        let limit = params.limit.unwrap_or(usize::MAX);

        let elements: Vec<_> = document
            .selector_map
            .iter()
            .skip(params.offset)
            .take(limit)
            .map(|(index, selector)| {
                serde_json::json!({
                    "index": index,
                    "selector": selector.css_selector,
                    "tag": selector.tag_name,
                    "id": selector.id,
                    "text": selector.text
                })
            })
            .collect();

        Ok(ToolResult::success_with(serde_json::json!({
            "total": document.count_text_elements(),
            "elements": elements
        })))
    }
}
