use crate::error::{Result, ScraperError};
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parameters for a match request
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct MatchParams {
    /// Similarity threshold in [0, 1] (default: the session's default threshold)
    #[serde(default)]
    pub threshold: Option<f64>,

    /// Element records from an external scan, matched instead of the loaded document
    #[serde(default)]
    pub candidates: Option<Value>,
}

/// Tool matching the page against the selected examples
#[derive(Default)]
pub struct MatchTool;

impl Tool for MatchTool {
    type Params = MatchParams;

    fn name(&self) -> &str {
        "match_elements"
    }

    fn execute_typed(&self, params: MatchParams, context: &mut ToolContext) -> Result<ToolResult> {
        let threshold = params
            .threshold
            .unwrap_or(context.session.options().default_threshold);

        let report = match &params.candidates {
            Some(candidates) => context.session.run_match_with(threshold, candidates)?,
            None => context.session.run_match(threshold)?,
        };

        let data = serde_json::to_value(&report).map_err(|e| ScraperError::ToolExecutionFailed {
            tool: self.name().to_string(),
            reason: e.to_string(),
        })?;
        Ok(ToolResult::success_with(data))
    }
}
