use crate::error::{Result, ScraperError};
use crate::tools::{Tool, ToolContext, ToolResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameters for exporting the selections
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ExportParams {
    /// Output file ending in .csv or .json. When omitted the rows are
    /// returned inline.
    #[serde(default)]
    pub path: Option<String>,
}

/// Tool exporting the selections as text/selector/href rows
#[derive(Default)]
pub struct ExportTool;

impl Tool for ExportTool {
    type Params = ExportParams;

    fn name(&self) -> &str {
        "export_selections"
    }

    fn execute_typed(&self, params: ExportParams, context: &mut ToolContext) -> Result<ToolResult> {
        if context.session.selections().is_empty() {
            return Ok(ToolResult::failure("Nothing to export"));
        }

        match params.path {
            Some(path) => {
                let rows = context.session.export_to(Path::new(&path))?;
                Ok(ToolResult::success_with(serde_json::json!({
                    "path": path,
                    "rows": rows,
                    "message": format!("Exported {} rows to {}", rows, path)
                })))
            }
            None => {
                let records = context.session.export_records();
                let rows = serde_json::to_value(&records).map_err(|e| ScraperError::ExportFailed(e.to_string()))?;
                Ok(ToolResult::success_with(serde_json::json!({
                    "rows": records.len(),
                    "records": rows
                })))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::PickedElement;
    use crate::scrape::ScrapeSession;

    fn session() -> ScrapeSession {
        let mut session = ScrapeSession::default();
        session.pick_record(PickedElement {
            text: "Docs".to_string(),
            selector: "nav > a".to_string(),
            href: "https://example.com/docs".to_string(),
            ..Default::default()
        });
        session
    }

    #[test]
    fn test_export_inline() {
        let mut session = session();
        let mut context = ToolContext::new(&mut session);

        let data = ExportTool
            .execute_typed(ExportParams::default(), &mut context)
            .unwrap()
            .data
            .unwrap();
        assert_eq!(data["rows"], 1);
        assert_eq!(data["records"][0]["selector"], "nav > a");
        assert_eq!(data["records"][0]["href"], "https://example.com/docs");
    }

    #[test]
    fn test_export_to_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.json");
        let mut session = session();
        let mut context = ToolContext::new(&mut session);

        let params = ExportParams {
            path: Some(path.to_string_lossy().into_owned()),
        };
        let data = ExportTool.execute_typed(params, &mut context).unwrap().data.unwrap();
        assert_eq!(data["rows"], 1);

        let written: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written[0]["text"], "Docs");
    }

    #[test]
    fn test_export_empty_store_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.csv");
        let mut session = ScrapeSession::default();
        let mut context = ToolContext::new(&mut session);

        let params = ExportParams {
            path: Some(path.to_string_lossy().into_owned()),
        };
        let result = ExportTool.execute_typed(params, &mut context).unwrap();
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Nothing to export"));
        assert!(!path.exists());
    }

    #[test]
    fn test_export_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session();
        let mut context = ToolContext::new(&mut session);

        let params = ExportParams {
            path: Some(dir.path().join("rows.xlsx").to_string_lossy().into_owned()),
        };
        assert!(matches!(
            ExportTool.execute_typed(params, &mut context),
            Err(ScraperError::ExportFailed(_))
        ));
    }
}
