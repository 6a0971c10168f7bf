use crate::error::{Result, ScraperError};
use crate::tools::{Tool, ToolContext, ToolResult};
use crate::utils::normalize_url;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parameters for the load_document tool. Exactly one source is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct LoadDocumentParams {
    /// HTML markup of the page
    #[serde(default)]
    pub html: Option<String>,

    /// Path of an HTML file to read
    #[serde(default)]
    pub path: Option<String>,

    /// JSON element tree captured by a browser-side scan
    #[serde(default)]
    pub snapshot: Option<Value>,

    /// Page URL, used to resolve relative links (scheme optional)
    #[serde(default)]
    pub url: Option<String>,
}

/// Tool for replacing the session's page snapshot
#[derive(Default)]
pub struct LoadDocumentTool;

impl Tool for LoadDocumentTool {
    type Params = LoadDocumentParams;

    fn name(&self) -> &str {
        "load_document"
    }

    fn execute_typed(&self, params: LoadDocumentParams, context: &mut ToolContext) -> Result<ToolResult> {
        let url = params.url.as_deref().map(normalize_url);

        let document = match (params.html, params.path, params.snapshot) {
            (Some(html), None, None) => context.session.load_html(&html, url.as_deref())?,
            (None, Some(path), None) => {
                let html = std::fs::read_to_string(&path)?;
                context.session.load_html(&html, url.as_deref())?
            }
            (None, None, Some(snapshot)) => {
                let json = serde_json::to_string(&snapshot)
                    .map_err(|e| ScraperError::DocumentParseFailed(e.to_string()))?;
                context.session.load_snapshot(&json, url.as_deref())?
            }
            _ => {
                return Err(ScraperError::InvalidParams(
                    "Provide exactly one of 'html', 'path' or 'snapshot'".to_string(),
                ));
            }
        };

        Ok(ToolResult::success_with(serde_json::json!({
            "url": url,
            "elements": document.count_elements(),
            "text_elements": document.count_text_elements()
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scrape::ScrapeSession;
    use serde_json::json;

    #[test]
    fn test_load_html_with_url() {
        let mut session = ScrapeSession::default();
        let mut context = ToolContext::new(&mut session);

        let params: LoadDocumentParams = serde_json::from_value(json!({
            "html": "<html><body><p>Hi</p></body></html>",
            "url": "example.com"
        }))
        .unwrap();
        let result = LoadDocumentTool.execute_typed(params, &mut context).unwrap();

        let data = result.data.unwrap();
        assert_eq!(data["url"], "https://example.com");
        assert_eq!(data["text_elements"], 3);
        assert!(session.document().is_ok());
    }

    #[test]
    fn test_load_snapshot() {
        let mut session = ScrapeSession::default();
        let mut context = ToolContext::new(&mut session);

        let params = LoadDocumentParams {
            snapshot: Some(json!({"tag_name": "body", "children": [{"tag_name": "p", "text_content": "x"}]})),
            ..Default::default()
        };
        let result = LoadDocumentTool.execute_typed(params, &mut context).unwrap();
        assert_eq!(result.data.unwrap()["elements"], 2);
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.html");
        std::fs::write(&path, "<html><body><h1>Title</h1></body></html>").unwrap();

        let mut session = ScrapeSession::default();
        let mut context = ToolContext::new(&mut session);
        let params = LoadDocumentParams {
            path: Some(path.to_string_lossy().into_owned()),
            ..Default::default()
        };
        assert!(LoadDocumentTool.execute_typed(params, &mut context).unwrap().success);
    }

    #[test]
    fn test_requires_exactly_one_source() {
        let mut session = ScrapeSession::default();
        let mut context = ToolContext::new(&mut session);

        let none = LoadDocumentTool.execute_typed(LoadDocumentParams::default(), &mut context);
        assert!(matches!(none, Err(ScraperError::InvalidParams(_))));

        let both = LoadDocumentParams {
            html: Some("<p>a</p>".to_string()),
            path: Some("a.html".to_string()),
            ..Default::default()
        };
        assert!(LoadDocumentTool.execute_typed(both, &mut context).is_err());
    }

    #[test]
    fn test_tool_metadata() {
        assert_eq!(LoadDocumentTool.name(), "load_document");
        assert!(LoadDocumentTool.parameters_schema().is_object());
    }
}
