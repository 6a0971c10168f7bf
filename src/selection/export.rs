use crate::dom::ElementDescriptor;
use crate::error::{Result, ScraperError};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// UTF-8 byte order mark, so spreadsheet tools detect the encoding
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// One exported row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportRecord {
    pub text: String,
    pub selector: String,
    pub href: String,
}

impl From<&ElementDescriptor> for ExportRecord {
    fn from(descriptor: &ElementDescriptor) -> Self {
        Self {
            text: descriptor.text.clone(),
            selector: descriptor.structural_path.clone(),
            href: descriptor.href.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    /// Pick the format from the file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("json") => Ok(Self::Json),
            other => Err(ScraperError::ExportFailed(format!(
                "unsupported export format '{}'",
                other.unwrap_or("")
            ))),
        }
    }
}

/// Serialize records as pretty JSON
pub fn to_json_string(records: &[ExportRecord]) -> Result<String> {
    serde_json::to_string_pretty(records).map_err(|e| ScraperError::ExportFailed(e.to_string()))
}

/// Write `records` to `writer` as CSV with a BOM and a header row
pub fn write_csv<W: Write>(records: &[ExportRecord], mut writer: W) -> Result<()> {
    writer.write_all(UTF8_BOM)?;

    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in records {
        csv_writer
            .serialize(record)
            .map_err(|e| ScraperError::ExportFailed(format!("Failed to write CSV record: {}", e)))?;
    }
    csv_writer
        .flush()
        .map_err(|e| ScraperError::ExportFailed(format!("Failed to flush CSV writer: {}", e)))?;
    Ok(())
}

/// Write `records` to `path`, format chosen by extension. Returns the row count.
pub fn write_records(records: &[ExportRecord], path: &Path) -> Result<usize> {
    let format = ExportFormat::from_path(path)?;

    match format {
        ExportFormat::Csv => write_csv(records, File::create(path)?)?,
        ExportFormat::Json => {
            let mut file = File::create(path)?;
            file.write_all(to_json_string(records)?.as_bytes())?;
        }
    }

    log::info!("Exported {} rows to {}", records.len(), path.display());
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<ExportRecord> {
        vec![
            ExportRecord {
                text: "Café, \"best\"".to_string(),
                selector: "ul > li".to_string(),
                href: "https://example.com/a".to_string(),
            },
            ExportRecord {
                text: "Plain".to_string(),
                selector: "ul > li:nth-of-type(2)".to_string(),
                href: String::new(),
            },
        ]
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ExportFormat::from_path(Path::new("out.csv")).unwrap(), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_path(Path::new("OUT.JSON")).unwrap(), ExportFormat::Json);
        assert!(ExportFormat::from_path(Path::new("out.xlsx")).is_err());
        assert!(ExportFormat::from_path(Path::new("out")).is_err());
    }

    #[test]
    fn test_csv_has_bom_header_and_quoting() {
        let mut buffer = Vec::new();
        write_csv(&records(), &mut buffer).unwrap();

        assert!(buffer.starts_with(UTF8_BOM));
        let text = String::from_utf8(buffer[UTF8_BOM.len()..].to_vec()).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("text,selector,href"));
        assert_eq!(
            lines.next(),
            Some("\"Café, \"\"best\"\"\",ul > li,https://example.com/a")
        );
        assert_eq!(lines.next(), Some("Plain,ul > li:nth-of-type(2),"));
    }

    #[test]
    fn test_json_keeps_unicode() {
        let json = to_json_string(&records()).unwrap();
        assert!(json.contains("Café"));
        let parsed: Vec<ExportRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, records());
    }

    #[test]
    fn test_write_records_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.json");

        let count = write_records(&records(), &path).unwrap();
        assert_eq!(count, 2);
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("ul > li:nth-of-type(2)"));
    }
}
