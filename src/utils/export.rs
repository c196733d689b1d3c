//! Report rendering for the export command

use crate::core::data::Tool;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const CSV_MEDIA_TYPE: &str = "text/csv";
pub const PDF_MEDIA_TYPE: &str = "application/pdf";
pub const CSV_HEADER: &str =
    "Tool Name,Vendor,Category,Annual Cost,Utilization %,Risk Coverage,Overlap Score";
pub const PDF_PLACEHOLDER: &[u8] = b"Mock PDF content";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Pdf,
}

impl ExportFormat {
    pub fn media_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => CSV_MEDIA_TYPE,
            ExportFormat::Pdf => PDF_MEDIA_TYPE,
        }
    }

    /// File name offered when the caller does not pick one
    pub fn suggested_file_name(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "security-tool-inventory.csv",
            ExportFormat::Pdf => "security-debt-executive-report.pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Pdf => write!(f, "pdf"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "pdf" => Ok(ExportFormat::Pdf),
            other => Err(format!("Invalid export format: {} (expected csv or pdf)", other)),
        }
    }
}

/// Opaque exported document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportBlob {
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl ReportBlob {
    pub fn new(format: ExportFormat, bytes: Vec<u8>) -> Self {
        Self {
            media_type: format.media_type().to_string(),
            bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// One header line plus one line per tool, joined with `\n`
pub fn build_csv(tools: &[Tool]) -> String {
    let mut lines = Vec::with_capacity(tools.len() + 1);
    lines.push(CSV_HEADER.to_string());
    lines.extend(tools.iter().map(|tool| {
        format!(
            "{},{},{},{},{},{},{}",
            quote(&tool.name),
            quote(&tool.vendor),
            quote(&tool.category),
            tool.annual_cost_usd,
            tool.utilisation_percent,
            tool.risk_coverage,
            tool.overlap_score
        )
    }));
    lines.join("\n")
}

pub fn render_report(format: ExportFormat, tools: &[Tool]) -> ReportBlob {
    match format {
        ExportFormat::Csv => ReportBlob::new(format, build_csv(tools).into_bytes()),
        ExportFormat::Pdf => ReportBlob::new(format, PDF_PLACEHOLDER.to_vec()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::{Persona, ToolDraft};
    use crate::core::dataset::Dataset;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_csv_layout() {
        let tools = Dataset::bundled().unwrap().tools(Persona::Startup, Utc::now());
        let csv = build_csv(&tools);
        let lines: Vec<&str> = csv.split('\n').collect();
        assert_eq!(lines.len(), tools.len() + 1);
        assert_eq!(lines[0], CSV_HEADER);
        assert!(lines[1].starts_with(&format!("\"{}\",", tools[0].name)));
        assert!(!csv.ends_with('\n'));
    }

    #[test]
    fn test_csv_numbers_and_quotes() {
        let draft = ToolDraft {
            name: Some("Say \"hi\", Scanner".to_string()),
            vendor: Some("Acme".to_string()),
            category: Some("SCA".to_string()),
            annual_cost_usd: Some(1500.0),
            utilisation_percent: Some(42.5),
            risk_coverage: Some(0.6),
            overlap_score: Some(0.25),
            ..Default::default()
        };
        let tool = Tool::from_draft("t".to_string(), draft, Utc::now());
        let csv = build_csv(&[tool]);
        assert_eq!(
            csv.lines().nth(1).unwrap(),
            "\"Say \"\"hi\"\", Scanner\",\"Acme\",\"SCA\",1500,42.5,0.6,0.25"
        );
    }

    #[test]
    fn test_empty_inventory_is_header_only() {
        assert_eq!(build_csv(&[]), CSV_HEADER);
    }

    #[test]
    fn test_pdf_placeholder() {
        let blob = render_report(ExportFormat::Pdf, &[]);
        assert_eq!(blob.media_type, "application/pdf");
        assert_eq!(blob.bytes, b"Mock PDF content".to_vec());
        assert_eq!(
            ExportFormat::Pdf.suggested_file_name(),
            "security-debt-executive-report.pdf"
        );
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert!("xlsx".parse::<ExportFormat>().is_err());
    }
}
