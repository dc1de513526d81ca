// Summaries of a finished page load

use crate::load::LoadReport;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            _ => None,
        }
    }
}

/// Generate a plain-text summary of a load
pub fn generate_load_report(report: &LoadReport) -> String {
    let mut text = String::new();
    text.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
    text.push_str("# Summary:\n");
    text.push_str(&format!("  Page: {}\n", report.page_url));
    text.push_str(&format!("  Saved to: {}\n", report.page_path.display()));

    if let Some(ref dir) = report.resource_dir {
        text.push_str(&format!("  Resources: {}\n", dir.display()));
    }

    text.push_str(&format!("  Resources downloaded: {}\n", report.succeeded()));
    text.push_str(&format!("  Resources failed: {}\n", report.failed()));
    text.push_str(&format!("  Elapsed: {} ms\n", report.elapsed_ms));

    if report.failed() > 0 {
        text.push_str("\n## Failed resources\n");
        for outcome in report.failures() {
            // Fall back to the markup value when the reference never resolved
            let url = outcome
                .url
                .as_deref()
                .unwrap_or(&outcome.reference.original_url);
            let reason = outcome.error.as_deref().unwrap_or("unknown error");
            text.push_str(&format!(
                "  [{}] {} - {}\n",
                outcome.reference.kind, url, reason
            ));
        }
    }

    text.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
    text
}

pub fn generate_json_report(report: &LoadReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
