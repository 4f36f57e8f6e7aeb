//! JSON reporter for machine-readable output

use crate::analyzer::engine::AggregateStats;
use crate::DocumentReport;
use serde::Serialize;

/// Reporter for JSON output
pub struct JsonReporter {
    /// Whether to pretty-print JSON
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Enable pretty-printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    fn render<T: Serialize + ?Sized>(&self, value: &T, fallback: &str) -> String {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        rendered.unwrap_or_else(|_| fallback.to_string())
    }

    /// Report a single document as JSON
    pub fn report(&self, report: &DocumentReport) -> String {
        self.render(report, "{}")
    }

    /// Report multiple documents as a JSON array
    pub fn report_many(&self, reports: &[DocumentReport]) -> String {
        self.render(reports, "[]")
    }

    /// Report with summary
    pub fn report_with_summary(&self, reports: &[DocumentReport], stats: &AggregateStats) -> String {
        let output = JsonOutput {
            results: reports,
            summary: stats,
        };
        self.render(&output, "{}")
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonOutput<'a> {
    results: &'a [DocumentReport],
    summary: &'a AggregateStats,
}
