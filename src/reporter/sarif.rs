//! SARIF 2.1 reporter for GitHub Code Scanning / VS Code SARIF viewer

use crate::{DocumentReport, Rule, Status};
use serde::Serialize;
use std::path::Path;

/// SARIF 2.1.0 minimal structure for one run
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifLog {
    #[serde(rename = "$schema")]
    schema: String,
    version: String,
    runs: Vec<SarifRun>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifRun {
    tool: SarifTool,
    results: Vec<SarifResult>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifTool {
    driver: SarifDriver,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifDriver {
    name: String,
    version: String,
    rules: Vec<SarifRule>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifRule {
    id: String,
    short_description: SarifMessage,
    default_configuration: SarifDefaultConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifMessage {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifDefaultConfig {
    level: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifResult {
    rule_id: String,
    level: String,
    message: SarifMessage,
    locations: Vec<SarifLocation>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifLocation {
    physical_location: SarifPhysicalLocation,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifPhysicalLocation {
    artifact_location: SarifArtifactLocation,
    region: SarifRegion,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifArtifactLocation {
    uri: String,
}

/// Checks are document-wide, so every result points at line 1
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SarifRegion {
    start_line: usize,
}

fn status_to_level(s: Status) -> &'static str {
    match s {
        Status::Bad => "error",
        Status::Warning => "warning",
        Status::Good => "note",
    }
}

/// Convert a path to a URI (file://)
fn path_to_uri(p: &Path) -> String {
    let path = p.to_string_lossy();
    let path = path.replace('\\', "/");
    if path.starts_with('/') {
        format!("file://{}", path)
    } else {
        format!("file:///{}", path)
    }
}

/// SARIF reporter for GitHub Code Scanning integration
pub struct SarifReporter;

impl SarifReporter {
    pub fn new() -> Self {
        Self
    }

    /// Produce SARIF 2.1 JSON for one or more documents, one result per finding
    pub fn report(&self, reports: &[DocumentReport]) -> String {
        let rules: Vec<SarifRule> = Rule::ALL
            .iter()
            .map(|rule| SarifRule {
                id: rule.to_string(),
                short_description: SarifMessage {
                    text: rule.label().to_string(),
                },
                default_configuration: SarifDefaultConfig {
                    level: "warning".to_string(),
                },
            })
            .collect();

        let mut sarif_results = Vec::new();
        for report in reports {
            let file_uri = path_to_uri(&report.file_path);
            for finding in report.result.details.findings() {
                sarif_results.push(SarifResult {
                    rule_id: finding.rule.to_string(),
                    level: status_to_level(finding.status).to_string(),
                    message: SarifMessage {
                        text: format!("{} {}", finding.issue, finding.recommendation),
                    },
                    locations: vec![SarifLocation {
                        physical_location: SarifPhysicalLocation {
                            artifact_location: SarifArtifactLocation {
                                uri: file_uri.clone(),
                            },
                            region: SarifRegion { start_line: 1 },
                        },
                    }],
                });
            }
        }

        let run = SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: "pagegrade".to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    rules,
                },
            },
            results: sarif_results,
        };

        let log = SarifLog {
            schema: "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json".to_string(),
            version: "2.1.0".to_string(),
            runs: vec![run],
        };

        serde_json::to_string_pretty(&log).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Default for SarifReporter {
    fn default() -> Self {
        Self::new()
    }
}
