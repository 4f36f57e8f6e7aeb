//! MCP (Model Context Protocol) server for editor and assistant integration.
//!
//! Exposes tools: analyze_content, analyze_document.

use crate::analyzer::AnalysisEngine;
use crate::config::load_config;
use crate::AnalysisInput;
use serde::{Deserialize, Serialize};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// MCP JSON-RPC request
#[derive(Debug, Deserialize, Serialize)]
pub struct JsonRpcRequest {
    #[allow(dead_code)]
    pub jsonrpc: Option<String>,
    pub id: Option<serde_json::Value>,
    pub method: String,
    pub params: Option<serde_json::Value>,
}

/// MCP JSON-RPC response
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: &'static str,
    pub id: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

const METHOD_NOT_FOUND: i32 = -32601;

/// Tool definition for MCP tools/list
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolDef {
    name: &'static str,
    description: &'static str,
    input_schema: InputSchema,
}

#[derive(Debug, Serialize)]
struct InputSchema {
    #[serde(rename = "type")]
    typ: &'static str,
    properties: serde_json::Value,
    required: Vec<&'static str>,
}

fn tool_defs() -> Vec<ToolDef> {
    vec![
        ToolDef {
            name: "analyze_content",
            description: "Score a title, meta description and HTML body for SEO quality. \
                          Returns score, issues, recommendations and per-check details.",
            input_schema: InputSchema {
                typ: "object",
                properties: serde_json::json!({
                    "title": { "type": "string", "description": "Page or post title" },
                    "metaDescription": { "type": "string", "description": "Meta description" },
                    "content": { "type": "string", "description": "Body content (HTML)" },
                    "primaryKeyword": { "type": "string", "description": "Target keyword (optional)" },
                    "slug": { "type": "string", "description": "URL slug (optional)" }
                }),
                required: vec!["title", "metaDescription", "content"],
            },
        },
        ToolDef {
            name: "analyze_document",
            description: "Score a document on disk (.html, .htm, .post.json, .md, .markdown) \
                          using the project's .pagegraderc.json",
            input_schema: InputSchema {
                typ: "object",
                properties: serde_json::json!({
                    "file": { "type": "string", "description": "Path to the document" },
                    "primaryKeyword": { "type": "string", "description": "Keyword override (optional)" },
                    "slug": { "type": "string", "description": "Slug override (optional)" }
                }),
                required: vec!["file"],
            },
        },
    ]
}

/// Handle a single JSON-RPC request and return a response.
/// Extracted from `run_mcp_server` for testability.
pub fn handle_request(req: &JsonRpcRequest) -> JsonRpcResponse {
    let id = req.id.clone();
    let mut error = None;
    let result = match req.method.as_str() {
        "initialize" => Some(serde_json::json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": { "tools": {} },
            "serverInfo": { "name": "pagegrade", "version": env!("CARGO_PKG_VERSION") }
        })),
        "ping" => Some(serde_json::json!({})),
        "tools/list" => Some(serde_json::json!({ "tools": tool_defs() })),
        "tools/call" => {
            let (name, args) = req
                .params
                .as_ref()
                .and_then(|p| p.get("params").or(Some(p)))
                .map(|p| {
                    let name = p.get("name").and_then(|n| n.as_str()).unwrap_or("");
                    let args = p
                        .get("arguments")
                        .and_then(|a| a.as_object())
                        .cloned()
                        .unwrap_or_default();
                    (name, args)
                })
                .unwrap_or(("", serde_json::Map::new()));

            let outcome = match name {
                "analyze_content" => run_analyze_content(&args),
                "analyze_document" => run_analyze_document(&args),
                _ => Err(anyhow::anyhow!("Unknown tool: {}", name)),
            };

            match outcome {
                Ok(val) => Some(serde_json::json!({
                    "content": [{ "type": "text", "text": serde_json::to_string(&val).unwrap_or_else(|_| "{}".to_string()) }]
                })),
                Err(e) => Some(serde_json::json!({
                    "content": [{ "type": "text", "text": format!("Error: {:#}", e) }],
                    "isError": true
                })),
            }
        }
        other => {
            error = Some(JsonRpcError {
                code: METHOD_NOT_FOUND,
                message: format!("Method not found: {}", other),
            });
            None
        }
    };

    JsonRpcResponse {
        jsonrpc: "2.0",
        id,
        result,
        error,
    }
}

/// Run the MCP server loop (stdin / stdout). Notifications (no id) get no reply.
pub fn run_mcp_server() -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let reader = BufReader::new(stdin.lock());

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let req: JsonRpcRequest = match serde_json::from_str(&line) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring malformed request");
                continue;
            }
        };
        tracing::debug!(method = %req.method, "mcp request");
        if req.id.is_none() {
            continue;
        }

        let response = handle_request(&req);
        writeln!(stdout, "{}", serde_json::to_string(&response)?)?;
        stdout.flush()?;
    }
    Ok(())
}

type Args = serde_json::Map<String, serde_json::Value>;

fn optional_str(args: &Args, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|k| args.get(*k).and_then(|v| v.as_str()))
        .map(str::to_string)
}

fn required_str(args: &Args, key: &str) -> anyhow::Result<String> {
    optional_str(args, &[key]).ok_or_else(|| anyhow::anyhow!("Missing required argument: {}", key))
}

fn run_analyze_content(args: &Args) -> anyhow::Result<serde_json::Value> {
    let input = AnalysisInput {
        title: required_str(args, "title")?,
        meta_description: optional_str(args, &["metaDescription", "description"])
            .ok_or_else(|| anyhow::anyhow!("Missing required argument: metaDescription"))?,
        content: required_str(args, "content")?,
        primary_keyword: optional_str(args, &["primaryKeyword", "keyword"]),
        slug: optional_str(args, &["slug"]),
    };
    Ok(serde_json::to_value(crate::analyze(&input))?)
}

fn run_analyze_document(args: &Args) -> anyhow::Result<serde_json::Value> {
    let file = required_str(args, "file")?;
    let path = Path::new(&file);
    if !path.exists() {
        anyhow::bail!("File not found: {}", file);
    }

    let work_dir = path.parent().unwrap_or(Path::new("."));
    let config = load_config(work_dir, None)?;

    let mut engine = AnalysisEngine::new();
    if let Some(keyword) = optional_str(args, &["primaryKeyword", "keyword"]) {
        engine = engine.with_keyword(keyword);
    }
    if let Some(slug) = optional_str(args, &["slug"]) {
        engine = engine.with_slug(slug);
    }

    let report = engine.analyze(path, Some(&config))?;
    Ok(serde_json::to_value(report)?)
}
