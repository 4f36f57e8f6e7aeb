//! Integration tests for the MCP server public API.
//! Exercises handle_request from outside the crate (initialize, tools/list, tools/call).

use pagegrade::mcp::{handle_request, JsonRpcRequest};
use serde_json::json;

fn make_request(method: &str, params: Option<serde_json::Value>) -> JsonRpcRequest {
    JsonRpcRequest {
        jsonrpc: Some("2.0".to_string()),
        id: Some(json!(1)),
        method: method.to_string(),
        params,
    }
}

fn call_tool(name: &str, arguments: serde_json::Value) -> serde_json::Value {
    let req = make_request(
        "tools/call",
        Some(json!({ "name": name, "arguments": arguments })),
    );
    let resp = handle_request(&req);
    assert!(resp.error.is_none());
    resp.result.expect("expected result")
}

#[test]
fn mcp_initialize_returns_protocol_and_server_info() {
    let resp = handle_request(&make_request("initialize", None));

    assert_eq!(resp.jsonrpc, "2.0");
    assert!(resp.error.is_none());
    let result = resp.result.expect("expected result");
    assert_eq!(result["protocolVersion"], "2024-11-05");
    assert_eq!(result["serverInfo"]["name"], "pagegrade");
    assert!(result["serverInfo"]["version"].as_str().is_some());
}

#[test]
fn mcp_tools_list_returns_both_tools() {
    let result = handle_request(&make_request("tools/list", None))
        .result
        .expect("expected result");
    let names: Vec<&str> = result["tools"]
        .as_array()
        .expect("tools array")
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["analyze_content", "analyze_document"]);
}

#[test]
fn mcp_analyze_content_scores_input() {
    let result = call_tool(
        "analyze_content",
        json!({
            "title": "Short",
            "metaDescription": "Too short",
            "content": "<h1>One</h1><h1>Two</h1>"
        }),
    );
    assert!(result.get("isError").is_none() || result["isError"] == false);
    let text = result["content"][0]["text"].as_str().unwrap();
    let analysis: serde_json::Value = serde_json::from_str(text).unwrap();
    assert_eq!(analysis["details"]["headings"]["h1Count"], 2);
    assert_eq!(analysis["details"]["title"]["status"], "bad");
    assert!(analysis["score"].as_u64().unwrap() < 100);
}

#[test]
fn mcp_analyze_document_reads_fixture() {
    let path = std::fs::canonicalize("test-content/blog/static-site-generator.post.json").unwrap();
    let result = call_tool("analyze_document", json!({ "file": path }));
    let text = result["content"][0]["text"].as_str().unwrap();
    let report: serde_json::Value = serde_json::from_str(text).unwrap();
    assert_eq!(report["score"], 100);
    assert_eq!(report["grade"], "A");
}

#[test]
fn mcp_tools_call_nonexistent_file_returns_error_content() {
    let result = call_tool(
        "analyze_document",
        json!({ "file": "/nonexistent/path/does-not-exist.html" }),
    );
    assert_eq!(result["isError"], true);
    let text = result["content"][0]["text"].as_str().unwrap();
    assert!(text.starts_with("Error:"));
}

#[test]
fn mcp_unknown_method_is_json_rpc_error() {
    let resp = handle_request(&make_request("resources/list", None));
    assert!(resp.result.is_none());
    assert_eq!(resp.error.expect("expected error").code, -32601);
}
