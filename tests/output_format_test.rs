//! Tests for output format stability.
//!
//! Front ends consume the camelCase JSON directly, so these tests pin the
//! exact shape of results and protocol messages.

use logicmap::protocol::{self, AnalysisMessage, AnalyzeRequest};
use logicmap::{analyze_source, AnalysisResult, SourceLanguage};
use serde_json::json;

#[test]
fn test_empty_result_json() {
    let result = analyze_source("", SourceLanguage::JavaScript, None).unwrap();
    assert_eq!(
        serde_json::to_string(&result).unwrap(),
        r#"{"functions":[],"callGraph":{}}"#
    );
}

#[test]
fn test_function_record_json() {
    let source =
        "function f(n){ let s=0; for(let i=0;i<n;i++){ if(i%2===0){ s+=g(i); } } return s; }";
    let result = analyze_source(source, SourceLanguage::JavaScript, Some("f.js")).unwrap();
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(
        value,
        json!({
            "functions": [{
                "name": "f",
                "startLine": 1,
                "endLine": 1,
                "lineCount": 1,
                "conditions": 2,
                "variables": [
                    {"name": "s", "inferredKind": "number"},
                    {"name": "i", "inferredKind": "number"}
                ],
                "calls": [{"name": "g"}],
                "logicTree": [{
                    "type": "loop",
                    "children": [{"type": "if", "condition": "i%2===0", "children": []}]
                }]
            }],
            "callGraph": {"f": ["g"]},
            "fileName": "f.js"
        })
    );
}

#[test]
fn test_inferred_kind_names() {
    let source = r#"
function kinds() {
    const a = 1;
    const b = `t`;
    const c = false;
    const d = a + 1;
    let e;
}
"#;
    let result = analyze_source(source, SourceLanguage::JavaScript, None).unwrap();
    let value = serde_json::to_value(&result.functions[0].variables).unwrap();
    let kinds: Vec<&str> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["inferredKind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["number", "string", "boolean", "expression", "unknown"]);
}

#[test]
fn test_call_graph_keys_are_sorted() {
    let source = "function zeta() { alpha(); } function alpha() {} function mid() {}";
    let result = analyze_source(source, SourceLanguage::JavaScript, None).unwrap();
    let json = serde_json::to_string(&result.call_graph).unwrap();
    assert_eq!(json, r#"{"alpha":[],"mid":[],"zeta":["alpha"]}"#);
}

#[test]
fn test_result_deserializes() {
    let source = "const run = () => { while (busy()) { if (late) { stop(); } } };";
    let result = analyze_source(source, SourceLanguage::JavaScript, None).unwrap();
    let json = serde_json::to_string(&result).unwrap();
    let back: AnalysisResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back, result);
}

#[test]
fn test_message_tags() {
    let ok = AnalysisMessage::from_result(Ok(AnalysisResult::empty()), None);
    assert_eq!(
        serde_json::to_value(&ok).unwrap(),
        json!({"type": "analysisSucceeded", "payload": {"functions": [], "callGraph": {}}})
    );

    let failed = AnalysisMessage::failed(Some("x.js"), "boom");
    assert_eq!(
        serde_json::to_value(&failed).unwrap(),
        json!({"type": "analysisFailed", "fileName": "x.js", "error": "boom"})
    );
}

#[test]
fn test_request_defaults() {
    let request: AnalyzeRequest = serde_json::from_str(r#"{"text":"f()"}"#).unwrap();
    assert_eq!(request.file_name, None);
    assert_eq!(request.language, None);
}

#[test]
fn test_serve_protocol() {
    let input = [
        json!({"text": "function a() { b(); }", "fileName": "a.js"}).to_string(),
        json!({"text": "const f = (x: number) => x;", "language": "typescript"}).to_string(),
        "{\"text\": 5}".to_string(),
        json!({"text": "", "fileName": "main.py"}).to_string(),
    ]
    .join("\n");

    let mut output = Vec::new();
    let handled = protocol::serve(input.as_bytes(), &mut output, SourceLanguage::JavaScript).unwrap();
    assert_eq!(handled, 4);

    let lines: Vec<serde_json::Value> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    assert_eq!(lines[0]["type"], "analysisSucceeded");
    assert_eq!(lines[0]["payload"]["fileName"], "a.js");
    assert_eq!(lines[0]["payload"]["callGraph"]["a"], json!(["b"]));

    assert_eq!(lines[1]["type"], "analysisSucceeded");
    assert_eq!(lines[1]["payload"]["functions"][0]["name"], "f");

    assert_eq!(lines[2]["type"], "analysisFailed");
    assert!(lines[2].get("fileName").is_none());

    // unknown extensions fall back to the default language
    assert_eq!(lines[3]["type"], "analysisSucceeded");
    assert_eq!(lines[3]["payload"]["functions"], json!([]));
}
