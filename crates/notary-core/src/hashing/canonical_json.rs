//! JSON canónico mínimo: claves ordenadas, sin espacios. Base del
//! `run_fingerprint`.

use serde_json::Value;
use std::collections::BTreeMap;

fn quote(s: &str) -> String {
    // Display de Value::String aplica el mismo escapado que serde_json::to_string.
    Value::String(s.to_string()).to_string()
}

pub fn to_canonical_json(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote(s),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(to_canonical_json).collect();
            format!("[{}]", items.join(","))
        }
        Value::Object(map) => {
            let tree: BTreeMap<&String, String> = map.iter().map(|(k, v)| (k, to_canonical_json(v))).collect();
            let items: Vec<String> = tree.into_iter().map(|(k, v)| format!("{}:{}", quote(k), v)).collect();
            format!("{{{}}}", items.join(","))
        }
    }
}
