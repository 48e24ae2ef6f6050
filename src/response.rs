//! Standard response envelope helpers.
//!
//! Every body is a single JSON object with a boolean `success`. Single records are
//! flattened into the envelope; lists nest under the resource's plural key.

use axum::{http::StatusCode, Json};
use serde_json::{Map, Value};

pub fn success_one(mut fields: Map<String, Value>) -> (StatusCode, Json<Value>) {
    fields.insert("success".into(), Value::Bool(true));
    (StatusCode::OK, Json(Value::Object(fields)))
}

pub fn success_many(key: &str, items: Vec<Map<String, Value>>) -> (StatusCode, Json<Value>) {
    let items = items.into_iter().map(Value::Object).collect::<Vec<_>>();
    let mut body = Map::new();
    body.insert("success".into(), Value::Bool(true));
    body.insert(key.to_string(), Value::Array(items));
    (StatusCode::OK, Json(Value::Object(body)))
}

pub fn success_message(message: String) -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "success": true,
            "message": message
        })),
    )
}

pub fn error_body(message: String) -> Value {
    serde_json::json!({
        "success": false,
        "error": message
    })
}
