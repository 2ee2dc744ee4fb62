//! Recursive combination of JSON result trees.

use serde_json::Value;

use crate::error::{WikiError, WikiResult};

/// Combine two result trees into one accumulated view.
///
/// Objects merge key-wise (shared keys recurse), arrays concatenate
/// with `a`'s elements first, and equal scalars collapse to the shared
/// value. Any other pairing is a conflict and fails with the JSON
/// Pointer path of the offending node; nothing is silently dropped.
pub fn merge(a: Value, b: Value) -> WikiResult<Value> {
    merge_at(a, b, "")
}

fn merge_at(a: Value, b: Value, path: &str) -> WikiResult<Value> {
    match (a, b) {
        (Value::Object(mut left), Value::Object(right)) => {
            for (key, incoming) in right {
                let merged = match left.remove(&key) {
                    Some(existing) => {
                        let child = format!("{path}/{}", escape_pointer_token(&key));
                        merge_at(existing, incoming, &child)?
                    }
                    None => incoming,
                };
                left.insert(key, merged);
            }
            Ok(Value::Object(left))
        }
        (Value::Array(mut left), Value::Array(right)) => {
            left.extend(right);
            Ok(Value::Array(left))
        }
        (left, right) if left == right => Ok(left),
        (left, right) => Err(WikiError::MergeConflict {
            path: path.to_string(),
            left: describe(&left),
            right: describe(&right),
        }),
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean ({b})"),
        Value::Number(n) => format!("number ({n})"),
        Value::String(s) => format!("string (\"{s}\")"),
        Value::Array(_) => "array".to_string(),
        Value::Object(_) => "object".to_string(),
    }
}

fn escape_pointer_token(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}
