use serde_json::Value;

use herald_common::error::{HeraldError, Result};

/// Check the top-level shape of an API answer and return its homework list.
///
/// An empty list is a normal outcome meaning there is nothing to report.
/// Entries are returned as-is; their fields are checked by the translator.
pub fn validate(raw: &Value) -> Result<&[Value]> {
    let Value::Object(map) = raw else {
        return Err(HeraldError::Shape("Ответ API не словарь!".to_string()));
    };

    let homeworks = map
        .get("homeworks")
        .ok_or_else(|| HeraldError::MissingField("Ключ \"homeworks\" не доступен!".to_string()))?;

    match homeworks {
        Value::Array(records) => {
            if records.is_empty() {
                tracing::debug!("Homework list is empty");
            }
            Ok(records.as_slice())
        }
        _ => Err(HeraldError::Shape("Ответ API не список!".to_string())),
    }
}
