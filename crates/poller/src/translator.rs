use serde_json::Value;

use herald_common::error::{HeraldError, Result};
use herald_common::types::{StatusRecord, Verdict};

/// Extract the required fields of one homework entry.
///
/// Presence is checked name first, then status.
pub fn parse_record(record: &Value) -> Result<StatusRecord> {
    let name = record.get("homework_name").ok_or_else(|| {
        HeraldError::MissingField(
            "Отсутствуют домашние работы по ключу \"homework_name\"!".to_string(),
        )
    })?;
    let status = record.get("status").ok_or_else(|| {
        HeraldError::MissingField("Отсутствует статус проверки домашней работы!".to_string())
    })?;

    let homework_name = match name {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let status = match status {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    Ok(StatusRecord {
        homework_name,
        status,
    })
}

/// Turn one homework entry into the chat message describing its verdict.
pub fn translate(record: &Value) -> Result<String> {
    let record = parse_record(record)?;
    let verdict = Verdict::from_code(&record.status).ok_or_else(|| HeraldError::UnknownStatus {
        code: record.status.clone(),
    })?;

    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        record.homework_name,
        verdict.display_text()
    ))
}
