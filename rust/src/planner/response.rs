//! Parsing of draft lists returned by an external generator.

use serde_json::Value;

use crate::models::TaskDraft;

/// Parse a generator reply into task drafts.
///
/// Accepts a bare JSON array, an object carrying the array under `tasks`
/// (or `plan` when `tasks` is absent or null), or a reply with a `[...]`
/// block somewhere inside surrounding text. Returns `None` when no draft
/// array can be recovered or an entry is not a valid draft.
pub fn parse_drafts(content: &str) -> Option<Vec<TaskDraft>> {
    let text = content.trim();

    let parsed: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(_) => serde_json::from_str(extract_array(text)?).ok()?,
    };

    let array = match parsed {
        Value::Array(items) => Value::Array(items),
        Value::Object(mut map) => match map.remove("tasks") {
            Some(tasks) if !tasks.is_null() => tasks,
            _ => map.remove("plan")?,
        },
        _ => return None,
    };

    if !array.is_array() {
        return None;
    }
    serde_json::from_value(array).ok()
}

/// The span from the first `[` to the last `]`, if any.
fn extract_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    (end > start).then(|| &text[start..=end])
}
