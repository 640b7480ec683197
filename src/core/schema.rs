use crate::domain::model::{PreferencesData, RawPreferencesInput};
use crate::utils::error::{RefinerError, Result};
use serde_json::{Map, Value};

/// JSON type name used in validation messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn join_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

fn mismatch(path: &str, expected: &str, actual: &Value) -> RefinerError {
    RefinerError::validation(path, expected, json_type_name(actual))
}

fn required<'a>(
    obj: &'a Map<String, Value>,
    parent: &str,
    key: &str,
    expected: &str,
) -> Result<&'a Value> {
    obj.get(key)
        .ok_or_else(|| RefinerError::validation(join_path(parent, key), expected, "missing"))
}

fn expect_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| mismatch(path, "object", value))
}

fn expect_string(value: &Value, path: &str) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| mismatch(path, "string", value))
}

fn expect_integer(value: &Value, path: &str) -> Result<i64> {
    if let Some(n) = value.as_i64() {
        return Ok(n);
    }
    if value.is_u64() {
        return Err(RefinerError::validation(path, "integer", "integer out of range"));
    }
    Err(mismatch(path, "integer", value))
}

fn validate_categories(value: &Value, path: &str) -> Result<Vec<String>> {
    let items = value.as_array().ok_or_else(|| mismatch(path, "array", value))?;
    items
        .iter()
        .enumerate()
        .map(|(i, item)| expect_string(item, &format!("{}[{}]", path, i)))
        .collect()
}

fn validate_likes(value: &Value, path: &str) -> Result<std::collections::BTreeMap<String, bool>> {
    let obj = expect_object(value, path)?;
    obj.iter()
        .map(|(key, flag)| {
            flag.as_bool()
                .map(|b| (key.clone(), b))
                .ok_or_else(|| mismatch(&join_path(path, key), "boolean", flag))
        })
        .collect()
}

fn validate_preferences(value: &Value, path: &str) -> Result<PreferencesData> {
    let obj = expect_object(value, path)?;
    let categories = validate_categories(
        required(obj, path, "categories", "array")?,
        &join_path(path, "categories"),
    )?;
    let likes = validate_likes(
        required(obj, path, "likes", "object")?,
        &join_path(path, "likes"),
    )?;
    Ok(PreferencesData { categories, likes })
}

/// Checks `value` against the preferences document shape and returns the
/// typed input. Unknown fields are ignored at every level; the first
/// mismatch is reported with its dotted field path.
///
/// Fields are checked as `address`, `unixtime`, `preferences.categories`
/// (by index), then `preferences.likes`. `likes` entries are checked in
/// sorted key order, not document order, so with several bad entries the
/// smallest key is the one reported.
pub fn validate_preferences_input(value: &Value) -> Result<RawPreferencesInput> {
    let obj = value
        .as_object()
        .ok_or_else(|| mismatch("$", "object", value))?;

    let address = expect_string(required(obj, "", "address", "string")?, "address")?;
    let unixtime = expect_integer(required(obj, "", "unixtime", "integer")?, "unixtime")?;
    let preferences =
        validate_preferences(required(obj, "", "preferences", "object")?, "preferences")?;

    Ok(RawPreferencesInput {
        address,
        unixtime,
        preferences,
    })
}
