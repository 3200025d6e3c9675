//! Caller provenance for log records
//!
//! The core works on the typed [`CallerInfo`]. Integrations that only have an
//! untyped state value (a JSON object or a list of key/value pairs) go through
//! [`CallerInfo::resolve`], which is the single place where conventional key
//! names are interpreted.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sentinel used for any provenance field that cannot be determined
pub const UNKNOWN: &str = "unknown";

const SOURCE_LOCATION_KEYS: [&str; 2] = ["CallerFilePath", "FilePath"];
const OPERATION_NAME_KEYS: [&str; 3] = ["CallerMemberName", "MemberName", "Method"];

/// Where a log call originated
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallerInfo {
    pub source_location: String,
    pub operation_name: String,
}

impl CallerInfo {
    pub fn new(source_location: impl Into<String>, operation_name: impl Into<String>) -> Self {
        Self {
            source_location: source_location.into(),
            operation_name: operation_name.into(),
        }
    }

    /// Both fields set to [`UNKNOWN`]
    pub fn unknown() -> Self {
        Self::new(UNKNOWN, UNKNOWN)
    }

    pub fn is_unknown(&self) -> bool {
        self.source_location == UNKNOWN && self.operation_name == UNKNOWN
    }

    /// Resolve caller info from an untyped state value.
    ///
    /// Recognized shapes are a JSON object (scanned in insertion order) and an
    /// array of `[key, value]` pairs or `{"key": .., "value": ..}` objects.
    /// Keys are matched ASCII case-insensitively; the first non-null value for
    /// each field wins. Anything else yields [`CallerInfo::unknown`].
    ///
    /// # Example
    ///
    /// ```
    /// use rust_multisink_logger::CallerInfo;
    /// use serde_json::json;
    ///
    /// let state = json!({ "CallerFilePath": "src/orders.rs", "Method": "submit" });
    /// let caller = CallerInfo::resolve(Some(&state));
    /// assert_eq!(caller, CallerInfo::new("src/orders.rs", "submit"));
    ///
    /// assert!(CallerInfo::resolve(Some(&json!("not a sequence"))).is_unknown());
    /// ```
    pub fn resolve(state: Option<&Value>) -> Self {
        let (source_location, operation_name) = scan(state);
        Self {
            source_location: source_location.unwrap_or_else(|| UNKNOWN.to_string()),
            operation_name: operation_name.unwrap_or_else(|| UNKNOWN.to_string()),
        }
    }
}

impl Default for CallerInfo {
    fn default() -> Self {
        Self::unknown()
    }
}

/// Whether `state` carries both a source location and an operation name
pub fn contains_caller_info(state: Option<&Value>) -> bool {
    matches!(scan(state), (Some(_), Some(_)))
}

/// Iterate the key/value pairs of a state value, if it has that shape
pub fn state_pairs(state: &Value) -> Option<Box<dyn Iterator<Item = (&str, &Value)> + '_>> {
    match state {
        Value::Object(map) => Some(Box::new(map.iter().map(|(k, v)| (k.as_str(), v)))),
        Value::Array(items) => Some(Box::new(items.iter().filter_map(pair_from_item))),
        _ => None,
    }
}

fn pair_from_item(item: &Value) -> Option<(&str, &Value)> {
    match item {
        Value::Array(pair) if pair.len() == 2 => Some((pair[0].as_str()?, &pair[1])),
        Value::Object(entry) => Some((entry.get("key")?.as_str()?, entry.get("value")?)),
        _ => None,
    }
}

fn scan(state: Option<&Value>) -> (Option<String>, Option<String>) {
    let mut source_location = None;
    let mut operation_name = None;

    let Some(pairs) = state.and_then(state_pairs) else {
        return (source_location, operation_name);
    };

    for (key, value) in pairs {
        if value.is_null() {
            continue;
        }
        if source_location.is_none() && matches_any(key, &SOURCE_LOCATION_KEYS) {
            source_location = Some(value_text(value));
        }
        if operation_name.is_none() && matches_any(key, &OPERATION_NAME_KEYS) {
            operation_name = Some(value_text(value));
        }
        if source_location.is_some() && operation_name.is_some() {
            break;
        }
    }

    (source_location, operation_name)
}

fn matches_any(key: &str, candidates: &[&str]) -> bool {
    candidates.iter().any(|c| key.eq_ignore_ascii_case(c))
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Reduce a `std::any::type_name` of a nested item to its enclosing function name.
///
/// Used by [`function_name!`](crate::function_name); closures are skipped so
/// a call inside `|| { .. }` still reports the surrounding function.
#[doc(hidden)]
pub fn operation_from_type_name(type_name: &'static str) -> &'static str {
    let mut path = type_name.strip_suffix("::__here").unwrap_or(type_name);
    while let Some(outer) = path.strip_suffix("::{{closure}}") {
        path = outer;
    }
    path.rsplit("::").next().unwrap_or(UNKNOWN)
}
