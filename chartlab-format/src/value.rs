//! Safe keyed-value lookup with a uniform placeholder.

use std::collections::BTreeMap;

/// Look up `key` in an indicator's output map and render it plainly.
///
/// Missing map, missing key, or a non-finite value all come back as the
/// default placeholder — presentation code never branches on failure.
pub fn format_value(data: Option<&BTreeMap<String, f64>>, key: &str, default: &str) -> String {
    match data.and_then(|map| map.get(key)) {
        Some(value) if value.is_finite() => value.to_string(),
        _ => default.to_string(),
    }
}
