//! Utility functions for the templating system.

use serde_json::Value;

/// Deep-merge `overrides` into `base` in place.
///
/// For two objects, fields from `overrides` are added to `base`, and nested
/// objects on both sides are merged recursively. Everything else (arrays,
/// primitives, an object meeting a non-object) is replaced by the override.
///
/// # Examples
///
/// ```rust
/// use serde_json::json;
/// use filewrap::templating::deep_merge;
///
/// let mut base = json!({ "file": { "path": "a.txt", "someProp": "bar" } });
/// deep_merge(&mut base, json!({ "file": { "someProp": "foo" } }));
///
/// assert_eq!(base, json!({ "file": { "path": "a.txt", "someProp": "foo" } }));
/// ```
pub fn deep_merge(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base_obj), Value::Object(override_obj)) => {
            for (key, override_value) in override_obj {
                match base_obj.get_mut(&key) {
                    Some(base_value) if base_value.is_object() && override_value.is_object() => {
                        deep_merge(base_value, override_value);
                    }
                    _ => {
                        base_obj.insert(key, override_value);
                    }
                }
            }
        }
        (base, overrides) => *base = overrides,
    }
}
