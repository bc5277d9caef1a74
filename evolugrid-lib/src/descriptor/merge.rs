//! Deep merge of JSON configuration layers.

use serde_json::Value;

/// Merges `overlay` into `base`, later values winning per field.
///
/// Objects merge recursively. Everything else, arrays included, replaces the
/// base value wholesale.
pub fn deep_merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                deep_merge(base.entry(key).or_insert(Value::Null), value);
            }
        }
        (base, overlay) => *base = overlay,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_later_layer_wins() {
        let mut base = json!({"limit": 100, "exportCsv": true});
        deep_merge(&mut base, json!({"limit": 20}));
        assert_eq!(base, json!({"limit": 20, "exportCsv": true}));
    }

    #[test]
    fn test_arrays_replaced_not_concatenated() {
        let mut base = json!({"columns": [{"title": "A"}, {"title": "B"}]});
        deep_merge(&mut base, json!({"columns": [{"title": "C"}]}));
        assert_eq!(base, json!({"columns": [{"title": "C"}]}));
    }

    #[test]
    fn test_nested_objects_merge() {
        let mut base = json!({"extra": {"a": 1, "b": {"c": 2}}});
        deep_merge(&mut base, json!({"extra": {"b": {"d": 3}}}));
        assert_eq!(base, json!({"extra": {"a": 1, "b": {"c": 2, "d": 3}}}));
    }

    #[test]
    fn test_null_overrides() {
        let mut base = json!({"countTargetSelector": "#count"});
        deep_merge(&mut base, json!({"countTargetSelector": null}));
        assert_eq!(base, json!({"countTargetSelector": null}));
    }
}
