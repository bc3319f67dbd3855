//! Destination-biased recursive merge over JSON values.

use serde_json::{Map, Value};

/// Merges `src` into `dest`, key by key.
///
/// For every key in `src`: when the corresponding values on both sides are
/// JSON objects, they are merged recursively; any other pairing overwrites
/// the destination entry wholesale, creating it if absent. Arrays are not
/// element-merged.
///
/// The destination is mutated in place and also returned, so call sites may
/// rely on either.
///
/// ```
/// use serde_json::json;
/// use plotmark::merge::merge;
///
/// let mut config = json!({ "scales": { "x": { "min": 0 } } });
/// merge(&mut config, &json!({ "scales": { "y": { "max": 10 } } }));
/// assert_eq!(config, json!({ "scales": { "x": { "min": 0 }, "y": { "max": 10 } } }));
/// ```
pub fn merge<'a>(dest: &'a mut Value, src: &Value) -> &'a mut Value {
    if let (Value::Object(dest_map), Value::Object(src_map)) = (&mut *dest, src) {
        merge_map(dest_map, src_map);
    } else {
        *dest = src.clone();
    }

    dest
}

/// [`merge()`] over bare JSON object maps.
pub fn merge_map<'a>(
    dest: &'a mut Map<String, Value>,
    src: &Map<String, Value>,
) -> &'a mut Map<String, Value> {
    for (key, incoming) in src {
        match dest.get_mut(key) {
            Some(existing) if existing.is_object() && incoming.is_object() => {
                merge(existing, incoming);
            }
            Some(existing) => *existing = incoming.clone(),
            None => {
                dest.insert(key.clone(), incoming.clone());
            }
        }
    }

    dest
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use super::merge;

    #[test]
    fn disjoint_keys_yield_union() {
        let mut dest = json!({ "a": 1, "b": true });
        merge(&mut dest, &json!({ "c": "three", "d": [4] }));
        assert_eq!(dest, json!({ "a": 1, "b": true, "c": "three", "d": [4] }));
    }

    #[test]
    fn self_merge_is_idempotent() {
        let original = json!({ "a": { "x": 1 }, "b": [1, 2], "c": null });
        let mut dest = original.clone();
        let src = original.clone();
        merge(&mut dest, &src);
        assert_eq!(dest, original);
    }

    #[test]
    fn nested_objects_merge_key_by_key() {
        let mut dest = json!({ "a": { "x": 1 } });
        merge(&mut dest, &json!({ "a": { "y": 2 } }));
        assert_eq!(dest, json!({ "a": { "x": 1, "y": 2 } }));
    }

    #[test]
    fn source_wins_on_scalar_conflict() {
        let mut dest = json!({ "a": { "x": 1 }, "b": 2 });
        merge(&mut dest, &json!({ "a": "flat", "b": { "y": 3 } }));
        assert_eq!(dest, json!({ "a": "flat", "b": { "y": 3 } }));
    }

    #[test]
    fn arrays_overwrite_wholesale() {
        let mut dest = json!({ "labels": ["a", "b", "c"] });
        merge(&mut dest, &json!({ "labels": ["z"] }));
        assert_eq!(dest, json!({ "labels": ["z"] }));
    }

    #[test]
    fn return_value_aliases_destination() {
        let mut dest = json!({});
        let returned = merge(&mut dest, &json!({ "k": 1 })).clone();
        assert_eq!(returned, dest);
    }
}
