use indexmap::IndexMap;
use serde_json::Value;

/// Variable map attached to a host or a group. Values are arbitrary
/// JSON-serializable data; insertion order is preserved.
pub type Variables = IndexMap<String, Value>;

/// Merges `other` into `vars`, last write wins per key. No deep merge:
/// a mapping value replaces the previous mapping wholesale.
pub fn merge_vars(vars: &mut Variables, other: &Variables) {
    for (key, value) in other {
        vars.insert(key.clone(), value.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_last_write_wins() {
        let mut vars = Variables::new();
        vars.insert("a".to_string(), json!(1));

        let mut other = Variables::new();
        other.insert("a".to_string(), json!(2));
        other.insert("b".to_string(), json!(3));

        merge_vars(&mut vars, &other);

        assert_eq!(vars.get("a"), Some(&json!(2)));
        assert_eq!(vars.get("b"), Some(&json!(3)));
        assert_eq!(vars.len(), 2);
    }

    #[test]
    fn test_merge_is_shallow() {
        let mut vars = Variables::new();
        vars.insert("nested".to_string(), json!({"x": 1, "y": 2}));

        let mut other = Variables::new();
        other.insert("nested".to_string(), json!({"x": 9}));

        merge_vars(&mut vars, &other);

        // the replacement mapping does not retain "y"
        assert_eq!(vars.get("nested"), Some(&json!({"x": 9})));
    }

    #[test]
    fn test_merge_empty_is_noop() {
        let mut vars = Variables::new();
        vars.insert("a".to_string(), json!("keep"));

        merge_vars(&mut vars, &Variables::new());

        assert_eq!(vars.len(), 1);
        assert_eq!(vars.get("a"), Some(&json!("keep")));
    }
}
