//! Recursive merge of YAML mappings

use serde_yaml::{Mapping, Value};

/// Merge `source` into `dest` in place.
///
/// When a key holds a mapping on both sides the merge recurses; any other
/// collision (scalar vs mapping, list vs list, ...) takes the `source` value.
/// Existing keys keep their position in `dest`, new keys are appended.
pub fn deep_merge(dest: &mut Mapping, source: &Mapping) {
    for (key, value) in source {
        if let (Some(Value::Mapping(existing)), Value::Mapping(incoming)) =
            (dest.get_mut(key), value)
        {
            deep_merge(existing, incoming);
            continue;
        }
        dest.insert(key.clone(), value.clone());
    }
}
