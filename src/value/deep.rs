use itertools::Itertools;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

/// Hashes a JSON value structurally.
///
/// Object members are visited in sorted key order, so two maps that compare equal
/// hash equally no matter how they were built.
pub fn hash_value<H: Hasher>(value: &Value, state: &mut H) {
    core::mem::discriminant(value).hash(state);
    match value {
        Value::Null => {}
        Value::Bool(b) => b.hash(state),
        Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => (0u8, i).hash(state),
            (None, Some(u), _) => (1u8, u).hash(state),
            (None, None, Some(f)) => (2u8, float_bits(f)).hash(state),
            (None, None, None) => n.to_string().hash(state),
        },
        Value::String(s) => s.hash(state),
        Value::Array(items) => {
            items.len().hash(state);
            for item in items {
                hash_value(item, state);
            }
        }
        Value::Object(map) => hash_object(map, state),
    }
}

/// Hashes a JSON object structurally, members in sorted key order.
pub fn hash_object<H: Hasher>(map: &Map<String, Value>, state: &mut H) {
    map.len().hash(state);
    for (key, item) in map.iter().sorted_by(|a, b| a.0.cmp(b.0)) {
        key.hash(state);
        hash_value(item, state);
    }
}

/// Hashes a string-to-float map using the bit pattern of each value.
pub fn hash_cost<H: Hasher>(cost: &BTreeMap<String, f64>, state: &mut H) {
    cost.len().hash(state);
    for (key, value) in cost {
        key.hash(state);
        float_bits(*value).hash(state);
    }
}

fn float_bits(value: f64) -> u64 {
    // 0.0 == -0.0, so both must hash alike
    if value == 0.0 { 0 } else { value.to_bits() }
}

