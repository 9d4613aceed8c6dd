//! Stable hashing for JSON values.
//!
//! `serde_json::Value` provides deep equality but no `Hash`; this module
//! supplies the matching hash primitive. The contract is the usual one:
//! values that compare equal hash equal. Stability means stable within a
//! process, which is what cycle detection and container keying need.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde_json::{Number, Value};

/// Fixed odd multiplier for every composite hash fold in this crate.
pub(crate) const HASH_MULTIPLIER: u64 = 397;

/// Fold one field hash into an accumulator.
pub(crate) fn combine(hash: u64, field: u64) -> u64 {
    hash.wrapping_mul(HASH_MULTIPLIER) ^ field
}

// Type tags keep values of different JSON types from colliding trivially
// (`1`, `"1"`, and `true` all hash differently).
const TAG_NULL: u64 = 0x4a_01;
const TAG_BOOL: u64 = 0x4a_02;
const TAG_NUMBER: u64 = 0x4a_03;
const TAG_STRING: u64 = 0x4a_04;
const TAG_ARRAY: u64 = 0x4a_05;
const TAG_OBJECT: u64 = 0x4a_06;

pub(crate) fn hash_one(value: impl Hash) -> u64 {
    // DefaultHasher::new() seeds deterministically, unlike RandomState.
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

/// Hash a JSON value, consistent with `Value`'s `PartialEq`.
///
/// Array elements fold in order (array equality is positional); object
/// members fold commutatively (object equality ignores member order).
#[must_use]
pub fn stable_hash(value: &Value) -> u64 {
    match value {
        Value::Null => TAG_NULL,
        Value::Bool(b) => combine(TAG_BOOL, u64::from(*b)),
        Value::Number(n) => combine(TAG_NUMBER, number_hash(n)),
        Value::String(s) => combine(TAG_STRING, hash_one(s)),
        Value::Array(items) => items
            .iter()
            .fold(TAG_ARRAY, |h, item| combine(h, stable_hash(item))),
        Value::Object(members) => {
            let folded = members
                .iter()
                .map(|(key, member)| combine(hash_one(key), stable_hash(member)))
                .fold(0u64, u64::wrapping_add);
            combine(TAG_OBJECT, folded)
        }
    }
}

/// Hash a number by its canonical representation. `serde_json` stores
/// non-negative integers as `u64`, negative integers as `i64`, and
/// everything else as `f64`, and its equality never crosses those
/// representations, so hashing them apart is consistent.
fn number_hash(n: &Number) -> u64 {
    if let Some(u) = n.as_u64() {
        combine(1, hash_one(u))
    } else if let Some(i) = n.as_i64() {
        combine(2, hash_one(i))
    } else {
        let f = n.as_f64().unwrap_or(0.0);
        // -0.0 == 0.0 for f64, so the bit patterns must be unified.
        let f = if f == 0.0 { 0.0 } else { f };
        combine(3, hash_one(f.to_bits()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn equal_values_hash_equal() {
        let a = json!({"type": "object", "required": ["id"], "maxItems": 3});
        let b = json!({"type": "object", "required": ["id"], "maxItems": 3});
        assert_eq!(a, b);
        assert_eq!(stable_hash(&a), stable_hash(&b));
    }

    #[test]
    fn object_member_order_does_not_matter() {
        let a: Value = serde_json::from_str(r#"{"a": 1, "b": 2}"#).expect("parse");
        let b: Value = serde_json::from_str(r#"{"b": 2, "a": 1}"#).expect("parse");
        assert_eq!(a, b);
        assert_eq!(stable_hash(&a), stable_hash(&b));
    }

    #[test]
    fn type_tags_separate_lookalike_scalars() {
        assert_ne!(stable_hash(&json!(1)), stable_hash(&json!("1")));
        assert_ne!(stable_hash(&json!(1)), stable_hash(&json!(true)));
        assert_ne!(stable_hash(&json!(null)), stable_hash(&json!(false)));
    }

    #[test]
    fn negative_zero_hashes_like_zero() {
        let neg = json!(-0.0);
        let pos = json!(0.0);
        assert_eq!(neg, pos);
        assert_eq!(stable_hash(&neg), stable_hash(&pos));
    }

    #[test]
    fn nested_structures_hash_consistently() {
        let a = json!({"items": {"enum": [1, 2, {"deep": null}]}});
        let b = json!({"items": {"enum": [1, 2, {"deep": null}]}});
        assert_eq!(stable_hash(&a), stable_hash(&b));
    }

    #[test]
    fn array_order_is_positional() {
        let a = json!([1, 2]);
        let b = json!([2, 1]);
        assert_ne!(a, b);
        assert_ne!(stable_hash(&a), stable_hash(&b));
    }
}
