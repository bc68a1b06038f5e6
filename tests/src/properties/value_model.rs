//! # Value Model Properties
//!
//! Sequence sizing and traversal, and exact arithmetic, over generated input.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use uvm_core::domain::iter::next;
    use uvm_core::prelude::*;
    use uvm_core::safemath;

    fn values() -> impl Strategy<Value = Vec<i64>> {
        prop::collection::vec(any::<i64>(), 0..40)
    }

    /// Canonical decimal form of a digit string with optional sign.
    fn canonical(text: &str) -> String {
        let (negative, digits) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let trimmed = digits.trim_start_matches('0');
        if trimmed.is_empty() {
            "0".to_string()
        } else if negative {
            format!("-{trimmed}")
        } else {
            trimmed.to_string()
        }
    }

    proptest! {
        #[test]
        fn append_then_iterate_yields_in_order(items in values()) {
            let mut seq = Array::new();
            for item in &items {
                seq.append(Value::Int(*item));
            }
            prop_assert_eq!(seq.size(), items.len());

            let visited: Vec<(i64, Option<i64>)> = seq
                .iterate()
                .map(|(k, v)| (k, v.and_then(Value::as_int)))
                .collect();
            let expected: Vec<(i64, Option<i64>)> = items
                .iter()
                .enumerate()
                .map(|(i, v)| (i64::try_from(i).unwrap() + 1, Some(*v)))
                .collect();
            prop_assert_eq!(visited, expected);
            let last = i64::try_from(items.len()).unwrap();
            prop_assert!(next(&seq, Some(&last)).is_none());
        }

        #[test]
        fn set_at_boundaries_adjusts_size(items in values(), v in any::<i64>()) {
            let mut seq: Array = items.iter().copied().map(Value::Int).collect();
            let size = i64::try_from(seq.size()).unwrap();

            seq.set(size + 1, Some(Value::Int(v)));
            prop_assert_eq!(seq.size(), items.len() + 1);

            let size = i64::try_from(seq.size()).unwrap();
            seq.set(size, None);
            prop_assert_eq!(seq.size(), items.len());
        }

        #[test]
        fn set_outside_range_keeps_size(
            items in values(),
            offset in 2_i64..1_000,
            below in -1_000_i64..=0,
            v in any::<i64>(),
        ) {
            let mut seq: Array = items.iter().copied().map(Value::Int).collect();
            let size = i64::try_from(seq.size()).unwrap();

            seq.set(size + offset, Some(Value::Int(v)));
            prop_assert_eq!(seq.size(), items.len());
            seq.set(below, Some(Value::Int(v)));
            prop_assert_eq!(seq.size(), items.len());
            seq.set(size + offset, None);
            prop_assert_eq!(seq.size(), items.len());
        }

        #[test]
        fn bignum_to_string_is_canonical(text in "-?[0-9]{1,60}") {
            let n = safemath::bigint(&text).unwrap();
            prop_assert_eq!(safemath::tostring(&n), canonical(&text));
        }

        #[test]
        fn add_and_sub_are_inverse(a in "-?[1-9][0-9]{0,50}", b in "-?[1-9][0-9]{0,50}") {
            let a = BigNum::parse(&a).unwrap();
            let b = BigNum::parse(&b).unwrap();
            prop_assert_eq!(a.add(&b).sub(&b), a);
        }

        #[test]
        fn map_keeps_insertion_order(keys in prop::collection::vec("[a-z]{1,6}", 0..20)) {
            let mut map = Map::new();
            let mut expected: Vec<String> = Vec::new();
            for key in &keys {
                if !expected.contains(key) {
                    expected.push(key.clone());
                }
                map.set(key.as_str(), Some(Value::from(key.as_str())));
            }
            let visited: Vec<String> = map.iterate().map(|(k, _)| k).collect();
            prop_assert_eq!(visited, expected);
        }
    }
}
