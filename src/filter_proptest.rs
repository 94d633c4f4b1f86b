//! Property-based tests for attribute filtering.
//!
//! These tests use proptest to generate random attribute bags and verify that
//! the subset-match invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::filter::{filter_devfile_object, DevfileOptions};
    use crate::model::Attributes;
    use proptest::prelude::*;
    use serde_json::Value;

    fn attribute_value() -> impl Strategy<Value = Value> {
        prop_oneof![
            "[a-z0-9]{0,8}".prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            any::<bool>().prop_map(Value::from),
        ]
    }

    fn attribute_bag() -> impl Strategy<Value = Attributes> {
        prop::collection::btree_map("[a-z]{1,6}", attribute_value(), 0..8)
    }

    fn options(filter: Attributes) -> DevfileOptions {
        DevfileOptions::all().with_filter(filter)
    }

    proptest! {
        /// Property: an empty filter matches every attribute bag
        #[test]
        fn empty_filter_matches_all(attrs in attribute_bag()) {
            prop_assert!(filter_devfile_object(&attrs, &DevfileOptions::all()).unwrap());
        }

        /// Property: a bag always matches a filter equal to itself
        #[test]
        fn bag_matches_itself(attrs in attribute_bag()) {
            prop_assert!(filter_devfile_object(&attrs, &options(attrs.clone())).unwrap());
        }

        /// Property: any subset of the bag matches
        #[test]
        fn subset_matches(attrs in attribute_bag(), keep in prop::collection::vec(any::<bool>(), 8)) {
            let subset: Attributes = attrs
                .iter()
                .zip(keep.iter())
                .filter(|(_, keep)| **keep)
                .map(|((k, v), _)| (k.clone(), v.clone()))
                .collect();
            prop_assert!(filter_devfile_object(&attrs, &options(subset)).unwrap());
        }

        /// Property: extra entity attributes never cause a mismatch
        #[test]
        fn extra_attributes_are_ignored(
            filter in attribute_bag(),
            extra in attribute_bag(),
        ) {
            let mut attrs = extra;
            attrs.extend(filter.clone());
            prop_assert!(filter_devfile_object(&attrs, &options(filter)).unwrap());
        }

        /// Property: a filter key absent from the bag never matches
        #[test]
        fn missing_key_never_matches(attrs in attribute_bag(), value in attribute_value()) {
            let mut filter = Attributes::new();
            // Generated keys are lowercase, so this one cannot collide.
            filter.insert("MISSING".to_string(), value);
            prop_assert!(!filter_devfile_object(&attrs, &options(filter)).unwrap());
        }
    }
}
