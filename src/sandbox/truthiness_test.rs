//! Tests for `classify_truthiness`.

use proptest::prelude::*;
use serde_json::{Value, json};

use super::classify_truthiness;

#[test]
fn falsy_values() {
  for v in [json!(0), json!(0.0), json!(""), json!([]), Value::Null, json!(false)] {
    assert!(!classify_truthiness(&v), "{v} should be falsy");
  }
}

#[test]
fn truthy_values() {
  for v in [json!({}), json!("x"), json!(1), json!(true), json!([0]), json!(-0.5)] {
    assert!(classify_truthiness(&v), "{v} should be truthy");
  }
}

proptest! {
  #[test]
  fn nonzero_integers_are_truthy(n in any::<i64>().prop_filter("nonzero", |n| *n != 0)) {
    prop_assert!(classify_truthiness(&json!(n)));
  }

  #[test]
  fn strings_follow_emptiness(s in ".*") {
    prop_assert_eq!(classify_truthiness(&json!(s.clone())), !s.is_empty());
  }

  #[test]
  fn arrays_follow_emptiness(items in proptest::collection::vec(any::<i32>(), 0..8)) {
    prop_assert_eq!(classify_truthiness(&json!(items.clone())), !items.is_empty());
  }
}
