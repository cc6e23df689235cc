use proptest::prelude::*;
use serde_json::{Map, Value};
use view_context::path::{get_path, set_path};

// Dot-free segments; dots are the separator by contract.
fn segments() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z][a-z0-9_]{0,8}", 1..5)
}

proptest! {
    #[test]
    fn set_then_get_round_trips(segs in segments(), n in any::<i64>()) {
        let path = segs.join(".");
        let want = Value::from(n);
        let mut root = Map::new();
        set_path(&mut root, &path, want.clone());
        prop_assert_eq!(get_path(&root, &path), Some(&want));
    }

    #[test]
    fn last_writer_wins(segs in segments(), a in any::<i64>(), b in any::<i64>()) {
        let path = segs.join(".");
        let want = Value::from(b);
        let mut root = Map::new();
        set_path(&mut root, &path, Value::from(a));
        set_path(&mut root, &path, want.clone());
        prop_assert_eq!(get_path(&root, &path), Some(&want));
    }

    #[test]
    fn dotted_keys_never_appear_literally(segs in segments(), n in any::<i64>()) {
        prop_assume!(segs.len() > 1);
        let path = segs.join(".");
        let mut root = Map::new();
        set_path(&mut root, &path, Value::from(n));
        prop_assert!(!root.contains_key(&path));
        prop_assert!(root.contains_key(&segs[0]));
    }
}
