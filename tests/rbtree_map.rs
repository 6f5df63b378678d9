use std::collections::BTreeMap;
use std::sync::Once;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rb_tree_map::RBTreeMap;
use simplelog::{Config, LevelFilter, TestLogger};

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 10_000;

static LOGGER: Once = Once::new();

/// Routes the crate's `debug!` output into the test harness's captured stdout.
fn init_logging() {
    LOGGER.call_once(|| {
        let _ = TestLogger::init(LevelFilter::Debug, Config::default());
    });
}

/// Generates keys from a range small enough to cause collisions.
fn key_strategy() -> impl Strategy<Value = i64> {
    -20_000i64..20_000i64
}

fn value_strategy() -> impl Strategy<Value = i64> {
    any::<i64>()
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum MapOp {
    Insert(i64, i64),
    Remove(i64),
    RemoveEntry(i64),
    Get(i64),
    GetMut(i64, i64),
    ContainsKey(i64),
    GetKeyValue(i64),
    FirstKeyValue,
    LastKeyValue,
    PopFirst,
    PopLast,
}

fn map_op_strategy() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        5 => (key_strategy(), value_strategy()).prop_map(|(k, v)| MapOp::Insert(k, v)),
        3 => key_strategy().prop_map(MapOp::Remove),
        1 => key_strategy().prop_map(MapOp::RemoveEntry),
        2 => key_strategy().prop_map(MapOp::Get),
        1 => (key_strategy(), value_strategy()).prop_map(|(k, v)| MapOp::GetMut(k, v)),
        1 => key_strategy().prop_map(MapOp::ContainsKey),
        1 => key_strategy().prop_map(MapOp::GetKeyValue),
        1 => Just(MapOp::FirstKeyValue),
        1 => Just(MapOp::LastKeyValue),
        1 => Just(MapOp::PopFirst),
        1 => Just(MapOp::PopLast),
    ]
}

// ─── Core CRUD operations ────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both RBTreeMap and BTreeMap and asserts
    /// identical results at every step.
    #[test]
    fn map_ops_match_btreemap(ops in proptest::collection::vec(map_op_strategy(), TEST_SIZE)) {
        init_logging();
        let mut rb_map: RBTreeMap<i64, i64> = RBTreeMap::new();
        let mut bt_map: BTreeMap<i64, i64> = BTreeMap::new();

        for op in &ops {
            match op {
                MapOp::Insert(k, v) => {
                    prop_assert_eq!(rb_map.insert(*k, *v), bt_map.insert(*k, *v), "insert({}, {})", k, v);
                }
                MapOp::Remove(k) => {
                    prop_assert_eq!(rb_map.remove(k), bt_map.remove(k), "remove({})", k);
                }
                MapOp::RemoveEntry(k) => {
                    prop_assert_eq!(rb_map.remove_entry(k), bt_map.remove_entry(k), "remove_entry({})", k);
                }
                MapOp::Get(k) => {
                    prop_assert_eq!(rb_map.get(k), bt_map.get(k), "get({})", k);
                }
                MapOp::GetMut(k, v) => {
                    let rb_result = rb_map.get_mut(k).map(|slot| std::mem::replace(slot, *v));
                    let bt_result = bt_map.get_mut(k).map(|slot| std::mem::replace(slot, *v));
                    prop_assert_eq!(rb_result, bt_result, "get_mut({})", k);
                }
                MapOp::ContainsKey(k) => {
                    prop_assert_eq!(rb_map.contains_key(k), bt_map.contains_key(k), "contains_key({})", k);
                }
                MapOp::GetKeyValue(k) => {
                    prop_assert_eq!(rb_map.get_key_value(k), bt_map.get_key_value(k), "get_key_value({})", k);
                }
                MapOp::FirstKeyValue => {
                    prop_assert_eq!(rb_map.first_key_value(), bt_map.first_key_value(), "first_key_value");
                }
                MapOp::LastKeyValue => {
                    prop_assert_eq!(rb_map.last_key_value(), bt_map.last_key_value(), "last_key_value");
                }
                MapOp::PopFirst => {
                    prop_assert_eq!(rb_map.pop_first(), bt_map.pop_first(), "pop_first");
                }
                MapOp::PopLast => {
                    prop_assert_eq!(rb_map.pop_last(), bt_map.pop_last(), "pop_last");
                }
            }
            prop_assert_eq!(rb_map.len(), bt_map.len(), "len mismatch after {:?}", op);
            prop_assert_eq!(rb_map.is_empty(), bt_map.is_empty(), "is_empty mismatch after {:?}", op);
        }

        let rb_items: Vec<_> = rb_map.into_iter().collect();
        let bt_items: Vec<_> = bt_map.into_iter().collect();
        prop_assert_eq!(rb_items, bt_items, "final contents mismatch");
    }

    /// Tests that iteration order matches BTreeMap after random insertions.
    #[test]
    fn iter_matches_btreemap(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        let rb_map: RBTreeMap<i64, i64> = entries.iter().copied().collect();
        let bt_map: BTreeMap<i64, i64> = entries.iter().copied().collect();

        let rb_items: Vec<_> = rb_map.iter().map(|(&k, &v)| (k, v)).collect();
        let bt_items: Vec<_> = bt_map.iter().map(|(&k, &v)| (k, v)).collect();
        prop_assert_eq!(&rb_items, &bt_items, "iter() mismatch");

        let rb_rev: Vec<_> = rb_map.iter().rev().map(|(&k, &v)| (k, v)).collect();
        let bt_rev: Vec<_> = bt_map.iter().rev().map(|(&k, &v)| (k, v)).collect();
        prop_assert_eq!(&rb_rev, &bt_rev, "iter().rev() mismatch");

        let rb_keys: Vec<_> = rb_map.keys().copied().collect();
        let bt_keys: Vec<_> = bt_map.keys().copied().collect();
        prop_assert_eq!(&rb_keys, &bt_keys, "keys() mismatch");

        let rb_values: Vec<_> = rb_map.values().copied().collect();
        let bt_values: Vec<_> = bt_map.values().copied().collect();
        prop_assert_eq!(&rb_values, &bt_values, "values() mismatch");

        let rb_into_keys: Vec<_> = rb_map.clone().into_keys().rev().collect();
        let bt_into_keys: Vec<_> = bt_map.clone().into_keys().rev().collect();
        prop_assert_eq!(&rb_into_keys, &bt_into_keys, "into_keys().rev() mismatch");

        let rb_into_values: Vec<_> = rb_map.into_values().collect();
        let bt_into_values: Vec<_> = bt_map.into_values().collect();
        prop_assert_eq!(&rb_into_values, &bt_into_values, "into_values() mismatch");
    }

    /// Interleaves next() and next_back() and checks the exact size after every step.
    #[test]
    fn iter_size_and_double_ended(
        entries in proptest::collection::vec((key_strategy(), value_strategy()), 1..TEST_SIZE),
        fronts in proptest::collection::vec(any::<bool>(), TEST_SIZE),
    ) {
        let rb_map: RBTreeMap<i64, i64> = entries.iter().copied().collect();
        let bt_map: BTreeMap<i64, i64> = entries.iter().copied().collect();

        let mut rb_iter = rb_map.iter();
        let mut bt_iter = bt_map.iter();
        for front in &fronts {
            prop_assert_eq!(rb_iter.len(), bt_iter.len());
            let (rb_next, bt_next) = if *front {
                (rb_iter.next(), bt_iter.next())
            } else {
                (rb_iter.next_back(), bt_iter.next_back())
            };
            prop_assert_eq!(rb_next, bt_next);
            if rb_next.is_none() {
                break;
            }
        }
        prop_assert_eq!(rb_iter.len(), bt_iter.len());
        prop_assert_eq!(rb_iter.collect::<Vec<_>>(), bt_iter.collect::<Vec<_>>());
    }

    #[test]
    fn retain_matches_btreemap(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        let mut rb_map: RBTreeMap<i64, i64> = entries.iter().copied().collect();
        let mut bt_map: BTreeMap<i64, i64> = entries.iter().copied().collect();

        rb_map.retain(|k, v| {
            *v = v.wrapping_add(1);
            k % 3 != 0
        });
        bt_map.retain(|k, v| {
            *v = v.wrapping_add(1);
            k % 3 != 0
        });

        let rb_items: Vec<_> = rb_map.iter().map(|(&k, &v)| (k, v)).collect();
        let bt_items: Vec<_> = bt_map.iter().map(|(&k, &v)| (k, v)).collect();
        prop_assert_eq!(rb_items, bt_items);
    }

    #[test]
    fn append_matches_btreemap(
        left in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE / 2),
        right in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE / 2),
    ) {
        let mut rb_left: RBTreeMap<i64, i64> = left.iter().copied().collect();
        let mut rb_right: RBTreeMap<i64, i64> = right.iter().copied().collect();
        let mut bt_left: BTreeMap<i64, i64> = left.iter().copied().collect();
        let mut bt_right: BTreeMap<i64, i64> = right.iter().copied().collect();

        rb_left.append(&mut rb_right);
        bt_left.append(&mut bt_right);

        prop_assert!(rb_right.is_empty());
        let rb_items: Vec<_> = rb_left.into_iter().collect();
        let bt_items: Vec<_> = bt_left.into_iter().collect();
        prop_assert_eq!(rb_items, bt_items);
    }

    /// Sorted bulk construction holds the same entries as one-by-one insertion.
    #[test]
    fn from_sorted_iter_matches_btreemap(entries in proptest::collection::vec((key_strategy(), value_strategy()), 0..TEST_SIZE)) {
        init_logging();
        let bt_map: BTreeMap<i64, i64> = entries.iter().copied().collect();
        let mut rb_map = RBTreeMap::from_sorted_iter(bt_map.clone());

        let rb_items: Vec<_> = rb_map.iter().map(|(&k, &v)| (k, v)).collect();
        let bt_items: Vec<_> = bt_map.iter().map(|(&k, &v)| (k, v)).collect();
        prop_assert_eq!(&rb_items, &bt_items);

        // The built tree must keep working under edits.
        let mut bt_map = bt_map;
        for (k, _) in &entries {
            prop_assert_eq!(rb_map.remove(k), bt_map.remove(k));
        }
        prop_assert!(rb_map.is_empty());
    }

    #[test]
    fn extend_matches_btreemap(
        initial in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE / 2),
        extra in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE / 2),
    ) {
        let mut rb_map: RBTreeMap<i64, i64> = initial.iter().copied().collect();
        let mut bt_map: BTreeMap<i64, i64> = initial.iter().copied().collect();

        rb_map.extend(extra.iter().map(|(k, v)| (k, v)));
        bt_map.extend(extra.iter().map(|(k, v)| (k, v)));

        let rb_items: Vec<_> = rb_map.into_iter().collect();
        let bt_items: Vec<_> = bt_map.into_iter().collect();
        prop_assert_eq!(rb_items, bt_items);
    }

    #[test]
    fn clear_empties_map(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        init_logging();
        let mut rb_map: RBTreeMap<i64, i64> = entries.iter().copied().collect();
        rb_map.clear();
        prop_assert!(rb_map.is_empty());
        prop_assert_eq!(rb_map.iter().next(), None);

        // The map is reusable after clearing.
        rb_map.insert(1, 1);
        prop_assert_eq!(rb_map.get(&1), Some(&1));
    }

    #[test]
    fn clone_produces_equal_map(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        let rb_map: RBTreeMap<i64, i64> = entries.iter().copied().collect();
        let mut cloned = rb_map.clone();
        prop_assert_eq!(&rb_map, &cloned);

        if let Some((&k, _)) = rb_map.first_key_value() {
            cloned.remove(&k);
            prop_assert!(rb_map.contains_key(&k));
            prop_assert_ne!(&rb_map, &cloned);
        }
    }

    #[test]
    fn ord_matches_btreemap(
        a in proptest::collection::vec((key_strategy(), value_strategy()), 0..64),
        b in proptest::collection::vec((key_strategy(), value_strategy()), 0..64),
    ) {
        let rb_a: RBTreeMap<i64, i64> = a.iter().copied().collect();
        let rb_b: RBTreeMap<i64, i64> = b.iter().copied().collect();
        let bt_a: BTreeMap<i64, i64> = a.iter().copied().collect();
        let bt_b: BTreeMap<i64, i64> = b.iter().copied().collect();

        prop_assert_eq!(rb_a == rb_b, bt_a == bt_b);
        prop_assert_eq!(rb_a.cmp(&rb_b), bt_a.cmp(&bt_b));
        prop_assert_eq!(rb_a.partial_cmp(&rb_b), bt_a.partial_cmp(&bt_b));
    }

    /// Tests that equal maps produce equal hashes regardless of insertion order.
    #[test]
    fn hash_consistent_for_equal_maps(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        use std::hash::{DefaultHasher, Hash, Hasher};

        let bt_map: BTreeMap<i64, i64> = entries.iter().copied().collect();
        let inserted: RBTreeMap<i64, i64> = bt_map.iter().rev().map(|(&k, &v)| (k, v)).collect();
        let built = RBTreeMap::from_sorted_iter(bt_map);

        let mut h1 = DefaultHasher::new();
        let mut h2 = DefaultHasher::new();
        inserted.hash(&mut h1);
        built.hash(&mut h2);

        prop_assert_eq!(h1.finish(), h2.finish(), "equal maps should have equal hashes");
    }
}

// ─── Scenarios ───────────────────────────────────────────────────────────────

#[test]
fn ascending_inserts_iterate_in_order() {
    init_logging();
    let mut map = RBTreeMap::new();
    for key in [10, 20, 30] {
        assert_eq!(map.insert(key, key * 2), None);
    }
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![10, 20, 30]);
    assert_eq!(map.get(&20), Some(&40));
}

#[test]
fn removing_middle_key_leaves_neighbours() {
    let mut map = RBTreeMap::from([(10, "a"), (20, "b"), (30, "c")]);
    assert_eq!(map.remove(&20), Some("b"));
    assert_eq!(map.iter().collect::<Vec<_>>(), vec![(&10, &"a"), (&30, &"c")]);
    assert_eq!(map.remove(&20), None);
    assert_eq!(map.len(), 2);
}

#[test]
fn overwrite_keeps_length() {
    let mut map = RBTreeMap::new();
    map.insert("k", 1);
    assert_eq!(map.insert("k", 2), Some(1));
    assert_eq!(map.len(), 1);
    assert_eq!(map["k"], 2);
}

#[test]
fn remove_from_empty_map() {
    let mut map: RBTreeMap<u32, u32> = RBTreeMap::default();
    assert_eq!(map.remove(&7), None);
    assert_eq!(map.pop_first(), None);
    assert_eq!(map.pop_last(), None);
    assert!(map.is_empty());
}

#[test]
fn bulk_build_of_seven() {
    init_logging();
    let map = RBTreeMap::from_pairs((1..=7).map(|k| (k, k.to_string())), true);
    assert_eq!(map.len(), 7);
    assert_eq!(map.first_key_value(), Some((&1, &"1".to_string())));
    assert_eq!(map.last_key_value(), Some((&7, &"7".to_string())));
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), (1..=7).collect::<Vec<_>>());
}

#[test]
fn borrowed_key_lookups() {
    let mut map: RBTreeMap<String, usize> = ["pear", "apple", "fig"]
        .iter()
        .map(|s| (s.to_string(), s.len()))
        .collect();
    assert_eq!(map.get("fig"), Some(&3));
    assert!(map.contains_key("apple"));
    assert_eq!(map.remove("pear"), Some(4));
    assert_eq!(map.get_key_value("apple"), Some((&"apple".to_string(), &5)));
}

#[test]
fn debug_output_is_a_map() {
    let map = RBTreeMap::from([(2, 'b'), (1, 'a')]);
    assert_eq!(format!("{map:?}"), "{1: 'a', 2: 'b'}");
    assert_eq!(format!("{:?}", map.keys()), "[1, 2]");
    assert_eq!(format!("{:?}", map.values()), "['a', 'b']");
}

#[test]
fn owned_values_are_dropped_once() {
    use std::rc::Rc;

    let token = Rc::new(());
    let mut map = RBTreeMap::new();
    for key in 0..100 {
        map.insert(key, Rc::clone(&token));
    }
    map.retain(|k, _| k % 2 == 0);
    assert_eq!(Rc::strong_count(&token), 51);

    let mut iter = map.into_iter();
    drop(iter.next());
    assert_eq!(Rc::strong_count(&token), 50);
    drop(iter);
    assert_eq!(Rc::strong_count(&token), 1);
}

#[test]
#[should_panic(expected = "no entry found for key")]
fn index_missing_key_panics() {
    let map = RBTreeMap::from([(1, 1)]);
    let _ = map[&2];
}
