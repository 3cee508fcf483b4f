use super::*;

use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet};

#[derive(Clone, Debug)]
enum TreeOp {
    Insert(i64),
    Remove(i64),
    Contains(i64),
}

#[derive(Clone, Debug)]
enum TableOp {
    Add(i64),
    Remove(i64),
    Contains(i64),
    Rehash(usize),
}

fn tree_ops() -> impl Strategy<Value = Vec<TreeOp>> {
    let op = prop_oneof![
        50 => (-60i64..60).prop_map(TreeOp::Insert),
        30 => (-60i64..60).prop_map(TreeOp::Remove),
        20 => (-60i64..60).prop_map(TreeOp::Contains),
    ];
    prop::collection::vec(op, 0..=500)
}

fn table_ops() -> impl Strategy<Value = Vec<TableOp>> {
    let op = prop_oneof![
        45 => (-60i64..60).prop_map(TableOp::Add),
        30 => (-60i64..60).prop_map(TableOp::Remove),
        20 => (-60i64..60).prop_map(TableOp::Contains),
        5 => (0usize..48).prop_map(TableOp::Rehash),
    ];
    prop::collection::vec(op, 0..=500)
}

/// Load check mirroring the table's growth threshold.
fn under_load_limit(len: usize, capacity: usize) -> bool {
    len * 100 < capacity * 80
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_tree_matches_btreeset(ops in tree_ops()) {
        let mut tree: Bst<i64> = Bst::new();
        let mut oracle: BTreeSet<i64> = BTreeSet::new();

        for op in ops {
            match op {
                TreeOp::Insert(v) => prop_assert_eq!(tree.insert(v), oracle.insert(v)),
                TreeOp::Remove(v) => prop_assert_eq!(tree.remove(&v), oracle.remove(&v)),
                TreeOp::Contains(v) => prop_assert_eq!(tree.contains(&v), oracle.contains(&v)),
            }
            prop_assert_eq!(tree.len(), oracle.len());
        }

        // In-order rendering lists the oracle in ascending order.
        let in_order: Vec<i64> = tree
            .to_string()
            .split_whitespace()
            .map(|s| s.parse().unwrap())
            .collect();
        let ascending: Vec<i64> = oracle.iter().copied().collect();
        prop_assert_eq!(in_order, ascending);

        // Pre-order extraction covers exactly the stored values.
        let extracted = tree.to_vec();
        prop_assert_eq!(extracted.len(), oracle.len());
        for v in &extracted {
            prop_assert!(oracle.contains(v));
        }
        prop_assert_eq!(tree.max(), oracle.iter().next_back());
    }

    #[test]
    fn prop_tree_height_bounds(values in prop::collection::hash_set(-1_000i64..1_000, 0..200)) {
        let mut tree: Bst<i64> = Bst::new();
        for &v in &values {
            prop_assert!(tree.insert(v));
        }

        let height = i64::from(tree.height());
        let len = values.len() as i64;
        prop_assert!(height < len.max(1));
        if values.is_empty() {
            prop_assert_eq!(height, -1);
            prop_assert_eq!(tree.num_leaves(), 0);
        } else {
            prop_assert!(height >= 0);
            prop_assert!(tree.num_leaves() >= 1);
        }
    }

    #[test]
    fn prop_table_matches_hashset(capacity in 0usize..32, ops in table_ops()) {
        let mut table: ChainedHashTable<i64> = ChainedHashTable::new(capacity);
        let mut oracle: HashSet<i64> = HashSet::new();

        for op in ops {
            match op {
                TableOp::Add(v) => prop_assert_eq!(table.add(v), oracle.insert(v)),
                TableOp::Remove(v) => prop_assert_eq!(table.remove(&v), oracle.remove(&v)),
                TableOp::Contains(v) => {
                    prop_assert_eq!(table.contains(&v), oracle.contains(&v))
                }
                TableOp::Rehash(target) => {
                    let before = table.capacity();
                    let ok = table.rehash(target);
                    prop_assert_eq!(ok, target >= 2);
                    if !ok {
                        prop_assert_eq!(table.capacity(), before);
                    }
                }
            }
            prop_assert_eq!(table.len(), oracle.len());
            prop_assert!(table.capacity() >= 2);
        }

        let values = table.to_vec();
        prop_assert_eq!(values.len(), oracle.len());
        for v in &values {
            prop_assert!(oracle.contains(v));
            prop_assert!(table.contains(v));
        }
    }

    #[test]
    fn prop_add_keeps_load_below_limit(values in prop::collection::hash_set(any::<i64>(), 0..300)) {
        let mut table: ChainedHashTable<i64> = ChainedHashTable::new(2);
        for &v in &values {
            prop_assert!(table.add(v));
            prop_assert!(under_load_limit(table.len(), table.capacity()));
        }
    }

    #[test]
    fn prop_rehash_preserves_contents(
        values in prop::collection::hash_set(any::<i64>(), 0..200),
        target in 2usize..512,
    ) {
        let mut table: ChainedHashTable<i64> = ChainedHashTable::new(8);
        for &v in &values {
            table.add(v);
        }
        let len = table.len();

        prop_assert!(table.rehash(target));
        prop_assert_eq!(table.len(), len);
        prop_assert!(table.capacity() >= target);
        prop_assert!(under_load_limit(len, table.capacity()));
        for &v in &values {
            prop_assert!(table.contains(&v));
        }
    }

    #[test]
    fn prop_set_algebra_matches_std(
        a in prop::collection::hash_set(-40i64..40, 0..60),
        b in prop::collection::hash_set(-40i64..40, 0..60),
    ) {
        let sa: ForestSet<i64> = a.iter().copied().collect();
        let sb: ForestSet<i64> = b.iter().copied().collect();

        let check = |got: ForestSet<i64>, expected: HashSet<i64>| -> Result<(), TestCaseError> {
            prop_assert_eq!(got.len(), expected.len());
            for v in expected {
                prop_assert!(got.contains(&v));
            }
            Ok(())
        };

        check(sa.intersection(&sb), a.intersection(&b).copied().collect())?;
        check(sa.union(&sb), a.union(&b).copied().collect())?;
        check(sa.difference(&sb), a.difference(&b).copied().collect())?;
        check(
            sa.symmetric_difference(&sb),
            a.symmetric_difference(&b).copied().collect(),
        )?;

        prop_assert_eq!(sa.is_subset(&sb), a.is_subset(&b));
        prop_assert_eq!(sa.is_disjoint(&sb), a.is_disjoint(&b));
    }
}
