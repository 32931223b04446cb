//! Property tests for classification and the store.

use proptest::prelude::*;

use retention_alerts::{by_category, total_count, AlertBoard, AlertOrigin, AlertStore};
use retention_core::models::{AlertCategory, AlertRecord, AlertSet};

fn category_strategy() -> impl Strategy<Value = AlertCategory> {
    prop_oneof![
        Just(AlertCategory::Inactivity),
        Just(AlertCategory::MissedExpectedDay),
        Just(AlertCategory::MissingItem),
    ]
}

fn record_strategy() -> impl Strategy<Value = AlertRecord> {
    (
        "c[0-9]{1,2}",
        "[A-Z][a-z]{2,8}",
        category_strategy(),
        prop::collection::vec("[a-z]{3,8}", 0..4),
    )
        .prop_map(|(id, name, category, items)| {
            AlertRecord::new(id, name, category, "generated").with_missing_items(items)
        })
}

fn set_strategy() -> impl Strategy<Value = AlertSet> {
    prop::collection::vec(record_strategy(), 0..40).prop_map(AlertSet::new)
}

proptest! {
    #[test]
    fn total_is_sum_of_categories(set in set_strategy()) {
        let sum: usize = AlertCategory::ALL
            .iter()
            .map(|&c| by_category(&set, c).len())
            .sum();
        prop_assert_eq!(total_count(&set), sum);
        prop_assert_eq!(total_count(&set), set.len());
    }

    #[test]
    fn by_category_preserves_received_order(set in set_strategy(), category in category_strategy()) {
        let expected: Vec<&AlertRecord> = set.iter().filter(|r| r.category == category).collect();
        prop_assert_eq!(by_category(&set, category), expected);
    }

    #[test]
    fn only_missing_item_records_carry_items(set in set_strategy()) {
        for record in set.iter() {
            if record.category != AlertCategory::MissingItem {
                prop_assert!(record.missing_items.is_empty());
            }
        }
    }

    #[test]
    fn board_sections_cover_the_whole_set(set in set_strategy()) {
        let board = AlertBoard::from_set(&set);
        let entries: usize = board.sections().iter().map(|s| s.entries.len()).sum();
        prop_assert_eq!(entries, board.badge());
        prop_assert_eq!(board.badge_label().is_some(), !set.is_empty());
    }

    #[test]
    fn replacing_twice_matches_replacing_once(set in set_strategy()) {
        let once = AlertStore::new();
        once.replace(set.clone(), AlertOrigin::Push);

        let twice = AlertStore::new();
        twice.replace(set.clone(), AlertOrigin::Push);
        twice.replace(set.clone(), AlertOrigin::Push);

        let once_snap = once.current();
        let twice_snap = twice.current();
        prop_assert_eq!(once_snap.alerts(), twice_snap.alerts());
        prop_assert_eq!(once.current().board(), twice.current().board());
    }

    #[test]
    fn last_replace_wins(first in set_strategy(), second in set_strategy()) {
        let store = AlertStore::new();
        store.replace(first, AlertOrigin::Push);
        store.replace(second.clone(), AlertOrigin::Pull);
        let snap = store.current();
        prop_assert_eq!(snap.alerts(), &second);
    }
}
