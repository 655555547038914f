//! Property-based tests for the cross-page selection model.
//!
//! Tests validate:
//! 1. apply then visible_selection returns exactly the applied subset
//! 2. apply is idempotent
//! 3. pages with disjoint ids never affect each other
//! 4. select_first_n checks exactly min(n, len) leading rows, rejects n <= 0

use pagesel::model::{Page, PageIndex, Record, RecordId};
use pagesel::state::SelectionSet;
use proptest::prelude::*;
use std::collections::BTreeSet;

fn page_of(index: usize, ids: &[i64]) -> Page {
    let records = ids.iter().map(|&id| Record::bare(RecordId::new(id))).collect();
    Page::new(PageIndex::new(index), records, 1_000)
}

fn to_set(ids: &[i64]) -> BTreeSet<RecordId> {
    ids.iter().copied().map(RecordId::new).collect()
}

/// Distinct page ids (in shuffled page order) plus a subset of them.
fn page_and_subset() -> impl Strategy<Value = (Vec<i64>, Vec<i64>)> {
    prop::collection::btree_set(0i64..10_000, 0..40)
        .prop_map(|ids| ids.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
        .prop_flat_map(|ids| {
            let len = ids.len();
            (Just(ids.clone()), prop::sample::subsequence(ids, 0..=len))
        })
}

// ===== Property 1 & 2: apply =====

proptest! {
    #[test]
    fn apply_then_visible_selection_is_exact((ids, subset) in page_and_subset()) {
        let page = page_of(0, &ids);
        let mut selection = SelectionSet::new();
        selection.apply_page_selection_change(&page, &to_set(&subset));
        prop_assert_eq!(selection.visible_selection(&page), to_set(&subset));
    }

    #[test]
    fn apply_is_idempotent((ids, subset) in page_and_subset(), prior in prop::collection::vec(0i64..10_000, 0..20)) {
        let page = page_of(0, &ids);
        let mut selection = SelectionSet::new();
        // Arbitrary prior state, including ids on and off the page
        let other = page_of(1, &prior.iter().copied().filter(|id| !ids.contains(id)).collect::<Vec<_>>());
        selection.apply_page_selection_change(&other, &other.ids().collect());

        let mut once = selection.clone();
        once.apply_page_selection_change(&page, &to_set(&subset));
        let mut twice = once.clone();
        twice.apply_page_selection_change(&page, &to_set(&subset));
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn apply_never_touches_ids_off_the_page(
        (ids, subset) in page_and_subset(),
        off_page in prop::collection::btree_set(10_000i64..20_000, 0..20),
    ) {
        let off: Vec<i64> = off_page.into_iter().collect();
        let other = page_of(1, &off);
        let page = page_of(0, &ids);
        let mut selection = SelectionSet::new();
        selection.apply_page_selection_change(&other, &to_set(&off));

        selection.apply_page_selection_change(&page, &to_set(&subset));

        prop_assert_eq!(selection.visible_selection(&other), to_set(&off));
        prop_assert_eq!(selection.count(), off.len() + subset.len());
    }
}

// ===== Property 3: disjoint pages =====

proptest! {
    #[test]
    fn selecting_on_one_page_leaves_disjoint_page_unchanged(
        (p1_ids, p1_checked) in page_and_subset(),
        p2_raw in prop::collection::btree_set(10_000i64..20_000, 1..20),
    ) {
        let p2_ids: Vec<i64> = p2_raw.into_iter().collect();
        let page1 = page_of(0, &p1_ids);
        let page2 = page_of(1, &p2_ids);
        let mut selection = SelectionSet::new();

        let before = selection.visible_selection(&page2);
        selection.apply_page_selection_change(&page1, &to_set(&p1_checked));
        prop_assert_eq!(selection.visible_selection(&page2), before);
    }
}

// ===== Property 4: select_first_n =====

proptest! {
    #[test]
    fn select_first_n_checks_leading_rows(
        ids in prop::collection::btree_set(0i64..10_000, 0..40)
            .prop_map(|s| s.into_iter().collect::<Vec<_>>())
            .prop_shuffle(),
        n in 1i64..60,
    ) {
        let page = page_of(0, &ids);
        let mut selection = SelectionSet::new();
        let taken = selection.select_first_n(&page, n).unwrap();

        let expected_len = (n as usize).min(ids.len());
        prop_assert_eq!(taken, expected_len);
        prop_assert_eq!(selection.visible_selection(&page), to_set(&ids[..expected_len]));
        if n as usize >= ids.len() {
            prop_assert_eq!(selection.visible_selection(&page), to_set(&ids));
        }
    }

    #[test]
    fn select_first_n_rejects_non_positive(
        (ids, subset) in page_and_subset(),
        n in i64::MIN..=0,
    ) {
        let page = page_of(0, &ids);
        let mut selection = SelectionSet::new();
        selection.apply_page_selection_change(&page, &to_set(&subset));
        let before = selection.clone();

        prop_assert!(selection.select_first_n(&page, n).is_err());
        prop_assert_eq!(selection.count(), before.count());
        prop_assert_eq!(selection, before);
    }
}
