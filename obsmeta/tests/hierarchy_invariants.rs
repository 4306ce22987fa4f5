//! Property tests: the index invariants must survive arbitrary insertion
//! sequences, and resolution must be deterministic.

use obsmeta::hierarchy::HierarchyIndex;
use obsmeta::models::SiteId;
use proptest::prelude::*;

fn site_id(n: usize) -> SiteId {
    SiteId::from(format!("site-{n}").as_str())
}

/// Insertion scripts over a small id pool, so that duplicate ids, mutual
/// hints and hint collisions all actually occur.
fn insert_script() -> impl Strategy<Value = Vec<(usize, Vec<usize>)>> {
    prop::collection::vec(
        (0usize..8, prop::collection::vec(0usize..8, 0..4)),
        0..24,
    )
}

fn apply(index: &mut HierarchyIndex, site: usize, hints: &[usize]) -> bool {
    index
        .insert(site_id(site), hints.iter().map(|h| site_id(*h)).collect())
        .is_ok()
}

proptest! {
    #[test]
    fn invariants_hold_after_every_insert(script in insert_script()) {
        let mut index = HierarchyIndex::new();
        for (site, hints) in &script {
            let _ = apply(&mut index, *site, hints);
            // I1-I4, checked structurally after every call, successful or not.
            index.verify_forest_matches_registry().unwrap();
        }
    }

    #[test]
    fn resolution_is_deterministic(script in insert_script()) {
        let mut first = HierarchyIndex::new();
        let mut second = HierarchyIndex::new();

        for (site, hints) in &script {
            let hints_a: Vec<SiteId> = hints.iter().map(|h| site_id(*h)).collect();
            let result_a = first.insert(site_id(*site), hints_a.clone());
            let result_b = second.insert(site_id(*site), hints_a);
            prop_assert_eq!(result_a, result_b);
        }
        prop_assert_eq!(first, second);
    }

    #[test]
    fn lookup_finds_every_inserted_id(script in insert_script()) {
        let mut index = HierarchyIndex::new();
        let mut inserted = Vec::new();
        for (site, hints) in &script {
            if apply(&mut index, *site, hints) {
                inserted.push(site_id(*site));
            }
        }

        for id in &inserted {
            let node = index.find(id).unwrap();
            prop_assert_eq!(&node.id, id);
        }
    }

    #[test]
    fn roots_are_exactly_the_parentless_nodes(script in insert_script()) {
        let mut index = HierarchyIndex::new();
        for (site, hints) in &script {
            let _ = apply(&mut index, *site, hints);
        }

        let roots: std::collections::HashSet<&SiteId> = index.roots().iter().collect();
        for node in index.iter_nodes() {
            prop_assert_eq!(node.parent.is_none(), roots.contains(&node.id));
        }
        prop_assert_eq!(roots.len(), index.iter_nodes().filter(|n| n.is_root()).count());
    }

    #[test]
    fn paths_run_root_first_down_to_the_node(script in insert_script()) {
        let mut index = HierarchyIndex::new();
        for (site, hints) in &script {
            let _ = apply(&mut index, *site, hints);
        }

        let ids: Vec<SiteId> = index.iter_nodes().map(|n| n.id.clone()).collect();
        for id in ids {
            let path = index.id_path(&id).unwrap();
            prop_assert!(index.roots().contains(&path[0]));
            prop_assert_eq!(path.last().unwrap(), &id);

            // Path length is depth + 1.
            let mut depth = 0;
            let mut current = index.parent(&id).cloned();
            while let Some(parent) = current {
                depth += 1;
                current = index.parent(&parent).cloned();
            }
            prop_assert_eq!(path.len(), depth + 1);
        }
    }

    #[test]
    fn removal_keeps_the_forest_consistent(script in insert_script(), victim in 0usize..8) {
        let mut index = HierarchyIndex::new();
        for (site, hints) in &script {
            let _ = apply(&mut index, *site, hints);
        }

        let victim_id = site_id(victim);
        if index.contains(&victim_id) {
            index.remove(&victim_id).unwrap();
        }
        index.verify_forest_matches_registry().unwrap();
        prop_assert!(!index.contains(&victim_id));
    }
}
