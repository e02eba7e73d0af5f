use std::collections::BTreeSet;

use gpui_app_list::{
    DragController, DropOutcome, HoverTarget, Item, ItemStore, PointerSample, delete_folder,
    folder_block, is_empty_folder, resolve_destination,
};

fn fixtures() -> Vec<ItemStore> {
    vec![
        ItemStore::new(vec![
            Item::app("home", "Home"),
            Item::app("messages", "Messages"),
            Item::folder("reports", "Reports"),
            Item::app("q4", "Q4").in_folder("reports"),
            Item::app("portfolio", "Portfolio").in_folder("reports"),
            Item::app("tasks", "Tasks"),
            Item::folder("empty", "Empty"),
            Item::folder("media", "Media"),
            Item::app("photos", "Photos").in_folder("media"),
            Item::app("files", "Files"),
        ])
        .unwrap(),
        ItemStore::new(vec![
            Item::folder("a", "A"),
            Item::app("a1", "A1").in_folder("a"),
            Item::folder("b", "B"),
            Item::app("b1", "B1").in_folder("b"),
            Item::app("b2", "B2").in_folder("b"),
            Item::app("b3", "B3").in_folder("b").disabled(true),
            Item::folder("c", "C"),
        ])
        .unwrap(),
    ]
}

fn samples() -> Vec<PointerSample> {
    let mut out = Vec::new();
    for delta_y in [-40.0, 40.0] {
        for delta_x in [0.0, 200.0] {
            out.push(PointerSample {
                delta_x,
                delta_y,
                start_x: 20.0,
                container_left: 0.0,
            });
        }
    }
    out
}

fn id_set(store: &ItemStore) -> BTreeSet<String> {
    store.iter().map(|item| item.id.clone()).collect()
}

fn block_ids(store: &ItemStore, folder_id: &str) -> Vec<String> {
    let ix = store.position(folder_id).unwrap();
    folder_block(store, ix)
        .map(|i| format!("{}:{:?}", store[i].id, store[i].path))
        .collect()
}

/// Every gesture over every target, with every direction and indent combination.
fn sweep(mut f: impl FnMut(&ItemStore, &Item, DropOutcome)) {
    for store in fixtures() {
        for active in store.iter().filter(|item| !item.disabled) {
            let mut targets: Vec<HoverTarget<'_>> =
                store.iter().map(|item| HoverTarget::Item(&item.id)).collect();
            targets.extend(
                store
                    .iter()
                    .enumerate()
                    .filter(|(ix, _)| is_empty_folder(&store, *ix))
                    .map(|(_, item)| HoverTarget::EmptyFolder(&item.id)),
            );
            for target in targets {
                for sample in samples() {
                    let mut controller = DragController::default();
                    assert!(controller.drag_start(&store, &active.id));
                    controller.drag_move(&sample);
                    controller.drag_over(&store, Some(target));
                    let outcome = controller.drag_end(&store);
                    assert!(!controller.is_dragging());
                    f(&store, active, outcome);
                }
            }
        }
    }
}

#[test]
fn committed_stores_keep_every_id() {
    sweep(|before, _, outcome| {
        if let DropOutcome::Committed(after) = outcome {
            assert_eq!(after.len(), before.len());
            assert_eq!(id_set(&after), id_set(before));
        }
    });
}

#[test]
fn committed_stores_are_well_formed() {
    sweep(|_, _, outcome| {
        if let DropOutcome::Committed(after) = outcome {
            assert!(
                after.iter().all(|item| !(item.is_folder() && item.path.is_some())),
                "nested folder"
            );
            after.validate().unwrap();
        }
    });
}

/// A drop whose direction agrees with where the hovered row sits (up onto rows above
/// the active item, down onto rows at or below it) always has somewhere to land.
#[test]
fn direction_consistent_drops_never_cancel() {
    let mut committed = 0;
    for store in fixtures() {
        for (active_index, active) in store.iter().enumerate().filter(|(_, item)| !item.disabled) {
            for (over_index, over) in store.iter().enumerate().filter(|(_, item)| !item.disabled) {
                for sample in samples() {
                    if (sample.delta_y < 0.0) != (over_index < active_index) {
                        continue;
                    }
                    let mut controller = DragController::default();
                    assert!(controller.drag_start(&store, &active.id));
                    controller.drag_move(&sample);
                    controller.drag_over(&store, Some(HoverTarget::Item(&over.id)));
                    match controller.drag_end(&store) {
                        DropOutcome::Committed(after) => {
                            after.validate().unwrap();
                            committed += 1;
                        }
                        DropOutcome::Rejected(_) => assert!(active.is_folder()),
                        DropOutcome::Cancelled => panic!(
                            "{} over {} with {sample:?} was cancelled",
                            active.id, over.id
                        ),
                    }
                }
            }
        }
    }
    assert!(committed > 0);
}

#[test]
fn joining_drops_file_apps_into_folders() {
    let mut joined = 0;
    sweep(|_, active, outcome| {
        if let DropOutcome::Committed(after) = outcome {
            let moved = after.find(&active.id).unwrap();
            if !active.is_folder() && moved.path.is_some() && moved.path != active.path {
                joined += 1;
            }
        }
    });
    assert!(joined > 0);
}

#[test]
fn folders_move_as_a_unit() {
    sweep(|before, active, outcome| {
        if !active.is_folder() {
            return;
        }
        match outcome {
            DropOutcome::Committed(after) => {
                assert_eq!(block_ids(&after, &active.id), block_ids(before, &active.id));
            }
            DropOutcome::Rejected(_) | DropOutcome::Cancelled => {}
        }
    });
}

#[test]
fn folders_never_gain_a_parent() {
    let mut rejected = 0;
    sweep(|_, active, outcome| {
        if let DropOutcome::Committed(after) = &outcome {
            let moved = after.find(&active.id).unwrap();
            if active.is_folder() {
                assert_eq!(moved.path, None);
            }
        }
        if matches!(outcome, DropOutcome::Rejected(_)) {
            assert!(active.is_folder());
            rejected += 1;
        }
    });
    assert!(rejected > 0);
}

#[test]
fn deleting_any_folder_flattens_in_place() {
    for store in fixtures() {
        for (ix, folder) in store.iter().enumerate().filter(|(_, item)| item.is_folder()) {
            let block = folder_block(&store, ix);
            let children: Vec<&str> = store.items()[block.start() + 1..=*block.end()]
                .iter()
                .map(|item| item.id.as_str())
                .collect();

            let after = delete_folder(&store, ix);
            after.validate().unwrap();
            assert!(after.find(&folder.id).is_none());
            let landed: Vec<&str> = after.items()[ix..ix + children.len()]
                .iter()
                .map(|item| item.id.as_str())
                .collect();
            assert_eq!(landed, children);
            assert!(after.items()[ix..ix + children.len()]
                .iter()
                .all(|item| item.path.is_none()));
        }
    }
}

#[test]
fn resolution_is_pure() {
    for store in fixtures() {
        let snapshot = store.clone();
        for active in 0..store.len() {
            for over in 0..store.len() {
                for up in [false, true] {
                    for indented in [false, true] {
                        let first = resolve_destination(&store, active, over, up, indented);
                        let second = resolve_destination(&store, active, over, up, indented);
                        assert_eq!(first, second);
                    }
                }
            }
        }
        assert_eq!(store, snapshot);
    }
}
