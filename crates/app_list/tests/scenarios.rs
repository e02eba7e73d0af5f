use gpui_app_list::{
    DragController, DropOutcome, HoverTarget, ItemStore, PointerSample, Rejection,
    delete_folder_with_id,
};

const SNAPSHOT: &str = r#"[
    {"id": "home", "label": "Home", "type": "app"},
    {"id": "messages", "label": "Messages", "type": "app"},
    {"id": "billing", "label": "Billing", "type": "app"},
    {"id": "files", "label": "Files", "type": "app"},
    {"id": "tasks", "label": "Tasks", "type": "app"},
    {"id": "reports", "label": "Reports", "type": "folder"},
    {"id": "q4", "label": "Q4", "type": "app", "path": "reports"},
    {"id": "portfolio", "label": "Portfolio", "type": "app", "path": "reports"},
    {"id": "cashflow", "label": "Cashflow", "type": "app", "path": "reports"}
]"#;

fn dump(store: &ItemStore) -> Vec<String> {
    store
        .iter()
        .map(|item| match &item.path {
            Some(path) => format!("{}<{path}", item.id),
            None => item.id.clone(),
        })
        .collect()
}

/// A pointer sample near the list's left edge, i.e. not indented.
fn flat(delta_y: f32) -> PointerSample {
    PointerSample {
        delta_x: 0.0,
        delta_y,
        start_x: 32.0,
        container_left: 8.0,
    }
}

fn drag(
    store: &ItemStore,
    id: &str,
    sample: PointerSample,
    over: HoverTarget<'_>,
) -> (Option<String>, DropOutcome) {
    let mut controller = DragController::default();
    assert!(controller.drag_start(store, id));
    controller.drag_move(&sample);
    controller.drag_over(store, Some(over));
    let destination = controller.destination_folder_id(store);
    (destination, controller.drag_end(store))
}

#[test]
fn reorder_between_top_level_apps() -> anyhow::Result<()> {
    let store = ItemStore::from_json(SNAPSHOT)?;
    let (destination, outcome) = drag(&store, "messages", flat(30.0), HoverTarget::Item("billing"));
    assert_eq!(destination, None);

    let next = outcome.committed().expect("committed");
    assert_eq!(
        dump(&next),
        [
            "home",
            "billing",
            "messages",
            "files",
            "tasks",
            "reports",
            "q4<reports",
            "portfolio<reports",
            "cashflow<reports"
        ]
    );
    Ok(())
}

#[test]
fn dropping_on_folder_row_makes_first_child() -> anyhow::Result<()> {
    let store = ItemStore::from_json(SNAPSHOT)?;
    let (destination, outcome) = drag(&store, "files", flat(60.0), HoverTarget::Item("reports"));
    assert_eq!(destination.as_deref(), Some("reports"));

    let next = outcome.committed().expect("committed");
    assert_eq!(
        dump(&next),
        [
            "home",
            "messages",
            "billing",
            "tasks",
            "reports",
            "files<reports",
            "q4<reports",
            "portfolio<reports",
            "cashflow<reports"
        ]
    );
    Ok(())
}

#[test]
fn stepping_out_of_folder_above_it() -> anyhow::Result<()> {
    let store = ItemStore::from_json(SNAPSHOT)?;
    let (destination, outcome) =
        drag(&store, "portfolio", flat(-60.0), HoverTarget::Item("reports"));
    assert_eq!(destination, None);

    let next = outcome.committed().expect("committed");
    assert_eq!(
        dump(&next),
        [
            "home",
            "messages",
            "billing",
            "files",
            "tasks",
            "portfolio",
            "reports",
            "q4<reports",
            "cashflow<reports"
        ]
    );
    Ok(())
}

#[test]
fn stepping_out_of_folder_below_it() -> anyhow::Result<()> {
    let store = ItemStore::from_json(SNAPSHOT)?;
    let (destination, outcome) = drag(&store, "q4", flat(60.0), HoverTarget::Item("cashflow"));
    assert_eq!(destination, None);

    let next = outcome.committed().expect("committed");
    assert_eq!(
        &dump(&next)[5..],
        ["reports", "portfolio<reports", "cashflow<reports", "q4"]
    );
    Ok(())
}

#[test]
fn indenting_below_last_child_stays_inside() -> anyhow::Result<()> {
    let store = ItemStore::from_json(SNAPSHOT)?;
    let indented = PointerSample {
        delta_x: 150.0,
        ..flat(60.0)
    };
    let (destination, outcome) = drag(&store, "q4", indented, HoverTarget::Item("cashflow"));
    assert_eq!(destination.as_deref(), Some("reports"));

    let next = outcome.committed().expect("committed");
    assert_eq!(
        &dump(&next)[5..],
        [
            "reports",
            "portfolio<reports",
            "cashflow<reports",
            "q4<reports"
        ]
    );
    Ok(())
}

#[test]
fn deleting_folder_flattens_children() -> anyhow::Result<()> {
    let store = ItemStore::from_json(SNAPSHOT)?;
    let next = delete_folder_with_id(&store, "reports")?;
    assert_eq!(
        dump(&next),
        [
            "home",
            "messages",
            "billing",
            "files",
            "tasks",
            "q4",
            "portfolio",
            "cashflow"
        ]
    );
    Ok(())
}

#[test]
fn folder_onto_itself_is_rejected() -> anyhow::Result<()> {
    let store = ItemStore::from_json(SNAPSHOT)?;
    let (destination, outcome) = drag(&store, "reports", flat(2.0), HoverTarget::Item("reports"));
    assert_eq!(destination.as_deref(), Some("reports"));
    assert_eq!(outcome, DropOutcome::Rejected(Rejection::FolderIntoFolder));
    Ok(())
}

#[test]
fn store_round_trips_through_json() -> anyhow::Result<()> {
    let store = ItemStore::from_json(SNAPSHOT)?;
    let again = ItemStore::from_json(&store.to_json()?)?;
    assert_eq!(store, again);
    Ok(())
}

const ARCHIVE: &str = r#"[
    {"id": "home", "label": "Home", "type": "app"},
    {"id": "archive", "label": "Archive", "type": "folder"},
    {"id": "legacy", "label": "Legacy", "type": "app", "path": "archive", "disabled": true},
    {"id": "tasks", "label": "Tasks", "type": "app"}
]"#;

#[test]
fn empty_zone_top_level_drop_lands_after_disabled_children() -> anyhow::Result<()> {
    let store = ItemStore::from_json(ARCHIVE)?;
    let (destination, outcome) =
        drag(&store, "home", flat(30.0), HoverTarget::EmptyFolder("archive"));
    assert_eq!(destination, None);

    let next = outcome.committed().expect("committed");
    assert_eq!(dump(&next), ["archive", "legacy<archive", "home", "tasks"]);
    next.validate()?;
    Ok(())
}

#[test]
fn empty_zone_indented_drop_joins_above_disabled_children() -> anyhow::Result<()> {
    let store = ItemStore::from_json(ARCHIVE)?;
    let indented = PointerSample {
        delta_x: 200.0,
        ..flat(30.0)
    };
    let (destination, outcome) =
        drag(&store, "home", indented, HoverTarget::EmptyFolder("archive"));
    assert_eq!(destination.as_deref(), Some("archive"));

    let next = outcome.committed().expect("committed");
    assert_eq!(dump(&next), ["archive", "home<archive", "legacy<archive", "tasks"]);
    next.validate()?;
    Ok(())
}
