use crate::schema::{FieldId, FieldType};
use crate::session::{FormSession, Notification};

fn session() -> FormSession {
    crate::standard_session().expect("built-in config parses")
}

fn error_count(notifications: &[Notification]) -> usize {
    notifications
        .iter()
        .filter(|n| matches!(n, Notification::Error(_)))
        .count()
}

#[test]
fn test_add_root_field_installs_single_typed_root() {
    let mut session = session();

    let root = session.add_root_field(Some(FieldType::Text)).unwrap();
    let node = session.tree().get(root).unwrap();
    assert_eq!(node.field_type, FieldType::Text);
    assert_eq!(node.label, "Text Field");
    assert_eq!(session.tree().roots().len(), 1);

    // Adding again replaces the previous root outright.
    let replacement = session.add_root_field(Some(FieldType::Date)).unwrap();
    assert_eq!(session.tree().roots(), &[replacement]);
    assert!(session.tree().get(root).is_none());
}

#[test]
fn test_resetting_roots_clears_all_stores() {
    let mut session = session();
    let root = session.add_root_field(Some(FieldType::Dropdown)).unwrap();
    session.change_value(root, "Option 1");
    session.submit();

    assert!(!session.values().is_empty());
    assert!(!session.selected_dropdown_values().is_empty());
    assert!(session.submitted_data().is_some());

    session.add_root_field(None);
    assert_eq!(session.tree().count_nodes(), 0);
    assert!(session.values().is_empty());
    assert!(session.errors().is_empty());
    assert!(session.selected_dropdown_values().is_empty());
    assert!(session.submitted_data().is_none());
}

#[test]
fn test_retype_field_starts_value_over() {
    let mut session = session();
    let root = session.add_root_field(Some(FieldType::Text)).unwrap();
    session.change_value(root, "hello");

    session.retype_field(root, FieldType::Date);
    assert_eq!(session.tree().get(root).unwrap().label, "Date Field");
    assert!(session.values().get(&root).is_none());
    assert!(session.errors().get(&root).is_none());
}

#[test]
fn test_retype_same_type_keeps_value() {
    let mut session = session();
    let root = session.add_root_field(Some(FieldType::Text)).unwrap();
    session.change_value(root, "Bob");

    // Re-selecting the current type is a no-op retype.
    session.retype_field(root, FieldType::Text);
    assert_eq!(session.values().get(&root).map(String::as_str), Some("Bob"));
    assert_eq!(session.tree().get(root).unwrap().field_type, FieldType::Text);
}

#[test]
fn test_retype_field_prunes_matching_child_and_its_data() {
    let mut session = session();
    let root = session.add_root_field(Some(FieldType::Text)).unwrap();
    let child = session.add_nested_field(root).unwrap();
    session.retype_field(child, FieldType::Radio);
    session.change_value(child, "Yes");

    session.retype_field(root, FieldType::Radio);
    assert!(session.tree().get(child).is_none());
    assert!(session.values().get(&child).is_none());
    assert_eq!(session.tree().count_nodes(), 1);
}

#[test]
fn test_retype_field_keeps_differing_child() {
    let mut session = session();
    let root = session.add_root_field(Some(FieldType::Text)).unwrap();
    let child = session.add_nested_field(root).unwrap();
    session.retype_field(child, FieldType::Radio);

    session.retype_field(root, FieldType::Date);
    let child_node = session.tree().get(child).unwrap();
    assert_eq!(child_node.field_type, FieldType::Radio);
    assert!(!child_node.available_types().contains(&FieldType::Date));
    assert!(child_node.available_types().contains(&FieldType::Text));
}

#[test]
fn test_add_nested_field_twice_keeps_only_second_child() {
    let mut session = session();
    let root = session.add_root_field(Some(FieldType::Text)).unwrap();

    let first = session.add_nested_field(root).unwrap();
    let second = session.add_nested_field(root).unwrap();

    assert_ne!(first, second);
    assert_eq!(session.tree().get(root).unwrap().child, Some(second));
    assert!(session.tree().get(first).is_none());
    assert_eq!(session.tree().count_nodes(), 2);
}

#[test]
fn test_change_value_records_error_and_notifies() {
    let mut session = session();
    let root = session.add_root_field(Some(FieldType::Text)).unwrap();

    let notifications = session.change_value(root, " Bob ");
    assert_eq!(error_count(&notifications), 1);
    assert!(session.errors().get(&root).unwrap().contains("whitespace"));

    let notifications = session.change_value(root, "Bob");
    assert!(notifications.is_empty());
    assert!(session.errors().get(&root).is_none());
    assert_eq!(session.values().get(&root).map(String::as_str), Some("Bob"));
}

#[test]
fn test_structural_ops_with_stale_ids_are_noops() {
    let mut session = session();
    let root = session.add_root_field(Some(FieldType::Text)).unwrap();
    session.change_value(root, "Bob");
    let stale = FieldId::new();

    session.retype_field(stale, FieldType::Date);
    assert!(session.add_nested_field(stale).is_none());
    assert!(session.change_value(stale, "x").is_empty());

    assert_eq!(session.tree().count_nodes(), 1);
    assert_eq!(session.values().len(), 1);
    assert!(session.values().get(&stale).is_none());
}

#[test]
fn test_dropdown_selection_tracks_per_field_contributions() {
    let mut session = session();
    let root = session.add_root_field(Some(FieldType::Dropdown)).unwrap();
    let child = session.add_nested_field(root).unwrap();
    session.retype_field(child, FieldType::Text);
    let grandchild = session.add_nested_field(child).unwrap();
    session.retype_field(grandchild, FieldType::Dropdown);

    session.change_value(root, "Option 1");
    session.change_value(grandchild, "Option 2");
    let selected = session.selected_dropdown_values();
    assert!(selected.contains("Option 1"));
    assert!(selected.contains("Option 2"));

    // Clearing one dropdown removes exactly its own contribution.
    session.change_value(grandchild, "");
    let selected = session.selected_dropdown_values();
    assert!(selected.contains("Option 1"));
    assert!(!selected.contains("Option 2"));
}

#[test]
fn test_nested_dropdown_options_exclude_parent_value() {
    let mut session = session();
    let root = session.add_root_field(Some(FieldType::Text)).unwrap();
    let child = session.add_nested_field(root).unwrap();
    session.retype_field(child, FieldType::Dropdown);
    session.change_value(root, "Option 1");

    let views = session.field_views();
    let child_view = views[0].child.as_ref().unwrap();
    assert!(!child_view.options.options.contains(&"Option 1".to_string()));
    assert!(child_view.options.options.contains(&"Option 2".to_string()));

    // The root's own option list is untouched.
    let mut root_dropdown = session;
    let root = root_dropdown.add_root_field(Some(FieldType::Dropdown)).unwrap();
    root_dropdown.change_value(root, "Option 1");
    let views = root_dropdown.field_views();
    assert!(views[0].options.options.contains(&"Option 1".to_string()));
}

#[test]
fn test_unset_child_view_offers_all_but_parent_type() {
    let mut session = session();
    let root = session.add_root_field(Some(FieldType::Country)).unwrap();
    session.add_nested_field(root).unwrap();

    let views = session.field_views();
    assert_eq!(views.len(), 1);
    let child_view = views[0].child.as_ref().unwrap();
    assert!(child_view.field_type.is_unset());
    assert_eq!(child_view.label, "Nested Field");
    assert_eq!(child_view.available_types.len(), FieldType::ALL.len() - 1);
    assert!(!child_view.available_types.contains(&FieldType::Country));
}

#[test]
fn test_submit_empty_tree_aborts_without_state_change() {
    let mut session = session();
    let notifications = session.submit();

    assert_eq!(
        notifications,
        vec![Notification::Error("No fields to submit!".to_string())]
    );
    assert!(session.values().is_empty());
    assert!(session.errors().is_empty());
    assert!(session.submitted_data().is_none());
}

#[test]
fn test_submit_flags_unset_and_invalid_fields() {
    let mut session = session();
    let root = session.add_root_field(Some(FieldType::Text)).unwrap();
    session.add_nested_field(root).unwrap();

    // Root never received a value, child never received a type.
    let notifications = session.submit();
    assert_eq!(error_count(&notifications), 2);
    assert!(notifications.iter().any(|n| matches!(
        n,
        Notification::Error(msg) if msg.contains("select a field type")
    )));
    assert_eq!(session.errors().len(), 2);
    assert!(session.submitted_data().is_none());
}

#[test]
fn test_submit_snapshots_values_verbatim() {
    let mut session = session();
    let root = session.add_root_field(Some(FieldType::Text)).unwrap();
    let child = session.add_nested_field(root).unwrap();
    session.retype_field(child, FieldType::Date);

    session.change_value(root, "hello world");
    session.change_value(child, "2024-01-05");

    let notifications = session.submit();
    assert_eq!(
        notifications,
        vec![Notification::Success("Form submitted successfully!".to_string())]
    );
    assert!(session.errors().is_empty());

    let snapshot = session.submitted_data().unwrap();
    assert_eq!(snapshot.len(), 2);
    let root_entry = snapshot.get(&root).unwrap();
    assert_eq!(root_entry.label, "Text Field");
    assert_eq!(root_entry.value, "hello world");
    let child_entry = snapshot.get(&child).unwrap();
    assert_eq!(child_entry.label, "Date Field");
    assert_eq!(child_entry.value, "2024-01-05");
}

#[test]
fn test_submit_snapshot_keeps_fields_sharing_a_label() {
    let mut session = session();
    let root = session.add_root_field(Some(FieldType::Dropdown)).unwrap();
    let child = session.add_nested_field(root).unwrap();
    session.retype_field(child, FieldType::Text);
    let grandchild = session.add_nested_field(child).unwrap();
    session.retype_field(grandchild, FieldType::Dropdown);

    session.change_value(root, "Option 1");
    session.change_value(child, "middle");
    session.change_value(grandchild, "Option 2");

    let notifications = session.submit();
    assert_eq!(error_count(&notifications), 0);

    // Both dropdowns share the "Dropdown Field" label; neither value may be
    // dropped from the snapshot.
    let snapshot = session.submitted_data().unwrap();
    assert_eq!(snapshot.len(), 3);
    assert_eq!(snapshot.get(&root).unwrap().value, "Option 1");
    assert_eq!(snapshot.get(&grandchild).unwrap().value, "Option 2");
    assert_eq!(
        snapshot.get(&root).unwrap().label,
        snapshot.get(&grandchild).unwrap().label
    );
}

#[test]
fn test_failed_submit_keeps_previous_snapshot() {
    let mut session = session();
    let root = session.add_root_field(Some(FieldType::Text)).unwrap();
    session.change_value(root, "hello");
    session.submit();
    let snapshot = session.submitted_data().cloned();
    assert!(snapshot.is_some());

    session.change_value(root, " x ");
    let notifications = session.submit();
    assert_eq!(error_count(&notifications), 1);
    assert_eq!(session.submitted_data().cloned(), snapshot);
}

#[test]
fn test_checkbox_submits_untouched_and_omits_it_from_snapshot() {
    let mut session = session();
    let root = session.add_root_field(Some(FieldType::Checkbox)).unwrap();

    // Checkbox is valid even when never touched; an untouched field has no
    // value store entry, so the snapshot carries none either.
    let notifications = session.submit();
    assert_eq!(error_count(&notifications), 0);
    assert!(session.submitted_data().unwrap().is_empty());

    session.change_value(root, "yes");
    session.submit();
    assert_eq!(
        session.submitted_data().unwrap().get(&root).unwrap().value,
        "yes"
    );
}

#[test]
fn test_file_field_respects_configured_accept_list() {
    let mut session = session();
    let root = session.add_root_field(Some(FieldType::File)).unwrap();

    // Built-in table restricts uploads to document/image extensions.
    let notifications = session.change_value(root, "notes.exe");
    assert_eq!(error_count(&notifications), 1);

    let notifications = session.change_value(root, "scan.PDF");
    assert!(notifications.is_empty());
}
