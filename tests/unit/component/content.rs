use super::*;

fn nested() -> ContentTree {
    let mut tree = ContentTree::new();
    tree.append(ContentNode::text("  Hi "));
    tree.append(ContentNode::element(
        "b",
        vec![ContentNode::text("there"), ContentNode::text("!")],
    ));
    tree
}

#[test]
fn text_content_concatenates_descendants() {
    assert_eq!(nested().text_content(), "  Hi there!");
}

#[test]
fn set_text_content_replaces_top_level_children() {
    let mut tree = nested();
    assert_eq!(tree.children().len(), 2);
    tree.set_text_content("solo");
    assert_eq!(tree.children(), &[ContentNode::text("solo")]);
    tree.set_text_content("");
    assert!(tree.children().is_empty());
}

#[test]
fn no_records_without_observer() {
    let mut tree = nested();
    tree.set_text_content("x");
    assert!(tree.take_records().is_empty());
}

#[test]
fn observed_mutations_are_recorded_in_order() {
    let mut tree = nested();
    tree.observe();

    tree.set_character_data(&[1, 0], "world").unwrap();
    tree.insert(&[1], 2, ContentNode::text("?")).unwrap();
    tree.remove(&[0]).unwrap();

    let records = tree.take_records();
    assert_eq!(records.len(), 3);
    assert_eq!(
        records[0],
        MutationRecord {
            target: vec![1, 0],
            kind: MutationKind::CharacterData {
                old: "there".to_string()
            },
        }
    );
    assert_eq!(
        records[1].kind,
        MutationKind::ChildList {
            added: 1,
            removed: 0
        }
    );
    assert_eq!(records[2].target, Vec::<usize>::new());
    assert_eq!(tree.text_content(), "world!?");
    assert!(tree.take_records().is_empty());
}

#[test]
fn unchanged_character_data_is_not_recorded() {
    let mut tree = nested();
    tree.observe();
    tree.set_character_data(&[0], "  Hi ").unwrap();
    assert!(tree.take_records().is_empty());
}

#[test]
fn disconnect_drops_pending_records() {
    let mut tree = nested();
    tree.observe();
    tree.append(ContentNode::text("x"));
    tree.disconnect();
    assert!(!tree.is_observed());
    assert!(tree.take_records().is_empty());
}

#[test]
fn invalid_paths_are_rejected() {
    let mut tree = nested();
    assert!(tree.remove(&[]).is_err());
    assert!(tree.remove(&[9]).is_err());
    assert!(tree.insert(&[0], 0, ContentNode::text("x")).is_err());
    assert!(tree.set_character_data(&[1], "x").is_err());
    assert!(tree.insert(&[], 5, ContentNode::text("x")).is_err());
}

#[test]
fn clearing_empty_content_records_nothing() {
    let mut tree = ContentTree::new();
    tree.observe();
    tree.set_text_content("");
    assert!(tree.take_records().is_empty());
}
