use crate::ir::SelectionKey;
use crate::ir::SelectionKeyType;

fn make_key(segments: &[&str], key_type: SelectionKeyType) -> SelectionKey {
    let mut key = SelectionKey::new(segments[0], key_type);
    for segment in &segments[1..] {
        key = key.with_segment(*segment);
    }
    key
}

#[test]
fn with_segment_extends_the_path() {
    let key = SelectionKey::new("HeroQuery", SelectionKeyType::Query)
        .with_segment("Data")
        .with_segment("Hero");

    assert_eq!(key.root(), "HeroQuery");
    assert_eq!(key.segments(), &["HeroQuery", "Data", "Hero"]);
    assert_eq!(key.key_type(), SelectionKeyType::Query);
    assert_eq!(key.to_string(), "Query:HeroQuery.Data.Hero");
}

#[test]
fn with_root_replaced_keeps_the_rest() {
    let key = make_key(&["HeroDetails", "Friends", "Name"], SelectionKeyType::Fragment);
    let replaced = key.with_root_replaced("HeroDetailsImpl");

    assert_eq!(replaced.segments(), &["HeroDetailsImpl", "Friends", "Name"]);
    assert_eq!(replaced.key_type(), SelectionKeyType::Fragment);
    assert_eq!(key.root(), "HeroDetails");
}

#[test]
fn prefixes_must_match_type_and_leading_segments() {
    let key = make_key(&["Q", "Data", "Hero", "Name"], SelectionKeyType::Query);

    assert!(key.starts_with(&make_key(&["Q", "Data"], SelectionKeyType::Query)));
    assert!(!key.starts_with(&make_key(&["Q", "Data"], SelectionKeyType::Fragment)));
    assert!(!key.starts_with(&make_key(&["Q", "Hero"], SelectionKeyType::Query)));
}

#[test]
fn with_prefix_replaced_rebases_the_key() {
    let key = make_key(&["Q", "Data", "Hero", "Name"], SelectionKeyType::Query);
    let prefix = make_key(&["Q", "Data", "Hero"], SelectionKeyType::Query);
    let replacement = make_key(&["Q", "Data", "Hero", "Droid"], SelectionKeyType::Query);

    assert_eq!(
        key.with_prefix_replaced(&prefix, &replacement),
        Some(make_key(&["Q", "Data", "Hero", "Droid", "Name"], SelectionKeyType::Query)),
    );
    assert_eq!(
        key.with_prefix_replaced(
            &make_key(&["Other"], SelectionKeyType::Query),
            &replacement,
        ),
        None,
    );
}

#[test]
fn deserializing_keeps_a_rooted_key() {
    let key = make_key(&["Hero", "Friends"], SelectionKeyType::Fragment);
    let json = serde_json::to_string(&key).unwrap();

    let decoded: SelectionKey = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, key);
    assert_eq!(decoded.root(), "Hero");
}

#[test]
fn deserializing_a_key_without_segments_fails() {
    let result = serde_json::from_str::<SelectionKey>(
        r#"{"keyType": "Query", "segments": []}"#,
    );
    assert!(result.is_err());
}
