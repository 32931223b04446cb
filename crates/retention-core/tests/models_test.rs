use retention_core::models::*;

#[test]
fn alert_set_preserves_received_order_and_duplicates() {
    let set: AlertSet = vec![
        AlertRecord::new("c2", "Bruno", AlertCategory::Inactivity, "idle"),
        AlertRecord::new("c1", "Ana", AlertCategory::Inactivity, "idle"),
        AlertRecord::new("c2", "Bruno", AlertCategory::Inactivity, "idle"),
    ]
    .into();

    let ids: Vec<&str> = set.iter().map(|r| r.customer_id.as_str()).collect();
    assert_eq!(ids, vec!["c2", "c1", "c2"]);
    assert_eq!(set.len(), 3);
}

#[test]
fn empty_set_is_default() {
    assert!(AlertSet::empty().is_empty());
    assert_eq!(AlertSet::default(), AlertSet::empty());
}

#[test]
fn record_key_is_customer_and_category() {
    let a = AlertRecord::new("c1", "Ana", AlertCategory::MissingItem, "stopped");
    let b = AlertRecord::new("c1", "Ana Maria", AlertCategory::MissingItem, "other reason");
    assert_eq!(a.key(), b.key());

    let c = AlertRecord::new("c1", "Ana", AlertCategory::Inactivity, "idle");
    assert_ne!(a.key(), c.key());
}

#[test]
fn category_serializes_with_wire_names() {
    let json = serde_json::to_string(&AlertCategory::MissedExpectedDay).unwrap();
    assert_eq!(json, "\"dia_previsto\"");
    for category in AlertCategory::ALL {
        let encoded = serde_json::to_string(&category).unwrap();
        assert_eq!(encoded, format!("\"{}\"", category.wire_name()));
    }
}

#[test]
fn category_accepts_english_aliases() {
    let parsed: AlertCategory = serde_json::from_str("\"missing_item\"").unwrap();
    assert_eq!(parsed, AlertCategory::MissingItem);
    assert!(serde_json::from_str::<AlertCategory>("\"churn\"").is_err());
}

#[test]
fn alert_set_serializes_as_plain_array() {
    let set: AlertSet = vec![AlertRecord::new(
        "c1",
        "Ana",
        AlertCategory::Inactivity,
        "30 days no purchase",
    )]
    .into();
    let value = serde_json::to_value(&set).unwrap();
    assert!(value.is_array());
    assert_eq!(value[0]["customer_id"], "c1");
    assert_eq!(value[0]["category"], "inatividade");
}
