use super::*;

#[test]
fn names_round_trip_through_markup_form() {
    for attr in AttrName::ALL {
        assert_eq!(AttrName::parse(attr.as_str()), Some(attr));
    }
    assert_eq!(AttrName::parse("IMAGE-SRC"), Some(AttrName::ImageSrc));
    assert_eq!(AttrName::parse("colour"), None);
}

#[test]
fn defaults_table_matches_documented_values() {
    assert_eq!(AttrName::ImageSrc.default_value(), None);
    assert_eq!(AttrName::Blur.default_value(), Some("10"));
    assert_eq!(AttrName::Brightness.default_value(), Some("0.8"));
    assert_eq!(AttrName::TextX.default_value(), Some("50%"));
    assert_eq!(AttrName::TextY.default_value(), Some("50%"));
    assert_eq!(AttrName::FontSize.default_value(), Some("100px"));
    assert_eq!(AttrName::FontWeight.default_value(), Some("700"));
    assert_eq!(AttrName::FontFamily.default_value(), Some("sans-serif"));
    assert_eq!(AttrName::ObjectFit.default_value(), Some("cover"));
}

#[test]
fn categories_route_attributes() {
    assert_eq!(AttrName::ImageSrc.category(), AttrCategory::Image);
    assert_eq!(AttrName::Blur.category(), AttrCategory::Filter);
    assert_eq!(AttrName::Brightness.category(), AttrCategory::Filter);
    assert_eq!(AttrName::ObjectFit.category(), AttrCategory::Fit);
    assert_eq!(AttrName::FontFamily.category(), AttrCategory::TextStyle);
    assert_eq!(AttrName::TextY.category(), AttrCategory::TextStyle);
}

#[test]
fn set_reports_old_and_new_values() {
    let mut store = AttributeStore::new();
    let first = store.set("blur", "5").unwrap();
    assert_eq!(first.name, AttrName::Blur);
    assert_eq!(first.old, None);
    assert_eq!(first.new.as_deref(), Some("5"));

    let second = store.set("blur", "6").unwrap();
    assert_eq!(second.old.as_deref(), Some("5"));
    assert_eq!(second.new.as_deref(), Some("6"));
}

#[test]
fn identical_value_produces_no_change() {
    let mut store = AttributeStore::new();
    assert!(store.set_attr(AttrName::FontSize, "80px").is_some());
    assert!(store.set_attr(AttrName::FontSize, "80px").is_none());
}

#[test]
fn removing_unset_attribute_produces_no_change() {
    let mut store = AttributeStore::new();
    assert!(store.remove_attr(AttrName::Blur).is_none());
    store.set_attr(AttrName::Blur, "3");
    let change = store.remove_attr(AttrName::Blur).unwrap();
    assert_eq!(change.old.as_deref(), Some("3"));
    assert_eq!(change.new, None);
}

#[test]
fn unobserved_names_are_stored_but_silent() {
    let mut store = AttributeStore::new();
    assert!(store.set("id", "demo").is_none());
    assert_eq!(store.get("id"), Some("demo"));
    assert!(store.remove("id").is_none());
    assert_eq!(store.get("id"), None);
}

#[test]
fn empty_values_fall_back_to_defaults() {
    let mut store = AttributeStore::new();
    store.set_attr(AttrName::FontFamily, "");
    assert_eq!(store.get_attr(AttrName::FontFamily), Some(""));
    assert_eq!(store.get_or_default(AttrName::FontFamily), Some("sans-serif"));
    assert_eq!(store.get_or_default(AttrName::ImageSrc), None);
}
