use super::*;

#[test]
fn medium_parse_is_case_insensitive() {
    assert_eq!(Medium::parse(" Image ").unwrap(), Medium::Image);
    assert_eq!(Medium::parse("MAP").unwrap(), Medium::Map);
    assert_eq!(Medium::parse("video").unwrap(), Medium::Video);
    assert!(Medium::parse("audio").is_err());
}

#[test]
fn medium_serde_uses_lowercase_tags() {
    let s = serde_json::to_string(&Medium::Map).unwrap();
    assert_eq!(s, "\"map\"");
    let m: Medium = serde_json::from_str("\"video\"").unwrap();
    assert_eq!(m, Medium::Video);
}

#[test]
fn visible_display_matches_container_kind() {
    assert_eq!(Medium::Image.visible_display(), Display::Flex);
    assert_eq!(Medium::Map.visible_display(), Display::Block);
    assert_eq!(Medium::Video.visible_display(), Display::Block);
    assert!(!Display::None.is_visible());
}

#[test]
fn step_index_rejects_zero() {
    assert!(StepIndex::new(0).is_err());
    assert_eq!(StepIndex::new(3).unwrap(), StepIndex(3));
}

#[test]
fn millis_saturates() {
    assert_eq!(Millis(u64::MAX).saturating_add(Millis(1)), Millis(u64::MAX));
    assert_eq!(Millis::ZERO.saturating_add(Millis(500)), Millis(500));
}
