use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ScrollyError::validation("x", "y")
            .to_string()
            .contains("data validation error:")
    );
    assert!(
        ScrollyError::target_missing("x")
            .to_string()
            .contains("render target missing:")
    );
    assert!(ScrollyError::config("x").to_string().contains("config error:"));
    assert!(
        ScrollyError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn validation_failure_renders_action_and_hint() {
    let failure = ValidationFailure::new("step 2 has no file path", "add a file path")
        .with_hint("image steps need a file");
    let s = ScrollyError::from(failure.clone()).to_string();
    assert!(s.contains("step 2 has no file path"));
    assert!(s.contains("add a file path"));
    assert!(s.contains("hint: image steps need a file"));

    let err = ScrollyError::DataValidation(failure.clone());
    assert_eq!(err.validation_failure(), Some(&failure));
    assert!(ScrollyError::config("x").validation_failure().is_none());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ScrollyError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
