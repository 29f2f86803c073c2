use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CarnetError::invalid_file_type("x")
            .to_string()
            .contains("invalid file type:")
    );
    assert!(CarnetError::decode("x").to_string().contains("decode error:"));
    assert!(CarnetError::read("x").to_string().contains("read error:"));
    assert!(CarnetError::export("x").to_string().contains("export error:"));
    assert!(
        CarnetError::validation("x")
            .to_string()
            .contains("validation error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CarnetError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
