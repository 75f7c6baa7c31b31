use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ThumbkitError::allocation("x")
            .to_string()
            .contains("allocation error:")
    );
    assert!(ThumbkitError::font("x").to_string().contains("font error:"));
    assert!(
        ThumbkitError::raster("x")
            .to_string()
            .contains("raster error:")
    );
    assert!(
        ThumbkitError::decode("x")
            .to_string()
            .contains("decode error:")
    );
    assert!(
        ThumbkitError::encode("x")
            .to_string()
            .contains("encode error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ThumbkitError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
