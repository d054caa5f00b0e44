use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(FolioError::config("x").to_string().contains("config error:"));
    assert!(
        FolioError::animation("x")
            .to_string()
            .contains("animation error:")
    );
    assert!(
        FolioError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("disk gone");
    let err = FolioError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("disk gone"));
}
