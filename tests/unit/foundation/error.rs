use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        BoothError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(BoothError::asset("x").to_string().contains("asset error:"));
    assert!(
        BoothError::device("x")
            .to_string()
            .contains("device error:")
    );
    assert!(
        BoothError::encode("x")
            .to_string()
            .contains("encode error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = BoothError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn only_asset_and_device_errors_are_fatal() {
    assert!(BoothError::asset("hat").is_fatal());
    assert!(BoothError::device("/dev/video0").is_fatal());
    assert!(!BoothError::validation("x").is_fatal());
    assert!(!BoothError::encode("x").is_fatal());
}
