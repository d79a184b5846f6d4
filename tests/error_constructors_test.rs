use goecharger::error::ChargerError;

#[test]
fn error_constructors_group_1() {
    assert!(matches!(
        ChargerError::config("x"),
        ChargerError::Config { .. }
    ));
    assert!(matches!(
        ChargerError::validation("f", "m"),
        ChargerError::Validation { .. }
    ));
    assert!(matches!(
        ChargerError::network("x"),
        ChargerError::Network { .. }
    ));
    assert!(matches!(
        ChargerError::unreachable("x"),
        ChargerError::Unreachable { .. }
    ));
}

#[test]
fn error_constructors_group_2() {
    let ser = ChargerError::Serialization {
        message: "s".into(),
    };
    assert!(matches!(ser, ChargerError::Serialization { .. }));
    assert!(matches!(ChargerError::io("x"), ChargerError::Io { .. }));
    assert!(matches!(
        ChargerError::device("{}"),
        ChargerError::Device { .. }
    ));
    assert!(matches!(
        ChargerError::generic("x"),
        ChargerError::Generic { .. }
    ));
}

#[test]
fn device_and_verification_messages() {
    let err = ChargerError::device(r#"{"success":false}"#);
    assert_eq!(err.to_string(), r#"Request failed with: {"success":false}"#);

    let err = ChargerError::verification("amp", "16", "10");
    assert_eq!(
        err.to_string(),
        "Couldn't verify amp, expected value=16, received value=10"
    );
}

#[test]
fn only_unreachable_is_unreachable() {
    assert!(ChargerError::unreachable("x").is_unreachable());
    assert!(!ChargerError::network("x").is_unreachable());
    assert!(!ChargerError::device("x").is_unreachable());
}
