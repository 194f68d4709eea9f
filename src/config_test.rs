use super::*;

// =============================================================
// PORT
// =============================================================

#[test]
fn parse_port_defaults_when_unset_or_blank() {
    assert_eq!(parse_port(None), Ok(DEFAULT_PORT));
    assert_eq!(parse_port(Some("  ")), Ok(DEFAULT_PORT));
}

#[test]
fn parse_port_accepts_valid_ports() {
    assert_eq!(parse_port(Some("8080")), Ok(8080));
    assert_eq!(parse_port(Some(" 443 ")), Ok(443));
}

#[test]
fn parse_port_rejects_garbage_and_zero() {
    assert_eq!(parse_port(Some("http")), Err(ConfigError::InvalidPort("http".into())));
    assert_eq!(parse_port(Some("70000")), Err(ConfigError::InvalidPort("70000".into())));
    assert_eq!(parse_port(Some("0")), Err(ConfigError::InvalidPort("0".into())));
}

#[test]
fn invalid_port_message_names_the_value() {
    let err = parse_port(Some("abc")).unwrap_err();
    assert!(err.to_string().contains("'abc'"));
}

// =============================================================
// QRING_SITE_ROOT
// =============================================================

#[test]
fn parse_site_root_ignores_blank() {
    assert_eq!(parse_site_root(None), None);
    assert_eq!(parse_site_root(Some("")), None);
}

#[test]
fn parse_site_root_keeps_path() {
    assert_eq!(parse_site_root(Some("/srv/qring")), Some(PathBuf::from("/srv/qring")));
}
