#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use prpulse_service::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
server:
  listen: "0.0.0.0:8080"
reminders:
  check_intervall_ms: 60000 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn ok_minimal_config() {
    let ok = r#"
version: 1
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.listen, "0.0.0.0:8080");
    assert_eq!(cfg.github.api_base, "https://api.github.com");
    assert_eq!(cfg.reminders.check_interval_ms, 3_600_000);
    assert_eq!(cfg.reminders.stale_after_ms, 86_400_000);
}

#[test]
fn rejects_out_of_range_reminder_interval() {
    let bad = r#"
version: 1
reminders:
  check_interval_ms: 1000
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn rejects_stale_after_not_exceeding_interval() {
    let bad = r#"
version: 1
reminders:
  check_interval_ms: 3600000
  stale_after_ms: 3600000
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn rejects_wrong_version_and_bad_api_base() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");

    let bad = r#"
version: 1
github:
  api_base: "ftp://example.com"
"#;
    assert!(config::load_from_str(bad).is_err());
}
