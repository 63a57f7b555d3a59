//! API security gate tests
//!
//! Loopback is accepted whatever the flags, a blank host is always rejected,
//! and a public host needs both --disable-api-security and authentication.

use turtledexd::config::DaemonConfig;
use turtledexd::startup::{verify_api_security, SecurityRule};

fn api_config(api_addr: &str, allow_api_bind: bool, authenticate_api: bool) -> DaemonConfig {
    DaemonConfig {
        api_addr: api_addr.to_string(),
        allow_api_bind,
        authenticate_api,
        ..Default::default()
    }
}

#[test]
fn test_loopback_accepted() {
    let config = api_config("127.0.0.1:9980", false, false);
    assert!(verify_api_security(&config).is_ok(), "loopback + securityOn was rejected");
}

#[test]
fn test_localhost_and_ipv6_loopback_accepted() {
    assert!(verify_api_security(&api_config("localhost:9980", false, false)).is_ok());
    assert!(verify_api_security(&api_config("[::1]:9980", false, false)).is_ok());
}

#[test]
fn test_ipv4_mapped_loopback_accepted() {
    let config = api_config("[::ffff:127.0.0.1]:9980", false, false);
    assert!(verify_api_security(&config).is_ok());
}

#[test]
fn test_blank_host_rejected() {
    let err = verify_api_security(&api_config(":9980", false, false)).unwrap_err();
    assert_eq!(err.rule, SecurityRule::BlankHost);
}

#[test]
fn test_blank_host_rejected_even_with_bind_and_auth() {
    let err = verify_api_security(&api_config(":9980", true, true)).unwrap_err();
    assert_eq!(err.rule, SecurityRule::BlankHost);
}

#[test]
fn test_public_rejected_without_bind_opt_in() {
    let err = verify_api_security(&api_config("example.com:9980", false, true)).unwrap_err();
    assert_eq!(err.rule, SecurityRule::BindNotAllowed);
}

#[test]
fn test_public_rejected_without_authentication() {
    let err = verify_api_security(&api_config("example.com:9980", true, false)).unwrap_err();
    assert_eq!(err.rule, SecurityRule::Unauthenticated);
}

#[test]
fn test_public_accepted_with_bind_and_authentication() {
    let config = api_config("example.com:9980", true, true);
    assert!(
        verify_api_security(&config).is_ok(),
        "public + securityOff with authentication was rejected"
    );
}

#[test]
fn test_wildcard_ip_is_public() {
    let err = verify_api_security(&api_config("0.0.0.0:9980", false, true)).unwrap_err();
    assert_eq!(err.rule, SecurityRule::BindNotAllowed);
}
