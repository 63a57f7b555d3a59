//! API bind policy
//!
//! Decides whether the API endpoint may be exposed given the bind and
//! authentication flags. Rules, in precedence order:
//!
//! | address    | allow_api_bind | authenticate_api | result                   |
//! |------------|----------------|------------------|--------------------------|
//! | loopback   | any            | any              | allow                    |
//! | blank host | any            | any              | reject `BlankHost`       |
//! | public     | false          | any              | reject `BindNotAllowed`  |
//! | public     | true           | false            | reject `Unauthenticated` |
//! | public     | true           | true             | allow                    |

use thiserror::Error;

use crate::config::{split_port, AddressClass, DaemonConfig};

/// Policy rule that rejected an API address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecurityRule {
    /// Empty host listens on every interface
    BlankHost,
    /// Non-loopback bind without `allow_api_bind`
    BindNotAllowed,
    /// Non-loopback bind without API authentication
    Unauthenticated,
}

impl std::fmt::Display for SecurityRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecurityRule::BlankHost => {
                write!(f, "a blank host will listen on all interfaces")
            }
            SecurityRule::BindNotAllowed => write!(
                f,
                "binding the API to a non-localhost address requires --disable-api-security"
            ),
            SecurityRule::Unauthenticated => write!(
                f,
                "cannot use --disable-api-security without API authentication"
            ),
        }
    }
}

/// API address rejected by the bind policy
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("insecure API address {address:?}: {rule}{}", hint(.rule, .address))]
pub struct InsecureConfigurationError {
    pub rule: SecurityRule,
    pub address: String,
}

fn hint(rule: &SecurityRule, address: &str) -> String {
    match rule {
        SecurityRule::BlankHost => format!(", did you mean localhost:{}?", split_port(address)),
        _ => String::new(),
    }
}

/// Apply the bind policy to a classified address.
pub fn evaluate(
    class: AddressClass,
    allow_api_bind: bool,
    authenticate_api: bool,
) -> Result<(), SecurityRule> {
    match (class, allow_api_bind, authenticate_api) {
        (AddressClass::Loopback, _, _) => Ok(()),
        (AddressClass::BlankHost, _, _) => Err(SecurityRule::BlankHost),
        (AddressClass::Public, false, _) => Err(SecurityRule::BindNotAllowed),
        (AddressClass::Public, true, false) => Err(SecurityRule::Unauthenticated),
        (AddressClass::Public, true, true) => Ok(()),
    }
}

/// Reject API address / authentication combinations that expose the API.
pub fn verify_api_security(config: &DaemonConfig) -> Result<(), InsecureConfigurationError> {
    let class = AddressClass::of(&config.api_addr);
    evaluate(class, config.allow_api_bind, config.authenticate_api).map_err(|rule| {
        InsecureConfigurationError {
            rule,
            address: config.api_addr.clone(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loopback_always_allowed() {
        for allow in [false, true] {
            for auth in [false, true] {
                assert_eq!(evaluate(AddressClass::Loopback, allow, auth), Ok(()));
            }
        }
    }

    #[test]
    fn test_blank_host_always_rejected() {
        for allow in [false, true] {
            for auth in [false, true] {
                assert_eq!(
                    evaluate(AddressClass::BlankHost, allow, auth),
                    Err(SecurityRule::BlankHost)
                );
            }
        }
    }

    #[test]
    fn test_public_rules() {
        assert_eq!(
            evaluate(AddressClass::Public, false, false),
            Err(SecurityRule::BindNotAllowed)
        );
        assert_eq!(
            evaluate(AddressClass::Public, false, true),
            Err(SecurityRule::BindNotAllowed)
        );
        assert_eq!(
            evaluate(AddressClass::Public, true, false),
            Err(SecurityRule::Unauthenticated)
        );
        assert_eq!(evaluate(AddressClass::Public, true, true), Ok(()));
    }

    #[test]
    fn test_blank_host_message_suggests_localhost() {
        let config = DaemonConfig {
            api_addr: ":9980".to_string(),
            ..Default::default()
        };
        let err = verify_api_security(&config).unwrap_err();
        assert_eq!(err.rule, SecurityRule::BlankHost);
        assert!(err.to_string().contains("did you mean localhost:9980?"));
    }

    #[test]
    fn test_error_carries_address() {
        let config = DaemonConfig {
            api_addr: "example.com:9980".to_string(),
            allow_api_bind: false,
            ..Default::default()
        };
        let err = verify_api_security(&config).unwrap_err();
        assert_eq!(err.address, "example.com:9980");
        assert_eq!(err.rule, SecurityRule::BindNotAllowed);
        assert!(err.to_string().contains("example.com:9980"));
    }
}
