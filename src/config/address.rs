//! Network endpoint handling
//!
//! Canonicalizes `host:port` endpoint strings and classifies the host
//! component for the API security gate.

use std::net::IpAddr;

/// Canonicalize an endpoint string into `host:port` form.
///
/// A string without a `:` is treated as a bare port and gets a blank host
/// (all interfaces). Anything that already carries a `:` is returned as is;
/// port range checks belong to the network layer.
pub fn normalize_net_addr(addr: &str) -> String {
    if addr.contains(':') {
        addr.to_string()
    } else {
        format!(":{}", addr)
    }
}

/// Host component of a `host:port` endpoint.
///
/// Bracketed IPv6 literals (`[::1]:9980`) are returned without brackets.
/// Input without a port separator is treated as a bare port, so the host is
/// blank.
pub fn split_host(addr: &str) -> &str {
    if let Some(rest) = addr.strip_prefix('[') {
        if let Some(end) = rest.find(']') {
            return &rest[..end];
        }
    }
    match addr.rfind(':') {
        Some(idx) => &addr[..idx],
        None => "",
    }
}

/// Port component of a `host:port` endpoint (everything after the last `:`).
pub fn split_port(addr: &str) -> &str {
    match addr.rfind(':') {
        Some(idx) => &addr[idx + 1..],
        None => addr,
    }
}

/// Security-relevant classification of an endpoint's host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressClass {
    /// Only reachable from the local machine (`localhost`, `127.0.0.0/8`, `::1`,
    /// IPv4-mapped `::ffff:127.0.0.0/104`)
    Loopback,
    /// Empty host: binds every interface
    BlankHost,
    /// Any other hostname or IP
    Public,
}

impl AddressClass {
    /// Classify an endpoint string.
    pub fn of(addr: &str) -> Self {
        let host = split_host(addr);
        if host.is_empty() {
            return AddressClass::BlankHost;
        }
        if host.eq_ignore_ascii_case("localhost") {
            return AddressClass::Loopback;
        }
        match host.parse::<IpAddr>() {
            // IPv4-mapped IPv6 (::ffff:127.0.0.1) is loopback too
            Ok(ip) if ip.to_canonical().is_loopback() => AddressClass::Loopback,
            _ => AddressClass::Public,
        }
    }
}

impl std::fmt::Display for AddressClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AddressClass::Loopback => write!(f, "loopback"),
            AddressClass::BlankHost => write!(f, "blank-host"),
            AddressClass::Public => write!(f, "public"),
        }
    }
}
