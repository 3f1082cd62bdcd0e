use std::net::IpAddr;

use super::IpError;

/// Parses an IP address that must already be written in its canonical form:
/// dotted decimal without leading zeros for IPv4 and RFC 5952 for IPv6.
pub fn parse_canonical_ip(value: &str) -> Result<IpAddr, IpError> {
    let ip = value
        .parse::<IpAddr>()
        .map_err(|_| IpError::InvalidAddress(value.to_owned()))?;
    let canonical = ip.to_string();

    if canonical != value {
        return Err(IpError::NotCanonical {
            value: value.to_owned(),
            canonical,
        });
    }

    Ok(ip)
}
