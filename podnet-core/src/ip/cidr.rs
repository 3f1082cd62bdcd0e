use ipnet::{Ipv4Net, Ipv6Net};

use super::{IpError, IpFamily};

pub fn parse_ipv4_cidr(value: &str) -> Result<Ipv4Net, IpError> {
    value
        .parse::<Ipv4Net>()
        .map_err(|_| IpError::InvalidIpv4Cidr(value.to_owned()))
}

pub fn parse_ipv6_cidr(value: &str) -> Result<Ipv6Net, IpError> {
    value
        .parse::<Ipv6Net>()
        .map_err(|_| IpError::InvalidIpv6Cidr(value.to_owned()))
}

/// Prefix length of a single node's block when `per_node_host_bits` bits are
/// left for hosts, e.g. 8 host bits gives a /24 for IPv4 and a /120 for IPv6.
pub fn node_prefix_len(family: IpFamily, per_node_host_bits: i32) -> Option<u8> {
    let bits = u8::try_from(per_node_host_bits).ok()?;

    family.address_bits().checked_sub(bits)
}
