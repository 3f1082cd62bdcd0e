use thiserror::Error;

pub mod canonical;
pub mod cidr;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IpError {
    #[error("Couldn't parse '{}' as an IP address!", .0)]
    InvalidAddress(String),
    #[error("'{value}' is not in canonical form (expected '{canonical}')!")]
    NotCanonical { value: String, canonical: String },
    #[error("Couldn't parse '{}' as an IPv4 CIDR!", .0)]
    InvalidIpv4Cidr(String),
    #[error("Couldn't parse '{}' as an IPv6 CIDR!", .0)]
    InvalidIpv6Cidr(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpFamily {
    Ipv4,
    Ipv6,
}

impl IpFamily {
    pub fn address_bits(&self) -> u8 {
        match self {
            IpFamily::Ipv4 => 32,
            IpFamily::Ipv6 => 128,
        }
    }
}
