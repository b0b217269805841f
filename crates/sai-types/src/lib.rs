//! Address types shared by the SAI RPC server and its native driver model.
//!
//! RPC clients send addresses as text; the native driver consumes them as
//! raw network-order bytes. The types in this crate sit between the two:
//!
//! - [`MacAddress`]: 48-bit Ethernet MAC address, parsed from 12 hex digits
//! - [`IpAddress`]: IPv4 or IPv6 address
//! - [`IpPrefix`]: address plus mask, as carried by route entries
//!
//! Parsing is strict. Malformed input is reported as a [`ParseError`]
//! instead of producing a partially decoded address.

mod ip;
mod mac;

pub use ip::{parse_ipv4, parse_ipv6, AddrFamily, IpAddress, IpPrefix};
pub use mac::MacAddress;

/// Common error type for address parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid MAC address format: {0}")]
    InvalidMacAddress(String),

    #[error("invalid IPv4 address format: {0}")]
    InvalidIpv4Address(String),

    #[error("invalid IPv6 address format: {0}")]
    InvalidIpv6Address(String),

    #[error("invalid IP prefix: {0}")]
    InvalidIpPrefix(String),
}
