//! IP address and prefix types with strict text parsing.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

/// Parses a dotted-decimal IPv4 address.
///
/// Exactly four decimal octets in `0..=255` are accepted. Anything else is
/// an error; no partial address is ever produced.
pub fn parse_ipv4(s: &str) -> Result<Ipv4Addr, ParseError> {
    s.trim()
        .parse::<Ipv4Addr>()
        .map_err(|_| ParseError::InvalidIpv4Address(s.to_string()))
}

/// Parses a colon-hex IPv6 address in any of the standard textual forms.
pub fn parse_ipv6(s: &str) -> Result<Ipv6Addr, ParseError> {
    s.trim()
        .parse::<Ipv6Addr>()
        .map_err(|_| ParseError::InvalidIpv6Address(s.to_string()))
}

/// Address family tag carried next to textual addresses on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddrFamily {
    Ipv4,
    Ipv6,
}

impl AddrFamily {
    /// Parses `s` as an address of this family.
    pub fn parse(self, s: &str) -> Result<IpAddress, ParseError> {
        match self {
            AddrFamily::Ipv4 => parse_ipv4(s).map(IpAddress::V4),
            AddrFamily::Ipv6 => parse_ipv6(s).map(IpAddress::V6),
        }
    }
}

/// An IPv4 or IPv6 address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IpAddress {
    V4(Ipv4Addr),
    V6(Ipv6Addr),
}

impl IpAddress {
    pub const fn family(&self) -> AddrFamily {
        match self {
            IpAddress::V4(_) => AddrFamily::Ipv4,
            IpAddress::V6(_) => AddrFamily::Ipv6,
        }
    }

    pub const fn is_ipv4(&self) -> bool {
        matches!(self, IpAddress::V4(_))
    }

    /// Number of address bits for this family.
    const fn width(&self) -> u8 {
        match self {
            IpAddress::V4(_) => 32,
            IpAddress::V6(_) => 128,
        }
    }

    fn to_bits(self) -> u128 {
        match self {
            IpAddress::V4(a) => u128::from(u32::from(a)),
            IpAddress::V6(a) => u128::from(a),
        }
    }

    fn from_bits(family: AddrFamily, bits: u128) -> Self {
        match family {
            // Only the low 32 bits are ever set for a v4 mask.
            AddrFamily::Ipv4 => IpAddress::V4(Ipv4Addr::from((bits & 0xffff_ffff) as u32)),
            AddrFamily::Ipv6 => IpAddress::V6(Ipv6Addr::from(bits)),
        }
    }
}

impl fmt::Display for IpAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpAddress::V4(a) => a.fmt(f),
            IpAddress::V6(a) => a.fmt(f),
        }
    }
}

impl FromStr for IpAddress {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.contains(':') {
            AddrFamily::Ipv6.parse(s)
        } else {
            AddrFamily::Ipv4.parse(s)
        }
    }
}

impl From<Ipv4Addr> for IpAddress {
    fn from(addr: Ipv4Addr) -> Self {
        IpAddress::V4(addr)
    }
}

impl From<Ipv6Addr> for IpAddress {
    fn from(addr: Ipv6Addr) -> Self {
        IpAddress::V6(addr)
    }
}

/// An IP prefix stored the way the native driver wants it: an address and
/// a mask of the same family.
///
/// # Examples
///
/// ```
/// use sai_types::IpPrefix;
///
/// let prefix: IpPrefix = "10.0.0.0/8".parse().unwrap();
/// assert_eq!(prefix.mask().to_string(), "255.0.0.0");
/// assert_eq!(prefix.prefix_len(), Some(8));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IpPrefix {
    addr: IpAddress,
    mask: IpAddress,
}

impl IpPrefix {
    /// Creates a prefix from an address and a mask.
    ///
    /// Both must belong to the same family.
    pub fn new(addr: IpAddress, mask: IpAddress) -> Result<Self, ParseError> {
        if addr.family() != mask.family() {
            return Err(ParseError::InvalidIpPrefix(format!(
                "address {} and mask {} differ in family",
                addr, mask
            )));
        }
        Ok(IpPrefix { addr, mask })
    }

    /// Creates a prefix from an address and a prefix length.
    pub fn from_len(addr: IpAddress, prefix_len: u8) -> Result<Self, ParseError> {
        let width = addr.width();
        if prefix_len > width {
            return Err(ParseError::InvalidIpPrefix(format!(
                "prefix length {} exceeds {} for {}",
                prefix_len, width, addr
            )));
        }
        let bits = match prefix_len {
            0 => 0,
            len => (u128::MAX << (128 - u32::from(len))) >> (128 - u32::from(width)),
        };
        Ok(IpPrefix {
            addr,
            mask: IpAddress::from_bits(addr.family(), bits),
        })
    }

    pub const fn addr(&self) -> &IpAddress {
        &self.addr
    }

    pub const fn mask(&self) -> &IpAddress {
        &self.mask
    }

    pub const fn family(&self) -> AddrFamily {
        self.addr.family()
    }

    /// Returns the prefix length, or `None` when the mask is not contiguous.
    pub fn prefix_len(&self) -> Option<u8> {
        let width = u32::from(self.mask.width());
        let bits = self.mask.to_bits() << (128 - width);
        let ones = bits.leading_ones();
        if bits.checked_shl(ones).unwrap_or(0) != 0 {
            return None;
        }
        u8::try_from(ones).ok()
    }
}

impl fmt::Display for IpPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.prefix_len() {
            Some(len) => write!(f, "{}/{}", self.addr, len),
            None => write!(f, "{}/{}", self.addr, self.mask),
        }
    }
}

impl FromStr for IpPrefix {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (addr, len) = s
            .split_once('/')
            .ok_or_else(|| ParseError::InvalidIpPrefix(s.to_string()))?;
        let addr: IpAddress = addr.parse()?;
        let len: u8 = len
            .parse()
            .map_err(|_| ParseError::InvalidIpPrefix(s.to_string()))?;
        IpPrefix::from_len(addr, len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ipv4_parse_boundaries() {
        assert_eq!(parse_ipv4("0.0.0.0").unwrap(), Ipv4Addr::UNSPECIFIED);
        assert_eq!(parse_ipv4("255.255.255.255").unwrap(), Ipv4Addr::BROADCAST);
        assert_eq!(parse_ipv4("10.0.0.1").unwrap().octets(), [10, 0, 0, 1]);
    }

    #[test]
    fn test_ipv4_rejects_malformed_input() {
        for bad in ["", "10.0.0", "10.0.0.256", "10.0.0.1.2", "a.b.c.d", "10..0.1"] {
            assert_eq!(
                parse_ipv4(bad),
                Err(ParseError::InvalidIpv4Address(bad.to_string())),
                "{bad}"
            );
        }
    }

    #[test]
    fn test_ipv6_parse() {
        let addr = parse_ipv6("2001:db8::1").unwrap();
        assert_eq!(addr.segments(), [0x2001, 0xdb8, 0, 0, 0, 0, 0, 1]);
        assert!(parse_ipv6("2001:db8::zz").is_err());
    }

    #[test]
    fn test_ip_address_discrimination() {
        let v4: IpAddress = "192.168.1.1".parse().unwrap();
        assert!(v4.is_ipv4());
        assert_eq!(v4.family(), AddrFamily::Ipv4);

        let v6: IpAddress = "fe80::1".parse().unwrap();
        assert_eq!(v6.family(), AddrFamily::Ipv6);
    }

    #[test]
    fn test_family_parse_checks_family() {
        assert!(AddrFamily::Ipv4.parse("fe80::1").is_err());
        assert!(AddrFamily::Ipv6.parse("10.0.0.1").is_err());
    }

    #[test]
    fn test_prefix_from_len() {
        let prefix: IpPrefix = "192.168.0.0/16".parse().unwrap();
        assert_eq!(prefix.mask().to_string(), "255.255.0.0");
        assert_eq!(prefix.prefix_len(), Some(16));
        assert_eq!(prefix.to_string(), "192.168.0.0/16");

        let default: IpPrefix = "0.0.0.0/0".parse().unwrap();
        assert_eq!(default.mask().to_string(), "0.0.0.0");
        assert_eq!(default.prefix_len(), Some(0));

        let host: IpPrefix = "10.1.1.1/32".parse().unwrap();
        assert_eq!(host.mask().to_string(), "255.255.255.255");
    }

    #[test]
    fn test_prefix_v6() {
        let prefix: IpPrefix = "2001:db8::/64".parse().unwrap();
        assert_eq!(prefix.mask().to_string(), "ffff:ffff:ffff:ffff::");
        assert_eq!(prefix.prefix_len(), Some(64));

        let full: IpPrefix = "::1/128".parse().unwrap();
        assert_eq!(full.prefix_len(), Some(128));
    }

    #[test]
    fn test_prefix_rejects_bad_input() {
        assert!("10.0.0.0/33".parse::<IpPrefix>().is_err());
        assert!("10.0.0.0".parse::<IpPrefix>().is_err());
        assert!("10.0.0.0/x".parse::<IpPrefix>().is_err());

        let v4: IpAddress = "10.0.0.0".parse().unwrap();
        let v6: IpAddress = "ffff::".parse().unwrap();
        assert!(IpPrefix::new(v4, v6).is_err());
    }

    #[test]
    fn test_non_contiguous_mask() {
        let addr: IpAddress = "10.0.0.0".parse().unwrap();
        let mask: IpAddress = "255.0.255.0".parse().unwrap();
        let prefix = IpPrefix::new(addr, mask).unwrap();
        assert_eq!(prefix.prefix_len(), None);
        assert_eq!(prefix.to_string(), "10.0.0.0/255.0.255.0");
    }
}
