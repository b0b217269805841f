//! MAC address type with wire-format parsing and canonical formatting.

use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A 48-bit Ethernet MAC address.
///
/// On the wire a MAC is 12 hex digits, optionally grouped with `:`, `-`
/// or `.` separators. Hex digits are case-insensitive. The canonical text
/// form is lowercase and colon-separated.
///
/// # Examples
///
/// ```
/// use sai_types::MacAddress;
///
/// let mac: MacAddress = "00:11:22:AA:BB:CC".parse().unwrap();
/// assert_eq!(mac.to_string(), "00:11:22:aa:bb:cc");
///
/// let bare: MacAddress = "001122aabbcc".parse().unwrap();
/// assert_eq!(mac, bare);
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct MacAddress([u8; 6]);

impl MacAddress {
    /// The broadcast MAC address (ff:ff:ff:ff:ff:ff).
    pub const BROADCAST: MacAddress = MacAddress([0xff; 6]);

    /// The all-zero MAC address.
    pub const ZERO: MacAddress = MacAddress([0; 6]);

    /// Creates a new MAC address from raw bytes.
    pub const fn new(bytes: [u8; 6]) -> Self {
        MacAddress(bytes)
    }

    /// Returns the raw bytes of the MAC address.
    pub const fn as_bytes(&self) -> &[u8; 6] {
        &self.0
    }

    pub const fn is_zero(&self) -> bool {
        let b = &self.0;
        b[0] == 0 && b[1] == 0 && b[2] == 0 && b[3] == 0 && b[4] == 0 && b[5] == 0
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            self.0[0], self.0[1], self.0[2], self.0[3], self.0[4], self.0[5]
        )
    }
}

impl FromStr for MacAddress {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseError::InvalidMacAddress(s.to_string());

        let mut bytes = [0u8; 6];
        let mut nibbles = 0usize;
        for c in s.chars() {
            if matches!(c, ':' | '-' | '.') {
                continue;
            }
            let digit = c.to_digit(16).ok_or_else(invalid)?;
            if nibbles == 12 {
                return Err(invalid());
            }
            // Digits arrive high nibble first.
            let byte = &mut bytes[nibbles / 2];
            *byte = (*byte << 4) | digit as u8;
            nibbles += 1;
        }

        if nibbles != 12 {
            return Err(invalid());
        }
        Ok(MacAddress(bytes))
    }
}

impl TryFrom<String> for MacAddress {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<MacAddress> for String {
    fn from(mac: MacAddress) -> String {
        mac.to_string()
    }
}

impl From<[u8; 6]> for MacAddress {
    fn from(bytes: [u8; 6]) -> Self {
        MacAddress(bytes)
    }
}

impl From<MacAddress> for [u8; 6] {
    fn from(mac: MacAddress) -> [u8; 6] {
        mac.0
    }
}
