//! CIDR network blocks.
//!
//! Parsing follows the usual `<address>/<prefix>` notation. Host bits are
//! allowed in the address and are masked off, so `10.0.0.7/24` denotes the
//! `10.0.0.0/24` block. IPv4-mapped IPv6 blocks (`::ffff:10.0.0.0/104`)
//! are treated as the IPv4 block they map.

use std::fmt;
use std::net::IpAddr;

/// Prefix length of the `::ffff:0:0/96` IPv4-mapped range.
const MAPPED_PREFIX: u8 = 96;

/// A parsed network block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cidr {
    network: IpAddr,
    prefix: u8,
}

/// Error returned when a string is not a CIDR block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CidrParseError {
    input: String,
}

impl fmt::Display for CidrParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid CIDR address: {}", self.input)
    }
}

impl std::error::Error for CidrParseError {}

impl Cidr {
    /// Parse `<address>/<prefix>`.
    pub fn parse(input: &str) -> Result<Self, CidrParseError> {
        let err = || CidrParseError {
            input: input.to_string(),
        };

        let (addr, prefix) = input.split_once('/').ok_or_else(err)?;
        if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }
        let addr: IpAddr = addr.parse().map_err(|_| err())?;
        let prefix: u8 = prefix.parse().map_err(|_| err())?;
        if prefix > width(&addr) {
            return Err(err());
        }
        let (addr, prefix) = match addr {
            IpAddr::V6(v6) if prefix >= MAPPED_PREFIX => match v6.to_ipv4_mapped() {
                Some(v4) => (IpAddr::V4(v4), prefix - MAPPED_PREFIX),
                None => (addr, prefix),
            },
            _ => (addr, prefix),
        };

        Ok(Self {
            network: mask(addr, prefix),
            prefix,
        })
    }

    /// Network address with host bits cleared.
    pub fn network(&self) -> IpAddr {
        self.network
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    /// Whether `ip` lies inside this block.
    pub fn contains(&self, ip: IpAddr) -> bool {
        let ip = match ip {
            IpAddr::V6(v6) => v6.to_ipv4_mapped().map_or(ip, IpAddr::V4),
            IpAddr::V4(_) => ip,
        };
        if self.network.is_ipv4() != ip.is_ipv4() {
            return false;
        }
        mask(ip, self.prefix) == self.network
    }

    /// Whether the two blocks share at least one address.
    ///
    /// Blocks of different address families never overlap.
    pub fn overlaps(&self, other: &Cidr) -> bool {
        self.contains(other.network) || other.contains(self.network)
    }
}

impl fmt::Display for Cidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network, self.prefix)
    }
}

impl std::str::FromStr for Cidr {
    type Err = CidrParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Cidr::parse(s)
    }
}

fn width(addr: &IpAddr) -> u8 {
    match addr {
        IpAddr::V4(_) => 32,
        IpAddr::V6(_) => 128,
    }
}

fn mask(addr: IpAddr, prefix: u8) -> IpAddr {
    match addr {
        IpAddr::V4(v4) => {
            let bits = u32::from(v4);
            let keep = u32::MAX.checked_shl(32 - u32::from(prefix)).unwrap_or(0);
            IpAddr::V4((bits & keep).into())
        }
        IpAddr::V6(v6) => {
            let bits = u128::from(v6);
            let keep = u128::MAX.checked_shl(128 - u32::from(prefix)).unwrap_or(0);
            IpAddr::V6((bits & keep).into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cidr(s: &str) -> Cidr {
        Cidr::parse(s).unwrap()
    }

    #[test]
    fn test_parse_ipv4() {
        let c = cidr("10.250.0.0/16");
        assert_eq!(c.prefix(), 16);
        assert_eq!(c.to_string(), "10.250.0.0/16");
    }

    #[test]
    fn test_parse_masks_host_bits() {
        assert_eq!(cidr("10.0.0.7/24").to_string(), "10.0.0.0/24");
        assert_eq!(cidr("2001:db8::1/32").to_string(), "2001:db8::/32");
    }

    #[test]
    fn test_parse_zero_and_full_prefix() {
        assert_eq!(cidr("1.2.3.4/0").to_string(), "0.0.0.0/0");
        assert_eq!(cidr("1.2.3.4/32").to_string(), "1.2.3.4/32");
        assert_eq!(cidr("::1/128").to_string(), "::1/128");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in [
            "",
            "10.0.0.0",
            "10.0.0.0/",
            "10.0.0.0/33",
            "10.0.0.0/+8",
            "10.0.0.0/-1",
            "10.0.0/8",
            "foo/8",
            "::/129",
            "10.0.0.0/8/8",
        ] {
            assert!(Cidr::parse(bad).is_err(), "expected {:?} to fail", bad);
        }
    }

    #[test]
    fn test_parse_error_message() {
        let err = Cidr::parse("garbage").unwrap_err();
        assert_eq!(err.to_string(), "invalid CIDR address: garbage");
    }

    #[test]
    fn test_overlaps() {
        assert!(cidr("10.0.0.0/8").overlaps(&cidr("10.1.0.0/16")));
        assert!(cidr("10.1.0.0/16").overlaps(&cidr("10.0.0.0/8")));
        assert!(cidr("10.0.0.0/24").overlaps(&cidr("10.0.0.0/24")));
        assert!(!cidr("10.0.0.0/24").overlaps(&cidr("10.0.1.0/24")));
        assert!(cidr("0.0.0.0/0").overlaps(&cidr("192.168.0.0/16")));
    }

    #[test]
    fn test_families_never_overlap() {
        assert!(!cidr("0.0.0.0/0").overlaps(&cidr("::/0")));
        assert!(!cidr("::/0").contains("10.0.0.1".parse().unwrap()));
    }

    #[test]
    fn test_ipv4_mapped_block_is_ipv4() {
        let mapped = cidr("::ffff:10.0.0.0/104");
        assert_eq!(mapped.to_string(), "10.0.0.0/8");
        assert!(mapped.overlaps(&cidr("10.1.0.0/16")));
        assert!(cidr("10.0.0.0/8").contains("::ffff:10.2.3.4".parse().unwrap()));
        assert!(!cidr("::ffff:10.0.0.0/104").overlaps(&cidr("11.0.0.0/8")));
    }
}
