//! Reverse-tree nibble paths under `ip6.arpa.`
//!
//! A path stores nibbles in DNS label order: the most specific (least
//! significant) nibble comes first, so `[1, 0, 2]` is the name
//! `1.0.2.ip6.arpa.` and covers addresses starting with `2` `0` `1`.

use crate::errors::DomainError;
use smallvec::SmallVec;
use std::fmt;
use std::net::Ipv6Addr;
use std::num::IntErrorKind;

/// Number of nibbles in a full IPv6 address.
pub const MAX_DEPTH: usize = 32;

/// Largest accepted prefix size; a /128 has nothing left to walk.
pub const MAX_PREFIX_BITS: u32 = 124;

pub const REVERSE_ZONE: &str = "ip6.arpa.";

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NibblePath {
    nibbles: SmallVec<[u8; MAX_DEPTH]>,
}

impl NibblePath {
    /// The zone apex (`ip6.arpa.` itself), i.e. a /0 prefix.
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a path from nibbles given in label order.
    pub fn from_labels(labels: &[u8]) -> Result<Self, DomainError> {
        if labels.len() > MAX_DEPTH {
            return Err(DomainError::InvalidAddress(format!(
                "{} nibbles exceed the {} nibble address width",
                labels.len(),
                MAX_DEPTH
            )));
        }
        if let Some(bad) = labels.iter().find(|n| **n > 0x0f) {
            return Err(DomainError::InvalidAddress(format!(
                "{} is not a nibble",
                bad
            )));
        }
        Ok(Self {
            nibbles: labels.iter().copied().collect(),
        })
    }

    /// Parse a prefix given as address text plus a size in bits.
    pub fn parse(address: &str, size_bits: Option<u32>) -> Result<Self, DomainError> {
        let size_bits = size_bits.ok_or(DomainError::MissingSize)?;
        let addr = parse_address(address)?;
        Self::sized(addr, i64::from(size_bits))
    }

    /// Parse `address/size` as given on the command line.
    ///
    /// Once a `/` is present the address is checked before the size, so
    /// `zzz/x` is an invalid address rather than a missing size.
    pub fn parse_cidr(prefix: &str) -> Result<Self, DomainError> {
        let Some((address, size)) = prefix.split_once('/') else {
            return Err(DomainError::MissingSize);
        };
        let addr = parse_address(address)?;
        let size_bits = match size.trim().parse::<i64>() {
            Ok(bits) => bits,
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => i64::MAX,
                IntErrorKind::NegOverflow => i64::MIN,
                _ => return Err(DomainError::MissingSize),
            },
        };
        Self::sized(addr, size_bits)
    }

    fn sized(addr: Ipv6Addr, size_bits: i64) -> Result<Self, DomainError> {
        if !(0..=i64::from(MAX_PREFIX_BITS)).contains(&size_bits) || size_bits % 4 != 0 {
            return Err(DomainError::UnalignedSize(size_bits));
        }
        Ok(Self::truncated(addr, (size_bits / 4) as usize))
    }

    /// The full 32-nibble path of an address.
    pub fn from_address(addr: Ipv6Addr) -> Self {
        Self::truncated(addr, MAX_DEPTH)
    }

    fn truncated(addr: Ipv6Addr, depth: usize) -> Self {
        let forward = forward_nibbles(addr);
        Self {
            nibbles: forward[..depth].iter().rev().copied().collect(),
        }
    }

    pub fn depth(&self) -> usize {
        self.nibbles.len()
    }

    pub fn is_leaf(&self) -> bool {
        self.nibbles.len() == MAX_DEPTH
    }

    /// Nibbles in label order (least significant first).
    pub fn labels(&self) -> &[u8] {
        &self.nibbles
    }

    /// One level deeper: `nibble` becomes the new most specific label.
    ///
    /// Returns `None` when the path is already a leaf or `nibble > 15`.
    pub fn child(&self, nibble: u8) -> Option<Self> {
        if self.is_leaf() || nibble > 0x0f {
            return None;
        }
        let mut nibbles = SmallVec::with_capacity(self.nibbles.len() + 1);
        nibbles.push(nibble);
        nibbles.extend_from_slice(&self.nibbles);
        Some(Self { nibbles })
    }

    /// All 16 children in nibble order, empty for a leaf.
    pub fn children(&self) -> impl Iterator<Item = NibblePath> + '_ {
        (0u8..16).filter_map(move |n| self.child(n))
    }

    /// True when `other` lies strictly below this path.
    pub fn is_ancestor_of(&self, other: &NibblePath) -> bool {
        other.depth() > self.depth() && other.nibbles.ends_with(&self.nibbles)
    }

    /// Absolute PTR query name, e.g. `8.b.d.0.1.0.0.2.ip6.arpa.`.
    pub fn to_query_name(&self) -> String {
        let mut name = String::with_capacity(self.nibbles.len() * 2 + REVERSE_ZONE.len());
        for nibble in &self.nibbles {
            name.push(hex_digit(*nibble));
            name.push('.');
        }
        name.push_str(REVERSE_ZONE);
        name
    }

    /// Nibbles most significant first, as they read in the address.
    pub fn to_hex_string(&self) -> String {
        self.nibbles.iter().rev().map(|n| hex_digit(*n)).collect()
    }

    /// Colon-hex text of a full path: eight groups of four digits.
    pub fn render(&self) -> Result<String, DomainError> {
        if !self.is_leaf() {
            return Err(DomainError::IncompletePath(self.depth()));
        }
        let forward = self.to_hex_string();
        let groups: Vec<&str> = (0..MAX_DEPTH)
            .step_by(4)
            .map(|start| &forward[start..start + 4])
            .collect();
        Ok(groups.join(":"))
    }

    /// The address a full path spells out.
    pub fn to_address(&self) -> Result<Ipv6Addr, DomainError> {
        if !self.is_leaf() {
            return Err(DomainError::IncompletePath(self.depth()));
        }
        let value = self
            .nibbles
            .iter()
            .rev()
            .fold(0u128, |acc, n| (acc << 4) | u128::from(*n));
        Ok(Ipv6Addr::from(value))
    }
}

impl fmt::Display for NibblePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_query_name())
    }
}

fn parse_address(address: &str) -> Result<Ipv6Addr, DomainError> {
    address
        .trim()
        .parse()
        .map_err(|_| DomainError::InvalidAddress(address.to_string()))
}

fn forward_nibbles(addr: Ipv6Addr) -> [u8; MAX_DEPTH] {
    let mut out = [0u8; MAX_DEPTH];
    for (i, byte) in addr.octets().iter().enumerate() {
        out[i * 2] = byte >> 4;
        out[i * 2 + 1] = byte & 0x0f;
    }
    out
}

fn hex_digit(nibble: u8) -> char {
    char::from_digit(u32::from(nibble), 16).unwrap_or('?')
}
