//! # Sweep Target Model
//!
//! Defines the subnet specs a sweep is configured with and the single
//! validated primitive that turns them into concrete address sequences.
//!
//! Supported spec formats:
//! * **Base only**: `10.85.193.0` (hosts default to 1-254).
//! * **Base with bounds**: `172.16.50.0:1-199`.

use std::net::Ipv4Addr;
use std::str::FromStr;

use crate::error::ConfigError;

/// Inclusive host-octet bounds within a /24 network.
///
/// `new` is the only way to obtain one, so every subnet goes through the
/// same bounds check and a malformed spec can never silently produce a
/// partial or empty range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HostRange {
    start: u8,
    end: u8,
}

impl HostRange {
    pub fn new(start: u16, end: u16) -> Result<Self, ConfigError> {
        if start == 0 || end > 254 || start > end {
            return Err(ConfigError::InvalidHostRange { start, end });
        }
        Ok(Self {
            start: start as u8,
            end: end as u8,
        })
    }

    pub fn start(&self) -> u8 {
        self.start
    }

    pub fn end(&self) -> u8 {
        self.end
    }

    pub fn host_count(&self) -> usize {
        (self.end - self.start) as usize + 1
    }
}

impl Default for HostRange {
    /// The full usable host space of a /24.
    fn default() -> Self {
        Self { start: 1, end: 254 }
    }
}

/// One configured subnet: a /24 base address plus host-octet bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubnetSpec {
    pub base: Ipv4Addr,
    pub hosts: HostRange,
}

impl SubnetSpec {
    pub fn new(base: Ipv4Addr, hosts: HostRange) -> Self {
        Self { base, hosts }
    }

    /// Iterates the subnet's target addresses in host-octet order.
    pub fn addresses(&self) -> impl Iterator<Item = Ipv4Addr> + '_ {
        let [a, b, c, _] = self.base.octets();
        (self.hosts.start..=self.hosts.end).map(move |d| Ipv4Addr::new(a, b, c, d))
    }
}

impl std::fmt::Display for SubnetSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}-{}",
            self.base,
            self.hosts.start(),
            self.hosts.end()
        )
    }
}

impl FromStr for SubnetSpec {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (base_part, hosts) = match s.split_once(':') {
            Some((base, bounds)) => {
                let (start, end) = bounds
                    .split_once('-')
                    .ok_or_else(|| ConfigError::InvalidSpec(s.to_string()))?;
                let start: u16 = start
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidSpec(s.to_string()))?;
                let end: u16 = end
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidSpec(s.to_string()))?;
                (base, HostRange::new(start, end)?)
            }
            None => (s, HostRange::default()),
        };

        let base: Ipv4Addr = base_part
            .parse()
            .map_err(|_| ConfigError::InvalidSpec(s.to_string()))?;

        Ok(Self::new(base, hosts))
    }
}

/// Expands subnet specs into one ordered, deduplicated target sequence.
///
/// Regenerated from configuration every sweep; never cached across
/// sweeps. Duplicate addresses (overlapping specs) keep their first
/// position.
pub fn expand_targets(specs: &[SubnetSpec]) -> Vec<Ipv4Addr> {
    let mut seen = std::collections::HashSet::new();
    let mut targets = Vec::new();
    for spec in specs {
        for addr in spec.addresses() {
            if seen.insert(addr) {
                targets.push(addr);
            }
        }
    }
    targets
}
