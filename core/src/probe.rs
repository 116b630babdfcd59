//! The central abstraction for per-address probing.
//!
//! High-level modules depend on the [`Prober`] trait rather than on the
//! concrete [`ping::PingProber`], so a concurrent scheduler or a
//! scripted test prober can replace the sequential implementation
//! without touching the session loop or the record shape.

use std::net::Ipv4Addr;

use async_trait::async_trait;
use sweepr_common::network::host::ProbeReport;

pub mod ping;

pub use ping::PingProber;

/// One reachability measurement plus conditional hostname resolution
/// for a single address.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Issues the configured number of echo probes against `addr` and
    /// reduces the replies into a [`ProbeReport`].
    ///
    /// Never fails: a probe command that cannot run at all is encoded
    /// as an Inactive report carrying the error text.
    async fn measure(&self, addr: Ipv4Addr) -> ProbeReport;

    /// Reverse-resolves `addr` to a hostname. Only worth calling for
    /// Active hosts; any resolution failure is `None`.
    async fn resolve_hostname(&self, addr: Ipv4Addr) -> Option<String>;
}
