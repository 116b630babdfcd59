//! Pure reduction of a sweep's records into active/inactive counts.
//! Informational diagnostics live outside the record list, so they can
//! never leak into the tally.

use sweepr_common::network::host::{HostRecord, HostStatus, SweepTally};

pub fn summarize(records: &[HostRecord]) -> SweepTally {
    records.iter().fold(SweepTally::default(), |mut tally, r| {
        match r.status() {
            HostStatus::Active => tally.active += 1,
            HostStatus::Inactive => tally.inactive += 1,
        }
        tally
    })
}
