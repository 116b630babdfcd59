//! Sweep engine: probing, neighbor-cache snapshotting, the per-sweep
//! session loop, aggregation, diagnostics capture, report delivery, and
//! the scheduler that ties one cycle to the next.

pub mod aggregate;
pub mod diagnostics;
pub mod neighbor;
pub mod probe;
pub mod report;
pub mod scheduler;
pub mod session;
