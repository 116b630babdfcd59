use thiserror::Error;

/// A subnet spec that cannot produce a valid address range.
///
/// Fatal to that subnet's range generation only; the sweep carries on
/// with the remaining subnets.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid subnet spec '{0}'")]
    InvalidSpec(String),
    #[error("host octet range {start}-{end} is out of bounds (expected 1 <= start <= end <= 254)")]
    InvalidHostRange { start: u16, end: u16 },
    #[error("no valid subnet ranges configured")]
    NoValidRanges,
}

/// The probe command could not be invoked at all.
///
/// Downgrades the address to Inactive with the error text carried in
/// the record; never aborts a session.
#[derive(Error, Debug)]
#[error("probe command failed to start: {source}")]
pub struct ProbeError {
    #[from]
    pub source: std::io::Error,
}
