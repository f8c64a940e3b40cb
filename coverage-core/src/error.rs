use thiserror::Error;

/// Errors reported at the core's boundary (spec §7: configuration and
/// encoding errors; programmer errors and allocation failures are not
/// representable here and panic instead).
#[derive(Debug, Error)]
pub enum CoverageError {
    #[error("radius {0} is out of range [0, 64]")]
    InvalidRadius(u32),

    #[error("hash matrix has {bits} cells, expected exactly 64")]
    InvalidHashShape { bits: usize },
}
