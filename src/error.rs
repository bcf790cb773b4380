use thiserror::Error;

/// Rejected bucket count, from construction or `resize_table`.
#[derive(Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum CapacityError {
    /// The requested capacity does not fit in `usize` (e.g. it is negative).
    #[error("capacity is negative or does not fit in usize")]
    OutOfRange,
    #[error("capacity must be non-zero")]
    Zero,
    #[error("capacity {0} is not a power of two")]
    NotPowerOfTwo(usize),
}
