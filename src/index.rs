//! Bucket-index computation and capacity validation.

use crate::error::CapacityError;

/// Number of buckets in a table built with `HashTable::new`.
pub const DEFAULT_CAPACITY: usize = 8;

/// Map a key's hash code to a bucket in a table of `capacity` buckets.
///
/// High bits are folded into the low bits (`hash ^ (hash >> 16)`) before
/// masking with `capacity - 1`, so keys whose hashes differ only above the
/// mask still spread across buckets. `capacity` must be a non-zero power of
/// two; every table capacity is validated by `checked_capacity`.
#[inline]
pub fn bucket_index(hash: u64, capacity: usize) -> usize {
    debug_assert!(capacity.is_power_of_two());
    let spread = hash ^ (hash >> 16);
    (spread as usize) & (capacity - 1)
}

/// Convert a requested capacity into a valid bucket count.
pub(crate) fn checked_capacity<C>(capacity: C) -> Result<usize, CapacityError>
where
    C: TryInto<usize>,
{
    let capacity = capacity
        .try_into()
        .map_err(|_| CapacityError::OutOfRange)?;
    validate(capacity)
}

pub(crate) fn validate(capacity: usize) -> Result<usize, CapacityError> {
    if capacity == 0 {
        return Err(CapacityError::Zero);
    }
    if !capacity.is_power_of_two() {
        return Err(CapacityError::NotPowerOfTwo(capacity));
    }
    Ok(capacity)
}
