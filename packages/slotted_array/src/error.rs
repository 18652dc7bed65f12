use std::collections::TryReserveError;

use thiserror::Error;

/// Errors that can occur when mutating a slotted array.
///
/// Every fallible operation leaves the array in its previous state when it
/// returns an error; no partial mutation is ever observable.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The caller referenced a slot index at or beyond the current slot count.
    #[error("index {index} is out of bounds for a slotted array with {slot_count} slots")]
    IndexOutOfBounds {
        /// The index the caller supplied.
        index: usize,

        /// The number of slots the array had at the time of the call.
        slot_count: usize,
    },

    /// The slot at the given index exists but does not hold a value.
    #[error("slot {index} does not hold a value")]
    SlotVacant {
        /// The index of the vacant slot.
        index: usize,
    },

    /// The requested slot count would take the array below its configured floor.
    #[error("requested slot count {requested} is below the configured minimum of {min_slot_count}")]
    BelowMinimumSlotCount {
        /// The slot count the caller asked for.
        requested: usize,

        /// The floor configured via `set_min_slot_count()`.
        min_slot_count: usize,
    },

    /// The allocator declined to provide memory for a larger slot buffer.
    #[error("memory allocation failed while growing the slot buffer")]
    AllocationFailed,

    /// The requested slot count would make the slot buffer exceed the maximum
    /// size a single allocation may have on this platform.
    #[error("requested slot count would overflow the maximum buffer size")]
    CapacityOverflow,
}

impl From<TryReserveError> for Error {
    /// A reservation that fails after the buffer size was already validated
    /// means the allocator declined the request.
    fn from(_value: TryReserveError) -> Self {
        Self::AllocationFailed
    }
}

/// A specialized `Result` type for slotted array operations, returning the
/// crate's [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use std::fmt::Debug;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Error: Send, Sync, Debug);

    #[test]
    fn out_of_bounds_is_error() {
        let error = Error::IndexOutOfBounds {
            index: 10,
            slot_count: 3,
        };

        // Verify it is a valid Error that can be used in Result context.
        let result: Result<()> = Err(error);
        assert!(result.is_err());
    }

    #[test]
    fn messages_carry_context() {
        let error = Error::BelowMinimumSlotCount {
            requested: 2,
            min_slot_count: 8,
        };

        let message = error.to_string();
        assert!(message.contains('2'));
        assert!(message.contains('8'));
    }
}
