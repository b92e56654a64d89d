//
// Copyright (c) 2025 Nathan Fiedler
//
use thiserror::Error;

/// Failures reported by the array operations.
///
/// None of these leave the array in a modified state.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ArrayError {
    /// The array has not been created yet.
    #[error("array is not initialized")]
    NotInitialized,
    /// Storage for the requested number of elements could not be obtained.
    #[error("unable to allocate storage for {capacity} elements")]
    AllocationFailed { capacity: usize },
    /// The index is outside the valid range for the operation.
    #[error("index {index} is out of bounds for array of size {size}")]
    IndexOutOfBounds { index: usize, size: usize },
    /// The operation requires at least one element.
    #[error("array is empty")]
    Empty,
    /// No element equal to the target exists.
    #[error("element {element} not found in array")]
    NotFound { element: i32 },
}

impl ArrayError {
    /// Returns true if the error is a resource failure rather than an
    /// invalid request.
    pub fn is_allocation_failure(&self) -> bool {
        matches!(self, ArrayError::AllocationFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            ArrayError::NotInitialized.to_string(),
            "array is not initialized"
        );
        assert_eq!(
            ArrayError::IndexOutOfBounds { index: 5, size: 2 }.to_string(),
            "index 5 is out of bounds for array of size 2"
        );
        assert_eq!(
            ArrayError::NotFound { element: -3 }.to_string(),
            "element -3 not found in array"
        );
    }

    #[test]
    fn test_allocation_failure_is_distinct() {
        assert!(ArrayError::AllocationFailed { capacity: 8 }.is_allocation_failure());
        assert!(!ArrayError::Empty.is_allocation_failure());
        assert!(!ArrayError::NotFound { element: 1 }.is_allocation_failure());
        assert!(!ArrayError::IndexOutOfBounds { index: 0, size: 0 }.is_allocation_failure());
    }
}
