//
// Copyright (c) 2025 Nathan Fiedler
//
use crate::{ArrayError, IntArray, Options, Result};
use std::fmt;

/// Slot for an array that may not have been created yet.
///
/// Queries on an uninitialized handle return defaults, while operations that
/// index or mutate fail with [`ArrayError::NotInitialized`]. The one
/// exception is [`ArrayHandle::pop`], which reports [`ArrayError::Empty`].
#[derive(Debug, Default)]
pub enum ArrayHandle {
    #[default]
    Uninitialized,
    Ready(IntArray),
}

impl ArrayHandle {
    pub fn new() -> Self {
        ArrayHandle::Uninitialized
    }

    /// Create a new array with the given capacity, releasing any previous
    /// one. On failure the handle keeps whatever it held before.
    pub fn create(&mut self, capacity: usize) -> Result<&mut IntArray> {
        self.create_with_options(capacity, Options::default())
    }

    pub fn create_with_options(
        &mut self,
        capacity: usize,
        options: Options,
    ) -> Result<&mut IntArray> {
        let arr = IntArray::with_options(capacity, options)?;
        *self = ArrayHandle::Ready(arr);
        self.ready_mut()
    }

    /// Take the array out of the handle, leaving it uninitialized.
    pub fn release(&mut self) -> Option<IntArray> {
        match std::mem::take(self) {
            ArrayHandle::Ready(arr) => Some(arr),
            ArrayHandle::Uninitialized => None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self, ArrayHandle::Ready(_))
    }

    pub fn get(&self) -> Option<&IntArray> {
        match self {
            ArrayHandle::Ready(arr) => Some(arr),
            ArrayHandle::Uninitialized => None,
        }
    }

    fn ready(&self) -> Result<&IntArray> {
        self.get().ok_or(ArrayError::NotInitialized)
    }

    fn ready_mut(&mut self) -> Result<&mut IntArray> {
        match self {
            ArrayHandle::Ready(arr) => Ok(arr),
            ArrayHandle::Uninitialized => Err(ArrayError::NotInitialized),
        }
    }

    /// Number of elements, or 0 when uninitialized.
    pub fn len(&self) -> usize {
        self.get().map_or(0, IntArray::len)
    }

    /// Allocated slots, or 0 when uninitialized.
    pub fn capacity(&self) -> usize {
        self.get().map_or(0, IntArray::capacity)
    }

    pub fn is_empty(&self) -> bool {
        self.get().is_none_or(IntArray::is_empty)
    }

    pub fn item_at(&self, index: usize) -> Result<i32> {
        self.ready()?.item_at(index)
    }

    pub fn push(&mut self, element: i32) -> Result<()> {
        self.ready_mut()?.push(element)
    }

    pub fn insert(&mut self, element: i32, index: usize) -> Result<()> {
        self.ready_mut()?.insert(element, index)
    }

    pub fn prepend(&mut self, element: i32) -> Result<()> {
        self.ready_mut()?.prepend(element)
    }

    pub fn pop(&mut self) -> Result<i32> {
        match self {
            ArrayHandle::Ready(arr) => arr.pop(),
            ArrayHandle::Uninitialized => Err(ArrayError::Empty),
        }
    }

    pub fn delete(&mut self, index: usize) -> Result<i32> {
        self.ready_mut()?.delete(index)
    }

    pub fn find(&self, element: i32) -> Result<usize> {
        self.ready()?.find(element)
    }

    pub fn remove_all(&mut self, element: i32) -> Result<usize> {
        self.ready_mut()?.remove_all(element)
    }
}

impl From<IntArray> for ArrayHandle {
    fn from(arr: IntArray) -> Self {
        ArrayHandle::Ready(arr)
    }
}

impl fmt::Display for ArrayHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayHandle::Ready(arr) => fmt::Display::fmt(arr, f),
            ArrayHandle::Uninitialized => write!(f, "array is not initialized"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uninitialized_queries_default() {
        let sut = ArrayHandle::new();
        assert!(!sut.is_initialized());
        assert_eq!(sut.len(), 0);
        assert_eq!(sut.capacity(), 0);
        assert!(sut.is_empty());
        assert!(sut.get().is_none());
        assert_eq!(sut.to_string(), "array is not initialized");
    }

    #[test]
    fn test_uninitialized_operations_fail() {
        let mut sut = ArrayHandle::default();
        assert_eq!(sut.item_at(0), Err(ArrayError::NotInitialized));
        assert_eq!(sut.push(1), Err(ArrayError::NotInitialized));
        assert_eq!(sut.insert(1, 0), Err(ArrayError::NotInitialized));
        assert_eq!(sut.prepend(1), Err(ArrayError::NotInitialized));
        assert_eq!(sut.delete(0), Err(ArrayError::NotInitialized));
        assert_eq!(sut.find(1), Err(ArrayError::NotInitialized));
        assert_eq!(sut.remove_all(1), Err(ArrayError::NotInitialized));
        assert_eq!(sut.pop(), Err(ArrayError::Empty));
        assert!(!sut.is_initialized());
    }

    #[test]
    fn test_create_and_operate() {
        let mut sut = ArrayHandle::new();
        assert_eq!(sut.create(2).unwrap().capacity(), 2);
        sut.push(5).unwrap();
        sut.push(7).unwrap();
        sut.push(9).unwrap();
        sut.prepend(1).unwrap();
        sut.insert(2, 3).unwrap();
        assert_eq!(sut.len(), 5);
        assert_eq!(sut.capacity(), 8);
        assert_eq!(sut.item_at(3), Ok(2));
        assert_eq!(sut.find(9), Ok(4));
        assert_eq!(sut.delete(0), Ok(1));
        assert_eq!(sut.pop(), Ok(9));
        assert_eq!(sut.remove_all(7), Ok(1));
        assert_eq!(
            sut.to_string(),
            "size: 2, capacity: 8, contents: [5, 2]"
        );
    }

    #[test]
    fn test_create_replaces_previous() {
        let mut sut = ArrayHandle::new();
        sut.create(1).unwrap();
        sut.push(42).unwrap();
        sut.create(3).unwrap();
        assert!(sut.is_empty());
        assert_eq!(sut.capacity(), 3);
    }

    #[test]
    fn test_failed_create_keeps_previous() {
        let mut sut = ArrayHandle::new();
        sut.create(1).unwrap();
        sut.push(42).unwrap();
        assert_eq!(
            sut.create(usize::MAX).err(),
            Some(ArrayError::AllocationFailed {
                capacity: usize::MAX
            })
        );
        assert_eq!(sut.item_at(0), Ok(42));

        let mut empty = ArrayHandle::new();
        assert!(empty.create(usize::MAX).is_err());
        assert!(!empty.is_initialized());
    }

    #[test]
    fn test_release() {
        let mut sut = ArrayHandle::from(IntArray::try_from(&[1, 2][..]).unwrap());
        assert!(sut.is_initialized());
        let arr = sut.release().unwrap();
        assert_eq!(arr.as_slice(), &[1, 2]);
        assert!(!sut.is_initialized());
        assert!(sut.release().is_none());
    }

    #[test]
    fn test_options_pass_through() {
        let options = Options::default().removal(crate::RemovalStrategy::Repeated);
        let mut sut = ArrayHandle::new();
        sut.create_with_options(0, options).unwrap();
        assert_eq!(sut.get().map(IntArray::options), Some(options));
    }
}
