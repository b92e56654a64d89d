//
// Copyright (c) 2025 Nathan Fiedler
//

//! A growable array of signed integers with manual capacity management.
//!
//! The array owns one contiguous buffer. Elements are appended, inserted at
//! any index (shifting the tail or zero-filling a gap), deleted with the tail
//! shifted back, searched linearly, and removed in bulk. Every failure is
//! reported as an [`ArrayError`] and leaves the array exactly as it was.
//!
//! # Memory Usage
//!
//! The buffer holds `capacity()` slots of which the first `len()` are in use.
//! When a mutation needs a slot the buffer does not have, the capacity is
//! doubled (or set to 1 when it was 0). The buffer never shrinks; it is
//! released when the array is dropped.
//!
//! # Performance
//!
//! Appends are amortized constant time. Insert, delete and find are linear in
//! the number of elements. Removing every occurrence of a value is linear with
//! the default [`RemovalStrategy::Compact`].
//!
//! # Safety
//!
//! The buffer is managed with the raw allocator so that allocation failure can
//! be reported instead of aborting, hence the `unsafe` blocks below. Slots past
//! `len()` are never read.

use std::alloc::{Layout, alloc, dealloc, realloc};
use std::fmt;
use std::ops::Index;
use std::ptr::{self, NonNull};
use tracing::{debug, warn};

mod error;
mod handle;
mod options;

pub use error::ArrayError;
pub use handle::ArrayHandle;
pub use options::{Options, RemovalStrategy, SparseGrowth};

pub type Result<T> = std::result::Result<T, ArrayError>;

/// Value written into the gap left by an insert past the end.
const FILL_VALUE: i32 = 0;

/// Capacity after one growth step.
fn doubled_capacity(capacity: usize) -> Result<usize> {
    if capacity == 0 {
        Ok(1)
    } else {
        capacity
            .checked_mul(2)
            .ok_or_else(|| allocation_failed(usize::MAX))
    }
}

fn allocation_failed(capacity: usize) -> ArrayError {
    warn!(capacity, "unable to allocate array storage");
    ArrayError::AllocationFailed { capacity }
}

/// Allocate an uninitialized buffer of `capacity` integers.
fn allocate(capacity: usize) -> Result<NonNull<i32>> {
    if capacity == 0 {
        return Ok(NonNull::dangling());
    }
    let layout = Layout::array::<i32>(capacity).map_err(|_| allocation_failed(capacity))?;
    let ptr = unsafe { alloc(layout) }.cast::<i32>();
    NonNull::new(ptr).ok_or_else(|| allocation_failed(capacity))
}

///
/// Growable array of `i32` values.
///
pub struct IntArray {
    /// start of the buffer, dangling while capacity is zero
    ptr: NonNull<i32>,
    /// number of elements in use
    size: usize,
    /// number of allocated slots
    capacity: usize,
    options: Options,
}

// SAFETY: the buffer is uniquely owned and holds plain integers
unsafe impl Send for IntArray {}
unsafe impl Sync for IntArray {}

impl IntArray {
    /// Return an empty array with zero capacity.
    ///
    /// Nothing is allocated until the first element is added.
    pub fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            size: 0,
            capacity: 0,
            options: Options::default(),
        }
    }

    /// Return an empty array with room for `capacity` elements.
    ///
    /// A capacity of zero allocates nothing. Fails with
    /// [`ArrayError::AllocationFailed`] if the storage cannot be obtained.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_options(capacity, Options::default())
    }

    /// Return an empty array with room for `capacity` elements, using the
    /// given growth and removal settings.
    pub fn with_options(capacity: usize, options: Options) -> Result<Self> {
        let ptr = allocate(capacity)?;
        debug!(capacity, ?options, "created array");
        Ok(Self {
            ptr,
            size: 0,
            capacity,
            options,
        })
    }

    /// Return the settings this array was created with.
    pub fn options(&self) -> Options {
        self.options
    }

    /// Return the number of elements in the array.
    ///
    /// # Time complexity
    ///
    /// Constant time.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns the total number of elements the array can hold without
    /// reallocating.
    ///
    /// # Time complexity
    ///
    /// Constant time.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns true if the array has a length of 0.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Return the elements in use as a slice.
    pub fn as_slice(&self) -> &[i32] {
        // SAFETY: the first `size` slots are initialized, and the pointer is
        // aligned and non-null even when dangling
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.size) }
    }

    /// Return the elements in use as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [i32] {
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.size) }
    }

    /// Returns an iterator over the elements, from head to tail.
    pub fn iter(&self) -> std::slice::Iter<'_, i32> {
        self.as_slice().iter()
    }

    /// Return the element at the given index.
    ///
    /// # Time complexity
    ///
    /// Constant time.
    pub fn item_at(&self, index: usize) -> Result<i32> {
        self.as_slice()
            .get(index)
            .copied()
            .ok_or(ArrayError::IndexOutOfBounds {
                index,
                size: self.size,
            })
    }

    /// Appends an element to the tail of the array, doubling the capacity
    /// first if the array is full.
    ///
    /// # Time complexity
    ///
    /// Amortized constant time.
    pub fn push(&mut self, element: i32) -> Result<()> {
        self.make_room(self.size)?;
        unsafe {
            ptr::write(self.ptr.as_ptr().add(self.size), element);
        }
        self.size += 1;
        Ok(())
    }

    /// Inserts an element at the given index.
    ///
    /// An index within the array shifts the element at `index` and everything
    /// after it one slot toward the tail. An index at or past the end fills
    /// the slots between the current tail and `index` with zero, and the
    /// array length becomes `index + 1`.
    ///
    /// # Time complexity
    ///
    /// O(n) for an index within the array, O(index - n) past the end.
    pub fn insert(&mut self, element: i32, index: usize) -> Result<()> {
        self.make_room(index)?;
        let base = self.ptr.as_ptr();
        if index >= self.size {
            unsafe {
                for slot in self.size..index {
                    ptr::write(base.add(slot), FILL_VALUE);
                }
                ptr::write(base.add(index), element);
            }
            self.size = index + 1;
        } else {
            unsafe {
                let hole = base.add(index);
                ptr::copy(hole, hole.add(1), self.size - index);
                ptr::write(hole, element);
            }
            self.size += 1;
        }
        Ok(())
    }

    /// Inserts an element at the head of the array.
    pub fn prepend(&mut self, element: i32) -> Result<()> {
        self.insert(element, 0)
    }

    /// Removes the last element and returns it, or [`ArrayError::Empty`].
    ///
    /// # Time complexity
    ///
    /// Constant time.
    pub fn pop(&mut self) -> Result<i32> {
        if self.size == 0 {
            return Err(ArrayError::Empty);
        }
        self.size -= 1;
        Ok(unsafe { ptr::read(self.ptr.as_ptr().add(self.size)) })
    }

    /// Removes the element at the given index and returns it, shifting every
    /// following element one slot toward the head.
    ///
    /// # Time complexity
    ///
    /// O(n)
    pub fn delete(&mut self, index: usize) -> Result<i32> {
        if index >= self.size {
            return Err(ArrayError::IndexOutOfBounds {
                index,
                size: self.size,
            });
        }
        let value = unsafe {
            let hole = self.ptr.as_ptr().add(index);
            let value = ptr::read(hole);
            ptr::copy(hole.add(1), hole, self.size - index - 1);
            value
        };
        self.size -= 1;
        Ok(value)
    }

    /// Return the index of the first element equal to `element`.
    ///
    /// # Time complexity
    ///
    /// O(n)
    pub fn find(&self, element: i32) -> Result<usize> {
        if self.size == 0 {
            return Err(ArrayError::Empty);
        }
        self.iter()
            .position(|&value| value == element)
            .ok_or(ArrayError::NotFound { element })
    }

    /// Removes every element equal to `element`, keeping the order of the
    /// rest, and returns how many were removed.
    ///
    /// Uses the removal strategy from the array's [`Options`].
    pub fn remove_all(&mut self, element: i32) -> Result<usize> {
        self.remove_all_with(element, self.options.removal)
    }

    /// Removes every element equal to `element` using the given strategy.
    ///
    /// Fails with [`ArrayError::Empty`] on an empty array and with
    /// [`ArrayError::NotFound`] if nothing matched.
    ///
    /// # Time complexity
    ///
    /// O(n) when compacting, O(n * k) for k matches when repeating.
    pub fn remove_all_with(&mut self, element: i32, strategy: RemovalStrategy) -> Result<usize> {
        if self.size == 0 {
            return Err(ArrayError::Empty);
        }
        let removed = match strategy {
            RemovalStrategy::Compact => {
                let slots = self.as_mut_slice();
                let mut kept = 0;
                for read in 0..slots.len() {
                    let value = slots[read];
                    if value != element {
                        slots[kept] = value;
                        kept += 1;
                    }
                }
                let removed = self.size - kept;
                self.size = kept;
                removed
            }
            RemovalStrategy::Repeated => {
                let mut removed = 0;
                while let Ok(index) = self.find(element) {
                    self.delete(index)?;
                    removed += 1;
                }
                removed
            }
        };
        if removed == 0 {
            Err(ArrayError::NotFound { element })
        } else {
            Ok(removed)
        }
    }

    /// Ensure a write at `index` fits in the buffer, growing it if needed.
    ///
    /// All checks happen before the buffer is touched, so a failure leaves
    /// the array unchanged.
    fn make_room(&mut self, index: usize) -> Result<()> {
        // writing within the array shifts the tail up by one slot, writing at
        // or past the end extends the array to index + 1
        let required = index
            .max(self.size)
            .checked_add(1)
            .ok_or_else(|| allocation_failed(usize::MAX))?;
        if required <= self.capacity {
            return Ok(());
        }
        let doubled = doubled_capacity(self.capacity)?;
        let new_capacity = match self.options.sparse_growth {
            SparseGrowth::FitIndex => doubled.max(required),
            SparseGrowth::SingleStep => {
                let available = if self.size == self.capacity {
                    doubled
                } else {
                    self.capacity
                };
                if required > available {
                    return Err(ArrayError::IndexOutOfBounds {
                        index,
                        size: self.size,
                    });
                }
                doubled
            }
        };
        self.grow(new_capacity)
    }

    /// Reallocate the buffer to hold `new_capacity` elements, preserving the
    /// elements in use. On failure the old buffer is left in place.
    fn grow(&mut self, new_capacity: usize) -> Result<()> {
        let new_layout =
            Layout::array::<i32>(new_capacity).map_err(|_| allocation_failed(new_capacity))?;
        let new_ptr = if self.capacity == 0 {
            unsafe { alloc(new_layout) }
        } else {
            let old_layout =
                Layout::array::<i32>(self.capacity).map_err(|_| allocation_failed(new_capacity))?;
            unsafe {
                realloc(
                    self.ptr.as_ptr().cast::<u8>(),
                    old_layout,
                    new_layout.size(),
                )
            }
        };
        let Some(ptr) = NonNull::new(new_ptr.cast::<i32>()) else {
            return Err(allocation_failed(new_capacity));
        };
        debug!(
            old_capacity = self.capacity,
            new_capacity,
            size = self.size,
            "grew array"
        );
        self.ptr = ptr;
        self.capacity = new_capacity;
        Ok(())
    }
}

impl Default for IntArray {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for IntArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "size: {}, capacity: {}, contents: {:?}",
            self.size,
            self.capacity,
            self.as_slice()
        )
    }
}

impl fmt::Debug for IntArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl Drop for IntArray {
    fn drop(&mut self) {
        if self.capacity == 0 {
            return;
        }
        if let Ok(layout) = Layout::array::<i32>(self.capacity) {
            unsafe {
                dealloc(self.ptr.as_ptr().cast::<u8>(), layout);
            }
        }
    }
}

impl Index<usize> for IntArray {
    type Output = i32;

    fn index(&self, index: usize) -> &Self::Output {
        let Some(item) = self.as_slice().get(index) else {
            panic!("index out of bounds: {}", index);
        };
        item
    }
}

impl TryFrom<&[i32]> for IntArray {
    type Error = ArrayError;

    fn try_from(values: &[i32]) -> Result<Self> {
        let mut arr = IntArray::with_capacity(values.len())?;
        unsafe {
            ptr::copy_nonoverlapping(values.as_ptr(), arr.ptr.as_ptr(), values.len());
        }
        arr.size = values.len();
        Ok(arr)
    }
}

impl<'a> IntoIterator for &'a IntArray {
    type Item = &'a i32;
    type IntoIter = std::slice::Iter<'a, i32>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
