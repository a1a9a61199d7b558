//! A contiguous growable array with an explicit, observable capacity.
//!
//! Capacity is tracked by the vector itself rather than left to the
//! allocator, so growth follows the configured `Growth` policy exactly.

use std::fmt;
use std::ops::{Index, IndexMut};
use std::slice;

use tracing::debug;

use crate::error::{Error, Result};

/// Capacity of a vector created with `Vector::new`, and the default growth step
pub const DEFAULT_CAPACITY: usize = 10;

/// How a full vector grows when an element is appended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Growth {
    /// Grow by a fixed number of slots. Zero behaves like one.
    Fixed(usize),
    /// Double the capacity, starting from one slot.
    Doubling,
}

impl Default for Growth {
    fn default() -> Self {
        Growth::Fixed(DEFAULT_CAPACITY)
    }
}

impl Growth {
    /// Returns the capacity that follows `capacity` under this policy
    pub fn next_capacity(self, capacity: usize) -> usize {
        match self {
            Growth::Fixed(step) => capacity.saturating_add(step.max(1)),
            Growth::Doubling => capacity.saturating_mul(2).max(1),
        }
    }
}

/// A growable array holding its elements left-packed in `[0, len)`
pub struct Vector<T> {
    /// Live elements.
    buf: Vec<T>,
    /// Number of slots reserved for elements. Never below `buf.len()`.
    capacity: usize,
    growth: Growth,
}

impl<T> Vector<T> {
    /// Creates an empty vector with `DEFAULT_CAPACITY` slots
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty vector with exactly `capacity` slots
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_growth(capacity, Growth::default())
    }

    /// Creates an empty vector with `capacity` slots that grows by `growth`
    pub fn with_growth(capacity: usize, growth: Growth) -> Self {
        Vector {
            buf: Vec::with_capacity(capacity),
            capacity,
            growth,
        }
    }

    /// Returns the number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if the vector holds no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns the number of slots available before the next reallocation
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the growth policy used by `add`
    pub fn growth(&self) -> Growth {
        self.growth
    }

    /// Returns a reference to the element at `index`
    pub fn get(&self, index: usize) -> Result<&T> {
        let len = self.len();
        self.buf
            .get(index)
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    /// Returns a mutable reference to the element at `index`
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.len();
        self.buf
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    /// Replaces the element at `index`, returning the previous one
    pub fn set(&mut self, index: usize, value: T) -> Result<T> {
        let slot = self.get_mut(index)?;
        Ok(std::mem::replace(slot, value))
    }

    /// Appends an element, growing the buffer first if it is full
    ///
    /// Takes amortized *O*(1) time under `Growth::Doubling`.
    pub fn add(&mut self, value: T) {
        if self.len() == self.capacity {
            self.reallocate(self.growth.next_capacity(self.capacity));
        }
        self.buf.push(value);
    }

    /// Inserts an element at `index`, shifting everything after it up by one
    ///
    /// `index` may equal `len()`. A full buffer grows by exactly one slot.
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        let len = self.len();
        if index > len {
            return Err(Error::IndexOutOfRange { index, len });
        }

        if len == self.capacity {
            self.reallocate(self.capacity.saturating_add(1));
        }
        self.buf.insert(index, value);
        Ok(())
    }

    /// Removes and returns the element at `index`, shifting everything after it down
    ///
    /// Capacity is left unchanged.
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        let len = self.len();
        if index >= len {
            return Err(Error::IndexOutOfRange { index, len });
        }
        Ok(self.buf.remove(index))
    }

    /// Removes all elements, keeping the capacity
    pub fn clear(&mut self) {
        let released = self.len();
        self.buf.clear();
        debug!(released, capacity = self.capacity, "cleared vector");
    }

    /// Returns the live elements as a slice
    pub fn as_slice(&self) -> &[T] {
        &self.buf
    }

    /// Returns the live elements as a mutable slice
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.buf
    }

    /// Returns an iterator over the live elements
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.buf.iter()
    }

    /// Returns a mutable iterator over the live elements
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.buf.iter_mut()
    }

    /// Moves the live elements into a buffer of `new_capacity` slots
    fn reallocate(&mut self, new_capacity: usize) {
        debug!(
            old_capacity = self.capacity,
            new_capacity,
            len = self.len(),
            "reallocating vector buffer"
        );

        let mut buf = Vec::with_capacity(new_capacity);
        buf.extend(self.buf.drain(..));
        self.buf = buf;
        self.capacity = new_capacity;
    }
}

impl<T: PartialEq> Vector<T> {
    /// Returns the index of the first element equal to `value`
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.buf.iter().position(|elem| elem == value)
    }

    /// Returns true if any live element equals `value`
    pub fn contains(&self, value: &T) -> bool {
        self.index_of(value).is_some()
    }

    /// Removes the first element equal to `value`
    /// Returns true if an element was removed
    pub fn remove(&mut self, value: &T) -> bool {
        match self.index_of(value) {
            Some(index) => {
                self.buf.remove(index);
                true
            }
            None => false,
        }
    }
}

impl<T> Default for Vector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for Vector<T> {
    fn clone(&self) -> Self {
        let mut buf = Vec::with_capacity(self.capacity);
        buf.extend_from_slice(&self.buf);
        Vector {
            buf,
            capacity: self.capacity,
            growth: self.growth,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.buf.iter()).finish()
    }
}

/// Renders as `[v0, v1, ..., vn, ]`, or `[]` when empty
impl<T: fmt::Display> fmt::Display for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for elem in &self.buf {
            write!(f, "{elem}, ")?;
        }
        f.write_str("]")
    }
}

/// Equality compares live elements only
impl<T: PartialEq> PartialEq for Vector<T> {
    fn eq(&self, other: &Self) -> bool {
        self.buf == other.buf
    }
}

impl<T: Eq> Eq for Vector<T> {}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for Vector<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.buf[..] == other[..]
    }
}

impl<T> Index<usize> for Vector<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Ok(elem) => elem,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> IndexMut<usize> for Vector<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.get_mut(index) {
            Ok(elem) => elem,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> Extend<T> for Vector<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add(value);
        }
    }
}

impl<T> FromIterator<T> for Vector<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut vector = Self::new();
        vector.extend(iter);
        vector
    }
}

impl<T> IntoIterator for Vector<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.buf.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Vector<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
