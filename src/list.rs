use std::fmt;
use std::marker::PhantomData;

use tracing::{debug, trace};

use crate::error::{Error, Result};

/// Placeholder rendered in place of a sentinel neighbour
pub const BOUNDARY_MARKER: &str = "XXX";

// Sentinel slots. Never handed out, never recycled.
const HEAD: usize = 0;
const TAIL: usize = 1;

/// Handle to a node in a `LinkedList`
///
/// Handles stay valid until their node is removed or the list is cleared.
/// After that every operation taking the handle fails with
/// `Error::DetachedNode`, even if the slot has since been reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Node {
    index: usize,
    generation: u32,
}

/// A slot in the node arena
///
/// A linked slot has both neighbours set. The head sentinel has no `prev`,
/// the tail sentinel has no `next`, and a vacant slot has neither.
struct Slot<T> {
    value: Option<T>,
    prev: Option<usize>,
    next: Option<usize>,
    generation: u32,
}

/// A doubly linked list with permanent head and tail sentinels
///
/// Nodes live in an arena owned by the list and link to each other by index.
/// Every insertion splices a node between two existing nodes, which may be
/// the sentinels.
pub struct LinkedList<T> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
    length: usize,
}

impl<T> LinkedList<T> {
    /// Creates a new empty list
    pub fn new() -> Self {
        let head = Slot {
            value: None,
            prev: None,
            next: Some(TAIL),
            generation: 0,
        };
        let tail = Slot {
            value: None,
            prev: Some(HEAD),
            next: None,
            generation: 0,
        };

        LinkedList {
            slots: vec![head, tail],
            free: Vec::new(),
            length: 0,
        }
    }

    /// Returns the number of nodes in the list
    pub fn len(&self) -> usize {
        self.length
    }

    /// Returns true if the list is empty
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the first node, or `None` if the list is empty
    pub fn first(&self) -> Option<Node> {
        let index = self.first_index();
        (index != TAIL).then(|| self.handle(index))
    }

    /// Returns the last node, or `None` if the list is empty
    pub fn last(&self) -> Option<Node> {
        let index = self.last_index();
        (index != HEAD).then(|| self.handle(index))
    }

    /// Returns the node following `node`, or `None` if `node` is the last one
    pub fn after(&self, node: Node) -> Result<Option<Node>> {
        let (_, next) = self.locate(node)?;
        Ok((next != TAIL).then(|| self.handle(next)))
    }

    /// Returns the node preceding `node`, or `None` if `node` is the first one
    pub fn before(&self, node: Node) -> Result<Option<Node>> {
        let (prev, _) = self.locate(node)?;
        Ok((prev != HEAD).then(|| self.handle(prev)))
    }

    /// Returns true if `node` is currently linked into this list
    pub fn contains_node(&self, node: Node) -> bool {
        self.locate(node).is_ok()
    }

    /// Returns a reference to the value held by `node`
    pub fn value(&self, node: Node) -> Result<&T> {
        self.locate(node)?;
        self.slots[node.index]
            .value
            .as_ref()
            .ok_or(Error::DetachedNode)
    }

    /// Returns a mutable reference to the value held by `node`
    pub fn value_mut(&mut self, node: Node) -> Result<&mut T> {
        self.locate(node)?;
        self.slots[node.index]
            .value
            .as_mut()
            .ok_or(Error::DetachedNode)
    }

    /// Adds an element to the front of the list
    /// Returns the handle of the newly inserted node
    pub fn add_first(&mut self, value: T) -> Node {
        let next = self.first_index();
        self.insert_between(value, HEAD, next)
    }

    /// Adds an element to the back of the list
    /// Returns the handle of the newly inserted node
    pub fn add_last(&mut self, value: T) -> Node {
        let prev = self.last_index();
        self.insert_between(value, prev, TAIL)
    }

    /// Inserts an element directly before `anchor`
    pub fn add_before(&mut self, anchor: Node, value: T) -> Result<Node> {
        let (prev, _) = self.locate(anchor)?;
        if prev == HEAD {
            return Ok(self.add_first(value));
        }
        Ok(self.insert_between(value, prev, anchor.index))
    }

    /// Inserts an element directly after `anchor`
    pub fn add_after(&mut self, anchor: Node, value: T) -> Result<Node> {
        let (_, next) = self.locate(anchor)?;
        if next == TAIL {
            return Ok(self.add_last(value));
        }
        Ok(self.insert_between(value, anchor.index, next))
    }

    /// Unlinks `node` and returns its value
    pub fn remove(&mut self, node: Node) -> Result<T> {
        let (prev, next) = self.locate(node)?;
        self.unlink(node.index, prev, next).ok_or(Error::DetachedNode)
    }

    /// Removes and returns the first element
    pub fn remove_first(&mut self) -> Result<T> {
        let node = self.first().ok_or(Error::EmptyList)?;
        self.remove(node)
    }

    /// Removes and returns the last element
    pub fn remove_last(&mut self) -> Result<T> {
        let node = self.last().ok_or(Error::EmptyList)?;
        self.remove(node)
    }

    /// Removes all elements from the list
    /// Every outstanding handle becomes detached.
    pub fn clear(&mut self) {
        let released = self.length;
        let mut index = self.first_index();
        while index != TAIL {
            let slot = &mut self.slots[index];
            let next = slot.next.unwrap_or(TAIL);
            slot.vacate();
            self.free.push(index);
            index = next;
        }

        self.slots[HEAD].next = Some(TAIL);
        self.slots[TAIL].prev = Some(HEAD);
        self.length = 0;
        debug!(released, "cleared linked list");
    }

    /// Returns an iterator over the list that borrows the list
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            slots: &self.slots,
            front: self.first_index(),
            back: self.last_index(),
            remaining: self.length,
        }
    }

    /// Returns a mutable iterator over the list that borrows the list mutably
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            front: self.first_index(),
            back: self.last_index(),
            remaining: self.length,
            slots: self.slots.as_mut_ptr(),
            _marker: PhantomData,
        }
    }

    /// Creates a node holding `value` and splices it between `prev` and `next`
    ///
    /// This is the only place nodes get linked in.
    fn insert_between(&mut self, value: T, prev: usize, next: usize) -> Node {
        let index = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                slot.value = Some(value);
                slot.prev = Some(prev);
                slot.next = Some(next);
                trace!(index, generation = slot.generation, "recycled list slot");
                index
            }
            None => {
                self.slots.push(Slot {
                    value: Some(value),
                    prev: Some(prev),
                    next: Some(next),
                    generation: 0,
                });
                self.slots.len() - 1
            }
        };

        self.slots[prev].next = Some(index);
        self.slots[next].prev = Some(index);
        self.length += 1;
        self.handle(index)
    }

    /// Joins `prev` and `next` around `index` and frees the slot
    fn unlink(&mut self, index: usize, prev: usize, next: usize) -> Option<T> {
        self.slots[prev].next = Some(next);
        self.slots[next].prev = Some(prev);

        let value = self.slots[index].vacate();
        self.free.push(index);
        self.length -= 1;
        value
    }

    /// Returns the neighbours of a linked node
    fn locate(&self, node: Node) -> Result<(usize, usize)> {
        match self.slots.get(node.index) {
            Some(Slot {
                prev: Some(prev),
                next: Some(next),
                generation,
                ..
            }) if *generation == node.generation => Ok((*prev, *next)),
            _ => Err(Error::DetachedNode),
        }
    }

    fn handle(&self, index: usize) -> Node {
        Node {
            index,
            generation: self.slots[index].generation,
        }
    }

    fn first_index(&self) -> usize {
        self.slots[HEAD].next.unwrap_or(TAIL)
    }

    fn last_index(&self) -> usize {
        self.slots[TAIL].prev.unwrap_or(HEAD)
    }
}

impl<T: PartialEq> LinkedList<T> {
    /// Returns the first node holding `value`, scanning from the front
    pub fn find(&self, value: &T) -> Option<Node> {
        let mut index = self.first_index();
        while index != TAIL {
            let slot = &self.slots[index];
            if slot.value.as_ref() == Some(value) {
                return Some(self.handle(index));
            }
            index = slot.next.unwrap_or(TAIL);
        }
        None
    }

    /// Removes the first node holding `value` and returns its value
    pub fn remove_value(&mut self, value: &T) -> Result<T> {
        let node = self.find(value).ok_or(Error::ValueNotFound)?;
        self.remove(node)
    }
}

impl<T> Slot<T> {
    /// Clears the links, bumps the generation and takes the value
    fn vacate(&mut self) -> Option<T> {
        self.prev = None;
        self.next = None;
        self.generation = self.generation.wrapping_add(1);
        self.value.take()
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for LinkedList<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: PartialEq> PartialEq for LinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LinkedList<T> {}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Renders each node as `{prev-(value)-next}`
/// A neighbour that is a sentinel renders as `BOUNDARY_MARKER`.
impl<T: fmt::Display> fmt::Display for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        let mut index = self.first_index();
        while index != TAIL {
            if index != self.first_index() {
                f.write_str(",")?;
            }
            let slot = &self.slots[index];
            f.write_str("{")?;
            self.fmt_neighbour(f, slot.prev)?;
            f.write_str("-(")?;
            if let Some(value) = &slot.value {
                write!(f, "{value}")?;
            }
            f.write_str(")-")?;
            self.fmt_neighbour(f, slot.next)?;
            f.write_str("}")?;
            index = slot.next.unwrap_or(TAIL);
        }
        f.write_str("]")
    }
}

impl<T: fmt::Display> LinkedList<T> {
    fn fmt_neighbour(&self, f: &mut fmt::Formatter<'_>, index: Option<usize>) -> fmt::Result {
        match index
            .and_then(|index| self.slots.get(index))
            .and_then(|slot| slot.value.as_ref())
        {
            Some(value) => write!(f, "{value}"),
            None => f.write_str(BOUNDARY_MARKER),
        }
    }
}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add_last(value);
        }
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

/// An iterator over the doubly linked list that consumes the list
pub struct IntoIter<T>(LinkedList<T>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.remove_first().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len(), Some(self.0.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.remove_last().ok()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

/// An iterator over the doubly linked list that borrows the list
pub struct Iter<'a, T> {
    slots: &'a [Slot<T>],
    front: usize,
    back: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let slot = &self.slots[self.front];
        self.front = slot.next.unwrap_or(TAIL);
        self.remaining -= 1;
        slot.value.as_ref()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let slot = &self.slots[self.back];
        self.back = slot.prev.unwrap_or(HEAD);
        self.remaining -= 1;
        slot.value.as_ref()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// A mutable iterator over the doubly linked list that borrows the list mutably
pub struct IterMut<'a, T> {
    slots: *mut Slot<T>,
    front: usize,
    back: usize,
    remaining: usize,
    _marker: PhantomData<&'a mut T>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        // SAFETY: `front` is a linked slot of the arena borrowed for 'a, and
        // `remaining` stops the walk before any slot is yielded twice.
        unsafe {
            let slot = &mut *self.slots.add(self.front);
            self.front = slot.next.unwrap_or(TAIL);
            self.remaining -= 1;
            slot.value.as_mut()
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        // SAFETY: see `next`.
        unsafe {
            let slot = &mut *self.slots.add(self.back);
            self.back = slot.prev.unwrap_or(HEAD);
            self.remaining -= 1;
            slot.value.as_mut()
        }
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> IntoIterator for LinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self)
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut LinkedList<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
