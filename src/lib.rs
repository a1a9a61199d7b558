//! Two standalone sequence containers.
//!
//! `LinkedList` is a doubly linked list whose head and tail sentinels are
//! always present, so every insertion is a splice between two existing nodes.
//! Callers address nodes through copyable `Node` handles that are detached on
//! removal.
//!
//! `Vector` is a growable array with an explicit capacity and a configurable
//! `Growth` policy.
//!
//! Neither container is synchronised; share them across threads only behind
//! your own lock.

pub mod error;
pub mod list;
pub mod vector;

pub use error::{Error, ErrorKind, Result};
pub use list::{BOUNDARY_MARKER, LinkedList, Node};
pub use vector::{DEFAULT_CAPACITY, Growth, Vector};
