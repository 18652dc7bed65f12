//! A growable container that stores values in reusable slots addressed by
//! stable numeric indexes.
//!
//! This crate provides [`SlottedArray`], an index-addressable container that
//! reclaims removed slots without shifting the surviving values and supports
//! explicit defragmentation and capacity control. It is a low-level building
//! block for code that needs stable numeric handles to values without the
//! overhead of a general hash map.
//!
//! # Key features
//!
//! - **Stable indexes**: removing a value vacates its slot in place; every
//!   other value keeps its index
//! - **Slot reuse**: insertion fills the lowest-index vacant slot before
//!   growing the buffer
//! - **Explicit defragmentation**: [`compact()`][SlottedArray::compact]
//!   repacks survivors and releases wasted buffer space on demand, never
//!   behind your back
//! - **Capacity floor**: [`set_min_slot_count()`][SlottedArray::set_min_slot_count]
//!   keeps a configured number of slots alive through any compaction
//! - **Recoverable errors**: growth failures are reported through [`Error`]
//!   values and leave the array untouched
//! - **Thread mobility**: the array can move between threads but is not
//!   internally synchronized
//!
//! # Example
//!
//! ```rust
//! use slotted_array::SlottedArray;
//!
//! let mut array = SlottedArray::new();
//!
//! let five = array.insert(5)?;
//! let seven = array.insert(7)?;
//!
//! // Removal leaves a hole; the other value keeps its index.
//! array.remove(five)?;
//! assert_eq!(array.get(seven), Some(&7));
//!
//! // Compaction repacks the survivors and releases the hole.
//! array.compact(true);
//! assert_eq!(array.slot_count(), 1);
//! assert_eq!(array.get(0), Some(&7));
//! # Ok::<(), slotted_array::Error>(())
//! ```
//!
//! # Index stability
//!
//! Indexes returned by [`insert()`][SlottedArray::insert] are stable across
//! insertions and removals but not across
//! [`compact()`][SlottedArray::compact] or
//! [`truncate()`][SlottedArray::truncate], both of which may move or discard
//! values. Do not retain indexes across those calls.

mod builder;
mod error;
mod slotted_array;

pub use builder::*;
pub use error::Error;
pub(crate) use error::Result;
pub use slotted_array::*;
