#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! This package provides [`FreeList`], a thread-safe set of idle boxed items of a single type
//! that callers can put back after use and get again later instead of allocating anew.
//!
//! The purpose is to amortize allocation cost across many unrelated, concurrent clients that
//! churn short-lived instances of the same shape, such as scratch buffers or decode targets.
//!
//! # Intrusive linkage
//!
//! Idle items are chained through a field inside the items themselves, so keeping an item
//! in the list costs no extra allocation. The item type declares that field and derives
//! [`Linked`] to expose it:
//!
//! ```rust
//! use free_list::{FreeList, Linked};
//!
//! #[derive(Default, Linked)]
//! struct Scratch {
//!     bytes: Vec<u8>,
//!
//!     // Reserved for the free list while the item is idle.
//!     next: Option<Box<Self>>,
//! }
//!
//! let list = FreeList::builder()
//!     .factory(|| Box::new(Scratch::default()))
//!     .resetter(|scratch: &mut Scratch| scratch.bytes.clear())
//!     .build();
//!
//! let mut scratch = list.get().expect("the factory always produces an item");
//! scratch.bytes.extend_from_slice(b"hello");
//! list.put(scratch);
//!
//! // The same allocation comes back, cleared by the resetter.
//! let scratch = list.get().expect("an idle item is available");
//! assert!(scratch.bytes.is_empty());
//! assert!(scratch.bytes.capacity() >= 5);
//! ```
//!
//! The derive accepts only a struct with a field literally named `next` whose type is exactly
//! `Option<Box<Self>>` (the struct's own name may be spelled out instead of `Self`). Any other
//! shape is a compile error:
//!
//! ```compile_fail
//! use free_list::Linked;
//!
//! #[derive(Linked)]
//! struct NoLink {
//!     value: u32,
//! }
//! ```
//!
//! ```compile_fail
//! use free_list::Linked;
//!
//! #[derive(Linked)]
//! struct WrongLink {
//!     next: Option<std::rc::Rc<WrongLink>>,
//! }
//! ```
//!
//! # Ordering
//!
//! [`FreeList::get()`] returns the most recently put item first. The list is a stack.
//!
//! # Thread safety
//!
//! [`FreeList`] is [`Sync`] when the item type is [`Send`]. The list is guarded by a single
//! mutex that is held only for the constant-time splice; the factory and resetter hooks run
//! outside of it.
//!
//! # Capacity
//!
//! The list grows without limit as items are put back and never shrinks on its own. Items
//! that are put back stay available to [`FreeList::get()`] until taken or until the list is
//! dropped.

// Lets the derive macro refer to `::free_list` from inside this crate, too.
extern crate self as free_list;

mod builder;
mod linked;
mod pool;

pub use builder::*;
pub use linked::*;
pub use pool::*;
