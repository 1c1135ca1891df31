/// Gives a [`FreeList`][crate::FreeList] access to the slot that chains an idle item to the
/// next idle item.
///
/// Prefer `#[derive(Linked)]`, which verifies at compile time that the type has a field named
/// `next` of type `Option<Box<Self>>` and implements this trait over it.
///
/// # Contract
///
/// [`next_mut()`][Self::next_mut] must return the same dedicated field on every call. The
/// application must not rely on the contents of that field: the free list overwrites it on
/// [`put()`][crate::FreeList::put] and clears it on [`get()`][crate::FreeList::get]. An
/// implementation that breaks this contract may cause items to be lost but cannot cause
/// memory unsafety.
///
/// # Example
///
/// Implementing the trait by hand is equivalent to deriving it:
///
/// ```rust
/// use free_list::{FreeList, Linked};
///
/// struct Record {
///     id: u64,
///     link: Option<Box<Record>>,
/// }
///
/// impl Linked for Record {
///     fn next_mut(&mut self) -> &mut Option<Box<Self>> {
///         &mut self.link
///     }
/// }
///
/// let list = FreeList::new();
/// list.put(Box::new(Record { id: 7, link: None }));
///
/// assert_eq!(list.get().map(|r| r.id), Some(7));
/// ```
pub trait Linked: Sized {
    /// Returns the linkage slot of this item.
    fn next_mut(&mut self) -> &mut Option<Box<Self>>;
}

/// Derives [`Linked`][trait@Linked] over a field named `next` of type `Option<Box<Self>>`.
pub use free_list_macros::Linked;

/// Releases a chain of items one at a time.
///
/// Dropping the head of a long chain directly would recurse once per item.
pub(crate) fn release_chain<E: Linked>(mut head: Option<Box<E>>) -> usize {
    let mut released: usize = 0;

    while let Some(mut item) = head {
        head = item.next_mut().take();
        released = released.saturating_add(1);
    }

    released
}
