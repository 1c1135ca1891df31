use std::any::type_name;
use std::fmt;

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::linked::release_chain;
use crate::{FreeListBuilder, Linked};

/// Produces a new item when [`FreeList::get()`] finds the list empty.
pub(crate) type Factory<E> = Box<dyn Fn() -> Box<E> + Send + Sync>;

/// Normalizes a reused item before [`FreeList::get()`] hands it out.
pub(crate) type Resetter<E> = Box<dyn Fn(&mut E) + Send + Sync>;

/// A thread-safe set of idle boxed items that may be individually put back and taken again.
///
/// Items are chained through their own linkage slot (see [`Linked`]). The list owns every
/// idle item; a caller owns every item it has taken. [`put()`](Self::put) moves an item into
/// the list and [`get()`](Self::get) moves one out, so an item can never be both idle and in
/// use, and cannot be put back twice.
///
/// # Hooks
///
/// Two optional hooks are configured via [`FreeList::builder()`]:
///
/// * The **factory** is called by [`get()`](Self::get) when there is no idle item. Its result
///   is returned as-is, the resetter is not applied to it.
/// * The **resetter** is called by [`get()`](Self::get) on a reused item, exactly once per
///   reuse, before the item is returned.
///
/// Both run outside the lock, so slow hooks do not serialize other callers.
///
/// # Thread safety
///
/// This type is thread-safe ([`Sync`]) as long as the item type is [`Send`]. Share it by
/// reference, in an [`Arc`](std::sync::Arc) or as a `static`.
///
/// # Example
///
/// ```rust
/// use free_list::{FreeList, Linked};
///
/// #[derive(Linked)]
/// struct Message {
///     text: String,
///     next: Option<Box<Self>>,
/// }
///
/// let list = FreeList::<Message>::new();
/// assert!(list.get().is_none());
///
/// list.put(Box::new(Message { text: "a".to_string(), next: None }));
/// list.put(Box::new(Message { text: "b".to_string(), next: None }));
///
/// // Last in, first out.
/// assert_eq!(list.get().map(|m| m.text).as_deref(), Some("b"));
/// assert_eq!(list.get().map(|m| m.text).as_deref(), Some("a"));
/// assert!(list.get().is_none());
/// ```
pub struct FreeList<E: Linked> {
    // The most recently put idle item, which owns the rest of the chain.
    head: Mutex<Option<Box<E>>>,

    factory: Option<Factory<E>>,
    resetter: Option<Resetter<E>>,
}

impl<E: Linked> FreeList<E> {
    /// Creates an empty list without hooks.
    ///
    /// [`get()`](Self::get) on such a list returns `None` unless an item has been put back.
    ///
    /// # Example
    ///
    /// ```rust
    /// use free_list::{FreeList, Linked};
    ///
    /// #[derive(Linked)]
    /// struct Item {
    ///     next: Option<Box<Self>>,
    /// }
    ///
    /// static ITEMS: FreeList<Item> = FreeList::new();
    ///
    /// assert!(ITEMS.get().is_none());
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self {
            head: Mutex::new(None),
            factory: None,
            resetter: None,
        }
    }

    /// Returns a builder for configuring the factory and resetter hooks.
    ///
    /// # Example
    ///
    /// ```rust
    /// use free_list::{FreeList, Linked};
    ///
    /// #[derive(Default, Linked)]
    /// struct Item {
    ///     value: u32,
    ///     next: Option<Box<Self>>,
    /// }
    ///
    /// let list = FreeList::builder()
    ///     .factory(|| Box::new(Item::default()))
    ///     .resetter(|item: &mut Item| item.value = 0)
    ///     .build();
    ///
    /// assert!(list.get().is_some());
    /// ```
    pub fn builder() -> FreeListBuilder<E> {
        FreeListBuilder::new()
    }

    #[must_use]
    pub(crate) fn from_hooks(factory: Option<Factory<E>>, resetter: Option<Resetter<E>>) -> Self {
        Self {
            head: Mutex::new(None),
            factory,
            resetter,
        }
    }

    /// Takes the most recently put idle item out of the list.
    ///
    /// If an idle item is available, it is passed to the resetter (if any) and returned.
    /// Otherwise the result of the factory is returned, or `None` if there is no factory.
    ///
    /// # Panics
    ///
    /// Panics raised by the factory or resetter propagate to the caller. The list remains
    /// valid; an item that was being reset when the resetter panicked is dropped.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::sync::atomic::{AtomicU32, Ordering};
    ///
    /// use free_list::{FreeList, Linked};
    ///
    /// #[derive(Linked)]
    /// struct Ticket {
    ///     number: u32,
    ///     next: Option<Box<Self>>,
    /// }
    ///
    /// static ISSUED: AtomicU32 = AtomicU32::new(0);
    ///
    /// let list = FreeList::builder()
    ///     .factory(|| {
    ///         Box::new(Ticket {
    ///             number: ISSUED.fetch_add(1, Ordering::Relaxed) + 1,
    ///             next: None,
    ///         })
    ///     })
    ///     .build();
    ///
    /// assert_eq!(list.get().map(|t| t.number), Some(1));
    /// assert_eq!(list.get().map(|t| t.number), Some(2));
    /// ```
    #[must_use]
    pub fn get(&self) -> Option<Box<E>> {
        let reused = {
            let mut head = self.head.lock();

            head.take().map(|mut item| {
                *head = item.next_mut().take();
                item
            })
        };

        if let Some(mut item) = reused {
            trace!(item_type = type_name::<E>(), "reusing idle item");

            if let Some(resetter) = &self.resetter {
                resetter(&mut item);
            }

            return Some(item);
        }

        let factory = self.factory.as_ref()?;

        trace!(item_type = type_name::<E>(), "no idle item, calling factory");
        Some(factory())
    }

    /// Puts an item into the list, making it the first one returned by the next
    /// [`get()`](Self::get).
    ///
    /// Whatever the item's linkage slot holds is released first and then overwritten.
    ///
    /// # Example
    ///
    /// ```rust
    /// use free_list::{FreeList, Linked};
    ///
    /// #[derive(Linked)]
    /// struct Buffer {
    ///     bytes: Vec<u8>,
    ///     next: Option<Box<Self>>,
    /// }
    ///
    /// let list = FreeList::new();
    ///
    /// let buffer = Box::new(Buffer { bytes: Vec::with_capacity(1024), next: None });
    /// let address = &raw const *buffer;
    /// list.put(buffer);
    ///
    /// let buffer = list.get().expect("buffer was just put back");
    /// assert_eq!(&raw const *buffer, address);
    /// ```
    pub fn put(&self, mut item: Box<E>) {
        // Nothing the caller left in the slot may join the chain. Releasing it runs item
        // destructors, which must not happen under the lock.
        release_chain(item.next_mut().take());

        {
            let mut head = self.head.lock();
            *item.next_mut() = head.take();
            *head = Some(item);
        }

        trace!(item_type = type_name::<E>(), "idle item put back");
    }
}

impl<E: Linked> Default for FreeList<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Linked> Drop for FreeList<E> {
    #[cfg_attr(test, mutants::skip)] // Only observable via logging and stack depth.
    fn drop(&mut self) {
        let released = release_chain(self.head.get_mut().take());

        debug!(
            item_type = type_name::<E>(),
            released, "free list dropped, idle items released"
        );
    }
}

impl<E: Linked> fmt::Debug for FreeList<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>())
            .field("has_factory", &self.factory.is_some())
            .field("has_resetter", &self.resetter.is_some())
            .finish_non_exhaustive()
    }
}
