use std::any::type_name;
use std::cell::Cell;
use std::fmt;
use std::marker::PhantomData;

use crate::pool::{Factory, Resetter};
use crate::{FreeList, Linked};

/// Builder for creating an instance of [`FreeList`] with hooks.
///
/// Both hooks are optional. A list built without any hooks is equivalent to
/// [`FreeList::new()`].
///
/// Hooks are fixed once the list is built; there is no way to change them while the list
/// is in use.
///
/// # Examples
///
/// ```
/// use free_list::{FreeList, Linked};
///
/// #[derive(Linked)]
/// struct Line {
///     text: String,
///     next: Option<Box<Self>>,
/// }
///
/// let list = FreeList::builder()
///     .factory(|| {
///         Box::new(Line {
///             text: String::with_capacity(80),
///             next: None,
///         })
///     })
///     .resetter(|line: &mut Line| line.text.clear())
///     .build();
///
/// let line = list.get().expect("the factory always produces an item");
/// assert!(line.text.capacity() >= 80);
/// ```
///
/// # Thread safety
///
/// The builder is thread-mobile ([`Send`]) and can be safely transferred between threads,
/// allowing list configuration to happen on different threads than where the list is used.
/// However, it is not thread-safe ([`Sync`]) as it contains mutable configuration state.
#[must_use]
pub struct FreeListBuilder<E: Linked> {
    factory: Option<Factory<E>>,
    resetter: Option<Resetter<E>>,

    // Prevents Sync while allowing Send - builders are thread-mobile but not thread-safe
    _not_sync: PhantomData<Cell<()>>,
}

impl<E: Linked> FreeListBuilder<E> {
    #[inline]
    pub(crate) fn new() -> Self {
        Self {
            factory: None,
            resetter: None,
            _not_sync: PhantomData,
        }
    }

    /// Sets the function that produces a new item when the list has no idle item.
    ///
    /// The factory is responsible for returning a ready-to-use item; the resetter is not
    /// applied to it.
    ///
    /// # Examples
    ///
    /// ```
    /// use free_list::{FreeList, Linked};
    ///
    /// #[derive(Linked)]
    /// struct Item {
    ///     value: u32,
    ///     next: Option<Box<Self>>,
    /// }
    ///
    /// let list = FreeList::builder()
    ///     .factory(|| Box::new(Item { value: 5, next: None }))
    ///     .build();
    ///
    /// assert_eq!(list.get().map(|i| i.value), Some(5));
    /// ```
    #[inline]
    pub fn factory<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Box<E> + Send + Sync + 'static,
    {
        self.factory = Some(Box::new(factory));
        self
    }

    /// Sets the function that restores a reused item to a clean state before it is returned
    /// by [`FreeList::get()`].
    ///
    /// # Examples
    ///
    /// ```
    /// use free_list::{FreeList, Linked};
    ///
    /// #[derive(Linked)]
    /// struct Item {
    ///     value: u32,
    ///     next: Option<Box<Self>>,
    /// }
    ///
    /// let list = FreeList::builder()
    ///     .resetter(|item: &mut Item| item.value = 0)
    ///     .build();
    ///
    /// list.put(Box::new(Item { value: 42, next: None }));
    /// assert_eq!(list.get().map(|i| i.value), Some(0));
    /// ```
    #[inline]
    pub fn resetter<F>(mut self, resetter: F) -> Self
    where
        F: Fn(&mut E) + Send + Sync + 'static,
    {
        self.resetter = Some(Box::new(resetter));
        self
    }

    /// Builds the free list with the specified configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use free_list::{FreeList, Linked};
    ///
    /// #[derive(Linked)]
    /// struct Item {
    ///     next: Option<Box<Self>>,
    /// }
    ///
    /// let list = FreeList::<Item>::builder().build();
    /// assert!(list.get().is_none());
    /// ```
    #[must_use]
    #[inline]
    pub fn build(self) -> FreeList<E> {
        FreeList::from_hooks(self.factory, self.resetter)
    }
}

impl<E: Linked> fmt::Debug for FreeListBuilder<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>())
            .field("has_factory", &self.factory.is_some())
            .field("has_resetter", &self.resetter.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use static_assertions::{assert_impl_all, assert_not_impl_any};

    use super::*;

    #[derive(Linked)]
    struct Item {
        value: u32,
        next: Option<Box<Self>>,
    }

    assert_impl_all!(FreeListBuilder<Item>: Send, fmt::Debug);
    assert_not_impl_any!(FreeListBuilder<Item>: Sync);

    #[test]
    fn builder_new_creates_default_state() {
        let builder = FreeListBuilder::<Item>::new();
        assert!(builder.factory.is_none());
        assert!(builder.resetter.is_none());
    }

    #[test]
    fn factory_sets_factory() {
        let builder = FreeListBuilder::new().factory(|| {
            Box::new(Item {
                value: 3,
                next: None,
            })
        });

        assert!(builder.factory.is_some());
        assert!(builder.resetter.is_none());
    }

    #[test]
    fn resetter_sets_resetter() {
        let builder = FreeListBuilder::new().resetter(|item: &mut Item| item.value = 0);

        assert!(builder.factory.is_none());
        assert!(builder.resetter.is_some());
    }

    #[test]
    fn factory_can_be_overridden() {
        let list = FreeListBuilder::new()
            .factory(|| {
                Box::new(Item {
                    value: 1,
                    next: None,
                })
            })
            .factory(|| {
                Box::new(Item {
                    value: 2,
                    next: None,
                })
            })
            .build();

        assert_eq!(list.get().map(|i| i.value), Some(2));
    }

    #[test]
    fn build_without_hooks_behaves_like_new() {
        let list = FreeListBuilder::<Item>::new().build();
        assert!(list.get().is_none());

        list.put(Box::new(Item {
            value: 9,
            next: None,
        }));
        assert_eq!(list.get().map(|i| i.value), Some(9));
    }

    #[test]
    fn builder_is_debug() {
        let builder = FreeListBuilder::<Item>::new().resetter(|_: &mut Item| {});
        let debug_output = format!("{builder:?}");
        assert!(debug_output.contains("FreeListBuilder"));
        assert!(debug_output.contains("has_resetter: true"));
    }

    #[test]
    fn builder_send_trait() {
        // Verify builder can be moved between threads.
        let builder = FreeListBuilder::new().factory(|| {
            Box::new(Item {
                value: 4,
                next: None,
            })
        });
        let handle = std::thread::spawn(move || builder.build());
        let list = handle.join().expect("thread completed successfully");

        assert_eq!(list.get().map(|i| i.value), Some(4));
    }
}
