use std::marker::PhantomData;

use crate::SlottedArray;

/// Builder for creating an instance of [`SlottedArray`].
///
/// You only need to use this builder if you want to customize the array
/// configuration. The default configuration used by [`SlottedArray::new()`][1]
/// is sufficient for most use cases.
///
/// # Examples
///
/// ```
/// use slotted_array::SlottedArray;
///
/// let array = SlottedArray::<u32>::builder().min_slot_count(16).build();
///
/// assert_eq!(array.slot_count(), 16);
/// ```
///
/// [1]: SlottedArray::new
#[must_use]
pub struct SlottedArrayBuilder<T> {
    min_slot_count: usize,

    _item: PhantomData<T>,
}

impl<T> std::fmt::Debug for SlottedArrayBuilder<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlottedArrayBuilder")
            .field(
                "item_type",
                &std::format_args!("{}", std::any::type_name::<T>()),
            )
            .field("min_slot_count", &self.min_slot_count)
            .finish()
    }
}

impl<T> SlottedArrayBuilder<T> {
    pub(crate) fn new() -> Self {
        Self {
            min_slot_count: 0,
            _item: PhantomData,
        }
    }

    /// Sets the floor below which no shrink operation takes the slot count.
    /// The built array starts with this many vacant slots already created.
    ///
    /// # Examples
    ///
    /// ```
    /// use slotted_array::SlottedArray;
    ///
    /// let mut array = SlottedArray::builder().min_slot_count(4).build();
    ///
    /// let index = array.insert("hello")?;
    /// array.remove(index)?;
    /// array.compact(true);
    ///
    /// // The floor holds even after a forced compaction.
    /// assert_eq!(array.slot_count(), 4);
    /// # Ok::<(), slotted_array::Error>(())
    /// ```
    pub fn min_slot_count(mut self, min_slot_count: usize) -> Self {
        self.min_slot_count = min_slot_count;
        self
    }

    /// Builds the slotted array with the specified configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use slotted_array::SlottedArray;
    ///
    /// let array = SlottedArray::<u32>::builder().build();
    ///
    /// assert!(array.is_empty());
    /// ```
    #[must_use]
    pub fn build(self) -> SlottedArray<T> {
        SlottedArray::new_inner(self.min_slot_count)
    }
}
