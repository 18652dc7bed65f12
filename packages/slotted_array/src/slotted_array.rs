use std::mem;

use crate::{Error, Result, SlottedArrayBuilder};

/// A growable container that stores values in reusable slots addressed by index.
///
/// Inserting a value occupies the lowest-index vacant slot, or appends a new slot
/// at the end when none is vacant. Removing a value vacates its slot in place -
/// other values keep their indexes and the vacated slot is reused by a later
/// [`insert()`][3]. The slot buffer only grows on insertion; vacated slots
/// accumulate until reclaimed by [`compact()`][4] or cut off by
/// [`truncate()`][5].
///
/// # Index stability
///
/// Indexes returned by [`insert()`][3] remain valid until the value at that index
/// is removed, after which the index may be handed out again for a later
/// insertion. [`compact()`][4] and [`truncate()`][5] are the exception: both may
/// move or discard values, so indexes obtained before such a call must not be
/// used after it.
///
/// # Resource usage
///
/// The slot buffer grows geometrically as values are inserted and never shrinks
/// on removal. Use [`compact()`][4] to repack the surviving values and release
/// unused buffer space, and [`set_min_slot_count()`][6] to configure a floor
/// below which no shrink operation will take the slot count.
///
/// # Thread safety
///
/// The container performs no internal synchronization. All mutating operations
/// take `&mut self`, so the borrow checker serializes access; to share an array
/// across threads, wrap it in a lock.
///
/// # Example
///
/// ```rust
/// use slotted_array::SlottedArray;
///
/// let mut array = SlottedArray::new();
///
/// let first = array.insert("one")?;
/// let second = array.insert("two")?;
///
/// assert_eq!(array.get(first), Some(&"one"));
/// assert_eq!(array.get(second), Some(&"two"));
///
/// // Removing vacates the slot without disturbing the others.
/// assert_eq!(array.remove(first)?, "one");
/// assert_eq!(array.get(first), None);
/// assert_eq!(array.get(second), Some(&"two"));
///
/// // The vacated slot is the first one reused.
/// let third = array.insert("three")?;
/// assert_eq!(third, first);
/// # Ok::<(), slotted_array::Error>(())
/// ```
///
/// [3]: Self::insert
/// [4]: Self::compact
/// [5]: Self::truncate
/// [6]: Self::set_min_slot_count
#[derive(Debug)]
pub struct SlottedArray<T> {
    /// The slot buffer. Every index in `0..slots.len()` is addressable;
    /// whether it holds a value is determined by the slot itself.
    slots: Vec<Slot<T>>,

    /// Number of occupied slots. Always matches the number of `Occupied`
    /// entries in `slots`.
    used_count: usize,

    /// Floor below which no shrink operation takes the slot count.
    /// Zero means no floor.
    min_slot_count: usize,

    /// Lowest index of a vacant slot, if known. We use this to avoid scanning
    /// the buffer on every insertion. This being `None` does not imply that the
    /// array is full, it just means we do not know where the lowest vacant slot
    /// is. In other words, this is a cache, not the ground truth - we set it to
    /// `None` when we lose confidence that the data is still valid but have no
    /// need to look up the new value.
    first_vacant_index: Option<usize>,
}

/// One slot of the buffer. A vacant slot holds no value at all, so removed
/// values are dropped immediately rather than lingering until overwritten.
#[derive(Debug)]
enum Slot<T> {
    Occupied(T),

    Vacant,
}

impl<T> Slot<T> {
    fn is_occupied(&self) -> bool {
        matches!(self, Self::Occupied(_))
    }

    fn is_vacant(&self) -> bool {
        matches!(self, Self::Vacant)
    }
}

/// A shrink is worthwhile without `force` only when fewer than one slot in
/// this many holds a value. Above that occupancy, `compact()` repacks the
/// values but keeps the buffer.
const SHRINK_OCCUPANCY_FACTOR: usize = 4;

impl<T> SlottedArray<T> {
    /// Creates a new empty [`SlottedArray`].
    ///
    /// No allocation occurs until the first insertion, so this is usable as a
    /// static or const initializer and as an explicit reset value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use slotted_array::SlottedArray;
    ///
    /// let array = SlottedArray::<u32>::new();
    ///
    /// assert_eq!(array.len(), 0);
    /// assert_eq!(array.slot_count(), 0);
    /// assert!(array.is_empty());
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            used_count: 0,
            min_slot_count: 0,
            first_vacant_index: None,
        }
    }

    /// Starts building a new [`SlottedArray`].
    ///
    /// Use this when you want to customize the array configuration beyond the
    /// defaults, such as starting with a pre-created set of vacant slots.
    ///
    /// # Example
    ///
    /// ```rust
    /// use slotted_array::SlottedArray;
    ///
    /// let array = SlottedArray::<u32>::builder().min_slot_count(8).build();
    ///
    /// assert_eq!(array.slot_count(), 8);
    /// assert!(array.is_empty());
    /// ```
    pub fn builder() -> SlottedArrayBuilder<T> {
        SlottedArrayBuilder::new()
    }

    #[must_use]
    pub(crate) fn new_inner(min_slot_count: usize) -> Self {
        let mut slots = Vec::new();
        slots.resize_with(min_slot_count, || Slot::Vacant);

        Self {
            slots,
            used_count: 0,
            min_slot_count,
            first_vacant_index: (min_slot_count > 0).then_some(0),
        }
    }

    /// The number of values in the array.
    ///
    /// # Example
    ///
    /// ```rust
    /// use slotted_array::SlottedArray;
    ///
    /// let mut array = SlottedArray::new();
    /// assert_eq!(array.len(), 0);
    ///
    /// let index = array.insert(42)?;
    /// assert_eq!(array.len(), 1);
    ///
    /// array.remove(index)?;
    /// assert_eq!(array.len(), 0);
    /// # Ok::<(), slotted_array::Error>(())
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.used_count
    }

    /// Whether the array holds no values.
    ///
    /// An empty array may still be holding vacant slots and unused capacity.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.used_count == 0
    }

    /// The number of slots in the array, vacant ones included.
    ///
    /// Every index in `0..slot_count()` is addressable by [`get()`][1] and
    /// [`remove()`][2], though not every such slot holds a value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use slotted_array::SlottedArray;
    ///
    /// let mut array = SlottedArray::new();
    ///
    /// let index = array.insert("hello")?;
    /// assert_eq!(array.slot_count(), 1);
    ///
    /// // Removal vacates the slot but does not release it.
    /// array.remove(index)?;
    /// assert_eq!(array.slot_count(), 1);
    /// # Ok::<(), slotted_array::Error>(())
    /// ```
    ///
    /// [1]: Self::get
    /// [2]: Self::remove
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// The floor below which no shrink operation takes the slot count.
    #[must_use]
    pub fn min_slot_count(&self) -> usize {
        self.min_slot_count
    }

    /// The number of slots the array can hold without reallocating the buffer.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Returns a reference to the value at `index`, if that slot holds one.
    ///
    /// Returns `None` both for a vacant slot and for an index beyond
    /// [`slot_count()`][1] - absence of a value is an expected condition here,
    /// not an error.
    ///
    /// # Example
    ///
    /// ```rust
    /// use slotted_array::SlottedArray;
    ///
    /// let mut array = SlottedArray::new();
    /// let index = array.insert(42)?;
    ///
    /// assert_eq!(array.get(index), Some(&42));
    /// assert_eq!(array.get(index + 100), None);
    /// # Ok::<(), slotted_array::Error>(())
    /// ```
    ///
    /// [1]: Self::slot_count
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        match self.slots.get(index)? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant => None,
        }
    }

    /// Returns an exclusive reference to the value at `index`, if that slot
    /// holds one.
    ///
    /// # Example
    ///
    /// ```rust
    /// use slotted_array::SlottedArray;
    ///
    /// let mut array = SlottedArray::new();
    /// let index = array.insert("Hello".to_string())?;
    ///
    /// array
    ///     .get_mut(index)
    ///     .expect("slot was just occupied")
    ///     .push_str(", World!");
    ///
    /// assert_eq!(array.get(index).map(String::as_str), Some("Hello, World!"));
    /// # Ok::<(), slotted_array::Error>(())
    /// ```
    #[must_use]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        match self.slots.get_mut(index)? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant => None,
        }
    }

    /// Inserts a value into the first available slot and returns its index.
    ///
    /// The lowest-index vacant slot is reused if one exists; otherwise the
    /// buffer grows geometrically and the value lands in a new slot appended at
    /// the end. The returned index stays valid until the value is removed or
    /// the array is compacted or truncated.
    ///
    /// # Example
    ///
    /// ```rust
    /// use slotted_array::SlottedArray;
    ///
    /// let mut array = SlottedArray::new();
    ///
    /// assert_eq!(array.insert(5)?, 0);
    /// assert_eq!(array.insert(7)?, 1);
    ///
    /// array.remove(0)?;
    ///
    /// // The vacated slot is reused before any new slot is created.
    /// assert_eq!(array.insert(9)?, 0);
    /// # Ok::<(), slotted_array::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityOverflow`] if a grown buffer would exceed the
    /// platform's maximum allocation size, and [`Error::AllocationFailed`] if
    /// the allocator declines the request. The array is unchanged in both
    /// cases.
    pub fn insert(&mut self, value: T) -> Result<usize> {
        let index = if let Some(index) = self.first_vacant_slot() {
            let slot = self
                .slots
                .get_mut(index)
                .expect("vacant slot cache always points within the slot buffer");

            *slot = Slot::Occupied(value);

            // We just filled the lowest vacant slot; where the next lowest
            // vacant slot is (if any) is now unknown.
            self.first_vacant_index = None;

            index
        } else {
            // Every slot is occupied, so the value goes into a new slot at the
            // end. The Vec grows geometrically, keeping insertion amortized O(1).
            let index = self.slots.len();
            let new_slot_count = index.checked_add(1).ok_or(Error::CapacityOverflow)?;

            Self::ensure_buffer_fits(new_slot_count)?;
            self.slots.try_reserve(1)?;
            self.slots.push(Slot::Occupied(value));

            index
        };

        self.used_count = self
            .used_count
            .checked_add(1)
            .expect("used count is bounded by the slot count, which fits in memory");

        #[cfg(debug_assertions)]
        self.integrity_check();

        Ok(index)
    }

    /// Removes the value at `index` and returns it, vacating the slot.
    ///
    /// This is O(1): no other slot moves, so all other indexes remain valid.
    /// The vacated slot is reused by a later [`insert()`][1] and its buffer
    /// space is only released by [`compact()`][2] or [`truncate()`][3].
    ///
    /// # Example
    ///
    /// ```rust
    /// use slotted_array::SlottedArray;
    ///
    /// let mut array = SlottedArray::new();
    /// let index = array.insert("hello")?;
    ///
    /// assert_eq!(array.remove(index)?, "hello");
    /// assert_eq!(array.get(index), None);
    ///
    /// // Removing from an already vacant slot is an error.
    /// assert!(array.remove(index).is_err());
    /// # Ok::<(), slotted_array::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `index` is at or beyond
    /// [`slot_count()`][4], and [`Error::SlotVacant`] if the slot exists but
    /// holds no value.
    ///
    /// [1]: Self::insert
    /// [2]: Self::compact
    /// [3]: Self::truncate
    /// [4]: Self::slot_count
    pub fn remove(&mut self, index: usize) -> Result<T> {
        let slot_count = self.slots.len();
        let was_full = self.used_count == slot_count;

        let slot = self
            .slots
            .get_mut(index)
            .ok_or(Error::IndexOutOfBounds { index, slot_count })?;

        match mem::replace(slot, Slot::Vacant) {
            Slot::Occupied(value) => {
                self.used_count = self
                    .used_count
                    .checked_sub(1)
                    .expect("slot was occupied, so the used count cannot be zero");

                if was_full {
                    // The slot we just vacated is the only vacant one.
                    self.first_vacant_index = Some(index);
                } else {
                    self.note_vacated_slot(index);
                }

                #[cfg(debug_assertions)]
                self.integrity_check();

                Ok(value)
            }
            Slot::Vacant => Err(Error::SlotVacant { index }),
        }
    }

    /// Repacks the values toward the front of the buffer and releases wasted
    /// space.
    ///
    /// Vacated slots left behind by removals are eliminated by moving the
    /// surviving values to the lowest indexes, preserving their relative order.
    /// The slot count then shrinks to `max(len(), min_slot_count())` when
    /// `force` is set, or when occupancy is low enough that the shrink pays for
    /// itself; otherwise the repacked buffer is kept at its current size.
    ///
    /// All values remain retrievable after this call, but their indexes may
    /// have changed - do not retain indexes across a call to this method.
    ///
    /// # Example
    ///
    /// ```rust
    /// use slotted_array::SlottedArray;
    ///
    /// let mut array = SlottedArray::new();
    ///
    /// array.insert(5)?;
    /// array.insert(7)?;
    ///
    /// array.remove(0)?;
    /// assert_eq!(array.slot_count(), 2);
    ///
    /// array.compact(true);
    ///
    /// // The survivor moved into the vacated slot.
    /// assert_eq!(array.slot_count(), 1);
    /// assert_eq!(array.get(0), Some(&7));
    /// # Ok::<(), slotted_array::Error>(())
    /// ```
    pub fn compact(&mut self, force: bool) {
        // Repack: move every occupied slot to the lowest free index, keeping
        // the relative order of the values.
        let mut write = 0_usize;
        for read in 0..self.slots.len() {
            let read_is_occupied = self
                .slots
                .get(read)
                .is_some_and(Slot::is_occupied);

            if read_is_occupied {
                if read != write {
                    self.slots.swap(read, write);
                }

                write = write
                    .checked_add(1)
                    .expect("write index never exceeds the slot count");
            }
        }

        debug_assert_eq!(
            write, self.used_count,
            "repacking visited a different number of occupied slots than the used count"
        );

        if force || self.shrink_is_worthwhile() {
            let target = self.used_count.max(self.min_slot_count);
            self.slots.truncate(target);
            self.slots.shrink_to_fit();
        }

        // After repacking, the vacant slots (if any) start right after the values.
        self.first_vacant_index = (self.used_count < self.slots.len()).then_some(self.used_count);

        #[cfg(debug_assertions)]
        self.integrity_check();
    }

    /// Forces the slot count down to `new_slot_count`, discarding the excess.
    ///
    /// Any value in a slot at or beyond `new_slot_count` is silently dropped -
    /// this is a destructive operation, symmetric with the index instability of
    /// [`compact()`][1]. A `new_slot_count` at or above the current
    /// [`slot_count()`][2] leaves the array unchanged.
    ///
    /// # Example
    ///
    /// ```rust
    /// use slotted_array::SlottedArray;
    ///
    /// let mut array = SlottedArray::new();
    ///
    /// array.insert('a')?;
    /// array.insert('b')?;
    /// array.insert('c')?;
    ///
    /// array.truncate(1)?;
    ///
    /// assert_eq!(array.slot_count(), 1);
    /// assert_eq!(array.len(), 1);
    /// assert_eq!(array.get(0), Some(&'a'));
    /// # Ok::<(), slotted_array::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::BelowMinimumSlotCount`] if `new_slot_count` is below
    /// [`min_slot_count()`][3]; the array is unchanged in that case.
    ///
    /// [1]: Self::compact
    /// [2]: Self::slot_count
    /// [3]: Self::min_slot_count
    pub fn truncate(&mut self, new_slot_count: usize) -> Result<()> {
        if new_slot_count < self.min_slot_count {
            return Err(Error::BelowMinimumSlotCount {
                requested: new_slot_count,
                min_slot_count: self.min_slot_count,
            });
        }

        if new_slot_count >= self.slots.len() {
            return Ok(());
        }

        let dropped_values = self
            .slots
            .get(new_slot_count..)
            .map_or(0, |tail| tail.iter().filter(|slot| slot.is_occupied()).count());

        self.slots.truncate(new_slot_count);
        self.slots.shrink_to_fit();

        self.used_count = self
            .used_count
            .checked_sub(dropped_values)
            .expect("cannot discard more values than the array holds");

        if self
            .first_vacant_index
            .is_some_and(|index| index >= new_slot_count)
        {
            // The cached vacant slot was cut off; we do not know the new lowest.
            self.first_vacant_index = None;
        }

        #[cfg(debug_assertions)]
        self.integrity_check();

        Ok(())
    }

    /// Sets the floor below which no shrink operation takes the slot count.
    ///
    /// If `new_min_slot_count` exceeds the current [`slot_count()`][1], the
    /// buffer grows immediately with vacant slots so that the floor holds from
    /// the moment this call returns.
    ///
    /// # Example
    ///
    /// ```rust
    /// use slotted_array::SlottedArray;
    ///
    /// let mut array = SlottedArray::<u32>::new();
    ///
    /// array.set_min_slot_count(4)?;
    /// assert_eq!(array.slot_count(), 4);
    ///
    /// // Compaction respects the floor even with nothing stored.
    /// array.compact(true);
    /// assert_eq!(array.slot_count(), 4);
    /// # Ok::<(), slotted_array::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityOverflow`] if the grown buffer would exceed the
    /// platform's maximum allocation size, and [`Error::AllocationFailed`] if
    /// the allocator declines the request. The array is unchanged in both
    /// cases.
    ///
    /// [1]: Self::slot_count
    pub fn set_min_slot_count(&mut self, new_min_slot_count: usize) -> Result<()> {
        let old_slot_count = self.slots.len();

        if new_min_slot_count > old_slot_count {
            Self::ensure_buffer_fits(new_min_slot_count)?;

            let additional = new_min_slot_count
                .checked_sub(old_slot_count)
                .expect("guarded by the comparison above");

            self.slots.try_reserve(additional)?;

            // Infallible now that the capacity is reserved.
            self.slots.resize_with(new_min_slot_count, || Slot::Vacant);

            if self.first_vacant_index.is_none() && self.used_count == old_slot_count {
                // The array was full before growing, so the first appended
                // slot is the lowest vacant one.
                self.first_vacant_index = Some(old_slot_count);
            }
        }

        self.min_slot_count = new_min_slot_count;

        #[cfg(debug_assertions)]
        self.integrity_check();

        Ok(())
    }

    /// Returns the lowest index of a vacant slot, or `None` if every slot is
    /// occupied. Consults the cache first and falls back to a forward scan,
    /// refreshing the cache on a hit.
    fn first_vacant_slot(&mut self) -> Option<usize> {
        if let Some(index) = self.first_vacant_index {
            return Some(index);
        }

        let index = self.slots.iter().position(Slot::is_vacant)?;
        self.first_vacant_index = Some(index);
        Some(index)
    }

    /// Records that the slot at `index` became vacant.
    ///
    /// The cache only tightens downward: when it is empty we do not know
    /// whether an even lower slot is vacant, so it must stay empty and the next
    /// insertion rediscovers the lowest vacant slot by scanning.
    fn note_vacated_slot(&mut self, index: usize) {
        if let Some(current) = self.first_vacant_index {
            if index < current {
                self.first_vacant_index = Some(index);
            }
        }
    }

    /// Whether compaction should release buffer space even without `force`.
    fn shrink_is_worthwhile(&self) -> bool {
        let target = self.used_count.max(self.min_slot_count);

        target < self.slots.len()
            && self
                .used_count
                .saturating_mul(SHRINK_OCCUPANCY_FACTOR)
                < self.slots.len()
    }

    /// Rejects slot counts whose buffer would exceed the maximum size a single
    /// allocation may have. `Vec` reports the same condition through
    /// `try_reserve`, but folding it into the allocation error would lose the
    /// distinction between an impossible request and a declined one.
    fn ensure_buffer_fits(slot_count: usize) -> Result<()> {
        let max_buffer_bytes =
            usize::try_from(isize::MAX).expect("isize::MAX is non-negative, so it fits in usize");

        let required_bytes = slot_count
            .checked_mul(size_of::<Slot<T>>())
            .ok_or(Error::CapacityOverflow)?;

        if required_bytes > max_buffer_bytes {
            return Err(Error::CapacityOverflow);
        }

        Ok(())
    }

    #[cfg_attr(test, mutants::skip)] // This is essentially test logic, mutation is meaningless.
    #[cfg(debug_assertions)]
    fn integrity_check(&self) {
        let observed_used_count = self.slots.iter().filter(|slot| slot.is_occupied()).count();

        assert!(
            self.used_count == observed_used_count,
            "used count {} does not match the observed occupied slot count {}",
            self.used_count,
            observed_used_count,
        );

        assert!(
            self.min_slot_count <= self.slots.len(),
            "minimum slot count {} exceeds the slot count {}",
            self.min_slot_count,
            self.slots.len(),
        );

        if let Some(index) = self.first_vacant_index {
            let observed_lowest_vacant = self.slots.iter().position(Slot::is_vacant);

            assert!(
                observed_lowest_vacant == Some(index),
                "vacant slot cache {index} does not point at the lowest vacant slot {observed_lowest_vacant:?}",
            );
        }
    }
}

impl<T> Default for SlottedArray<T> {
    /// Creates a new empty [`SlottedArray`].
    fn default() -> Self {
        Self::new()
    }
}
