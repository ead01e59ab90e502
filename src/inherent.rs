use core::ops::Range;

use crate::store::{ArrayStore, RunStore, Store, StoreKind, ARRAY_LIMIT, BITMAP_BYTES};
use crate::util::RangeError;
use crate::ChunkSet;

/// Check a half-open `u32` range against the 16-bit universe.
fn validate_range(range: &Range<u32>) -> Result<(u32, u32), RangeError> {
    if range.end > 1 << 16 {
        return Err(RangeError::OutOfBounds);
    }
    if range.start >= range.end {
        return Err(RangeError::Empty);
    }
    Ok((range.start, range.end))
}

impl ChunkSet {
    /// Creates an empty set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chunkset::ChunkSet;
    /// let mut set = ChunkSet::new();
    /// assert!(set.is_empty());
    /// ```
    pub fn new() -> ChunkSet {
        ChunkSet { store: Store::new() }
    }

    /// Creates a set holding every value of the 16-bit universe, stored
    /// as a single run.
    pub fn full() -> ChunkSet {
        ChunkSet { store: Store::full() }
    }

    /// Number of stored values.
    ///
    /// For the run representation this is computed on demand in
    /// O(number of runs).
    pub fn len(&self) -> u64 {
        self.store.len()
    }

    /// Whether the set holds no values.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// The representation currently backing the set.
    pub fn kind(&self) -> StoreKind {
        self.store.kind()
    }

    /// Adds a value to the set. Returns `true` if the value was not
    /// already present.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chunkset::ChunkSet;
    /// let mut set = ChunkSet::new();
    /// assert!(set.insert(3));
    /// assert!(!set.insert(3));
    /// assert!(set.contains(3));
    /// ```
    pub fn insert(&mut self, value: u16) -> bool {
        if self.store.insert(value) {
            self.ensure_correct_store();
            true
        } else {
            false
        }
    }

    /// Removes a value from the set. Returns `true` if it was present.
    pub fn remove(&mut self, value: u16) -> bool {
        if self.store.remove(value) {
            self.ensure_correct_store();
            true
        } else {
            false
        }
    }

    /// Returns `true` if the set contains the value.
    pub fn contains(&self, value: u16) -> bool {
        self.store.contains(value)
    }

    /// Toggles a value's membership, returning whether it is present
    /// afterwards.
    pub fn flip(&mut self, value: u16) -> bool {
        if self.contains(value) {
            self.remove(value);
            false
        } else {
            self.insert(value);
            true
        }
    }

    /// Adds every value of the half-open range, returning how many were
    /// newly inserted.
    ///
    /// # Errors
    ///
    /// [`RangeError`] when `start >= end` or `end > 65536`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chunkset::ChunkSet;
    /// let mut set = ChunkSet::new();
    /// assert_eq!(set.insert_range(100..200), Ok(100));
    /// assert_eq!(set.insert_range(150..250), Ok(50));
    /// assert_eq!(set.len(), 150);
    /// ```
    pub fn insert_range(&mut self, range: Range<u32>) -> Result<u64, RangeError> {
        let (start, end) = validate_range(&range)?;
        let inclusive = start as u16..=(end - 1) as u16;
        let span = u64::from(end - start);

        let (added, new_store) = match &mut self.store {
            Store::Array(vec) => {
                let added = span - vec.intersection_len_range(inclusive.clone());
                let union_cardinality = vec.len() + added;
                if union_cardinality == 1 << 16 {
                    (added, Some(Store::full()))
                } else if union_cardinality <= ARRAY_LIMIT {
                    (vec.insert_range(inclusive), None)
                } else {
                    let mut bits = vec.to_bitmap_store();
                    bits.insert_range(inclusive);
                    (added, Some(Store::Bitmap(bits)))
                }
            }
            Store::Bitmap(bits) => {
                let added = span - bits.intersection_len_range(inclusive.clone());
                if bits.len() + added == 1 << 16 {
                    (added, Some(Store::full()))
                } else {
                    (bits.insert_range(inclusive), None)
                }
            }
            Store::Run(runs) => {
                let before = runs.len();
                runs.insert_span(start, end);
                (runs.len() - before, None)
            }
        };
        if let Some(new_store) = new_store {
            self.store = new_store;
        }
        Ok(added)
    }

    /// Removes every value of the half-open range, returning how many
    /// were present.
    ///
    /// # Errors
    ///
    /// [`RangeError`] when `start >= end` or `end > 65536`.
    pub fn remove_range(&mut self, range: Range<u32>) -> Result<u64, RangeError> {
        let (start, end) = validate_range(&range)?;
        let removed = self.store.remove_range(start as u16..=(end - 1) as u16);
        self.ensure_correct_store();
        Ok(removed)
    }

    /// Complements the set over the half-open range: values inside it
    /// toggle membership, values outside are untouched.
    ///
    /// # Errors
    ///
    /// [`RangeError`] when `start >= end` or `end > 65536`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chunkset::ChunkSet;
    /// let mut set = ChunkSet::new();
    /// set.insert_range(5..11).unwrap();
    /// set.insert_range(20..26).unwrap();
    /// set.flip_range(0..30).unwrap();
    /// let values: Vec<u16> = set.iter().collect();
    /// let expected: Vec<u16> = (0..5).chain(11..20).chain(26..30).collect();
    /// assert_eq!(values, expected);
    /// ```
    pub fn flip_range(&mut self, range: Range<u32>) -> Result<(), RangeError> {
        let (start, end) = validate_range(&range)?;
        let inclusive = start as u16..=(end - 1) as u16;

        let new_store = match &mut self.store {
            Store::Array(vec) => {
                let mut bits = vec.to_bitmap_store();
                bits.flip_range(inclusive);
                Some(Store::Bitmap(bits))
            }
            Store::Bitmap(bits) => {
                bits.flip_range(inclusive);
                None
            }
            Store::Run(runs) => Some(runs.complement_span(start, end).to_efficient()),
        };
        if let Some(new_store) = new_store {
            self.store = new_store;
        }
        self.ensure_correct_store();
        Ok(())
    }

    /// The smallest stored value.
    pub fn min(&self) -> Option<u16> {
        self.store.min()
    }

    /// The largest stored value.
    pub fn max(&self) -> Option<u16> {
        self.store.max()
    }

    /// Number of stored values less than or equal to `value`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chunkset::ChunkSet;
    /// let set: ChunkSet = [10u16, 20, 30].into_iter().collect();
    /// assert_eq!(set.rank(9), 0);
    /// assert_eq!(set.rank(20), 2);
    /// ```
    pub fn rank(&self, value: u16) -> u64 {
        self.store.rank(value)
    }

    /// The `n`-th smallest stored value (0-indexed), or `None` when
    /// `n >= self.len()`.
    pub fn select(&self, n: u64) -> Option<u16> {
        self.store.select(n)
    }

    /// A new set holding the `n` smallest stored values.
    pub fn limit(&self, n: u64) -> ChunkSet {
        if n == 0 {
            return ChunkSet::new();
        }
        if n >= self.len() {
            return self.clone();
        }
        let mut set = ChunkSet { store: self.store.limit(n) };
        set.ensure_correct_store();
        set
    }

    /// Converts to the representation with the smallest serialized form,
    /// returning whether the representation changed. Ties keep the
    /// current representation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chunkset::{ChunkSet, StoreKind};
    /// let mut set = ChunkSet::new();
    /// for v in 0..2000u16 {
    ///     set.insert(v);
    /// }
    /// assert_eq!(set.kind(), StoreKind::Array);
    /// assert!(set.optimize());
    /// assert_eq!(set.kind(), StoreKind::Run);
    /// ```
    pub fn optimize(&mut self) -> bool {
        let new_store = match &self.store {
            Store::Bitmap(_) => {
                let num_runs = self.store.count_runs() as usize;
                if BITMAP_BYTES <= RunStore::serialized_byte_size(num_runs) {
                    return false;
                }
                self.store.to_run()
            }
            Store::Array(array) => {
                let size_as_array = ArrayStore::serialized_byte_size(array.len());
                let num_runs = self.store.count_runs() as usize;
                if size_as_array <= RunStore::serialized_byte_size(num_runs) {
                    return false;
                }
                self.store.to_run()
            }
            Store::Run(runs) => {
                let size_as_run = RunStore::serialized_byte_size(runs.n_runs());
                let cardinality = runs.len();
                let size_as_array = ArrayStore::serialized_byte_size(cardinality);
                if size_as_run <= size_as_array.min(BITMAP_BYTES) {
                    return false;
                }
                if cardinality <= ARRAY_LIMIT {
                    Store::Array(runs.to_array())
                } else {
                    Store::Bitmap(runs.to_bitmap())
                }
            }
        };
        self.store = new_store;
        true
    }

    /// Shrinks the backing storage to fit the current contents.
    pub fn trim(&mut self) {
        match &mut self.store {
            Store::Array(vec) => vec.shrink_to_fit(),
            Store::Bitmap(_) => {}
            Store::Run(runs) => runs.shrink_to_fit(),
        }
    }

    /// An estimate of the in-memory size of the set, in bytes.
    pub fn size_in_bytes(&self) -> usize {
        match &self.store {
            Store::Array(vec) => 2 * vec.len() as usize + 4,
            Store::Bitmap(_) => BITMAP_BYTES,
            Store::Run(runs) => 4 * runs.n_runs() + 4,
        }
    }

    /// Convert between array and bitmap when the cardinality crosses the
    /// threshold. Run stores are only converted by explicit requests
    /// (`optimize`) or by operations producing oversized run results.
    pub(crate) fn ensure_correct_store(&mut self) {
        let new_store = match &self.store {
            Store::Bitmap(bits) if bits.len() <= ARRAY_LIMIT => {
                Some(Store::Array(bits.to_array_store()))
            }
            Store::Array(vec) if vec.len() > ARRAY_LIMIT => {
                Some(Store::Bitmap(vec.to_bitmap_store()))
            }
            _ => None,
        };
        if let Some(new_store) = new_store {
            self.store = new_store;
        }
    }
}

impl Default for ChunkSet {
    fn default() -> ChunkSet {
        ChunkSet::new()
    }
}

impl PartialEq for ChunkSet {
    fn eq(&self, other: &Self) -> bool {
        self.store == other.store
    }
}

impl FromIterator<u16> for ChunkSet {
    fn from_iter<I: IntoIterator<Item = u16>>(iterator: I) -> ChunkSet {
        let mut set = ChunkSet::new();
        set.extend(iterator);
        set
    }
}

impl Extend<u16> for ChunkSet {
    fn extend<I: IntoIterator<Item = u16>>(&mut self, iterator: I) {
        for value in iterator {
            self.insert(value);
        }
    }
}
