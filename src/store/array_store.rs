use alloc::vec::Vec;
use core::cmp::Ordering::*;
use core::ops::{BitAnd, BitOr, BitXor, RangeInclusive, Sub};
use core::slice;

use super::bitmap_store::{bit, key, BitmapStore, BITMAP_LENGTH};

#[derive(Clone, Eq, PartialEq)]
pub struct ArrayStore {
    vec: Vec<u16>,
}

impl ArrayStore {
    pub fn new() -> ArrayStore {
        ArrayStore { vec: Vec::new() }
    }

    ///
    /// Create a new ArrayStore from a given vec.
    /// It is up to the caller to ensure the vec is sorted and deduplicated.
    ///
    /// # Panics
    ///
    /// When debug_assertions are enabled and the above invariant is not met
    pub fn from_vec_unchecked(vec: Vec<u16>) -> ArrayStore {
        debug_assert!(vec.windows(2).all(|w| w[0] < w[1]), "array store must be strictly sorted");
        ArrayStore { vec }
    }

    /// Validating constructor used by deserialization.
    pub fn try_from_vec(vec: Vec<u16>) -> Result<ArrayStore, &'static str> {
        if vec.windows(2).all(|w| w[0] < w[1]) {
            Ok(ArrayStore { vec })
        } else {
            Err("array store values are not strictly increasing")
        }
    }

    pub fn insert(&mut self, index: u16) -> bool {
        self.vec.binary_search(&index).map_err(|loc| self.vec.insert(loc, index)).is_err()
    }

    pub fn insert_range(&mut self, range: RangeInclusive<u16>) -> u64 {
        let start = *range.start();
        let end = *range.end();

        // Figure out the starting/ending position in the vec.
        let pos_start = self.vec.binary_search(&start).unwrap_or_else(|x| x);
        let pos_end = pos_start
            + match self.vec[pos_start..].binary_search(&end) {
                Ok(x) => x + 1,
                Err(x) => x,
            };

        // Overwrite the range in the middle - there's no need to take
        // into account any existing elements between start and end, as
        // they're all being added to the set.
        let dropped = self.vec.splice(pos_start..pos_end, start..=end);

        end as u64 - start as u64 + 1 - dropped.len() as u64
    }

    pub fn remove(&mut self, index: u16) -> bool {
        self.vec.binary_search(&index).map(|loc| self.vec.remove(loc)).is_ok()
    }

    pub fn remove_range(&mut self, range: RangeInclusive<u16>) -> u64 {
        let start = *range.start();
        let end = *range.end();

        let pos_start = self.vec.binary_search(&start).unwrap_or_else(|x| x);
        let pos_end = pos_start
            + match self.vec[pos_start..].binary_search(&end) {
                Ok(x) => x + 1,
                Err(x) => x,
            };
        self.vec.drain(pos_start..pos_end);
        (pos_end - pos_start) as u64
    }

    pub fn remove_biggest(&mut self, n: u64) {
        self.vec.truncate(self.vec.len() - n as usize);
    }

    pub fn contains(&self, index: u16) -> bool {
        self.vec.binary_search(&index).is_ok()
    }

    /// Number of stored values that fall within `range`.
    pub fn intersection_len_range(&self, range: RangeInclusive<u16>) -> u64 {
        let lo = self.vec.partition_point(|&v| v < *range.start());
        let hi = self.vec.partition_point(|&v| v <= *range.end());
        (hi - lo) as u64
    }

    pub fn retain(&mut self, f: impl FnMut(&u16) -> bool) {
        self.vec.retain(f);
    }

    pub fn to_bitmap_store(&self) -> BitmapStore {
        let mut bits = alloc::boxed::Box::new([0u64; BITMAP_LENGTH]);
        for &index in self.iter() {
            bits[key(index)] |= 1 << bit(index);
        }
        BitmapStore::from_unchecked(self.len(), bits)
    }

    pub fn len(&self) -> u64 {
        self.vec.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }

    pub fn min(&self) -> Option<u16> {
        self.vec.first().copied()
    }

    pub fn max(&self) -> Option<u16> {
        self.vec.last().copied()
    }

    pub fn rank(&self, index: u16) -> u64 {
        self.vec.partition_point(|&v| v <= index) as u64
    }

    pub fn select(&self, n: u64) -> Option<u16> {
        self.vec.get(n as usize).copied()
    }

    pub fn iter(&self) -> slice::Iter<'_, u16> {
        self.vec.iter()
    }

    pub fn into_vec(self) -> Vec<u16> {
        self.vec
    }

    pub fn as_slice(&self) -> &[u16] {
        &self.vec
    }

    pub fn shrink_to_fit(&mut self) {
        self.vec.shrink_to_fit();
    }

    /// Serialized form: a `u16` cardinality header followed by the values.
    pub fn serialized_byte_size(cardinality: u64) -> usize {
        2 + 2 * cardinality as usize
    }
}

impl Default for ArrayStore {
    fn default() -> Self {
        ArrayStore::new()
    }
}

impl BitAnd<&ArrayStore> for &ArrayStore {
    type Output = ArrayStore;

    fn bitand(self, rhs: &ArrayStore) -> ArrayStore {
        let mut vec = Vec::with_capacity(self.vec.len().min(rhs.vec.len()));
        let (mut i1, mut i2) = (self.iter(), rhs.iter());
        let (mut value1, mut value2) = (i1.next(), i2.next());
        loop {
            match (value1, value2) {
                (Some(v1), Some(v2)) => match v1.cmp(v2) {
                    Equal => {
                        vec.push(*v1);
                        value1 = i1.next();
                        value2 = i2.next();
                    }
                    Less => value1 = i1.next(),
                    Greater => value2 = i2.next(),
                },
                _ => break,
            }
        }
        ArrayStore { vec }
    }
}

impl BitOr<&ArrayStore> for &ArrayStore {
    type Output = ArrayStore;

    fn bitor(self, rhs: &ArrayStore) -> ArrayStore {
        let mut vec = Vec::with_capacity(self.vec.len() + rhs.vec.len());
        let (mut i1, mut i2) = (self.iter(), rhs.iter());
        let (mut value1, mut value2) = (i1.next(), i2.next());
        loop {
            match (value1, value2) {
                (Some(v1), Some(v2)) => match v1.cmp(v2) {
                    Equal => {
                        vec.push(*v1);
                        value1 = i1.next();
                        value2 = i2.next();
                    }
                    Less => {
                        vec.push(*v1);
                        value1 = i1.next();
                    }
                    Greater => {
                        vec.push(*v2);
                        value2 = i2.next();
                    }
                },
                (Some(v1), None) => {
                    vec.push(*v1);
                    vec.extend(i1.copied());
                    break;
                }
                (None, Some(v2)) => {
                    vec.push(*v2);
                    vec.extend(i2.copied());
                    break;
                }
                (None, None) => break,
            }
        }
        ArrayStore { vec }
    }
}

impl Sub<&ArrayStore> for &ArrayStore {
    type Output = ArrayStore;

    fn sub(self, rhs: &ArrayStore) -> ArrayStore {
        let mut vec = Vec::with_capacity(self.vec.len());
        let (mut i1, mut i2) = (self.iter(), rhs.iter());
        let (mut value1, mut value2) = (i1.next(), i2.next());
        loop {
            match (value1, value2) {
                (Some(v1), Some(v2)) => match v1.cmp(v2) {
                    Equal => {
                        value1 = i1.next();
                        value2 = i2.next();
                    }
                    Less => {
                        vec.push(*v1);
                        value1 = i1.next();
                    }
                    Greater => value2 = i2.next(),
                },
                (Some(v1), None) => {
                    vec.push(*v1);
                    vec.extend(i1.copied());
                    break;
                }
                (None, _) => break,
            }
        }
        ArrayStore { vec }
    }
}

impl BitXor<&ArrayStore> for &ArrayStore {
    type Output = ArrayStore;

    fn bitxor(self, rhs: &ArrayStore) -> ArrayStore {
        let mut vec = Vec::with_capacity(self.vec.len() + rhs.vec.len());
        let (mut i1, mut i2) = (self.iter(), rhs.iter());
        let (mut value1, mut value2) = (i1.next(), i2.next());
        loop {
            match (value1, value2) {
                (Some(v1), Some(v2)) => match v1.cmp(v2) {
                    Equal => {
                        value1 = i1.next();
                        value2 = i2.next();
                    }
                    Less => {
                        vec.push(*v1);
                        value1 = i1.next();
                    }
                    Greater => {
                        vec.push(*v2);
                        value2 = i2.next();
                    }
                },
                (Some(v1), None) => {
                    vec.push(*v1);
                    vec.extend(i1.copied());
                    break;
                }
                (None, Some(v2)) => {
                    vec.push(*v2);
                    vec.extend(i2.copied());
                    break;
                }
                (None, None) => break,
            }
        }
        ArrayStore { vec }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(values: &[u16]) -> ArrayStore {
        ArrayStore::from_vec_unchecked(values.to_vec())
    }

    #[test]
    fn insert_keeps_order() {
        let mut s = ArrayStore::new();
        assert!(s.insert(5));
        assert!(s.insert(1));
        assert!(s.insert(3));
        assert!(!s.insert(3));
        assert_eq!(s.as_slice(), &[1, 3, 5]);
    }

    #[test]
    fn insert_range_splices_over_existing() {
        let mut s = store(&[2, 5, 10]);
        assert_eq!(s.insert_range(4..=8), 4);
        assert_eq!(s.as_slice(), &[2, 4, 5, 6, 7, 8, 10]);
    }

    #[test]
    fn remove_range_drains() {
        let mut s = store(&[2, 5, 7, 10]);
        assert_eq!(s.remove_range(5..=9), 2);
        assert_eq!(s.as_slice(), &[2, 10]);
    }

    #[test]
    fn rank_and_select() {
        let s = store(&[3, 7, 9]);
        assert_eq!(s.rank(2), 0);
        assert_eq!(s.rank(3), 1);
        assert_eq!(s.rank(8), 2);
        assert_eq!(s.rank(u16::MAX), 3);
        assert_eq!(s.select(0), Some(3));
        assert_eq!(s.select(2), Some(9));
        assert_eq!(s.select(3), None);
    }

    #[test]
    fn set_ops() {
        let a = store(&[1, 2, 3, 5]);
        let b = store(&[2, 4, 5]);
        assert_eq!((&a & &b).as_slice(), &[2, 5]);
        assert_eq!((&a | &b).as_slice(), &[1, 2, 3, 4, 5]);
        assert_eq!((&a - &b).as_slice(), &[1, 3]);
        assert_eq!((&a ^ &b).as_slice(), &[1, 3, 4]);
    }

    #[test]
    fn intersection_len_range_counts_members() {
        let s = store(&[1, 4, 6, 9]);
        assert_eq!(s.intersection_len_range(4..=6), 2);
        assert_eq!(s.intersection_len_range(0..=u16::MAX), 4);
        assert_eq!(s.intersection_len_range(7..=8), 0);
    }
}
