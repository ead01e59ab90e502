mod array_store;
mod bitmap_store;
mod run_store;

use alloc::vec;
use core::mem;
use core::ops::{
    BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, RangeInclusive, Sub, SubAssign,
};
use core::slice;

use self::Store::{Array, Bitmap, Run};

pub use self::array_store::ArrayStore;
pub use self::bitmap_store::{BitmapIter, BitmapStore, BITMAP_BYTES, BITMAP_LENGTH};
pub use self::run_store::{RunIter, RunStore};

use alloc::boxed::Box;
use alloc::vec::Vec;

pub const ARRAY_LIMIT: u64 = 4096;

/// Which of the three representations a set currently uses.
///
/// The discriminator is not part of a store's wire form; callers keep it
/// alongside the serialized bytes and hand it back to deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKind {
    /// Sorted vector of 16-bit values.
    Array,
    /// 65536-bit dense bitmap.
    Bitmap,
    /// Sorted runs of consecutive values.
    Run,
}

#[derive(Clone)]
pub(crate) enum Store {
    Array(ArrayStore),
    Bitmap(BitmapStore),
    Run(RunStore),
}

#[derive(Clone)]
pub(crate) enum Iter<'a> {
    Array(slice::Iter<'a, u16>),
    Vec(vec::IntoIter<u16>),
    BitmapBorrowed(BitmapIter<&'a [u64; BITMAP_LENGTH]>),
    BitmapOwned(BitmapIter<Box<[u64; BITMAP_LENGTH]>>),
    RunBorrowed(RunIter<&'a [u16]>),
    RunOwned(RunIter<Vec<u16>>),
}

impl Store {
    pub fn new() -> Store {
        Array(ArrayStore::new())
    }

    pub fn full() -> Store {
        Run(RunStore::full())
    }

    pub fn kind(&self) -> StoreKind {
        match self {
            Array(_) => StoreKind::Array,
            Bitmap(_) => StoreKind::Bitmap,
            Run(_) => StoreKind::Run,
        }
    }

    #[inline]
    pub fn insert(&mut self, index: u16) -> bool {
        match self {
            Array(vec) => vec.insert(index),
            Bitmap(bits) => bits.insert(index),
            Run(runs) => runs.insert(index),
        }
    }

    pub fn remove(&mut self, index: u16) -> bool {
        match self {
            Array(vec) => vec.remove(index),
            Bitmap(bits) => bits.remove(index),
            Run(runs) => runs.remove(index),
        }
    }

    pub fn contains(&self, index: u16) -> bool {
        match self {
            Array(vec) => vec.contains(index),
            Bitmap(bits) => bits.contains(index),
            Run(runs) => runs.contains(index),
        }
    }

    pub fn len(&self) -> u64 {
        match self {
            Array(vec) => vec.len(),
            Bitmap(bits) => bits.len(),
            Run(runs) => runs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Array(vec) => vec.is_empty(),
            Bitmap(bits) => bits.is_empty(),
            Run(runs) => runs.is_empty(),
        }
    }

    pub fn min(&self) -> Option<u16> {
        match self {
            Array(vec) => vec.min(),
            Bitmap(bits) => bits.min(),
            Run(runs) => runs.min(),
        }
    }

    pub fn max(&self) -> Option<u16> {
        match self {
            Array(vec) => vec.max(),
            Bitmap(bits) => bits.max(),
            Run(runs) => runs.max(),
        }
    }

    pub fn rank(&self, index: u16) -> u64 {
        match self {
            Array(vec) => vec.rank(index),
            Bitmap(bits) => bits.rank(index),
            Run(runs) => runs.rank(index),
        }
    }

    pub fn select(&self, n: u64) -> Option<u16> {
        match self {
            Array(vec) => vec.select(n),
            Bitmap(bits) => bits.select(n),
            Run(runs) => runs.select(n),
        }
    }

    /// First `n` values, `1 <= n < self.len()`.
    pub fn limit(&self, n: u64) -> Store {
        match self {
            Array(vec) => {
                let mut out = vec.clone();
                out.remove_biggest(vec.len() - n);
                Array(out)
            }
            Bitmap(bits) => {
                if n <= ARRAY_LIMIT {
                    Array(ArrayStore::from_vec_unchecked(bits.iter().take(n as usize).collect()))
                } else {
                    let mut out = bits.clone();
                    out.remove_biggest(bits.len() - n);
                    Bitmap(out)
                }
            }
            Run(runs) => Run(runs.limit(n)),
        }
    }

    /// Number of runs of consecutive values, regardless of representation.
    pub fn count_runs(&self) -> u64 {
        match self {
            Array(vec) => {
                vec.iter()
                    .fold((-2, 0u64), |(prev, runs), &v| {
                        let new = i32::from(v);
                        if prev + 1 != new {
                            (new, runs + 1)
                        } else {
                            (new, runs)
                        }
                    })
                    .1
            }
            Bitmap(bits) => {
                let words = bits.as_array();
                let mut num_runs = 0u64;
                for i in 0..BITMAP_LENGTH - 1 {
                    let word = words[i];
                    let next_word = words[i + 1];
                    num_runs +=
                        u64::from(((word << 1) & !word).count_ones()) + ((word >> 63) & !next_word);
                }
                let last = words[BITMAP_LENGTH - 1];
                num_runs += u64::from(((last << 1) & !last).count_ones()) + (last >> 63);
                num_runs
            }
            Run(runs) => runs.n_runs() as u64,
        }
    }

    pub(crate) fn to_run(&self) -> Store {
        match self {
            Array(vec) => {
                let slice = vec.as_slice();
                let mut runs = RunStore::with_run_capacity(slice.len());
                let mut start = match slice.first() {
                    Some(&first) => first,
                    None => return Run(runs),
                };
                for (idx, &v) in slice[1..].iter().enumerate() {
                    if v - slice[idx] > 1 {
                        runs.push_run(start, slice[idx] - start);
                        start = v;
                    }
                }
                runs.push_run(start, *slice.last().unwrap() - start);
                Run(runs)
            }
            Bitmap(bits) => {
                let words = bits.as_array();
                let mut runs = RunStore::new();
                let mut current = words[0];
                let mut i = 0usize;
                loop {
                    // Skip over empty words
                    while current == 0 && i < BITMAP_LENGTH - 1 {
                        i += 1;
                        current = words[i];
                    }
                    // Reached the end without finding any more set bits
                    if current == 0 {
                        break;
                    }
                    let start = (64 * i) as u32 + current.trailing_zeros();

                    // Pad LSBs with 1s
                    current |= current - 1;

                    // Find the next 0
                    while current == u64::MAX && i < BITMAP_LENGTH - 1 {
                        i += 1;
                        current = words[i];
                    }

                    // Run continues until the end of the universe
                    if current == u64::MAX {
                        runs.push_run(start as u16, (65535 - start) as u16);
                        break;
                    }

                    let last = (64 * i) as u32 + (!current).trailing_zeros();
                    runs.push_run(start as u16, (last - 1 - start) as u16);

                    // pad LSBs with 0s
                    current &= current + 1;
                }
                Run(runs)
            }
            Run(_) => panic!("cannot convert run to run"),
        }
    }

    pub fn iter(&self) -> Iter<'_> {
        match self {
            Array(vec) => Iter::Array(vec.iter()),
            Bitmap(bits) => Iter::BitmapBorrowed(bits.iter()),
            Run(runs) => Iter::RunBorrowed(runs.iter()),
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Store::new()
    }
}

impl BitAnd<&Store> for &Store {
    type Output = Store;

    fn bitand(self, rhs: &Store) -> Store {
        match (self, rhs) {
            (Array(vec1), Array(vec2)) => Array(BitAnd::bitand(vec1, vec2)),
            (Array(vec), Bitmap(bits)) | (Bitmap(bits), Array(vec)) => {
                let mut vec = vec.clone();
                vec.retain(|&v| bits.contains(v));
                Array(vec)
            }
            (Bitmap(bits1), Bitmap(bits2)) => {
                let mut out = bits1.clone();
                BitAndAssign::bitand_assign(&mut out, bits2);
                Bitmap(out)
            }
            (Run(runs), Array(vec)) | (Array(vec), Run(runs)) => Array(runs.intersect_array(vec)),
            (Run(runs), Bitmap(bits)) | (Bitmap(bits), Run(runs)) => runs.intersect_bitmap(bits),
            (Run(runs1), Run(runs2)) => runs1.intersect_run(runs2).to_efficient(),
        }
    }
}

impl BitAndAssign<&Store> for Store {
    fn bitand_assign(&mut self, rhs: &Store) {
        match (&mut *self, rhs) {
            (Array(vec1), Array(vec2)) => {
                let this = mem::take(vec1);
                *vec1 = BitAnd::bitand(&this, vec2);
            }
            (Array(vec), Bitmap(bits)) => vec.retain(|&v| bits.contains(v)),
            (Array(vec), Run(runs)) => vec.retain(|&v| runs.contains(v)),
            (Bitmap(bits1), Bitmap(bits2)) => BitAndAssign::bitand_assign(bits1, bits2),
            (this, rhs) => *this = BitAnd::bitand(&*this, rhs),
        }
    }
}

impl BitOr<&Store> for &Store {
    type Output = Store;

    fn bitor(self, rhs: &Store) -> Store {
        match (self, rhs) {
            (Array(vec1), Array(vec2)) => Array(BitOr::bitor(vec1, vec2)),
            (Array(vec), Bitmap(bits)) | (Bitmap(bits), Array(vec)) => {
                let mut out = bits.clone();
                BitOrAssign::bitor_assign(&mut out, vec);
                Bitmap(out)
            }
            (Bitmap(bits1), Bitmap(bits2)) => {
                let mut out = bits1.clone();
                BitOrAssign::bitor_assign(&mut out, bits2);
                Bitmap(out)
            }
            (Run(runs), Array(vec)) | (Array(vec), Run(runs)) => {
                match runs.to_bitmap_or_array() {
                    Array(expanded) => Array(BitOr::bitor(&expanded, vec)),
                    Bitmap(mut bits) => {
                        BitOrAssign::bitor_assign(&mut bits, vec);
                        Bitmap(bits)
                    }
                    Run(_) => unreachable!(),
                }
            }
            (Run(runs), Bitmap(bits)) | (Bitmap(bits), Run(runs)) => {
                Bitmap(runs.union_bitmap(bits))
            }
            (Run(runs1), Run(runs2)) => runs1.union_run(runs2).to_efficient(),
        }
    }
}

impl BitOrAssign<&Store> for Store {
    fn bitor_assign(&mut self, rhs: &Store) {
        match (&mut *self, rhs) {
            (Array(vec1), Array(vec2)) => {
                let this = mem::take(vec1);
                *vec1 = BitOr::bitor(&this, vec2);
            }
            (Bitmap(bits1), Array(vec2)) => BitOrAssign::bitor_assign(bits1, vec2),
            (Bitmap(bits1), Bitmap(bits2)) => BitOrAssign::bitor_assign(bits1, bits2),
            (this, rhs) => *this = BitOr::bitor(&*this, rhs),
        }
    }
}

impl Sub<&Store> for &Store {
    type Output = Store;

    fn sub(self, rhs: &Store) -> Store {
        match (self, rhs) {
            (Array(vec1), Array(vec2)) => Array(Sub::sub(vec1, vec2)),
            (Array(vec), Bitmap(bits)) => {
                let mut vec = vec.clone();
                vec.retain(|&v| !bits.contains(v));
                Array(vec)
            }
            (Array(vec), Run(runs)) => {
                let mut vec = vec.clone();
                vec.retain(|&v| !runs.contains(v));
                Array(vec)
            }
            (Bitmap(bits1), Array(vec2)) => {
                let mut out = bits1.clone();
                SubAssign::sub_assign(&mut out, vec2);
                Bitmap(out)
            }
            (Bitmap(bits1), Bitmap(bits2)) => {
                let mut out = bits1.clone();
                SubAssign::sub_assign(&mut out, bits2);
                Bitmap(out)
            }
            (Bitmap(bits), Run(runs)) => {
                let mut out = bits.clone();
                for range in runs.ranges() {
                    out.remove_range(range);
                }
                Bitmap(out)
            }
            (Run(runs), Array(vec)) => match runs.to_bitmap_or_array() {
                Array(expanded) => Array(Sub::sub(&expanded, vec)),
                Bitmap(mut bits) => {
                    SubAssign::sub_assign(&mut bits, vec);
                    Bitmap(bits)
                }
                Run(_) => unreachable!(),
            },
            (Run(runs), Bitmap(bits)) => runs.difference_bitmap(bits),
            (Run(runs1), Run(runs2)) => runs1.difference_run(runs2).to_efficient(),
        }
    }
}

impl SubAssign<&Store> for Store {
    fn sub_assign(&mut self, rhs: &Store) {
        match (&mut *self, rhs) {
            (Array(vec1), Array(vec2)) => {
                let this = mem::take(vec1);
                *vec1 = Sub::sub(&this, vec2);
            }
            (Array(vec), Bitmap(bits)) => vec.retain(|&v| !bits.contains(v)),
            (Array(vec), Run(runs)) => vec.retain(|&v| !runs.contains(v)),
            (Bitmap(bits1), Array(vec2)) => SubAssign::sub_assign(bits1, vec2),
            (Bitmap(bits1), Bitmap(bits2)) => SubAssign::sub_assign(bits1, bits2),
            (Bitmap(bits), Run(runs)) => {
                for range in runs.ranges() {
                    bits.remove_range(range);
                }
            }
            (this, rhs) => *this = Sub::sub(&*this, rhs),
        }
    }
}

impl BitXor<&Store> for &Store {
    type Output = Store;

    fn bitxor(self, rhs: &Store) -> Store {
        match (self, rhs) {
            (Array(vec1), Array(vec2)) => Array(BitXor::bitxor(vec1, vec2)),
            (Array(vec), Bitmap(bits)) | (Bitmap(bits), Array(vec)) => {
                let mut out = bits.clone();
                BitXorAssign::bitxor_assign(&mut out, vec);
                Bitmap(out)
            }
            (Bitmap(bits1), Bitmap(bits2)) => {
                let mut out = bits1.clone();
                BitXorAssign::bitxor_assign(&mut out, bits2);
                Bitmap(out)
            }
            (Run(runs), Array(vec)) | (Array(vec), Run(runs)) => {
                match runs.to_bitmap_or_array() {
                    Array(expanded) => Array(BitXor::bitxor(&expanded, vec)),
                    Bitmap(mut bits) => {
                        BitXorAssign::bitxor_assign(&mut bits, vec);
                        Bitmap(bits)
                    }
                    Run(_) => unreachable!(),
                }
            }
            (Run(runs), Bitmap(bits)) | (Bitmap(bits), Run(runs)) => {
                runs.symmetric_difference_bitmap(bits)
            }
            (Run(runs1), Run(runs2)) => runs1.symmetric_difference_run(runs2).to_efficient(),
        }
    }
}

impl BitXorAssign<&Store> for Store {
    fn bitxor_assign(&mut self, rhs: &Store) {
        match (&mut *self, rhs) {
            (Array(vec1), Array(vec2)) => {
                let this = mem::take(vec1);
                *vec1 = BitXor::bitxor(&this, vec2);
            }
            (Bitmap(bits1), Array(vec2)) => BitXorAssign::bitxor_assign(bits1, vec2),
            (Bitmap(bits1), Bitmap(bits2)) => BitXorAssign::bitxor_assign(bits1, bits2),
            (this, rhs) => *this = BitXor::bitxor(&*this, rhs),
        }
    }
}

impl<'a> IntoIterator for &'a Store {
    type Item = u16;
    type IntoIter = Iter<'a>;
    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl IntoIterator for Store {
    type Item = u16;
    type IntoIter = Iter<'static>;
    fn into_iter(self) -> Iter<'static> {
        match self {
            Array(vec) => Iter::Vec(vec.into_vec().into_iter()),
            Bitmap(bits) => Iter::BitmapOwned(bits.into_iter()),
            Run(runs) => Iter::RunOwned(runs.into_iter()),
        }
    }
}

impl PartialEq for Store {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Array(vec1), Array(vec2)) => vec1 == vec2,
            (Bitmap(bits1), Bitmap(bits2)) => bits1 == bits2,
            (Run(runs1), Run(runs2)) => runs1 == runs2,
            // Different representations can still hold the same values
            _ => self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b),
        }
    }
}

impl Iterator for Iter<'_> {
    type Item = u16;

    fn next(&mut self) -> Option<u16> {
        match self {
            Iter::Array(inner) => inner.next().copied(),
            Iter::Vec(inner) => inner.next(),
            Iter::BitmapBorrowed(inner) => inner.next(),
            Iter::BitmapOwned(inner) => inner.next(),
            Iter::RunBorrowed(inner) => inner.next(),
            Iter::RunOwned(inner) => inner.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Iter::Array(inner) => inner.size_hint(),
            Iter::Vec(inner) => inner.size_hint(),
            Iter::BitmapBorrowed(inner) => inner.size_hint(),
            Iter::BitmapOwned(inner) => inner.size_hint(),
            Iter::RunBorrowed(inner) => inner.size_hint(),
            Iter::RunOwned(inner) => inner.size_hint(),
        }
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        match self {
            Iter::Array(inner) => inner.next_back().copied(),
            Iter::Vec(inner) => inner.next_back(),
            Iter::BitmapBorrowed(inner) => inner.next_back(),
            Iter::BitmapOwned(inner) => inner.next_back(),
            Iter::RunBorrowed(inner) => inner.next_back(),
            Iter::RunOwned(inner) => inner.next_back(),
        }
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl Store {
    pub fn insert_range(&mut self, range: RangeInclusive<u16>) -> u64 {
        match self {
            Array(vec) => vec.insert_range(range),
            Bitmap(bits) => bits.insert_range(range),
            Run(runs) => {
                let before = runs.len();
                runs.insert_span(u32::from(*range.start()), u32::from(*range.end()) + 1);
                runs.len() - before
            }
        }
    }

    pub fn remove_range(&mut self, range: RangeInclusive<u16>) -> u64 {
        match self {
            Array(vec) => vec.remove_range(range),
            Bitmap(bits) => bits.remove_range(range),
            Run(runs) => {
                let before = runs.len();
                runs.remove_span(u32::from(*range.start()), u32::from(*range.end()) + 1);
                before - runs.len()
            }
        }
    }
}
