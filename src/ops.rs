use core::ops::{
    BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Sub, SubAssign,
};

use crate::ChunkSet;

impl BitOr<&ChunkSet> for &ChunkSet {
    type Output = ChunkSet;

    /// Union of `self` and `rhs` as a new set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chunkset::ChunkSet;
    /// let a: ChunkSet = (1..4u16).collect();
    /// let b: ChunkSet = (3..6u16).collect();
    /// assert_eq!(&a | &b, (1..6u16).collect());
    /// ```
    fn bitor(self, rhs: &ChunkSet) -> ChunkSet {
        let mut set = ChunkSet { store: &self.store | &rhs.store };
        set.ensure_correct_store();
        set
    }
}

impl BitOr<ChunkSet> for ChunkSet {
    type Output = ChunkSet;

    fn bitor(mut self, rhs: ChunkSet) -> ChunkSet {
        self |= &rhs;
        self
    }
}

impl BitOr<&ChunkSet> for ChunkSet {
    type Output = ChunkSet;

    fn bitor(mut self, rhs: &ChunkSet) -> ChunkSet {
        self |= rhs;
        self
    }
}

impl BitOr<ChunkSet> for &ChunkSet {
    type Output = ChunkSet;

    fn bitor(self, mut rhs: ChunkSet) -> ChunkSet {
        rhs |= self;
        rhs
    }
}

impl BitOrAssign<&ChunkSet> for ChunkSet {
    /// In-place union, semantically equivalent to the pure form.
    fn bitor_assign(&mut self, rhs: &ChunkSet) {
        self.store |= &rhs.store;
        self.ensure_correct_store();
    }
}

impl BitOrAssign<ChunkSet> for ChunkSet {
    fn bitor_assign(&mut self, rhs: ChunkSet) {
        *self |= &rhs;
    }
}

impl BitAnd<&ChunkSet> for &ChunkSet {
    type Output = ChunkSet;

    /// Intersection of `self` and `rhs` as a new set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chunkset::ChunkSet;
    /// let a: ChunkSet = (1..4u16).collect();
    /// let b: ChunkSet = (3..6u16).collect();
    /// assert_eq!(&a & &b, (3..4u16).collect());
    /// ```
    fn bitand(self, rhs: &ChunkSet) -> ChunkSet {
        let mut set = ChunkSet { store: &self.store & &rhs.store };
        set.ensure_correct_store();
        set
    }
}

impl BitAnd<ChunkSet> for ChunkSet {
    type Output = ChunkSet;

    fn bitand(mut self, rhs: ChunkSet) -> ChunkSet {
        self &= &rhs;
        self
    }
}

impl BitAnd<&ChunkSet> for ChunkSet {
    type Output = ChunkSet;

    fn bitand(mut self, rhs: &ChunkSet) -> ChunkSet {
        self &= rhs;
        self
    }
}

impl BitAnd<ChunkSet> for &ChunkSet {
    type Output = ChunkSet;

    fn bitand(self, mut rhs: ChunkSet) -> ChunkSet {
        rhs &= self;
        rhs
    }
}

impl BitAndAssign<&ChunkSet> for ChunkSet {
    /// In-place intersection, semantically equivalent to the pure form.
    fn bitand_assign(&mut self, rhs: &ChunkSet) {
        self.store &= &rhs.store;
        self.ensure_correct_store();
    }
}

impl BitAndAssign<ChunkSet> for ChunkSet {
    fn bitand_assign(&mut self, rhs: ChunkSet) {
        *self &= &rhs;
    }
}

impl Sub<&ChunkSet> for &ChunkSet {
    type Output = ChunkSet;

    /// Values of `self` not present in `rhs`, as a new set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chunkset::ChunkSet;
    /// let a: ChunkSet = (1..4u16).collect();
    /// let b: ChunkSet = (3..6u16).collect();
    /// assert_eq!(&a - &b, (1..3u16).collect());
    /// ```
    fn sub(self, rhs: &ChunkSet) -> ChunkSet {
        let mut set = ChunkSet { store: &self.store - &rhs.store };
        set.ensure_correct_store();
        set
    }
}

impl Sub<ChunkSet> for ChunkSet {
    type Output = ChunkSet;

    fn sub(mut self, rhs: ChunkSet) -> ChunkSet {
        self -= &rhs;
        self
    }
}

impl Sub<&ChunkSet> for ChunkSet {
    type Output = ChunkSet;

    fn sub(mut self, rhs: &ChunkSet) -> ChunkSet {
        self -= rhs;
        self
    }
}

impl Sub<ChunkSet> for &ChunkSet {
    type Output = ChunkSet;

    fn sub(self, rhs: ChunkSet) -> ChunkSet {
        self - &rhs
    }
}

impl SubAssign<&ChunkSet> for ChunkSet {
    /// In-place difference, semantically equivalent to the pure form.
    fn sub_assign(&mut self, rhs: &ChunkSet) {
        self.store -= &rhs.store;
        self.ensure_correct_store();
    }
}

impl SubAssign<ChunkSet> for ChunkSet {
    fn sub_assign(&mut self, rhs: ChunkSet) {
        *self -= &rhs;
    }
}

impl BitXor<&ChunkSet> for &ChunkSet {
    type Output = ChunkSet;

    /// Symmetric difference of `self` and `rhs` as a new set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chunkset::ChunkSet;
    /// let a: ChunkSet = (1..4u16).collect();
    /// let b: ChunkSet = (3..6u16).collect();
    /// assert_eq!(&a ^ &b, ((1..3u16).chain(4..6)).collect());
    /// ```
    fn bitxor(self, rhs: &ChunkSet) -> ChunkSet {
        let mut set = ChunkSet { store: &self.store ^ &rhs.store };
        set.ensure_correct_store();
        set
    }
}

impl BitXor<ChunkSet> for ChunkSet {
    type Output = ChunkSet;

    fn bitxor(mut self, rhs: ChunkSet) -> ChunkSet {
        self ^= &rhs;
        self
    }
}

impl BitXor<&ChunkSet> for ChunkSet {
    type Output = ChunkSet;

    fn bitxor(mut self, rhs: &ChunkSet) -> ChunkSet {
        self ^= rhs;
        self
    }
}

impl BitXor<ChunkSet> for &ChunkSet {
    type Output = ChunkSet;

    fn bitxor(self, mut rhs: ChunkSet) -> ChunkSet {
        rhs ^= self;
        rhs
    }
}

impl BitXorAssign<&ChunkSet> for ChunkSet {
    /// In-place symmetric difference, semantically equivalent to the
    /// pure form.
    fn bitxor_assign(&mut self, rhs: &ChunkSet) {
        self.store ^= &rhs.store;
        self.ensure_correct_store();
    }
}

impl BitXorAssign<ChunkSet> for ChunkSet {
    fn bitxor_assign(&mut self, rhs: ChunkSet) {
        *self ^= &rhs;
    }
}
