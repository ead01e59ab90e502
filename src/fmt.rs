use core::fmt;

use crate::ChunkSet;

impl fmt::Debug for ChunkSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.len() < 16 {
            write!(f, "ChunkSet<{:?}>", self.iter().collect::<alloc::vec::Vec<u16>>())
        } else {
            write!(
                f,
                "ChunkSet<{:?} values between {:?} and {:?}>",
                self.len(),
                self.min().unwrap(),
                self.max().unwrap()
            )
        }
    }
}
