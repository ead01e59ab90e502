use std::io;

use bytemuck::cast_slice_mut;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::store::{
    ArrayStore, BitmapStore, RunStore, Store, StoreKind, BITMAP_BYTES, BITMAP_LENGTH,
};
use crate::ChunkSet;

fn corrupt(message: &'static str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}

impl ChunkSet {
    /// Size in bytes of the serialized representation.
    ///
    /// Equals the number of bytes [`ChunkSet::serialize_into`] writes:
    /// `2 + 2 * len` for an array, 8192 for a bitmap and `2 + 4 * runs`
    /// for runs.
    pub fn serialized_size(&self) -> usize {
        match &self.store {
            Store::Array(vec) => ArrayStore::serialized_byte_size(vec.len()),
            Store::Bitmap(_) => BITMAP_BYTES,
            Store::Run(runs) => RunStore::serialized_byte_size(runs.n_runs()),
        }
    }

    /// Serialize into the little-endian wire format.
    ///
    /// The representation discriminator is not part of the payload; the
    /// caller stores [`ChunkSet::kind`] alongside it and passes it back
    /// to [`ChunkSet::deserialize_from`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chunkset::ChunkSet;
    ///
    /// let set: ChunkSet = (1..4u16).collect();
    /// let mut bytes = Vec::with_capacity(set.serialized_size());
    /// set.serialize_into(&mut bytes).unwrap();
    /// let back = ChunkSet::deserialize_from(set.kind(), &bytes[..]).unwrap();
    /// assert_eq!(set, back);
    /// ```
    pub fn serialize_into<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        match &self.store {
            Store::Array(vec) => {
                writer.write_u16::<LittleEndian>(vec.len() as u16)?;
                for &value in vec.iter() {
                    writer.write_u16::<LittleEndian>(value)?;
                }
            }
            Store::Bitmap(bits) => {
                for &word in bits.as_array() {
                    writer.write_u64::<LittleEndian>(word)?;
                }
            }
            Store::Run(runs) => {
                writer.write_u16::<LittleEndian>(runs.n_runs() as u16)?;
                for &entry in runs.as_vl_slice() {
                    writer.write_u16::<LittleEndian>(entry)?;
                }
            }
        }
        Ok(())
    }

    /// Deserialize a set previously written by
    /// [`ChunkSet::serialize_into`] as the representation `kind`.
    ///
    /// All invariants are validated: array values must be strictly
    /// increasing, runs must be sorted, non-adjacent and contained in
    /// the 16-bit universe. Violations surface as
    /// [`io::ErrorKind::InvalidData`].
    pub fn deserialize_from<R: io::Read>(kind: StoreKind, mut reader: R) -> io::Result<ChunkSet> {
        let store = match kind {
            StoreKind::Array => {
                let cardinality = reader.read_u16::<LittleEndian>()?;
                let mut values = vec![0u16; cardinality as usize];
                reader.read_exact(cast_slice_mut(&mut values))?;
                values.iter_mut().for_each(|n| *n = u16::from_le(*n));
                let array = ArrayStore::try_from_vec(values).map_err(corrupt)?;
                Store::Array(array)
            }
            StoreKind::Bitmap => {
                let mut words = Box::new([0u64; BITMAP_LENGTH]);
                reader.read_exact(cast_slice_mut(&mut words[..]))?;
                words.iter_mut().for_each(|n| *n = u64::from_le(*n));
                Store::Bitmap(BitmapStore::from_bits(words))
            }
            StoreKind::Run => {
                let n_runs = reader.read_u16::<LittleEndian>()?;
                let mut vl = vec![0u16; 2 * n_runs as usize];
                reader.read_exact(cast_slice_mut(&mut vl))?;
                vl.iter_mut().for_each(|n| *n = u16::from_le(*n));
                let runs = RunStore::try_from_vl(vl).map_err(corrupt)?;
                Store::Run(runs)
            }
        };
        let mut set = ChunkSet { store };
        set.ensure_correct_store();
        Ok(set)
    }
}
