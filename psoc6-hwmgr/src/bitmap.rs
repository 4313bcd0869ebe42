//! Packed bit storage
//!
//! Bit `n` lives in byte `n >> 3` under mask `1 << (n & 7)`. The store has no
//! locking of its own; [`ResourceManager`](crate::ResourceManager) serialises
//! access.

/// Fixed size bit array, all bits clear on creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitmapStore<const BYTES: usize> {
    bytes: [u8; BYTES],
}

impl<const BYTES: usize> BitmapStore<BYTES> {
    /// Number of bits the store can hold.
    pub const CAPACITY: usize = BYTES * 8;

    /// Create an empty [`BitmapStore`]
    pub const fn new() -> Self {
        Self { bytes: [0; BYTES] }
    }

    #[inline]
    const fn locate(bit: u16) -> (usize, u8) {
        ((bit >> 3) as usize, 1 << (bit & 7))
    }

    /// Whether `bit` is set.
    ///
    /// Panics if `bit` is beyond [`Self::CAPACITY`].
    pub fn is_set(&self, bit: u16) -> bool {
        let (byte, mask) = Self::locate(bit);
        self.bytes[byte] & mask != 0
    }

    /// Set `bit`.
    pub fn set(&mut self, bit: u16) {
        let (byte, mask) = Self::locate(bit);
        self.bytes[byte] |= mask;
    }

    /// Clear `bit`.
    pub fn clear(&mut self, bit: u16) {
        let (byte, mask) = Self::locate(bit);
        self.bytes[byte] &= !mask;
    }

    /// Clear every bit.
    pub fn clear_all(&mut self) {
        self.bytes = [0; BYTES];
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.bytes.iter().map(|b| b.count_ones() as usize).sum()
    }
}

impl<const BYTES: usize> Default for BitmapStore<BYTES> {
    fn default() -> Self {
        Self::new()
    }
}
