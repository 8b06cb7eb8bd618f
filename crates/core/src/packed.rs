//! Nibble-packed glyph storage.
//!
//! Cell `i` lives in byte `i / 2`: even cells take the high nibble, odd cells
//! the low nibble. Writing one cell never disturbs its sibling.

use crate::types::Glyph;

/// Dense array of 4-bit cells, two per byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedStore {
    len: usize,
    bytes: Vec<u8>,
}

impl PackedStore {
    /// Allocate `len` transparent cells (`ceil(len / 2)` bytes).
    pub fn new(len: usize) -> Self {
        Self {
            len,
            bytes: vec![0; len.div_ceil(2)],
        }
    }

    /// Number of addressable cells.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Raw packed bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Raw packed bytes, mutable. Used by the byte-aligned blit.
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Byte holding cell `index`.
    #[inline(always)]
    pub const fn byte_index(index: usize) -> usize {
        index >> 1
    }

    #[inline(always)]
    const fn shift(index: usize) -> u32 {
        if index & 1 == 0 {
            4
        } else {
            0
        }
    }

    /// Read the nibble of cell `index`.
    ///
    /// Panics if `index >= len()`; bounds are the caller's job.
    #[inline(always)]
    pub fn get(&self, index: usize) -> u8 {
        debug_assert!(index < self.len);
        (self.bytes[Self::byte_index(index)] >> Self::shift(index)) & 0xF
    }

    /// Write the nibble of cell `index`. Values above 0xF are masked.
    #[inline(always)]
    pub fn set(&mut self, index: usize, value: u8) {
        debug_assert!(index < self.len);
        let shift = Self::shift(index);
        let keep = if shift == 4 { 0x0F } else { 0xF0 };
        let byte = &mut self.bytes[Self::byte_index(index)];
        *byte = (*byte & keep) | ((value & 0xF) << shift);
    }

    #[inline(always)]
    pub fn glyph(&self, index: usize) -> Glyph {
        Glyph::from_nibble(self.get(index))
    }

    #[inline(always)]
    pub fn set_glyph(&mut self, index: usize, glyph: Glyph) {
        self.set(index, glyph.nibble());
    }

    /// Zero-fill every cell (all transparent).
    pub fn reset(&mut self) {
        self.bytes.fill(0);
    }
}
