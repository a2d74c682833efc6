use std::cmp::min;
use std::fmt::Display;
use std::mem;

use num_traits::{AsPrimitive, PrimInt};

// Bit stream
//------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitStream {
    data: Vec<u8>,
    // Bit length
    len: usize,
    // Max bit capacity
    capacity: usize,
    // Pointer to take bits
    cursor: usize,
}

impl BitStream {
    pub fn new(capacity: usize) -> Self {
        Self { data: vec![0; (capacity + 7) >> 3], len: 0, capacity, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn remaining(&self) -> usize {
        self.capacity - self.len
    }

    pub fn data(&self) -> &[u8] {
        &self.data[..(self.len + 7) >> 3]
    }

    // Grows the logical length with zero bits, which are already in place
    pub fn resize(&mut self, len: usize) {
        debug_assert!(len >= self.len, "Bit stream cannot shrink: Len {}, New len {len}", self.len);
        debug_assert!(
            len <= self.capacity,
            "Insufficient capacity: Capacity {}, Size {len}",
            self.capacity
        );
        self.len = len;
    }
}

// Push bits for bit stream
//------------------------------------------------------------------------------

impl BitStream {
    pub fn push_bits<T>(&mut self, bits: T, size: usize)
    where
        T: PrimInt + AsPrimitive<u32> + Display,
    {
        let max_bits = mem::size_of::<T>() * 8;
        debug_assert!(size <= 32, "Cannot push more than 32 bits at once: Size {size}");
        debug_assert!(
            size >= max_bits - bits.leading_zeros() as usize,
            "Bit count shouldn't exceed bit length: Length {size}, Bits {bits}"
        );
        debug_assert!(
            self.len + size <= self.capacity,
            "Insufficient capacity: Capacity {}, Size {}",
            self.capacity,
            self.len + size
        );

        let bits: u32 = bits.as_();
        let mut rem = size;
        while rem > 0 {
            let offset = self.len & 7;
            let pos = self.len >> 3;
            let n = min(8 - offset, rem);
            let chunk = ((bits >> (rem - n)) & ((1 << n) - 1)) as u8;
            self.data[pos] |= chunk << (8 - offset - n);
            self.len += n;
            rem -= n;
        }
    }

    pub fn extend(&mut self, arr: &[u8]) {
        debug_assert!(
            (self.len & 7) == 0,
            "Bit offset must be zero to extend from another array: Bit offset {}",
            self.len & 7
        );
        let pos = self.len >> 3;
        let arr_bits = arr.len() << 3;
        debug_assert!(
            self.len + arr_bits <= self.capacity,
            "Extension shouldn't overflow capacity: Capacity {}, Size {}",
            self.capacity,
            self.len + arr_bits
        );
        self.data[pos..pos + arr.len()].copy_from_slice(arr);
        self.len += arr_bits;
    }
}


// Take bits for bit stream
//------------------------------------------------------------------------------

impl BitStream {
    pub fn take_bit(&mut self) -> Option<bool> {
        if self.cursor == self.len {
            return None;
        }

        let offset = self.cursor & 7;
        let pos = self.cursor >> 3;
        let bit = (self.data[pos] << offset) >> 7;

        self.cursor += 1;

        Some(bit != 0)
    }
}

// Iterator for bit stream
//------------------------------------------------------------------------------

impl Iterator for BitStream {
    type Item = bool;
    fn next(&mut self) -> Option<Self::Item> {
        self.take_bit()
    }
}
