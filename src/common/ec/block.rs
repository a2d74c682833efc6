use super::{compute_remainder, G, MAX_BLOCK_SIZE, MAX_EC_SIZE};

// Codeword block: data codewords followed by their ecc codewords
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Block {
    data: [u8; MAX_BLOCK_SIZE],
    // Block length
    len: usize,
    // Data length
    dlen: usize,
}

impl Block {
    // Generator is shared across all blocks of a symbol
    pub fn with_generator(raw: &[u8], gen: &[G]) -> Self {
        let dlen = raw.len();
        let len = dlen + gen.len();
        debug_assert!(len <= MAX_BLOCK_SIZE, "Block too long: {len}");
        debug_assert!(gen.len() <= MAX_EC_SIZE, "Too many ecc codewords: {}", gen.len());

        let mut data = [0u8; MAX_BLOCK_SIZE];
        data[..dlen].copy_from_slice(raw);
        data[dlen..len].copy_from_slice(&compute_remainder(raw, gen));
        Self { data, len, dlen }
    }

    pub fn data(&self) -> &[u8] {
        &self.data[..self.dlen]
    }

    pub fn ecc(&self) -> &[u8] {
        &self.data[self.dlen..self.len]
    }
}
