// Bit grid
//------------------------------------------------------------------------------

// Square bit matrix packed row-major, MSB first: bit index = y * size + x
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitGrid {
    data: Vec<u8>,
    size: usize,
}

impl BitGrid {
    pub fn new(size: usize) -> Self {
        Self { data: vec![0; Self::bytes_for(size)], size }
    }

    pub const fn bytes_for(size: usize) -> usize {
        (size * size + 7) >> 3
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    fn locate(&self, x: usize, y: usize) -> (usize, u8) {
        debug_assert!(x < self.size, "x out of bounds: Size {}, X {x}", self.size);
        debug_assert!(y < self.size, "y out of bounds: Size {}, Y {y}", self.size);

        let offset = y * self.size + x;
        (offset >> 3, 0b10000000 >> (offset & 7))
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        let (pos, mask) = self.locate(x, y);
        self.data[pos] & mask != 0
    }

    pub fn set(&mut self, x: usize, y: usize, on: bool) {
        let (pos, mask) = self.locate(x, y);
        if on {
            self.data[pos] |= mask;
        } else {
            self.data[pos] &= !mask;
        }
    }

    // Flips the module only when invert is set, so applying twice is a no-op
    pub fn invert(&mut self, x: usize, y: usize, invert: bool) {
        if invert {
            let (pos, mask) = self.locate(x, y);
            self.data[pos] ^= mask;
        }
    }

    pub fn count_ones(&self) -> usize {
        self.data.iter().map(|b| b.count_ones() as usize).sum()
    }
}
