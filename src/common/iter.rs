use super::Version;

// Iterator for placing data in encoding region of QR
//------------------------------------------------------------------------------

// Walks column pairs from the right edge in boustrophedon order, skipping the
// vertical timing column. Yields every module of the walk as (x, y); callers
// filter out function modules.
pub struct EncRegionIter {
    right: isize,
    vert: usize,
    j: usize,
    size: usize,
}

impl EncRegionIter {
    pub const fn new(version: Version) -> Self {
        let size = version.width();
        Self { right: size as isize - 1, vert: 0, j: 0, size }
    }
}

impl Iterator for EncRegionIter {
    type Item = (usize, usize);
    fn next(&mut self) -> Option<Self::Item> {
        if self.right < 1 {
            return None;
        }

        let right = self.right as usize;
        let x = right - self.j;
        let upwards = ((right & 2) == 0) ^ (x < 6);
        let y = if upwards { self.size - 1 - self.vert } else { self.vert };

        self.j += 1;
        if self.j == 2 {
            self.j = 0;
            self.vert += 1;
            if self.vert == self.size {
                self.vert = 0;
                self.right -= 2;
                if self.right == 6 {
                    self.right = 5;
                }
            }
        }

        Some((x, y))
    }
}
