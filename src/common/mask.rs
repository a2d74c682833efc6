use std::ops::Deref;

use tracing::trace;

use super::error::{QRError, QRResult};
use super::BitGrid;
use crate::builder::Canvas;

#[derive(Debug, Default, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct MaskPattern(u8);

impl MaskPattern {
    pub fn new(pattern: u8) -> QRResult<Self> {
        match pattern {
            0..=7 => Ok(Self(pattern)),
            _ => Err(QRError::InvalidMaskingPattern),
        }
    }

    pub fn all() -> impl Iterator<Item = MaskPattern> {
        (0..8).map(MaskPattern)
    }
}

impl Deref for MaskPattern {
    type Target = u8;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

mod mask_functions {
    pub fn checkerboard(x: usize, y: usize) -> bool {
        (x + y) & 1 == 0
    }

    pub fn horizontal_lines(_: usize, y: usize) -> bool {
        y & 1 == 0
    }

    pub fn vertical_lines(x: usize, _: usize) -> bool {
        x % 3 == 0
    }

    pub fn diagonal_lines(x: usize, y: usize) -> bool {
        (x + y) % 3 == 0
    }

    pub fn large_checkerboard(x: usize, y: usize) -> bool {
        ((x / 3) + (y >> 1)) & 1 == 0
    }

    pub fn fields(x: usize, y: usize) -> bool {
        ((x * y) & 1) + ((x * y) % 3) == 0
    }

    pub fn diamonds(x: usize, y: usize) -> bool {
        (((x * y) & 1) + ((x * y) % 3)) & 1 == 0
    }

    pub fn meadow(x: usize, y: usize) -> bool {
        (((x + y) & 1) + ((x * y) % 3)) & 1 == 0
    }
}

impl MaskPattern {
    pub fn mask_functions(self) -> fn(usize, usize) -> bool {
        match *self {
            0b000 => mask_functions::checkerboard,
            0b001 => mask_functions::horizontal_lines,
            0b010 => mask_functions::vertical_lines,
            0b011 => mask_functions::diagonal_lines,
            0b100 => mask_functions::large_checkerboard,
            0b101 => mask_functions::fields,
            0b110 => mask_functions::diamonds,
            0b111 => mask_functions::meadow,
            _ => unreachable!("Mask pattern is validated on construction"),
        }
    }
}


// Mask selection
//------------------------------------------------------------------------------

// Tries every pattern on the canvas, keeping the first one with the lowest
// penalty. Format bits are redrawn per candidate so they take part in scoring.
pub fn apply_best_mask(canvas: &mut Canvas) -> MaskPattern {
    let mut best = (MaskPattern(0), u32::MAX);
    for mask in MaskPattern::all() {
        canvas.draw_format_info(mask);
        canvas.apply_mask(mask);
        let pen = compute_total_penalty(canvas.modules());
        canvas.apply_mask(mask);
        trace!(mask = *mask, penalty = pen, "Scored mask");

        if pen < best.1 {
            best = (mask, pen);
        }
    }

    let (mask, _) = best;
    canvas.draw_format_info(mask);
    canvas.apply_mask(mask);
    mask
}

// Penalty computation
//------------------------------------------------------------------------------

pub fn compute_total_penalty(grid: &BitGrid) -> u32 {
    let adj_pen = compute_adjacent_penalty(grid);
    let blk_pen = compute_block_penalty(grid);
    let fp_pen = compute_finder_pattern_penalty(grid);
    let bal_pen = compute_balance_penalty(grid);
    adj_pen + blk_pen + fp_pen + bal_pen
}

// N1: runs of 5 or more same colored modules, rows and columns counted apart
fn compute_adjacent_penalty(grid: &BitGrid) -> u32 {
    let w = grid.size();
    let run_penalty = |line: &mut dyn Iterator<Item = bool>| {
        let mut pen = 0;
        let mut last = None;
        let mut run = 0;
        for clr in line {
            if last != Some(clr) {
                last = Some(clr);
                run = 1;
                continue;
            }
            run += 1;
            if run == 5 {
                pen += PENALTY_N1;
            } else if run > 5 {
                pen += 1;
            }
        }
        pen
    };

    let mut pen = 0;
    for i in 0..w {
        pen += run_penalty(&mut (0..w).map(|x| grid.get(x, i)));
        pen += run_penalty(&mut (0..w).map(|y| grid.get(i, y)));
    }
    pen
}

// N2: every uniform 2x2 block, overlapping blocks included
fn compute_block_penalty(grid: &BitGrid) -> u32 {
    let mut pen = 0;
    let w = grid.size();
    for y in 1..w {
        for x in 1..w {
            let clr = grid.get(x, y);
            if clr == grid.get(x - 1, y - 1) && clr == grid.get(x, y - 1) && clr == grid.get(x - 1, y)
            {
                pen += PENALTY_N2;
            }
        }
    }
    pen
}

// N3: 1:1:3:1:1 finder-like run with four light modules on one side. The row
// register walks row y while the column register walks column y through the
// swapped read.
fn compute_finder_pattern_penalty(grid: &BitGrid) -> u32 {
    let mut pen = 0;
    let w = grid.size();
    for y in 0..w {
        let mut bits_row = 0u16;
        let mut bits_col = 0u16;
        for x in 0..w {
            bits_row = ((bits_row << 1) & 0x7FF) | grid.get(x, y) as u16;
            bits_col = ((bits_col << 1) & 0x7FF) | grid.get(y, x) as u16;

            // 11 bits accumulated
            if x >= 10 {
                if FINDER_LIKE_PATTERNS.contains(&bits_row) {
                    pen += PENALTY_N3;
                }
                if FINDER_LIKE_PATTERNS.contains(&bits_col) {
                    pen += PENALTY_N3;
                }
            }
        }
    }
    pen
}

// N4: 10 per 5% step the dark ratio strays outside 45%..55%
fn compute_balance_penalty(grid: &BitGrid) -> u32 {
    let dark = grid.count_ones();
    let total = grid.size() * grid.size();
    let mut pen = 0;
    let mut k = 0;
    while dark * 20 < (9 - k) * total || dark * 20 > (11 + k) * total {
        pen += PENALTY_N4;
        k += 1;
    }
    pen
}

#[cfg(test)]
mod penalty_tests {
    use super::{
        compute_adjacent_penalty, compute_balance_penalty, compute_block_penalty,
        compute_finder_pattern_penalty, compute_total_penalty,
    };
    use crate::common::BitGrid;

    fn checkerboard(size: usize) -> BitGrid {
        let mut grid = BitGrid::new(size);
        for y in 0..size {
            for x in 0..size {
                grid.set(x, y, (x + y) & 1 == 0);
            }
        }
        grid
    }

    #[test]
    fn test_all_light() {
        let grid = BitGrid::new(21);
        // 42 lines, each a single run of 21: 3 + 16
        assert_eq!(compute_adjacent_penalty(&grid), 42 * 19);
        assert_eq!(compute_block_penalty(&grid), 20 * 20 * 3);
        assert_eq!(compute_finder_pattern_penalty(&grid), 0);
        assert_eq!(compute_balance_penalty(&grid), 90);
        assert_eq!(compute_total_penalty(&grid), 798 + 1200 + 90);
    }

    #[test]
    fn test_checkerboard() {
        let grid = checkerboard(21);
        assert_eq!(grid.count_ones(), 221);
        assert_eq!(compute_total_penalty(&grid), 0);
    }

    #[test]
    fn test_adjacent_penalty_run_of_7() {
        let mut grid = checkerboard(21);
        for x in 0..7 {
            grid.set(x, 0, true);
        }
        assert_eq!(compute_adjacent_penalty(&grid), 5);
    }

    #[test]
    fn test_block_penalty() {
        let mut grid = checkerboard(21);
        grid.set(1, 0, true);
        grid.set(0, 1, true);
        assert_eq!(compute_block_penalty(&grid), 3);
    }

    #[test]
    fn test_finder_pattern_penalty() {
        let pattern = [true, false, true, true, true, false, true, false, false, false, false];
        let mut grid = BitGrid::new(21);
        for (x, &b) in pattern.iter().enumerate() {
            grid.set(x, 0, b);
        }
        assert_eq!(compute_finder_pattern_penalty(&grid), 40);

        // Reversed run down a column, ending at the bottom edge
        for (y, &b) in pattern.iter().rev().enumerate() {
            grid.set(15, y + 10, b);
        }
        assert_eq!(compute_finder_pattern_penalty(&grid), 80);
    }

    #[test]
    fn test_balance_penalty() {
        let mut grid = BitGrid::new(21);
        for i in 0..100 {
            grid.set(i % 21, i / 21, true);
        }
        assert_eq!(compute_balance_penalty(&grid), 50);

        for i in 100..220 {
            grid.set(i % 21, i / 21, true);
        }
        assert_eq!(compute_balance_penalty(&grid), 0);
    }
}

// Global constants
//------------------------------------------------------------------------------

static PENALTY_N1: u32 = 3;

static PENALTY_N2: u32 = 3;

static PENALTY_N3: u32 = 40;

static PENALTY_N4: u32 = 10;

// 10111010000 and its reverse
static FINDER_LIKE_PATTERNS: [u16; 2] = [0x05D, 0x5D0];
