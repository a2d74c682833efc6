use crate::common::{BitGrid, BitStream, ECLevel, EncRegionIter, MaskPattern, Mode, Version};

// Finished QR symbol
//------------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QR {
    modules: BitGrid,
    ver: Version,
    ecl: ECLevel,
    mode: Mode,
    mask: MaskPattern,
}

impl QR {
    pub fn version(&self) -> Version {
        self.ver
    }

    pub fn width(&self) -> usize {
        self.ver.width()
    }

    pub fn ec_level(&self) -> ECLevel {
        self.ecl
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn mask(&self) -> MaskPattern {
        self.mask
    }

    // Coordinates outside the symbol read as light, so renderers can walk a quiet zone
    pub fn get_module(&self, x: i32, y: i32) -> bool {
        let w = self.width() as i32;
        if !(0..w).contains(&x) || !(0..w).contains(&y) {
            return false;
        }
        self.modules.get(x as usize, y as usize)
    }

    pub fn modules(&self) -> &BitGrid {
        &self.modules
    }

    pub fn into_modules(self) -> BitGrid {
        self.modules
    }

    pub fn count_dark_modules(&self) -> usize {
        self.modules.count_ones()
    }

    pub fn metadata(&self) -> String {
        format!(
            "{{ Version: {}, Ec level: {:?}, Mode: {:?}, Mask: {} }}",
            *self.ver, self.ecl, self.mode, *self.mask
        )
    }
}

// Canvas the builder draws on: visible modules plus a function module mask
//------------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Canvas {
    ver: Version,
    ecl: ECLevel,
    modules: BitGrid,
    func: BitGrid,
}

impl Canvas {
    pub fn new(ver: Version, ecl: ECLevel) -> Self {
        let w = ver.width();
        Self { ver, ecl, modules: BitGrid::new(w), func: BitGrid::new(w) }
    }

    pub fn modules(&self) -> &BitGrid {
        &self.modules
    }

    pub fn into_qr(self, mode: Mode, mask: MaskPattern) -> QR {
        QR { modules: self.modules, ver: self.ver, ecl: self.ecl, mode, mask }
    }

    // Negative coordinates wrap from the far edge
    fn set_function(&mut self, x: isize, y: isize, on: bool) {
        let w = self.ver.width() as isize;
        debug_assert!(-w <= x && x < w, "x out of bounds: Width {w}, X {x}");
        debug_assert!(-w <= y && y < w, "y out of bounds: Width {w}, Y {y}");

        let x = (if x < 0 { x + w } else { x }) as usize;
        let y = (if y < 0 { y + w } else { y }) as usize;
        self.modules.set(x, y, on);
        self.func.set(x, y, true);
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let w = self.ver.width();
        let mut res = String::with_capacity(w * (w + 1) + 1);
        res.push('\n');
        for y in 0..w {
            for x in 0..w {
                let c = match (self.func.get(x, y), self.modules.get(x, y)) {
                    (true, true) => 'f',
                    (true, false) => 'F',
                    (false, true) => 'd',
                    (false, false) => '.',
                };
                res.push(c);
            }
            res.push('\n');
        }
        res
    }
}


// Timing pattern
//------------------------------------------------------------------------------

impl Canvas {
    // Full row and column 6; finders drawn later overwrite the ends
    fn draw_timing_pattern(&mut self) {
        let w = self.ver.width() as isize;
        for i in 0..w {
            self.set_function(6, i, i & 1 == 0);
            self.set_function(i, 6, i & 1 == 0);
        }
    }
}


// Finder pattern
//------------------------------------------------------------------------------

impl Canvas {
    fn draw_finder_patterns(&mut self) {
        let w = self.ver.width() as isize;
        self.draw_finder_pattern_at(3, 3);
        self.draw_finder_pattern_at(w - 4, 3);
        self.draw_finder_pattern_at(3, w - 4);
    }

    // 9x9 including separator, clipped at the symbol edge
    fn draw_finder_pattern_at(&mut self, x: isize, y: isize) {
        let w = self.ver.width() as isize;
        for i in -4..=4_isize {
            for j in -4..=4_isize {
                let (xx, yy) = (x + j, y + i);
                if !(0..w).contains(&xx) || !(0..w).contains(&yy) {
                    continue;
                }
                let dist = i.abs().max(j.abs());
                self.set_function(xx, yy, dist != 2 && dist != 4);
            }
        }
    }
}


// Alignment pattern
//------------------------------------------------------------------------------

impl Canvas {
    fn draw_alignment_patterns(&mut self) {
        let poses = self.ver.alignment_pattern();
        let last = poses.len().saturating_sub(1);
        for (i, &x) in poses.iter().enumerate() {
            for (j, &y) in poses.iter().enumerate() {
                // Finder corners
                if (i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0) {
                    continue;
                }
                self.draw_alignment_pattern_at(x as isize, y as isize);
            }
        }
    }

    fn draw_alignment_pattern_at(&mut self, x: isize, y: isize) {
        for i in -2..=2_isize {
            for j in -2..=2_isize {
                let dist = i.abs().max(j.abs());
                self.set_function(x + j, y + i, dist != 1);
            }
        }
    }
}


// Format & version info
//------------------------------------------------------------------------------

// 15 bit format word: ec level and mask, BCH remainder, then XOR mask
fn format_info(ecl: ECLevel, mask: MaskPattern) -> u32 {
    let data = (ecl.format_bits() << 3) | *mask as u32;
    let mut rem = data;
    for _ in 0..10 {
        rem = (rem << 1) ^ ((rem >> 9) * FORMAT_INFO_GENERATOR);
    }
    ((data << 10) | rem) ^ FORMAT_INFO_MASK
}

impl Canvas {
    pub fn draw_format_info(&mut self, mask: MaskPattern) {
        let info = format_info(self.ecl, mask);
        self.draw_number(info, &FORMAT_INFO_COORDS_MAIN);
        self.draw_number(info, &FORMAT_INFO_COORDS_SIDE);
        // Dark module
        self.set_function(8, -8, true);
    }

    fn draw_version_info(&mut self) {
        if *self.ver < 7 {
            return;
        }

        let info = self.ver.info();
        let w = self.ver.width() as isize;
        for i in 0..VERSION_INFO_BIT_LEN {
            let bit = (info >> i) & 1 != 0;
            let a = w - 11 + (i % 3) as isize;
            let b = (i / 3) as isize;
            self.set_function(a, b, bit);
            self.set_function(b, a, bit);
        }
    }

    // Bit i of number lands on coords[i], least significant first
    fn draw_number(&mut self, number: u32, coords: &[(isize, isize)]) {
        for (i, &(x, y)) in coords.iter().enumerate() {
            self.set_function(x, y, (number >> i) & 1 != 0);
        }
    }
}


// All function patterns
//------------------------------------------------------------------------------

impl Canvas {
    // Format area holds a mask 0 placeholder until a mask is chosen
    pub fn draw_all_function_patterns(&mut self) {
        self.draw_timing_pattern();
        self.draw_finder_patterns();
        self.draw_alignment_patterns();
        self.draw_format_info(MaskPattern::default());
        self.draw_version_info();
    }
}


// Encoding region
//------------------------------------------------------------------------------

impl Canvas {
    // Modules past the end of the payload keep their zeroed value as remainder bits
    pub fn draw_codewords(&mut self, payload: BitStream) {
        debug_assert!(
            payload.len() <= self.ver.raw_modules(),
            "Payload overflows the encoding region: Payload {}, Capacity {}",
            payload.len(),
            self.ver.raw_modules()
        );

        let func = &self.func;
        let modules = &mut self.modules;
        let coords = EncRegionIter::new(self.ver).filter(|&(x, y)| !func.get(x, y));
        for (bit, (x, y)) in payload.zip(coords) {
            modules.set(x, y, bit);
        }
    }

    pub fn apply_mask(&mut self, mask: MaskPattern) {
        let mask_fn = mask.mask_functions();
        let w = self.ver.width();
        for y in 0..w {
            for x in 0..w {
                if !self.func.get(x, y) {
                    self.modules.invert(x, y, mask_fn(x, y));
                }
            }
        }
    }
}


// Global constants
//------------------------------------------------------------------------------

static FORMAT_INFO_GENERATOR: u32 = 0x537;

static FORMAT_INFO_MASK: u32 = 0x5412;

static VERSION_INFO_BIT_LEN: usize = 18;

// Around the top left finder
static FORMAT_INFO_COORDS_MAIN: [(isize, isize); 15] = [
    (8, 0),
    (8, 1),
    (8, 2),
    (8, 3),
    (8, 4),
    (8, 5),
    (8, 7),
    (8, 8),
    (7, 8),
    (5, 8),
    (4, 8),
    (3, 8),
    (2, 8),
    (1, 8),
    (0, 8),
];

// Split between the top right and bottom left finders
static FORMAT_INFO_COORDS_SIDE: [(isize, isize); 15] = [
    (-1, 8),
    (-2, 8),
    (-3, 8),
    (-4, 8),
    (-5, 8),
    (-6, 8),
    (-7, 8),
    (-8, 8),
    (8, -7),
    (8, -6),
    (8, -5),
    (8, -4),
    (8, -3),
    (8, -2),
    (8, -1),
];
