use std::ops::Deref;

use super::codec::Mode;
use super::error::{QRError, QRResult};

// Version
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub struct Version(usize);

impl Deref for Version {
    type Target = usize;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Version {
    pub const MIN: Version = Version(1);
    pub const MAX: Version = Version(40);

    pub fn new(version: usize) -> QRResult<Self> {
        match version {
            1..=40 => Ok(Self(version)),
            _ => Err(QRError::InvalidVersion),
        }
    }

    pub fn all() -> impl Iterator<Item = Version> {
        (1..=40).map(Version)
    }

    pub const fn width(self) -> usize {
        self.0 * 4 + 17
    }

    pub const fn grid_bytes(self) -> usize {
        let w = self.width();
        (w * w + 7) >> 3
    }

    pub const fn raw_modules(self) -> usize {
        NUM_RAW_DATA_MODULES[self.0 - 1]
    }

    pub const fn total_codewords(self) -> usize {
        self.raw_modules() >> 3
    }

    pub const fn ecc_codewords(self, ecl: ECLevel) -> usize {
        NUM_ERROR_CORRECTION_CODEWORDS[ecl as usize][self.0 - 1]
    }

    pub const fn num_blocks(self, ecl: ECLevel) -> usize {
        NUM_ERROR_CORRECTION_BLOCKS[ecl as usize][self.0 - 1]
    }

    pub const fn ecc_per_block(self, ecl: ECLevel) -> usize {
        self.ecc_codewords(ecl) / self.num_blocks(ecl)
    }

    pub const fn data_codewords(self, ecl: ECLevel) -> usize {
        self.total_codewords() - self.ecc_codewords(ecl)
    }

    pub const fn data_bit_capacity(self, ecl: ECLevel) -> usize {
        self.data_codewords(ecl) << 3
    }

    pub fn capacity(self, ecl: ECLevel) -> Capacity {
        Capacity {
            raw_modules: self.raw_modules(),
            total_ecc_codewords: self.ecc_codewords(ecl),
            num_blocks: self.num_blocks(ecl),
        }
    }

    pub fn char_cnt_bits(self, mode: Mode) -> usize {
        let idx = match self.0 {
            1..=9 => 0,
            10..=26 => 1,
            _ => 2,
        };
        match mode {
            Mode::Numeric => [10, 12, 14][idx],
            Mode::Alphanumeric => [9, 11, 13][idx],
            Mode::Byte => [8, 16, 16][idx],
        }
    }

    // Centre coordinates shared by rows and columns of alignment patterns
    pub fn alignment_pattern(self) -> Vec<usize> {
        let v = self.0;
        if v == 1 {
            return Vec::new();
        }

        let count = v / 7 + 2;
        let step = if v == 32 { 26 } else { (v * 4 + count * 2 + 1) / (2 * count - 2) * 2 };

        // Last centre sits 7 modules in from the far edge, the rest step back from it
        let last = self.width() - 7;
        let mut poses = vec![6; count];
        for (k, p) in poses[1..].iter_mut().rev().enumerate() {
            *p = last - k * step;
        }
        poses
    }

    // 18 bit version word: 6 bit version followed by 12 bit BCH remainder
    pub fn info(self) -> u32 {
        debug_assert!(self.0 >= 7, "Version info is only defined from version 7: {}", self.0);

        let ver = self.0 as u32;
        let mut rem = ver;
        for _ in 0..12 {
            rem = (rem << 1) ^ ((rem >> 11) * VERSION_INFO_GENERATOR);
        }
        (ver << 12) | rem
    }
}


// Capacity entry
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct Capacity {
    pub raw_modules: usize,
    pub total_ecc_codewords: usize,
    pub num_blocks: usize,
}

// Error correction level
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, PartialOrd, Ord, Hash)]
pub enum ECLevel {
    L = 0,
    M = 1,
    Q = 2,
    H = 3,
}

impl ECLevel {
    // 2 bit field carried in format info
    pub const fn format_bits(self) -> u32 {
        match self {
            Self::L => 0b01,
            Self::M => 0b00,
            Self::Q => 0b11,
            Self::H => 0b10,
        }
    }
}

impl TryFrom<u8> for ECLevel {
    type Error = QRError;

    fn try_from(value: u8) -> QRResult<Self> {
        match value {
            0 => Ok(Self::L),
            1 => Ok(Self::M),
            2 => Ok(Self::Q),
            3 => Ok(Self::H),
            _ => Err(QRError::InvalidECLevel),
        }
    }
}


// Global constants
//------------------------------------------------------------------------------

pub static VERSION_INFO_GENERATOR: u32 = 0x1F25;

const NUM_RAW_DATA_MODULES: [usize; 40] = [
    208, 359, 567, 807, 1079, 1383, 1568, 1936, 2336, 2768, 3232, 3728, 4256, 4651, 5243, 5867,
    6523, 7211, 7931, 8683, 9252, 10068, 10916, 11796, 12708, 13652, 14628, 15371, 16411, 17483,
    18587, 19723, 20891, 22091, 23008, 24272, 25568, 26896, 28256, 29648,
];

// Indexed by [ECLevel][version - 1]
const NUM_ERROR_CORRECTION_CODEWORDS: [[usize; 40]; 4] = [
    [
        7, 10, 15, 20, 26, 36, 40, 48, 60, 72, 80, 96, 104, 120, 132, 144, 168, 180, 196, 224, 224,
        252, 270, 300, 312, 336, 360, 390, 420, 450, 480, 510, 540, 570, 570, 600, 630, 660, 720,
        750,
    ],
    [
        10, 16, 26, 36, 48, 64, 72, 88, 110, 130, 150, 176, 198, 216, 240, 280, 308, 338, 364, 416,
        442, 476, 504, 560, 588, 644, 700, 728, 784, 812, 868, 924, 980, 1036, 1064, 1120, 1204,
        1260, 1316, 1372,
    ],
    [
        13, 22, 36, 52, 72, 96, 108, 132, 160, 192, 224, 260, 288, 320, 360, 408, 448, 504, 546,
        600, 644, 690, 750, 810, 870, 952, 1020, 1050, 1140, 1200, 1290, 1350, 1440, 1530, 1590,
        1680, 1770, 1860, 1950, 2040,
    ],
    [
        17, 28, 44, 64, 88, 112, 130, 156, 192, 224, 264, 308, 352, 384, 432, 480, 532, 588, 650,
        700, 750, 816, 900, 960, 1050, 1110, 1200, 1260, 1350, 1440, 1530, 1620, 1710, 1800, 1890,
        1980, 2100, 2220, 2310, 2430,
    ],
];

// Indexed by [ECLevel][version - 1]
const NUM_ERROR_CORRECTION_BLOCKS: [[usize; 40]; 4] = [
    [
        1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12, 13,
        14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ],
    [
        1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21, 23,
        25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    ],
    [
        1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27, 29,
        34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    ],
    [
        1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32, 35,
        37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
    ],
];
