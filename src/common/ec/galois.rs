use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Sub};

// Galois field element of GF(256), reduced by x^8 + x^4 + x^3 + x^2 + 1
//------------------------------------------------------------------------------

#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Hash)]
pub struct G(pub u8);

impl G {
    // 2^i
    pub fn gen_pow(i: usize) -> Self {
        Self(EXP_TABLE[i % 255])
    }

    pub fn log(self) -> usize {
        debug_assert!(self.0 != 0, "Log of zero is undefined");
        LOG_TABLE[self.0 as usize] as usize
    }
}

impl From<G> for u8 {
    fn from(g: G) -> Self {
        g.0
    }
}

impl Add for G {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 ^ rhs.0)
    }
}

impl AddAssign for G {
    fn add_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

// Characteristic 2: subtraction is addition
impl Sub for G {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        self + rhs
    }
}

impl Mul for G {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        if self.0 == 0 || rhs.0 == 0 {
            return Self(0);
        }
        Self(EXP_TABLE[self.log() + rhs.log()])
    }
}

impl MulAssign for G {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Div for G {
    type Output = Self;
    fn div(self, rhs: Self) -> Self::Output {
        assert!(rhs.0 != 0, "Division by zero in GF(256)");
        if self.0 == 0 {
            return Self(0);
        }
        Self(EXP_TABLE[self.log() + 255 - rhs.log()])
    }
}


// Global constants
//------------------------------------------------------------------------------

const PRIMITIVE_POLY: u16 = 0x11D;

// Doubled so that log sums up to 508 index without a modulo
pub static EXP_TABLE: [u8; 512] = build_exp_table();

pub static LOG_TABLE: [u8; 256] = build_log_table();

const fn build_exp_table() -> [u8; 512] {
    let mut exp = [0u8; 512];
    let mut x: u16 = 1;
    let mut i = 0;
    while i < 255 {
        exp[i] = x as u8;
        exp[i + 255] = x as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= PRIMITIVE_POLY;
        }
        i += 1;
    }
    exp
}

const fn build_log_table() -> [u8; 256] {
    let exp = build_exp_table();
    let mut log = [0u8; 256];
    let mut i = 0;
    while i < 255 {
        log[exp[i] as usize] = i as u8;
        i += 1;
    }
    log
}
