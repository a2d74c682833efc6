pub use encode::*;

use crate::common::metadata::Version;

// Mode
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
pub enum Mode {
    Numeric = 0b0001,
    Alphanumeric = 0b0010,
    Byte = 0b0100,
}

impl Mode {
    // Most compact first
    pub const ALL: [Mode; 3] = [Mode::Numeric, Mode::Alphanumeric, Mode::Byte];

    #[inline]
    fn numeric_digit(char: u8) -> u16 {
        debug_assert!(Mode::Numeric.contains(char), "Invalid numeric data: {char}");
        (char - b'0') as u16
    }

    #[inline]
    fn alphanumeric_digit(char: u8) -> u16 {
        debug_assert!(Mode::Alphanumeric.contains(char), "Invalid alphanumeric data: {char}");
        match char {
            b'0'..=b'9' => (char - b'0') as u16,
            b'A'..=b'Z' => (char - b'A' + 10) as u16,
            b' ' => 36,
            b'$' => 37,
            b'%' => 38,
            b'*' => 39,
            b'+' => 40,
            b'-' => 41,
            b'.' => 42,
            b'/' => 43,
            b':' => 44,
            _ => unreachable!("Invalid alphanumeric {char}"),
        }
    }

    pub fn indicator(self) -> u8 {
        self as u8
    }

    // First mode whose charset covers every byte. Empty data is vacuously numeric.
    pub fn classify(data: &[u8]) -> Self {
        Self::ALL
            .into_iter()
            .find(|m| data.iter().all(|&b| m.contains(b)))
            .unwrap_or(Self::Byte)
    }

    pub fn encode_chunk(&self, data: &[u8]) -> u16 {
        let len = data.len();
        match self {
            Self::Numeric => {
                debug_assert!(len <= 3, "Data is too long for numeric conversion: {len}");
                data.iter().fold(0_u16, |n, b| n * 10 + Self::numeric_digit(*b))
            }
            Self::Alphanumeric => {
                debug_assert!(len <= 2, "Data is too long for alphanumeric conversion: {len}");
                data.iter().fold(0_u16, |n, b| n * 45 + Self::alphanumeric_digit(*b))
            }
            Self::Byte => {
                debug_assert!(len == 1, "Data is too long for byte conversion: {len}");
                data[0] as u16
            }
        }
    }

    pub fn contains(&self, byte: u8) -> bool {
        match self {
            Self::Numeric => byte.is_ascii_digit(),
            Self::Alphanumeric => {
                matches!(byte, b'0'..=b'9' | b'A'..=b'Z' | b' ' | b'$' | b'%' | b'*' | b'+' | b'-' | b'.' | b'/' | b':')
            }
            Self::Byte => true,
        }
    }

    // Bit length of the packed characters, excluding header
    pub fn encoded_len(&self, len: usize) -> usize {
        match *self {
            Self::Numeric => (len * 10).div_ceil(3),
            Self::Alphanumeric => (len * 11).div_ceil(2),
            Self::Byte => len * 8,
        }
    }
}


// Segment
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Segment<'a> {
    pub mode: Mode,
    pub len_bits: usize,
    pub data: &'a [u8],
}

impl<'a> Segment<'a> {
    pub fn new(data: &'a [u8], ver: Version) -> Self {
        Self::with_mode(Mode::classify(data), ver, data)
    }

    pub fn with_mode(mode: Mode, ver: Version, data: &'a [u8]) -> Self {
        debug_assert!(
            data.iter().all(|&b| mode.contains(b)),
            "Data contains characters outside {mode:?} charset"
        );
        Self { mode, len_bits: ver.char_cnt_bits(mode), data }
    }

    pub fn bit_len(&self) -> usize {
        MODE_INDICATOR_BITS + self.len_bits + self.mode.encoded_len(self.data.len())
    }

    pub fn fits(&self, bit_capacity: usize) -> bool {
        self.data.len() < (1 << self.len_bits) && self.bit_len() <= bit_capacity
    }
}


// Encoder
//------------------------------------------------------------------------------

pub mod encode {
    use tracing::trace;

    use super::writer::{pad_remaining_capacity, push_segment, push_terminator};
    use super::{Mode, Segment};
    use crate::common::error::{QRError, QRResult};
    use crate::common::metadata::{ECLevel, Version};
    use crate::common::BitStream;

    // Exact stream length before terminator, checked ahead of any write
    pub fn encoded_bit_len(data: &[u8], ver: Version) -> (Mode, usize) {
        let seg = Segment::new(data, ver);
        (seg.mode, seg.bit_len())
    }

    pub fn encode_with_version(
        data: &[u8],
        ver: Version,
        ecl: ECLevel,
    ) -> QRResult<(BitStream, Mode)> {
        let bcap = ver.data_bit_capacity(ecl);
        let seg = Segment::new(data, ver);
        if !seg.fits(bcap) {
            return Err(QRError::DataTooLong);
        }
        trace!(mode = ?seg.mode, bits = seg.bit_len(), capacity = bcap, "Encoding segment");

        let mut bs = BitStream::new(bcap);
        push_segment(seg, &mut bs);
        push_terminator(&mut bs);
        pad_remaining_capacity(&mut bs);
        Ok((bs, seg.mode))
    }

    pub fn find_min_version(data: &[u8], ecl: ECLevel) -> QRResult<Version> {
        Version::all()
            .find(|&ver| Segment::new(data, ver).fits(ver.data_bit_capacity(ecl)))
            .ok_or(QRError::DataTooLong)
    }

}

// Writer for encoded data
//------------------------------------------------------------------------------

pub(super) mod writer {
    use super::{Mode, Segment, MODE_INDICATOR_BITS, PADDING_CODEWORDS};
    use crate::common::BitStream;

    pub fn push_segment(seg: Segment, out: &mut BitStream) {
        push_header(&seg, out);
        match seg.mode {
            Mode::Numeric => push_numeric_data(seg.data, out),
            Mode::Alphanumeric => push_alphanumeric_data(seg.data, out),
            Mode::Byte => push_byte_data(seg.data, out),
        }
    }

    fn push_header(seg: &Segment, out: &mut BitStream) {
        out.push_bits(seg.mode.indicator(), MODE_INDICATOR_BITS);
        let char_cnt = seg.data.len();
        debug_assert!(
            char_cnt < (1 << seg.len_bits),
            "Char count exceeds bit length: Char count {char_cnt}, Char count bits {}",
            seg.len_bits
        );
        out.push_bits(char_cnt as u16, seg.len_bits);
    }

    fn push_numeric_data(data: &[u8], out: &mut BitStream) {
        for chunk in data.chunks(3) {
            let len = Mode::Numeric.encoded_len(chunk.len());
            let data = Mode::Numeric.encode_chunk(chunk);
            out.push_bits(data, len);
        }
    }

    fn push_alphanumeric_data(data: &[u8], out: &mut BitStream) {
        for chunk in data.chunks(2) {
            let len = Mode::Alphanumeric.encoded_len(chunk.len());
            let data = Mode::Alphanumeric.encode_chunk(chunk);
            out.push_bits(data, len);
        }
    }

    fn push_byte_data(data: &[u8], out: &mut BitStream) {
        for &b in data {
            out.push_bits(b, 8);
        }
    }

    pub fn push_terminator(out: &mut BitStream) {
        let term_len = std::cmp::min(TERMINATOR_BITS, out.remaining());
        out.push_bits(0u8, term_len);
    }

    pub fn pad_remaining_capacity(out: &mut BitStream) {
        push_padding_bits(out);
        push_padding_codewords(out);
    }

    fn push_padding_bits(out: &mut BitStream) {
        let offset = out.len() & 7;
        if offset > 0 {
            let padding_bits_len = 8 - offset;
            out.push_bits(0u8, padding_bits_len);
        }
    }

    fn push_padding_codewords(out: &mut BitStream) {
        let offset = out.len() & 7;
        debug_assert!(
            offset == 0,
            "Bit offset should be zero before padding codewords: {}",
            offset
        );

        let remain_byte_capacity = out.remaining() >> 3;
        PADDING_CODEWORDS.iter().copied().cycle().take(remain_byte_capacity).for_each(|pc| {
            out.push_bits(pc, 8);
        });
    }

    static TERMINATOR_BITS: usize = 4;

}

// Global constants
//------------------------------------------------------------------------------

pub static MODE_INDICATOR_BITS: usize = 4;

pub static PADDING_CODEWORDS: [u8; 2] = [0b1110_1100, 0b0001_0001];
