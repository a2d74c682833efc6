//! # qrforge
//!
//! A Rust library for encoding text and binary data into QR Code symbols with
//! Reed-Solomon error correction.
//!
//! ## Features
//!
//! - **Mode selection**: Numeric, alphanumeric or byte mode, whichever packs the data tightest
//! - **Reed-Solomon error correction**: All four levels (L, M, Q, H) over GF(256)
//! - **Versions 1-40**: Chosen explicitly or the smallest one that fits the data
//! - **Mask selection**: Penalty scored search across all 8 mask patterns
//! - **Packed module grid**: Row-major, MSB-first bit buffer ready for any renderer
//!
//! ## Quick Start
//!
//! ### Simple QR Code Generation
//!
//! ```rust
//! use qrforge::QRBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Simplest usage - provide only data, all other settings are automatically chosen
//! let qr = QRBuilder::new(b"Hello, World!").build()?;
//!
//! for y in -4..qr.width() as i32 + 4 {
//!     let row: String =
//!         (-4..qr.width() as i32 + 4).map(|x| if qr.get_module(x, y) { '#' } else { ' ' }).collect();
//!     println!("{row}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### Full Configuration
//!
//! ```rust
//! use qrforge::{ECLevel, MaskPattern, QRBuilder, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let qr = QRBuilder::new("HELLO WORLD".as_bytes())
//!     .version(Version::new(2)?)      // QR version (size) - if not provided, finds smallest version to fit data
//!     .ec_level(ECLevel::Q)           // Error correction level - if not provided, defaults to ECLevel::M
//!     .mask(MaskPattern::new(3)?)     // Mask pattern - if not provided, finds best mask based on penalty score
//!     .build()?;
//!
//! assert_eq!(qr.width(), 25);
//! # Ok(())
//! # }
//! ```
//!
//! ### Fixed Version Encoding
//!
//! ```rust
//! use qrforge::{encode, required_grid_bytes, ECLevel, QRError, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let ver = Version::new(1)?;
//! let qr = encode(ver, ECLevel::L, b"01234567")?;
//! assert_eq!(qr.modules().as_bytes().len(), required_grid_bytes(ver));
//!
//! // A fixed version is never upgraded
//! let too_long = "1".repeat(42);
//! assert_eq!(encode(ver, ECLevel::L, too_long.as_bytes()), Err(QRError::DataTooLong));
//! # Ok(())
//! # }
//! ```
//!
//! ## QR Code Components
//!
//! ### Versions
//! - Versions 1-40, with sizes from 21x21 to 177x177 modules
//!
//! ### Error Correction Levels
//! - **L (Low)**: ~7% error correction
//! - **M (Medium)**: ~15% error correction
//! - **Q (Quartile)**: ~25% error correction
//! - **H (High)**: ~30% error correction
//!
//! ## Logging
//!
//! Pipeline stages emit `tracing` events at debug level and per-mask penalty
//! scores at trace level. Install any subscriber to see them.

#![allow(
    clippy::items_after_test_module,
    clippy::suspicious_arithmetic_impl,
    clippy::suspicious_op_assign_impl
)]

pub mod builder;
pub(crate) mod common;

pub use builder::{QRBuilder, QR};
pub use common::bitgrid::BitGrid;
pub use common::codec::{encoded_bit_len, Mode};
pub use common::error::{QRError, QRResult};
pub use common::mask::MaskPattern;
pub use common::metadata::{Capacity, ECLevel, Version};

// Encodes data at exactly the given version and error correction level
pub fn encode(version: Version, ec_level: ECLevel, data: &[u8]) -> QRResult<QR> {
    QRBuilder::new(data).version(version).ec_level(ec_level).build()
}

// Bytes of the packed module grid for a version
pub const fn required_grid_bytes(version: Version) -> usize {
    version.grid_bytes()
}
