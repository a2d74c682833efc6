pub mod bitgrid;
pub mod bitstream;
pub mod codec;
pub mod ec;
pub mod error;
pub mod iter;
pub mod mask;
pub mod metadata;

pub use bitgrid::*;
pub use bitstream::*;
pub use codec::*;
pub use iter::*;
pub use mask::*;
pub use metadata::*;
