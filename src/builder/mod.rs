mod qr;

pub use qr::QR;
pub(crate) use qr::Canvas;

use std::ops::Deref;

use tracing::debug;

use crate::common::{
    codec::{encode_with_version, find_min_version},
    ec::{generator_polynomial, Block},
    error::QRResult,
    mask::{apply_best_mask, MaskPattern},
    metadata::{ECLevel, Version},
    BitStream,
};

#[derive(Debug, Clone)]
pub struct QRBuilder<'a> {
    data: &'a [u8],
    version: Option<Version>,
    ec_level: ECLevel,
    mask: Option<MaskPattern>,
}

impl<'a> QRBuilder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, version: None, ec_level: ECLevel::M, mask: None }
    }

    pub fn data(&mut self, data: &'a [u8]) -> &mut Self {
        self.data = data;
        self
    }

    pub fn version(&mut self, version: Version) -> &mut Self {
        self.version = Some(version);
        self
    }

    pub fn unset_version(&mut self) -> &mut Self {
        self.version = None;
        self
    }

    pub fn ec_level(&mut self, ec_level: ECLevel) -> &mut Self {
        self.ec_level = ec_level;
        self
    }

    pub fn mask(&mut self, mask: MaskPattern) -> &mut Self {
        self.mask = Some(mask);
        self
    }

    pub fn unset_mask(&mut self) -> &mut Self {
        self.mask = None;
        self
    }

    pub fn metadata(&self) -> String {
        let ver = self.version.map_or("None".to_string(), |v| (*v).to_string());
        let mask = self.mask.map_or("None".to_string(), |m| (*m).to_string());
        format!("{{ Version: {ver}, Ec level: {:?}, Mask: {mask} }}", self.ec_level)
    }
}


impl QRBuilder<'_> {
    pub fn build(&self) -> QRResult<QR> {
        debug!("Generating QR {}", self.metadata());

        // Explicit version is binding, otherwise the smallest fitting one
        let version = match self.version {
            Some(v) => v,
            None => {
                debug!("Finding smallest version...");
                find_min_version(self.data, self.ec_level)?
            }
        };

        debug!("Encoding data...");
        let (encoded_data, mode) = encode_with_version(self.data, version, self.ec_level)?;
        let data_len = self.data.len();
        let data_capacity = version.data_codewords(self.ec_level);
        let ec_capacity = Self::ec_capacity(version, self.ec_level);

        debug!("Constructing payload with ecc & interleaving...");
        let payload = Self::construct_payload(encoded_data.data(), version, self.ec_level);

        debug!("Drawing functional patterns...");
        let mut canvas = Canvas::new(version, self.ec_level);
        canvas.draw_all_function_patterns();

        debug!("Drawing encoding region...");
        canvas.draw_codewords(payload);

        let mask = match self.mask {
            Some(m) => {
                debug!("Applying mask {}...", *m);
                canvas.draw_format_info(m);
                canvas.apply_mask(m);
                m
            }
            None => {
                debug!("Finding & applying best mask...");
                apply_best_mask(&mut canvas)
            }
        };

        let qr = canvas.into_qr(mode, mask);

        let total_modules = version.width() * version.width();
        let dark_modules = qr.count_dark_modules();
        debug!("QR generated: {}", qr.metadata());
        debug!(
            data_capacity,
            ec_capacity,
            data_len,
            encoded_len = encoded_data.len(),
            dark_modules,
            light_modules = total_modules - dark_modules,
            balance = dark_modules * 100 / total_modules,
            "Report"
        );

        Ok(qr)
    }

    // Data then ecc codewords, each interleaved across blocks. Logical length
    // covers the whole encoding region so remainder bits are placed too.
    fn construct_payload(data: &[u8], version: Version, ec_level: ECLevel) -> BitStream {
        let blocks = Self::compute_ecc(data, version, ec_level);
        let data_blocks = blocks.iter().map(Block::data).collect::<Vec<_>>();
        let ecc_blocks = blocks.iter().map(Block::ecc).collect::<Vec<_>>();

        let mut payload = BitStream::new(version.raw_modules());
        payload.extend(&Self::interleave(&data_blocks));
        payload.extend(&Self::interleave(&ecc_blocks));
        payload.resize(version.raw_modules());
        payload
    }

    // ECC: Error Correction Codeword generator
    fn compute_ecc(data: &[u8], version: Version, ec_level: ECLevel) -> Vec<Block> {
        let gen = generator_polynomial(version.ecc_per_block(ec_level));
        Self::blockify(data, version, ec_level)
            .into_iter()
            .map(|b| Block::with_generator(b, &gen))
            .collect()
    }

    // Short blocks first, long blocks carry one extra data codeword
    pub(crate) fn blockify(data: &[u8], version: Version, ec_level: ECLevel) -> Vec<&[u8]> {
        let cap = version.capacity(ec_level);
        let total_codewords = cap.raw_modules >> 3;
        let num_blocks = cap.num_blocks;
        let block_ecc_len = cap.total_ecc_codewords / num_blocks;
        let num_short_blocks = num_blocks - total_codewords % num_blocks;
        let short_data_len = total_codewords / num_blocks - block_ecc_len;
        let total_short_size = short_data_len * num_short_blocks;

        debug_assert!(
            total_short_size + (short_data_len + 1) * (num_blocks - num_short_blocks)
                == data.len(),
            "Data len doesn't match total size of blocks: Data len {}, Blocks {num_blocks}",
            data.len(),
        );

        let mut data_blocks = Vec::with_capacity(num_blocks);
        data_blocks.extend(data[..total_short_size].chunks(short_data_len));
        data_blocks.extend(data[total_short_size..].chunks(short_data_len + 1));
        data_blocks
    }

    pub fn ec_capacity(version: Version, ec_level: ECLevel) -> usize {
        // Codewords reserved against misdecode in the smallest symbols
        let p = match (*version, ec_level) {
            (1, ECLevel::L) => 3,
            (2, ECLevel::L) | (1, ECLevel::M) => 2,
            (1, _) | (3, ECLevel::L) => 1,
            _ => 0,
        };

        (version.ecc_codewords(ec_level) - p) / 2
    }

    pub fn interleave<T: Copy, V: Deref<Target = [T]>>(blocks: &[V]) -> Vec<T> {
        let max_block_size = blocks.iter().map(|b| b.len()).max().unwrap_or(0);
        let total_size = blocks.iter().map(|b| b.len()).sum::<usize>();
        let mut res = Vec::with_capacity(total_size);
        for i in 0..max_block_size {
            for b in blocks {
                if i < b.len() {
                    res.push(b[i]);
                }
            }
        }
        res
    }
}
