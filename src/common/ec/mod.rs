mod block;
mod galois;

pub use block::*;
pub use galois::*;

// Reed-Solomon generator
//------------------------------------------------------------------------------

// Product of (x - 2^i) for i in 0..degree. Coefficients run from x^(degree-1)
// down to x^0; the leading monic term is implied.
pub fn generator_polynomial(degree: usize) -> Vec<G> {
    debug_assert!(degree > 0 && degree < 256, "Invalid generator degree: {degree}");

    let mut coeffs = vec![G(0); degree];
    coeffs[degree - 1] = G(1);

    for i in 0..degree {
        let root = G::gen_pow(i);
        for j in 0..degree {
            coeffs[j] *= root;
            if j + 1 < degree {
                let next = coeffs[j + 1];
                coeffs[j] += next;
            }
        }
    }
    coeffs
}

// Remainder of data(x) * x^degree divided by the generator, i.e. the ecc codewords
pub fn compute_remainder(data: &[u8], gen: &[G]) -> Vec<u8> {
    let mut rem = vec![G(0); gen.len()];
    for &b in data {
        let factor = G(b) + rem[0];
        rem.rotate_left(1);
        if let Some(last) = rem.last_mut() {
            *last = G(0);
        }
        for (r, &g) in rem.iter_mut().zip(gen) {
            *r += g * factor;
        }
    }
    rem.into_iter().map(u8::from).collect()
}


// Global constants
//------------------------------------------------------------------------------

// Upper bound on codewords in a single block
pub const MAX_BLOCK_SIZE: usize = 256;

pub const MAX_EC_SIZE: usize = 30;
