// Copyright (c) the jpegdec Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Inverse 8x8 DCT with the JPEG normalization.

use std::f64::consts::{FRAC_1_SQRT_2, PI};

use crate::BLOCK_DIM;
use crate::block::Block;

const LEVEL_SHIFT: f64 = 128.0;
const MAX_SAMPLE: f64 = 255.0;

#[inline(always)]
fn alpha(u: usize) -> f64 {
    if u == 0 { FRAC_1_SQRT_2 } else { 1.0 }
}

/// Precomputed cosine basis of the 8-point inverse DCT.
///
/// `basis[x][u]` is `C(u) / 2 * cos((2x + 1) u pi / 16)`, so applying the
/// 1-D transform along rows and then along columns gives the `1/4` overall
/// factor of the 2-D JPEG formula.
#[derive(Debug, Clone)]
pub struct Idct8x8 {
    basis: [[f64; BLOCK_DIM]; BLOCK_DIM],
}

impl Default for Idct8x8 {
    fn default() -> Self {
        Self::new()
    }
}

impl Idct8x8 {
    pub fn new() -> Idct8x8 {
        let basis = array_init::array_init(|x| {
            array_init::array_init(|u| {
                alpha(u) * 0.5 * ((2 * x + 1) as f64 * u as f64 * PI / 16.0).cos()
            })
        });
        Idct8x8 { basis }
    }

    fn idct1d(&self, input: &[f64; BLOCK_DIM]) -> [f64; BLOCK_DIM] {
        array_init::array_init(|x| {
            self.basis[x]
                .iter()
                .zip(input.iter())
                .map(|(b, v)| b * v)
                .sum()
        })
    }

    /// Transforms dequantized coefficients into spatial samples, without the
    /// level shift.
    pub fn transform(&self, coefficients: &Block) -> Block {
        let mut tmp = Block::default();
        for v in 0..BLOCK_DIM {
            let row: [f64; BLOCK_DIM] = array_init::array_init(|u| coefficients.get(v, u));
            for (x, value) in self.idct1d(&row).into_iter().enumerate() {
                tmp.set(v, x, value);
            }
        }
        let mut out = Block::default();
        for x in 0..BLOCK_DIM {
            let col: [f64; BLOCK_DIM] = array_init::array_init(|v| tmp.get(v, x));
            for (y, value) in self.idct1d(&col).into_iter().enumerate() {
                out.set(y, x, value);
            }
        }
        out
    }

    /// Replaces a block of dequantized coefficients by its samples, shifted
    /// by 128 and clamped to `[0, 255]`.
    pub fn inverse(&self, block: &mut Block) {
        let samples = self.transform(block);
        for (out, sample) in block.data.iter_mut().zip(samples.data) {
            *out = (sample + LEVEL_SHIFT).clamp(0.0, MAX_SAMPLE);
        }
    }
}
