// Copyright (c) the jpegdec Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::{BLOCK_DIM, BLOCK_SIZE};

/// An 8x8 block of samples in row-major order.
///
/// Holds dequantized coefficients before the inverse transform and spatial
/// samples in `[0, 255]` after it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block {
    pub data: [f64; BLOCK_SIZE],
}

impl Default for Block {
    fn default() -> Self {
        Self {
            data: [0.0; BLOCK_SIZE],
        }
    }
}

impl Block {
    pub fn from_fn(f: impl FnMut(usize) -> f64) -> Block {
        Block {
            data: array_init::array_init(f),
        }
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * BLOCK_DIM + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * BLOCK_DIM + col] = value;
    }
}
