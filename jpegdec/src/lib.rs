// Copyright (c) the jpegdec Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

#![deny(unsafe_code)]
#[macro_use]
mod util;

pub mod bit_reader;
pub mod block;
pub mod color;
pub mod decode;
pub mod entropy;
pub mod error;
pub mod headers;
pub mod huffman;
pub mod idct;
pub mod image;
pub mod limits;
pub mod mcu;
pub mod zigzag;

pub const BLOCK_DIM: usize = 8;
pub const BLOCK_SIZE: usize = BLOCK_DIM * BLOCK_DIM;
