// Copyright (c) the jpegdec Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Minimum coded units: decoding their blocks and turning them into pixels.

use crate::BLOCK_DIM;
use crate::bit_reader::BitReader;
use crate::block::Block;
use crate::color::{CHROMA_NEUTRAL, ycbcr_to_rgb};
use crate::entropy::{ComponentTables, DcPredictors, decode_block};
use crate::error::{Error, Result};
use crate::headers::FrameHeader;
use crate::idct::Idct8x8;
use crate::image::ImageSink;

const LUMA: usize = 0;
const CB: usize = 1;
const CR: usize = 2;

/// Sample blocks of one MCU, after the inverse transform.
#[derive(Debug, Clone, Default)]
pub struct Mcu {
    /// `h * v` luma blocks in raster order.
    pub luma: Vec<Block>,
    pub cb: Option<Block>,
    pub cr: Option<Block>,
}

/// Geometry of the MCU grid of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct McuLayout {
    width: usize,
    height: usize,
    /// Luma sampling factors, i.e. luma blocks per MCU in each direction.
    h_sampling: usize,
    v_sampling: usize,
    has_chroma: bool,
}

impl McuLayout {
    /// Checks that `frame` is a layout the decoder supports: a non-empty
    /// image with either one component or three, where only the first one
    /// is subsampled by at most 2 in each direction.
    pub fn new(frame: &FrameHeader) -> Result<McuLayout> {
        let (width, height) = frame.size();
        if width == 0 || height == 0 {
            return Err(Error::InvalidImageSize(width, height));
        }
        let (h_sampling, v_sampling, has_chroma) = match frame.components.as_slice() {
            // A lone component is not interleaved: one block per MCU.
            [_] => (1, 1, false),
            [luma, chroma @ ..] if chroma.len() == 2 => {
                if !(1..=2).contains(&luma.h_sampling) || !(1..=2).contains(&luma.v_sampling) {
                    return Err(Error::UnsupportedSampling(
                        luma.label,
                        luma.h_sampling,
                        luma.v_sampling,
                    ));
                }
                if let Some(c) = chroma
                    .iter()
                    .find(|c| c.h_sampling != 1 || c.v_sampling != 1)
                {
                    return Err(Error::UnsupportedSampling(c.label, c.h_sampling, c.v_sampling));
                }
                (luma.h_sampling as usize, luma.v_sampling as usize, true)
            }
            components => return Err(Error::UnsupportedComponentCount(components.len())),
        };
        Ok(McuLayout {
            width,
            height,
            h_sampling,
            v_sampling,
            has_chroma,
        })
    }

    pub fn mcu_width(&self) -> usize {
        BLOCK_DIM * self.h_sampling
    }

    pub fn mcu_height(&self) -> usize {
        BLOCK_DIM * self.v_sampling
    }

    pub fn mcus_per_row(&self) -> usize {
        self.width.div_ceil(self.mcu_width())
    }

    pub fn mcu_rows(&self) -> usize {
        self.height.div_ceil(self.mcu_height())
    }

    /// Number of MCUs that cover the whole image.
    pub fn num_mcus(&self) -> usize {
        self.mcus_per_row() * self.mcu_rows()
    }

    pub fn luma_blocks_per_mcu(&self) -> usize {
        self.h_sampling * self.v_sampling
    }

    pub fn has_chroma(&self) -> bool {
        self.has_chroma
    }

    fn mcu_index(&self, row: usize, col: usize) -> usize {
        (row / self.mcu_height()) * self.mcus_per_row() + col / self.mcu_width()
    }

    fn luma_block_index(&self, row: usize, col: usize) -> usize {
        (row % self.mcu_height() / BLOCK_DIM) * self.h_sampling + col % self.mcu_width() / BLOCK_DIM
    }

    /// Position of the chroma sample shared by the pixel, upsampling by
    /// nearest neighbour.
    fn chroma_position(&self, row: usize, col: usize) -> (usize, usize) {
        (
            row % self.mcu_height() / self.v_sampling,
            col % self.mcu_width() / self.h_sampling,
        )
    }
}

impl Mcu {
    /// Decodes the blocks of one MCU and runs the inverse transform on each
    /// of them. `scan_order` holds frame component indices in the order the
    /// scan header lists them; the luma component contributes `h * v`
    /// blocks, each chroma component one.
    pub fn decode(
        br: &mut BitReader,
        layout: &McuLayout,
        scan_order: &[usize],
        tables: &[ComponentTables],
        predictors: &mut DcPredictors,
        idct: &Idct8x8,
    ) -> Result<Mcu> {
        let mut read_block = |component: usize| -> Result<Block> {
            let mut block = decode_block(br, &tables[component], predictors, component)?;
            idct.inverse(&mut block);
            Ok(block)
        };
        let mut mcu = Mcu::default();
        for &component in scan_order {
            match component {
                LUMA => {
                    for _ in 0..layout.luma_blocks_per_mcu() {
                        mcu.luma.push(read_block(LUMA)?);
                    }
                }
                CB => mcu.cb = Some(read_block(CB)?),
                _ => mcu.cr = Some(read_block(CR)?),
            }
        }
        Ok(mcu)
    }
}

/// Converts the decoded MCUs to RGB and writes every covered pixel into
/// `sink`. Pixels of MCUs missing from a truncated scan are left untouched.
pub fn assemble(layout: &McuLayout, mcus: &[Mcu], sink: &mut impl ImageSink) -> Result<()> {
    let mut missing = 0usize;
    for row in 0..layout.height {
        for col in 0..layout.width {
            let Some(mcu) = mcus.get(layout.mcu_index(row, col)) else {
                missing += 1;
                continue;
            };
            let y = mcu.luma[layout.luma_block_index(row, col)]
                .get(row % BLOCK_DIM, col % BLOCK_DIM);
            let (chroma_row, chroma_col) = layout.chroma_position(row, col);
            let cb = mcu
                .cb
                .map_or(CHROMA_NEUTRAL, |b| b.get(chroma_row, chroma_col));
            let cr = mcu
                .cr
                .map_or(CHROMA_NEUTRAL, |b| b.get(chroma_row, chroma_col));
            sink.set_pixel(row, col, ycbcr_to_rgb(y, cb, cr))?;
        }
    }
    if missing > 0 {
        warn!(
            decoded = mcus.len(),
            expected = layout.num_mcus(),
            missing,
            "scan ended early, pixels left unset"
        );
    }
    Ok(())
}
