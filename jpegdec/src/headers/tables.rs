// Copyright (c) the jpegdec Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::BLOCK_SIZE;
use crate::bit_reader::BitReader;
use crate::error::{Error, Result};
use crate::headers::Segment;
use crate::huffman::{HUFFMAN_MAX_BITS, HuffmanTree};
use crate::zigzag::unzigzag;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HuffmanClass {
    Dc,
    Ac,
}

impl TryFrom<u8> for HuffmanClass {
    type Error = u8;

    fn try_from(value: u8) -> std::result::Result<Self, u8> {
        match value {
            0 => Ok(HuffmanClass::Dc),
            1 => Ok(HuffmanClass::Ac),
            _ => Err(value),
        }
    }
}

/// One Huffman table from a DHT segment, with its decoding tree.
#[derive(Debug, Clone)]
pub struct HuffmanTable {
    pub class: HuffmanClass,
    /// Destination id (`Th`), 0 or 1 for baseline.
    pub id: u8,
    pub tree: HuffmanTree,
}

impl HuffmanTable {
    /// Reads every table of a DHT segment.
    pub fn read_dht(br: &mut BitReader) -> Result<Vec<HuffmanTable>> {
        let segment = Segment::begin(br, "DHT")?;
        let mut tables = vec![];
        while segment.consumed(br) < segment.declared() {
            br.read_u8()?;
            let class = br.last_byte() >> 4;
            let id = br.last_byte() & 15;
            let class = match HuffmanClass::try_from(class) {
                Ok(class) if id <= 1 => class,
                _ => return Err(Error::InvalidHuffmanTable(class, id)),
            };
            let mut counts = [0u8; HUFFMAN_MAX_BITS];
            for count in counts.iter_mut() {
                *count = br.read_u8()?;
            }
            let total: usize = counts.iter().map(|&c| c as usize).sum();
            if segment.consumed(br) + total > segment.declared() {
                return Err(Error::SegmentLengthMismatch(
                    "DHT",
                    segment.declared(),
                    segment.consumed(br) + total,
                ));
            }
            let values = br.read_bytes(total)?;
            let tree = HuffmanTree::build(&counts, values)?;
            debug!(?class, id, total, "read Huffman table");
            tables.push(HuffmanTable { class, id, tree });
        }
        segment.finish(br)?;
        Ok(tables)
    }
}

/// One quantization table, in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantTable {
    /// Destination id (`Tq`), 0..=3.
    pub id: u8,
    pub values: [u16; BLOCK_SIZE],
}

const DQT_ENTRY_SIZE: usize = 1 + BLOCK_SIZE;

impl QuantTable {
    /// Reads every table of a DQT segment. Only 8-bit tables are supported.
    pub fn read_dqt(br: &mut BitReader) -> Result<Vec<QuantTable>> {
        let segment = Segment::begin(br, "DQT")?;
        let size = segment.declared();
        if size == 0 || size % DQT_ENTRY_SIZE != 0 {
            return Err(Error::InvalidSegmentLength("DQT", size as u16 + 2));
        }
        let mut tables = Vec::with_capacity(size / DQT_ENTRY_SIZE);
        for _ in 0..size / DQT_ENTRY_SIZE {
            br.read_u8()?;
            let precision = br.last_byte() >> 4;
            let id = br.last_byte() & 15;
            if precision != 0 {
                return Err(Error::InvalidQuantPrecision(precision));
            }
            if id > 3 {
                return Err(Error::InvalidQuantTableId(id));
            }
            let raw = br.read_bytes(BLOCK_SIZE)?;
            let zigzagged: [u16; BLOCK_SIZE] = array_init::array_init(|i| raw[i] as u16);
            debug!(id, "read quantization table");
            tables.push(QuantTable {
                id,
                values: unzigzag(&zigzagged),
            });
        }
        segment.finish(br)?;
        Ok(tables)
    }
}
