// Copyright (c) the jpegdec Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Decoding of the Huffman-coded DCT coefficients of baseline blocks.

use crate::BLOCK_SIZE;
use crate::bit_reader::BitReader;
use crate::block::Block;
use crate::error::{Error, Result};
use crate::headers::QuantTable;
use crate::huffman::HuffmanTree;
use crate::zigzag::unzigzag;

const END_OF_BLOCK: u8 = 0x00;
const ZERO_RUN_16: u8 = 0xf0;
const MAX_DC_CATEGORY: u8 = 11;

/// Tables used to decode the blocks of one component.
#[derive(Debug, Clone, Copy)]
pub struct ComponentTables<'a> {
    pub dc: &'a HuffmanTree,
    pub ac: &'a HuffmanTree,
    pub quant: &'a QuantTable,
}

/// Running DC values, one per frame component.
#[derive(Debug, Clone, Default)]
pub struct DcPredictors {
    values: Vec<i32>,
}

impl DcPredictors {
    pub fn new(num_components: usize) -> DcPredictors {
        DcPredictors {
            values: vec![0; num_components],
        }
    }

    /// Adds a DC difference to the predictor of `component` and returns the
    /// new absolute DC value.
    pub fn apply(&mut self, component: usize, diff: i32) -> i32 {
        let value = &mut self.values[component];
        *value = value.wrapping_add(diff);
        *value
    }
}

/// Turns the `category` extra bits of a coefficient into its value: a leading
/// zero bit marks a negative value stored as the complement of its magnitude.
/// ```
/// # use jpegdec::entropy::extend;
/// assert_eq!(extend(0b011, 3), -4);
/// assert_eq!(extend(0b100, 3), 4);
/// assert_eq!(extend(0b0, 1), -1);
/// assert_eq!(extend(0, 0), 0);
/// ```
pub fn extend(bits: u32, category: u8) -> i32 {
    if category == 0 {
        return 0;
    }
    let bits = bits as i32;
    if bits < 1 << (category - 1) {
        bits - (1 << category) + 1
    } else {
        bits
    }
}

fn read_value(br: &mut BitReader, category: u8) -> Result<i32> {
    Ok(extend(br.read_bits(category as usize)?, category))
}

/// Reads the 64 coefficients of one block in zigzag order. The first one is
/// the DC difference to the previous block of the same component.
pub fn read_coefficients(
    br: &mut BitReader,
    dc: &HuffmanTree,
    ac: &HuffmanTree,
) -> Result<[i32; BLOCK_SIZE]> {
    let mut coeffs = [0i32; BLOCK_SIZE];
    let category = dc.read_symbol(br)?;
    if category > MAX_DC_CATEGORY {
        return Err(Error::InvalidDcSymbol(category));
    }
    coeffs[0] = read_value(br, category)?;

    let mut k = 1;
    while k < BLOCK_SIZE {
        let symbol = ac.read_symbol(br)?;
        if symbol == END_OF_BLOCK {
            break;
        }
        let run = (symbol >> 4) as usize;
        let category = symbol & 15;
        if category == 0 && symbol != ZERO_RUN_16 {
            return Err(Error::InvalidAcSymbol(symbol));
        }
        k += run;
        if k >= BLOCK_SIZE {
            return Err(Error::TooManyCoefficients(k + 1));
        }
        coeffs[k] = read_value(br, category)?;
        k += 1;
    }
    Ok(coeffs)
}

/// Decodes one block of `component`: reads its coefficients, resolves the DC
/// prediction and dequantizes. The result is in row-major order.
pub fn decode_block(
    br: &mut BitReader,
    tables: &ComponentTables,
    predictors: &mut DcPredictors,
    component: usize,
) -> Result<Block> {
    let mut coeffs = read_coefficients(br, tables.dc, tables.ac)?;
    coeffs[0] = predictors.apply(component, coeffs[0]);
    trace!(component, dc = coeffs[0], "decoded block");
    let natural = unzigzag(&coeffs);
    let quant = &tables.quant.values;
    Ok(Block::from_fn(|i| natural[i] as f64 * quant[i] as f64))
}

#[cfg(test)]
mod test {
    use test_log::test;

    use super::*;

    fn unit_quant() -> QuantTable {
        QuantTable {
            id: 0,
            values: [1; BLOCK_SIZE],
        }
    }

    #[test]
    fn extend_all_categories() {
        for category in 1..=11u8 {
            let max = (1i32 << category) - 1;
            assert_eq!(extend(0, category), -max);
            assert_eq!(extend(max as u32, category), max);
            assert_eq!(extend(1 << (category - 1), category), 1 << (category - 1));
            assert_eq!(
                extend((1 << (category - 1)) - 1, category),
                -(1 << (category - 1))
            );
        }
    }

    #[test]
    fn dc_prediction() -> Result<()> {
        // DC: "0" -> category 3, "1" -> category 2. AC: "0" -> end of block.
        let dc = HuffmanTree::build(&[2], &[3, 2])?;
        let ac = HuffmanTree::build(&[1], &[END_OF_BLOCK])?;
        let quant = unit_quant();
        let tables = ComponentTables {
            dc: &dc,
            ac: &ac,
            quant: &quant,
        };
        // +5: 0 101 0, then -2: 1 01 0, padded with ones.
        let data = [0b0101_0101, 0b0011_1111];
        let mut br = BitReader::new(&data);
        let mut predictors = DcPredictors::new(3);
        let first = decode_block(&mut br, &tables, &mut predictors, 0)?;
        let second = decode_block(&mut br, &tables, &mut predictors, 0)?;
        assert_eq!(first.get(0, 0), 5.0);
        assert_eq!(second.get(0, 0), 3.0);
        assert!(second.data[1..].iter().all(|&c| c == 0.0));
        // Other components keep their own predictor.
        assert_eq!(predictors.apply(1, 0), 0);
        assert_eq!(predictors.apply(0, 0), 3);
        Ok(())
    }

    #[test]
    fn ac_runs_and_dequantization() -> Result<()> {
        // DC: "0" -> category 0. AC: "0" -> EOB, "10" -> run 1 / category 2,
        // "11" -> zero run of 16.
        let dc = HuffmanTree::build(&[1], &[0])?;
        let ac = HuffmanTree::build(&[1, 2], &[END_OF_BLOCK, 0x12, ZERO_RUN_16])?;
        let mut quant = unit_quant();
        quant.values[8] = 3;
        let tables = ComponentTables {
            dc: &dc,
            ac: &ac,
            quant: &quant,
        };
        // DC 0 | run 1, value 3 ("11") | ZRL | run 1, value -3 ("00") | EOB
        let data = [0b0101_1111, 0b0000_1111];
        let mut br = BitReader::new(&data);
        let coeffs = read_coefficients(&mut br, &dc, &ac)?;
        let mut expected = [0; BLOCK_SIZE];
        expected[2] = 3;
        expected[20] = -3;
        assert_eq!(coeffs, expected);

        let mut br = BitReader::new(&data);
        let block = decode_block(&mut br, &tables, &mut DcPredictors::new(1), 0)?;
        // Zigzag position 2 is row 1, column 0.
        assert_eq!(block.get(1, 0), 9.0);
        // Zigzag position 20 is row 5, column 0.
        assert_eq!(block.get(5, 0), -3.0);
        Ok(())
    }

    #[test]
    fn too_many_coefficients() -> Result<()> {
        let dc = HuffmanTree::build(&[1], &[0])?;
        let ac = HuffmanTree::build(&[1], &[ZERO_RUN_16])?;
        // Four zero runs of 16 overflow the block.
        let data = [0x00];
        assert!(matches!(
            read_coefficients(&mut BitReader::new(&data), &dc, &ac),
            Err(Error::TooManyCoefficients(65))
        ));
        Ok(())
    }

    #[test]
    fn full_block_without_end_of_block() -> Result<()> {
        let dc = HuffmanTree::build(&[1], &[0])?;
        let ac = HuffmanTree::build(&[1], &[0x01])?;
        // DC "0", then 63 times "0" + one value bit "1".
        let mut bits = vec![false];
        for _ in 0..63 {
            bits.extend([false, true]);
        }
        let mut data = vec![];
        for chunk in bits.chunks(8) {
            let mut byte = 0xffu8;
            for (i, &bit) in chunk.iter().enumerate() {
                if !bit {
                    byte &= !(0x80 >> i);
                }
            }
            data.push(byte);
        }
        let coeffs = read_coefficients(&mut BitReader::new(&data), &dc, &ac)?;
        assert_eq!(coeffs[0], 0);
        assert!(coeffs[1..].iter().all(|&c| c == 1));
        Ok(())
    }

    #[test]
    fn invalid_symbols() -> Result<()> {
        let dc = HuffmanTree::build(&[1], &[12])?;
        let ac = HuffmanTree::build(&[1], &[0x20])?;
        assert!(matches!(
            read_coefficients(&mut BitReader::new(&[0x00]), &dc, &ac),
            Err(Error::InvalidDcSymbol(12))
        ));
        let dc = HuffmanTree::build(&[1], &[0])?;
        assert!(matches!(
            read_coefficients(&mut BitReader::new(&[0x00]), &dc, &ac),
            Err(Error::InvalidAcSymbol(0x20))
        ));
        Ok(())
    }
}
