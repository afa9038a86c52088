// Copyright (c) the jpegdec Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::bit_reader::BitReader;
use crate::error::{Error, Result};
use crate::headers::Segment;

/// Coding parameters of one color component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Component {
    /// Component identifier (`C_i`).
    pub label: u8,
    /// Horizontal sampling factor (`H_i`).
    pub h_sampling: u8,
    /// Vertical sampling factor (`V_i`).
    pub v_sampling: u8,
    /// Quantization table destination (`Tq_i`).
    pub quant_table: u8,
    /// DC Huffman table, assigned by the scan header (`Td_j`).
    pub dc_table: u8,
    /// AC Huffman table, assigned by the scan header (`Ta_j`).
    pub ac_table: u8,
}

/// Contents of a SOF0 segment.
#[derive(Debug, Clone, Default)]
pub struct FrameHeader {
    pub precision: u8,
    pub height: u16,
    pub width: u16,
    pub components: Vec<Component>,
}

impl FrameHeader {
    /// Reads a SOF0 segment; the marker itself has already been consumed.
    pub fn read(br: &mut BitReader) -> Result<FrameHeader> {
        let segment = Segment::begin(br, "SOF0")?;
        let precision = br.read_u8()?;
        let height = br.read_u16()?;
        let width = br.read_u16()?;
        let num_components = br.read_u8()? as usize;
        if segment.declared() != 6 + 3 * num_components {
            return Err(Error::SegmentLengthMismatch(
                "SOF0",
                segment.declared(),
                6 + 3 * num_components,
            ));
        }
        if precision != 8 {
            return Err(Error::UnsupportedPrecision(precision));
        }

        let mut components: Vec<Component> = Vec::with_capacity(num_components);
        for _ in 0..num_components {
            let label = br.read_u8()?;
            br.read_u8()?;
            let h_sampling = br.last_byte() >> 4;
            let v_sampling = br.last_byte() & 15;
            let quant_table = br.read_u8()?;
            if !(1..=4).contains(&h_sampling) || !(1..=4).contains(&v_sampling) {
                return Err(Error::InvalidSamplingFactor(label, h_sampling, v_sampling));
            }
            if quant_table > 3 {
                return Err(Error::InvalidQuantTableRef(label, quant_table));
            }
            if components.iter().any(|c| c.label == label) {
                return Err(Error::DuplicateComponent(label));
            }
            debug!(label, h_sampling, v_sampling, quant_table, "frame component");
            components.push(Component {
                label,
                h_sampling,
                v_sampling,
                quant_table,
                ..Default::default()
            });
        }
        segment.finish(br)?;
        debug!(width, height, num_components, "read SOF0");

        Ok(FrameHeader {
            precision,
            height,
            width,
            components,
        })
    }

    /// Index of the component with the given label.
    pub fn component_index(&self, label: u8) -> Option<usize> {
        self.components.iter().position(|c| c.label == label)
    }

    /// Size of the image as (width, height).
    pub fn size(&self) -> (usize, usize) {
        (self.width as usize, self.height as usize)
    }
}

#[cfg(test)]
mod test {
    use test_log::test;

    use super::*;

    const YCBCR_420: [u8; 17] = [
        0x00, 0x11, 0x08, 0x00, 0x10, 0x00, 0x20, 0x03, // len, P, Y, X, Nf
        0x01, 0x22, 0x00, // Y
        0x02, 0x11, 0x01, // Cb
        0x03, 0x11, 0x01, // Cr
    ];

    #[test]
    fn read_ycbcr_frame() -> Result<()> {
        let mut br = BitReader::new(&YCBCR_420);
        let frame = FrameHeader::read(&mut br)?;
        assert_eq!(frame.size(), (32, 16));
        assert_eq!(frame.components.len(), 3);
        assert_eq!(frame.components[0].h_sampling, 2);
        assert_eq!(frame.components[0].v_sampling, 2);
        assert_eq!(frame.components[2].label, 3);
        assert_eq!(frame.components[2].quant_table, 1);
        assert_eq!(frame.component_index(2), Some(1));
        assert_eq!(frame.component_index(4), None);
        assert_eq!(br.bytes_remaining(), 0);
        Ok(())
    }

    #[test]
    fn truncated_length_fails() {
        let mut data = YCBCR_420;
        data[1] = 0x10;
        assert!(matches!(
            FrameHeader::read(&mut BitReader::new(&data)),
            Err(Error::SegmentLengthMismatch("SOF0", 14, 15))
        ));
    }

    #[test]
    fn duplicate_label_fails() {
        let mut data = YCBCR_420;
        data[11] = 0x01;
        assert!(matches!(
            FrameHeader::read(&mut BitReader::new(&data)),
            Err(Error::DuplicateComponent(1))
        ));
    }

    #[test]
    fn invalid_sampling_fails() {
        let mut data = YCBCR_420;
        data[9] = 0x50;
        assert!(matches!(
            FrameHeader::read(&mut BitReader::new(&data)),
            Err(Error::InvalidSamplingFactor(1, 5, 0))
        ));
    }

    #[test]
    fn invalid_quant_ref_fails() {
        let mut data = YCBCR_420;
        data[16] = 4;
        assert!(matches!(
            FrameHeader::read(&mut BitReader::new(&data)),
            Err(Error::InvalidQuantTableRef(3, 4))
        ));
    }

    #[test]
    fn twelve_bit_precision_fails() {
        let mut data = YCBCR_420;
        data[2] = 12;
        assert!(matches!(
            FrameHeader::read(&mut BitReader::new(&data)),
            Err(Error::UnsupportedPrecision(12))
        ));
    }
}
