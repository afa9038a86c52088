// Copyright (c) the jpegdec Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::bit_reader::BitReader;
use crate::error::{Error, Result};
use crate::headers::{FrameHeader, Segment};

/// Contents of a SOS segment for a baseline, single-scan image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanHeader {
    /// Frame component indices, in the order the scan lists them.
    pub component_indices: Vec<usize>,
}

impl ScanHeader {
    /// Reads a SOS segment and assigns the DC/AC Huffman table references to
    /// the components of `frame`.
    pub fn read(br: &mut BitReader, frame: &mut FrameHeader) -> Result<ScanHeader> {
        let segment = Segment::begin(br, "SOS")?;
        let num_components = br.read_u8()? as usize;
        if num_components != frame.components.len() {
            return Err(Error::ScanComponentCount(
                num_components,
                frame.components.len(),
            ));
        }
        let mut component_indices = Vec::with_capacity(num_components);
        for _ in 0..num_components {
            let label = br.read_u8()?;
            br.read_u8()?;
            let dc_table = br.last_byte() >> 4;
            let ac_table = br.last_byte() & 15;
            if dc_table > 1 || ac_table > 1 {
                return Err(Error::InvalidScanTableRef(label, dc_table, ac_table));
            }
            let index = frame
                .component_index(label)
                .ok_or(Error::UnknownScanComponent(label))?;
            if component_indices.contains(&index) {
                return Err(Error::DuplicateScanComponent(label));
            }
            let component = &mut frame.components[index];
            component.dc_table = dc_table;
            component.ac_table = ac_table;
            component_indices.push(index);
        }
        let spectral_start = br.read_u8()?;
        let spectral_end = br.read_u8()?;
        if spectral_start != 0 || spectral_end != 63 {
            return Err(Error::UnsupportedSpectralSelection(
                spectral_start,
                spectral_end,
            ));
        }
        let approximation = br.read_u8()?;
        if approximation != 0 {
            return Err(Error::UnsupportedSuccessiveApproximation(approximation));
        }
        segment.finish(br)?;
        debug!(?component_indices, "read SOS");
        Ok(ScanHeader { component_indices })
    }
}
