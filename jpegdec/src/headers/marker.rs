// Copyright (c) the jpegdec Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::bit_reader::BitReader;
use crate::error::{Error, Result};

/// The markers this decoder knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// Start of image.
    Soi,
    /// Baseline DCT frame.
    Sof0,
    /// Progressive DCT frame; recognized only to be rejected.
    Sof2,
    /// Huffman tables.
    Dht,
    /// Quantization tables.
    Dqt,
    /// Restart interval; recognized only to be rejected.
    Dri,
    /// Start of scan.
    Sos,
    /// Restart marker `n`; recognized only to be rejected.
    Rst(u8),
    /// Application segment `n`.
    App(u8),
    /// Comment.
    Com,
    /// End of image.
    Eoi,
}

impl TryFrom<u16> for Marker {
    type Error = Error;

    fn try_from(value: u16) -> Result<Self> {
        match value {
            0xffd8 => Ok(Marker::Soi),
            0xffc0 => Ok(Marker::Sof0),
            0xffc2 => Ok(Marker::Sof2),
            0xffc4 => Ok(Marker::Dht),
            0xffdb => Ok(Marker::Dqt),
            0xffdd => Ok(Marker::Dri),
            0xffda => Ok(Marker::Sos),
            0xffd0..=0xffd7 => Ok(Marker::Rst((value - 0xffd0) as u8)),
            0xffe0..=0xffef => Ok(Marker::App((value - 0xffe0) as u8)),
            0xfffe => Ok(Marker::Com),
            0xffd9 => Ok(Marker::Eoi),
            _ => Err(Error::NotAMarker(value)),
        }
    }
}

impl Marker {
    /// Reads the next two bytes as a marker.
    pub fn read(br: &mut BitReader) -> Result<Marker> {
        Marker::try_from(br.read_u16()?)
    }
}
