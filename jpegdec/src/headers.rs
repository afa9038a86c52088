// Copyright (c) the jpegdec Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Readers for the marker segments that precede the entropy-coded data.

pub mod frame;
pub mod marker;
pub mod misc;
pub mod scan;
pub mod tables;

pub use frame::{Component, FrameHeader};
pub use marker::Marker;
pub use scan::ScanHeader;
pub use tables::{HuffmanClass, HuffmanTable, QuantTable};

use crate::bit_reader::BitReader;
use crate::error::{Error, Result};

/// Length bookkeeping for one marker segment.
///
/// The big-endian length field counts itself, so the payload is two bytes
/// shorter than the declared value.
#[derive(Debug)]
pub(crate) struct Segment {
    name: &'static str,
    start: usize,
    declared: usize,
}

impl Segment {
    /// Reads the length field of the segment named `name`.
    pub(crate) fn begin(br: &mut BitReader, name: &'static str) -> Result<Segment> {
        let length = br.read_u16()?;
        if length < 2 {
            return Err(Error::InvalidSegmentLength(name, length));
        }
        Ok(Segment {
            name,
            start: br.byte_position(),
            declared: length as usize - 2,
        })
    }

    pub(crate) fn declared(&self) -> usize {
        self.declared
    }

    pub(crate) fn consumed(&self, br: &BitReader) -> usize {
        br.byte_position() - self.start
    }

    pub(crate) fn mismatch(&self, br: &BitReader) -> Error {
        Error::SegmentLengthMismatch(self.name, self.declared, self.consumed(br))
    }

    /// Checks that exactly the declared payload has been consumed.
    pub(crate) fn finish(self, br: &BitReader) -> Result<()> {
        if self.consumed(br) != self.declared {
            return Err(self.mismatch(br));
        }
        Ok(())
    }
}
