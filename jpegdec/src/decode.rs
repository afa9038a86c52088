// Copyright (c) the jpegdec Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Top-level decoding: walks the marker segments and decodes the scan.

use crate::bit_reader::BitReader;
use crate::entropy::{ComponentTables, DcPredictors};
use crate::error::{Error, Result};
use crate::headers::misc::{read_comment, read_restart_interval, skip_app};
use crate::headers::{
    Component, FrameHeader, HuffmanClass, HuffmanTable, Marker, QuantTable, ScanHeader,
};
use crate::idct::Idct8x8;
use crate::image::{Image, ImageSink};
use crate::limits::DecoderLimits;
use crate::mcu::{Mcu, McuLayout, assemble};

const SOI: u16 = 0xffd8;
const NUM_HUFFMAN_SLOTS: usize = 2;
const NUM_QUANT_SLOTS: usize = 4;

/// Tables defined so far, indexed by destination id. A later definition of
/// the same destination replaces the earlier one.
#[derive(Debug, Default)]
struct Tables {
    dc: [Option<HuffmanTable>; NUM_HUFFMAN_SLOTS],
    ac: [Option<HuffmanTable>; NUM_HUFFMAN_SLOTS],
    quant: [Option<QuantTable>; NUM_QUANT_SLOTS],
}

impl Tables {
    fn store_huffman(&mut self, table: HuffmanTable) {
        let slots = match table.class {
            HuffmanClass::Dc => &mut self.dc,
            HuffmanClass::Ac => &mut self.ac,
        };
        if let Some(slot) = slots.get_mut(table.id as usize) {
            *slot = Some(table);
        }
    }

    fn store_quant(&mut self, table: QuantTable) {
        if let Some(slot) = self.quant.get_mut(table.id as usize) {
            *slot = Some(table);
        }
    }

    fn huffman(&self, class: HuffmanClass, id: u8) -> Result<&HuffmanTable> {
        let slots = match class {
            HuffmanClass::Dc => &self.dc,
            HuffmanClass::Ac => &self.ac,
        };
        slots
            .get(id as usize)
            .and_then(Option::as_ref)
            .ok_or(Error::MissingHuffmanTable(class, id))
    }

    fn for_component(&self, component: &Component) -> Result<ComponentTables<'_>> {
        let quant = self
            .quant
            .get(component.quant_table as usize)
            .and_then(Option::as_ref)
            .ok_or(Error::MissingQuantTable(component.quant_table))?;
        Ok(ComponentTables {
            dc: &self.huffman(HuffmanClass::Dc, component.dc_table)?.tree,
            ac: &self.huffman(HuffmanClass::Ac, component.ac_table)?.tree,
            quant,
        })
    }
}

struct Decoder<'a> {
    br: BitReader<'a>,
    frame: Option<FrameHeader>,
    tables: Tables,
    comments: Vec<String>,
    limits: DecoderLimits,
}

impl<'a> Decoder<'a> {
    fn new(data: &'a [u8], limits: DecoderLimits) -> Decoder<'a> {
        Decoder {
            br: BitReader::new(data),
            frame: None,
            tables: Tables::default(),
            comments: vec![],
            limits,
        }
    }

    fn run(mut self, sink: &mut impl ImageSink) -> Result<()> {
        let signature = self.br.read_u16()?;
        if signature != SOI {
            return Err(Error::InvalidSignature(signature));
        }
        loop {
            let marker = Marker::read(&mut self.br)?;
            debug!(?marker, pos = self.br.byte_position(), "marker");
            match marker {
                Marker::Soi => return Err(Error::DuplicateSoi),
                Marker::Sof0 => {
                    if self.frame.is_some() {
                        return Err(Error::DuplicateFrame);
                    }
                    let frame = FrameHeader::read(&mut self.br)?;
                    let (width, height) = frame.size();
                    self.limits.check_size(width, height)?;
                    sink.set_size(width, height)?;
                    self.frame = Some(frame);
                }
                Marker::Sof2 => return Err(Error::ProgressiveUnsupported),
                Marker::Dht => {
                    for table in HuffmanTable::read_dht(&mut self.br)? {
                        self.tables.store_huffman(table);
                    }
                }
                Marker::Dqt => {
                    for table in QuantTable::read_dqt(&mut self.br)? {
                        self.tables.store_quant(table);
                    }
                }
                Marker::Dri => {
                    let interval = read_restart_interval(&mut self.br)?;
                    return Err(Error::RestartIntervalUnsupported(interval));
                }
                Marker::Rst(n) => return Err(Error::RestartMarkerUnsupported(n)),
                Marker::App(_) => skip_app(&mut self.br)?,
                Marker::Com => {
                    let comment = read_comment(&mut self.br)?;
                    self.comments.push(comment);
                }
                Marker::Sos => {
                    self.decode_scan(sink)?;
                    break;
                }
                Marker::Eoi => {
                    let trailing = self.br.bytes_remaining();
                    if trailing != 0 {
                        return Err(Error::TrailingData(trailing));
                    }
                    warn!("end of image before any scan");
                    break;
                }
            }
        }
        if !self.comments.is_empty() {
            sink.set_comment(self.comments.join("\n"));
        }
        Ok(())
    }

    /// Reads the scan header, decodes MCUs until the end of image marker and
    /// writes the pixels to `sink`.
    fn decode_scan(&mut self, sink: &mut impl ImageSink) -> Result<()> {
        let frame = self.frame.as_mut().ok_or(Error::ScanBeforeFrame)?;
        let scan = ScanHeader::read(&mut self.br, frame)?;
        let layout = McuLayout::new(frame)?;
        let tables = frame
            .components
            .iter()
            .map(|c| self.tables.for_component(c))
            .collect::<Result<Vec<_>>>()?;

        let idct = Idct8x8::new();
        let mut predictors = DcPredictors::new(scan.component_indices.len());
        let num_mcus = layout.num_mcus();
        let mut mcus = Vec::new();
        let mut extra = 0usize;
        loop {
            let mcu = Mcu::decode(
                &mut self.br,
                &layout,
                &scan.component_indices,
                &tables,
                &mut predictors,
                &idct,
            )?;
            // MCUs past the end of the image are decoded but not kept.
            if mcus.len() < num_mcus {
                mcus.push(mcu);
            } else {
                extra += 1;
            }
            trace!(mcu = mcus.len() + extra, "decoded MCU");
            if self.br.peek_is_end_marker()? {
                break;
            }
        }
        if extra > 0 {
            warn!(extra, "MCUs beyond the end of the image");
        }
        debug!(decoded = mcus.len(), expected = num_mcus, "finished scan");
        assemble(&layout, &mcus, sink)
    }
}

/// Decodes a baseline JPEG stream into `sink`, with the default
/// [`DecoderLimits`].
///
/// `sink.set_size` is called once the frame header has been read, before any
/// pixel. Comments, joined with newlines when there are several, are passed
/// to `sink.set_comment` after the last pixel.
pub fn decode(data: &[u8], sink: &mut impl ImageSink) -> Result<()> {
    decode_with_limits(data, sink, DecoderLimits::default())
}

/// Like [`decode`], failing before `sink.set_size` when the frame is larger
/// than `limits` allow.
pub fn decode_with_limits(
    data: &[u8],
    sink: &mut impl ImageSink,
    limits: DecoderLimits,
) -> Result<()> {
    Decoder::new(data, limits).run(sink)
}

/// Decodes a baseline JPEG stream into a new [`Image`].
pub fn decode_to_image(data: &[u8]) -> Result<Image> {
    let mut image = Image::default();
    decode(data, &mut image)?;
    Ok(image)
}
