// Copyright (c) the jpegdec Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Writers for small synthetic baseline JPEG streams.

/// Canonical Huffman code of one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Code {
    pub bits: u16,
    pub len: u8,
}

/// Writes entropy-coded data: most significant bit first, `0xff` bytes
/// stuffed with `0x00`, and the last byte padded with ones.
#[derive(Debug, Default)]
pub struct BitWriter {
    data: Vec<u8>,
    current: u8,
    num_bits: u8,
}

impl BitWriter {
    pub fn new() -> BitWriter {
        BitWriter::default()
    }

    pub fn write_bit(&mut self, bit: bool) {
        self.current = (self.current << 1) | bit as u8;
        self.num_bits += 1;
        if self.num_bits == 8 {
            self.flush_byte();
        }
    }

    pub fn write_bits(&mut self, value: u32, num: usize) {
        for i in (0..num).rev() {
            self.write_bit((value >> i) & 1 != 0);
        }
    }

    pub fn write_code(&mut self, code: Code) {
        self.write_bits(code.bits as u32, code.len as usize);
    }

    fn flush_byte(&mut self) {
        self.data.push(self.current);
        if self.current == 0xff {
            self.data.push(0x00);
        }
        self.current = 0;
        self.num_bits = 0;
    }

    pub fn finish(mut self) -> Vec<u8> {
        while self.num_bits != 0 {
            self.write_bit(true);
        }
        self.data
    }
}

/// Code lengths and symbols of one Huffman table, as stored in DHT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanSpec {
    pub counts: [u8; 16],
    pub values: Vec<u8>,
}

impl HuffmanSpec {
    pub fn new(counts: &[u8], values: &[u8]) -> HuffmanSpec {
        let mut all_counts = [0u8; 16];
        all_counts[..counts.len()].copy_from_slice(counts);
        HuffmanSpec {
            counts: all_counts,
            values: values.to_vec(),
        }
    }

    /// DC table with a 4-bit code for each category 0..=11.
    pub fn flat_dc() -> HuffmanSpec {
        HuffmanSpec::new(&[0, 0, 0, 12], &(0..12).collect::<Vec<u8>>())
    }

    /// AC table with an 8-bit code for end of block, the zero run of 16 and
    /// every run/category pair with category 1..=10.
    pub fn flat_ac() -> HuffmanSpec {
        let mut values = vec![0x00, 0xf0];
        for run in 0..16u8 {
            for category in 1..=10u8 {
                values.push(run << 4 | category);
            }
        }
        let mut counts = [0u8; 8];
        counts[7] = values.len() as u8;
        HuffmanSpec::new(&counts, &values)
    }

    /// Code of every symbol, indexed by symbol value.
    pub fn codes(&self) -> Vec<Option<Code>> {
        let mut codes = vec![None; 256];
        let mut values = self.values.iter();
        let mut code = 0u16;
        for (i, &count) in self.counts.iter().enumerate() {
            for _ in 0..count {
                let value = *values.next().expect("fewer values than counts");
                codes[value as usize] = Some(Code {
                    bits: code,
                    len: i as u8 + 1,
                });
                code += 1;
            }
            code <<= 1;
        }
        codes
    }
}

fn category(value: i32) -> u8 {
    (32 - value.unsigned_abs().leading_zeros()) as u8
}

/// Extra bits of `value` in its magnitude category.
fn magnitude_bits(value: i32, category: u8) -> u32 {
    if value < 0 {
        (value + (1 << category) - 1) as u32
    } else {
        value as u32
    }
}

/// Huffman-codes blocks of quantized coefficients.
#[derive(Debug, Clone)]
pub struct BlockEncoder {
    dc: Vec<Option<Code>>,
    ac: Vec<Option<Code>>,
}

impl BlockEncoder {
    pub fn new(dc: &HuffmanSpec, ac: &HuffmanSpec) -> BlockEncoder {
        BlockEncoder {
            dc: dc.codes(),
            ac: ac.codes(),
        }
    }

    /// Encoder for [`HuffmanSpec::flat_dc`] and [`HuffmanSpec::flat_ac`].
    pub fn flat() -> BlockEncoder {
        BlockEncoder::new(&HuffmanSpec::flat_dc(), &HuffmanSpec::flat_ac())
    }

    fn write_symbol(codes: &[Option<Code>], writer: &mut BitWriter, symbol: u8) {
        let code = codes[symbol as usize]
            .unwrap_or_else(|| panic!("no code for symbol {symbol:02x}"));
        writer.write_code(code);
    }

    /// Writes one block. `coefficients` are in zigzag order and the first
    /// one is the DC difference to the previous block of the component.
    pub fn encode(&self, writer: &mut BitWriter, coefficients: &[i32; 64]) {
        let dc = coefficients[0];
        let dc_category = category(dc);
        Self::write_symbol(&self.dc, writer, dc_category);
        writer.write_bits(magnitude_bits(dc, dc_category), dc_category as usize);

        let mut run = 0u8;
        for &value in &coefficients[1..] {
            if value == 0 {
                run += 1;
                continue;
            }
            while run > 15 {
                Self::write_symbol(&self.ac, writer, 0xf0);
                run -= 16;
            }
            let ac_category = category(value);
            Self::write_symbol(&self.ac, writer, run << 4 | ac_category);
            writer.write_bits(magnitude_bits(value, ac_category), ac_category as usize);
            run = 0;
        }
        if run > 0 {
            Self::write_symbol(&self.ac, writer, 0x00);
        }
    }
}

/// Assembles a JPEG stream segment by segment, starting with SOI.
#[derive(Debug, Clone)]
pub struct JpegWriter {
    data: Vec<u8>,
}

impl Default for JpegWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl JpegWriter {
    pub fn new() -> JpegWriter {
        JpegWriter {
            data: vec![0xff, 0xd8],
        }
    }

    /// Writes a bare marker `ff<marker>`.
    pub fn marker(mut self, marker: u8) -> JpegWriter {
        self.data.extend([0xff, marker]);
        self
    }

    /// Writes a marker followed by a segment with a correct length field.
    pub fn segment(self, marker: u8, payload: &[u8]) -> JpegWriter {
        let mut writer = self.marker(marker);
        writer
            .data
            .extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
        writer.data.extend_from_slice(payload);
        writer
    }

    pub fn app0_jfif(self) -> JpegWriter {
        self.segment(
            0xe0,
            &[b'J', b'F', b'I', b'F', 0, 1, 1, 0, 0, 1, 0, 1, 0, 0],
        )
    }

    pub fn comment(self, text: &str) -> JpegWriter {
        self.segment(0xfe, text.as_bytes())
    }

    /// Quantization table `id`, values in zigzag order.
    pub fn dqt(self, id: u8, values: &[u8; 64]) -> JpegWriter {
        let mut payload = vec![id];
        payload.extend_from_slice(values);
        self.segment(0xdb, &payload)
    }

    /// Huffman table of `class` (0 = DC, 1 = AC) and `id`.
    pub fn dht(self, class: u8, id: u8, table: &HuffmanSpec) -> JpegWriter {
        let mut payload = vec![class << 4 | id];
        payload.extend_from_slice(&table.counts);
        payload.extend_from_slice(&table.values);
        self.segment(0xc4, &payload)
    }

    /// Baseline frame header; components are `(label, h, v, quant table)`.
    pub fn sof0(self, width: u16, height: u16, components: &[(u8, u8, u8, u8)]) -> JpegWriter {
        let mut payload = vec![8];
        payload.extend_from_slice(&height.to_be_bytes());
        payload.extend_from_slice(&width.to_be_bytes());
        payload.push(components.len() as u8);
        for &(label, h, v, quant) in components {
            payload.extend([label, h << 4 | v, quant]);
        }
        self.segment(0xc0, &payload)
    }

    /// Baseline scan header; components are `(label, dc table, ac table)`.
    pub fn sos(self, components: &[(u8, u8, u8)]) -> JpegWriter {
        let mut payload = vec![components.len() as u8];
        for &(label, dc, ac) in components {
            payload.extend([label, dc << 4 | ac]);
        }
        payload.extend([0, 63, 0]);
        self.segment(0xda, &payload)
    }

    /// Appends raw bytes, typically entropy-coded data.
    pub fn raw(mut self, bytes: &[u8]) -> JpegWriter {
        self.data.extend_from_slice(bytes);
        self
    }

    pub fn eoi(self) -> JpegWriter {
        self.marker(0xd9)
    }

    pub fn finish(self) -> Vec<u8> {
        self.data
    }
}

/// Builds a complete grayscale stream with flat Huffman tables and the
/// quantization table `quant`; `blocks` are in zigzag order with
/// differential DC, one per MCU in raster order.
pub fn grayscale_jpeg(width: u16, height: u16, quant: &[u8; 64], blocks: &[[i32; 64]]) -> Vec<u8> {
    let encoder = BlockEncoder::flat();
    let mut bits = BitWriter::new();
    for block in blocks {
        encoder.encode(&mut bits, block);
    }
    JpegWriter::new()
        .app0_jfif()
        .dqt(0, quant)
        .sof0(width, height, &[(1, 1, 1, 0)])
        .dht(0, 0, &HuffmanSpec::flat_dc())
        .dht(1, 0, &HuffmanSpec::flat_ac())
        .sos(&[(1, 0, 0)])
        .raw(&bits.finish())
        .eoi()
        .finish()
}
