// Copyright (c) the jpegdec Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::fmt::Debug;

use crate::error::{Error, Result};
use byteorder::{BigEndian, ByteOrder};

/// Reads bits and bytes from a JPEG stream, most significant bit first.
///
/// Segment headers are read with the byte-aligned methods; entropy-coded
/// data is read one bit at a time with byte-stuffing applied.
#[derive(Clone)]
pub struct BitReader<'a> {
    data: &'a [u8],
    /// Index of the next raw byte that has not been consumed.
    pos: usize,
    total_bits_read: usize,
    last_byte: u8,
}

impl Debug for BitReader<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BitReader{{ data: [{} bytes], pos: {}, last_byte: {:08b}, total_bits_read: {} }}",
            self.data.len(),
            self.pos,
            self.last_byte,
            self.total_bits_read,
        )
    }
}

impl<'a> BitReader<'a> {
    /// Constructs a BitReader for a given range of data.
    pub fn new(data: &'a [u8]) -> BitReader<'a> {
        BitReader {
            data,
            pos: 0,
            total_bits_read: 0,
            last_byte: 0,
        }
    }

    fn next_raw_byte(&mut self) -> Result<u8> {
        let byte = *self.data.get(self.pos).ok_or(Error::OutOfBounds(self.pos))?;
        self.pos += 1;
        Ok(byte)
    }

    fn check_aligned(&self) -> Result<()> {
        if self.total_bits_read % 8 != 0 {
            return Err(Error::NotByteAligned(self.total_bits_read));
        }
        Ok(())
    }

    /// Reads one bit of entropy-coded data.
    ///
    /// A `0xff` byte must be followed by a stuffed `0x00`, which is skipped.
    /// Skipping it also advances the bit position by a whole byte, so the
    /// offset inside the current byte is unchanged.
    /// ```
    /// # use jpegdec::bit_reader::BitReader;
    /// let mut br = BitReader::new(&[0b1010_0000, 0xff, 0x00]);
    /// assert!(br.read_bit()?);
    /// assert!(!br.read_bit()?);
    /// br.read_bits(6)?;
    /// assert_eq!(br.read_bits(8)?, 0xff);
    /// assert_eq!(br.total_bits_read(), 24);
    /// assert!(br.read_bit().is_err());
    /// # Ok::<(), jpegdec::error::Error>(())
    /// ```
    pub fn read_bit(&mut self) -> Result<bool> {
        if self.total_bits_read % 8 == 0 {
            self.last_byte = self.next_raw_byte()?;
            if self.last_byte == 0xff {
                let marker_pos = self.pos - 1;
                match self.data.get(self.pos) {
                    None => return Err(Error::OutOfBounds(self.pos)),
                    Some(0x00) => {
                        self.pos += 1;
                        self.total_bits_read += 8;
                    }
                    Some(0xd9) => return Err(Error::UnexpectedEndOfImage(marker_pos)),
                    Some(&byte) => return Err(Error::UnescapedMarker(byte, marker_pos)),
                }
            }
        }
        let bit = self.last_byte & (0x80 >> (self.total_bits_read % 8)) != 0;
        self.total_bits_read += 1;
        Ok(bit)
    }

    /// Reads `num` bits of entropy-coded data as an unsigned integer, first bit
    /// most significant.
    pub fn read_bits(&mut self, num: usize) -> Result<u32> {
        debug_assert!(num <= 16);
        let mut value = 0u32;
        for _ in 0..num {
            value = (value << 1) | self.read_bit()? as u32;
        }
        Ok(value)
    }

    /// Checks, without consuming anything, whether the next unread bytes are
    /// the end of image marker `ffd9`.
    /// ```
    /// # use jpegdec::bit_reader::BitReader;
    /// let mut br = BitReader::new(&[0x12, 0xff, 0xd9]);
    /// assert!(!br.peek_is_end_marker()?);
    /// br.read_u8()?;
    /// assert!(br.peek_is_end_marker()?);
    /// assert_eq!(br.read_u16()?, 0xffd9);
    /// assert!(br.peek_is_end_marker().is_err());
    /// # Ok::<(), jpegdec::error::Error>(())
    /// ```
    pub fn peek_is_end_marker(&self) -> Result<bool> {
        match self.data.get(self.pos) {
            None => Err(Error::OutOfBounds(self.pos)),
            Some(0xff) => match self.data.get(self.pos + 1) {
                None => Err(Error::OutOfBounds(self.pos + 1)),
                Some(&byte) => Ok(byte == 0xd9),
            },
            Some(_) => Ok(false),
        }
    }

    /// Reads one byte. The reader must be at a byte boundary.
    pub fn read_u8(&mut self) -> Result<u8> {
        self.check_aligned()?;
        self.last_byte = self.next_raw_byte()?;
        self.total_bits_read += 8;
        Ok(self.last_byte)
    }

    /// Reads a big-endian 16-bit value. The reader must be at a byte boundary.
    /// ```
    /// # use jpegdec::bit_reader::BitReader;
    /// let mut br = BitReader::new(&[0x12, 0x34, 0x56]);
    /// assert_eq!(br.read_u16()?, 0x1234);
    /// assert_eq!(br.last_byte(), 0x34);
    /// assert!(br.read_u16().is_err());
    /// # Ok::<(), jpegdec::error::Error>(())
    /// ```
    pub fn read_u16(&mut self) -> Result<u16> {
        self.check_aligned()?;
        let bytes = self
            .data
            .get(self.pos..self.pos + 2)
            .ok_or(Error::OutOfBounds(self.data.len()))?;
        let value = BigEndian::read_u16(bytes);
        self.last_byte = bytes[1];
        self.pos += 2;
        self.total_bits_read += 16;
        Ok(value)
    }

    /// Reads `num` raw bytes. The reader must be at a byte boundary.
    pub fn read_bytes(&mut self, num: usize) -> Result<&'a [u8]> {
        self.check_aligned()?;
        let end = self
            .pos
            .checked_add(num)
            .filter(|&end| end <= self.data.len())
            .ok_or(Error::OutOfBounds(self.data.len()))?;
        let bytes = &self.data[self.pos..end];
        if let Some(&last) = bytes.last() {
            self.last_byte = last;
        }
        self.pos = end;
        self.total_bits_read += num * 8;
        Ok(bytes)
    }

    /// Returns the most recently consumed raw byte.
    pub fn last_byte(&self) -> u8 {
        self.last_byte
    }

    /// Returns the total number of bits that have been read or skipped.
    pub fn total_bits_read(&self) -> usize {
        self.total_bits_read
    }

    /// Returns the offset of the next unread byte.
    pub fn byte_position(&self) -> usize {
        self.pos
    }

    /// Returns the number of bytes that have not been read yet.
    pub fn bytes_remaining(&self) -> usize {
        self.data.len() - self.pos
    }
}
