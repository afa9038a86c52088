// Copyright (c) the jpegdec Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::collections::TryReserveError;

use thiserror::Error;

use crate::headers::HuffmanClass;

#[derive(Error, Debug)]
pub enum Error {
    // Bit reader errors
    #[error("Read out of bounds at byte {0}")]
    OutOfBounds(usize),
    #[error("Byte-aligned read at bit position {0}")]
    NotByteAligned(usize),
    #[error("End of image marker inside entropy-coded data at byte {0}")]
    UnexpectedEndOfImage(usize),
    #[error("Unescaped marker ff{0:02x} inside entropy-coded data at byte {1}")]
    UnescapedMarker(u8, usize),
    // Marker errors
    #[error("Invalid signature {0:04x}, expected ffd8")]
    InvalidSignature(u16),
    #[error("Not a marker: {0:04x}")]
    NotAMarker(u16),
    #[error("Second SOI marker")]
    DuplicateSoi,
    #[error("Second SOF0 marker")]
    DuplicateFrame,
    #[error("Progressive JPEG (SOF2) is not supported")]
    ProgressiveUnsupported,
    #[error("Restart interval (DRI) of {0} MCUs is not supported")]
    RestartIntervalUnsupported(u16),
    #[error("Restart marker RST{0} is not supported")]
    RestartMarkerUnsupported(u8),
    #[error("{0} bytes of trailing data after EOI")]
    TrailingData(usize),
    // Segment errors
    #[error("Invalid length {1} for {0} segment")]
    InvalidSegmentLength(&'static str, u16),
    #[error("{0} segment declares {1} bytes but {2} were consumed")]
    SegmentLengthMismatch(&'static str, usize, usize),
    #[error("Unsupported sample precision: {0} bits")]
    UnsupportedPrecision(u8),
    #[error("Duplicate component label {0}")]
    DuplicateComponent(u8),
    #[error("Invalid sampling factors {1}x{2} for component {0}")]
    InvalidSamplingFactor(u8, u8, u8),
    #[error("Invalid quantization table reference {1} for component {0}")]
    InvalidQuantTableRef(u8, u8),
    #[error("Invalid Huffman table class {0} / id {1}")]
    InvalidHuffmanTable(u8, u8),
    #[error("Invalid quantization table precision {0}")]
    InvalidQuantPrecision(u8),
    #[error("Invalid quantization table id {0}")]
    InvalidQuantTableId(u8),
    #[error("Scan has {0} components, frame has {1}")]
    ScanComponentCount(usize, usize),
    #[error("Scan references unknown component {0}")]
    UnknownScanComponent(u8),
    #[error("Component {0} appears twice in scan")]
    DuplicateScanComponent(u8),
    #[error("Invalid Huffman table references DC {1} / AC {2} for component {0}")]
    InvalidScanTableRef(u8, u8, u8),
    #[error("Unsupported spectral selection {0}..={1}, only 0..=63 is baseline")]
    UnsupportedSpectralSelection(u8, u8),
    #[error("Unsupported successive approximation {0:02x}")]
    UnsupportedSuccessiveApproximation(u8),
    #[error("SOS before SOF0")]
    ScanBeforeFrame,
    // Huffman errors
    #[error("Huffman code lengths have {0} levels, max is 16")]
    HuffmanTooDeep(usize),
    #[error("Huffman code lengths count {0} symbols but {1} were given")]
    HuffmanCountMismatch(usize, usize),
    #[error("Huffman code is over-subscribed at length {0}")]
    HuffmanOverSubscribed(usize),
    #[error("Invalid Huffman code in entropy-coded data")]
    InvalidHuffmanCode,
    // Entropy-coded data errors
    #[error("Block has more than 64 coefficients ({0})")]
    TooManyCoefficients(usize),
    #[error("Invalid DC symbol {0:02x}")]
    InvalidDcSymbol(u8),
    #[error("Invalid AC symbol {0:02x}")]
    InvalidAcSymbol(u8),
    // Frame layout errors
    #[error("Invalid image size: {0}x{1}")]
    InvalidImageSize(usize, usize),
    #[error("Unsupported number of components: {0}")]
    UnsupportedComponentCount(usize),
    #[error("Unsupported sampling factors {1}x{2} for component {0}")]
    UnsupportedSampling(u8, u8, u8),
    #[error("Quantization table {0} is not defined")]
    MissingQuantTable(u8),
    #[error("{0:?} Huffman table {1} is not defined")]
    MissingHuffmanTable(HuffmanClass, u8),
    #[error("Image of {0}x{1} exceeds the limit of {2} pixels")]
    ImageTooLarge(usize, usize, usize),
    #[error("Out of memory: {0}")]
    OutOfMemory(#[from] TryReserveError),
    // Sink errors
    #[error("Pixel ({0}, {1}) outside of {2}x{3} image")]
    PixelOutOfBounds(usize, usize, usize, usize),
}

pub type Result<T> = std::result::Result<T, Error>;
