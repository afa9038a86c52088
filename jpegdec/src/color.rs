// Copyright (c) the jpegdec Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

/// Neutral chroma value, used for grayscale images.
pub const CHROMA_NEUTRAL: f64 = 128.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    pub fn new(r: u8, g: u8, b: u8) -> Rgb {
        Rgb { r, g, b }
    }
}

#[inline]
fn to_channel(value: f64) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

/// Converts one JFIF YCbCr sample to RGB. Channels are clamped to
/// `[0, 255]` and then truncated.
pub fn ycbcr_to_rgb(y: f64, cb: f64, cr: f64) -> Rgb {
    let cb = cb - CHROMA_NEUTRAL;
    let cr = cr - CHROMA_NEUTRAL;
    let r = y + 1.402 * cr;
    let g = y - (0.114 * 1.772 * cb + 0.299 * 1.402 * cr) / 0.587;
    let b = y + 1.772 * cb;
    Rgb::new(to_channel(r), to_channel(g), to_channel(b))
}
