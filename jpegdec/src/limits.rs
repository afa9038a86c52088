// Copyright (c) the jpegdec Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Resource limits for decoding.

use crate::error::{Error, Result};

/// Limits checked before the decoder asks a sink to allocate anything.
///
/// ```
/// use jpegdec::limits::DecoderLimits;
///
/// // No restrictions, for trusted input.
/// let limits = DecoderLimits::unlimited();
/// assert_eq!(limits.max_pixels, None);
///
/// // What `decode` and `decode_to_image` use.
/// let limits = DecoderLimits::default();
/// assert_eq!(limits.max_pixels, Some(1 << 28));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecoderLimits {
    /// Maximum `width * height` of a frame.
    /// Default: `1 << 28` (about 268 million pixels).
    pub max_pixels: Option<usize>,
}

impl Default for DecoderLimits {
    fn default() -> Self {
        Self {
            max_pixels: Some(1 << 28),
        }
    }
}

impl DecoderLimits {
    /// Limits suitable for untrusted input such as fuzzing.
    pub fn restrictive() -> Self {
        Self {
            max_pixels: Some(1 << 22),
        }
    }

    pub fn unlimited() -> Self {
        Self { max_pixels: None }
    }

    /// Fails with [`Error::ImageTooLarge`] if a `width` x `height` frame
    /// exceeds `max_pixels`.
    pub fn check_size(&self, width: usize, height: usize) -> Result<()> {
        let Some(max_pixels) = self.max_pixels else {
            return Ok(());
        };
        match width.checked_mul(height) {
            Some(pixels) if pixels <= max_pixels => Ok(()),
            _ => Err(Error::ImageTooLarge(width, height, max_pixels)),
        }
    }
}
