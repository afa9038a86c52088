// Copyright (c) the jpegdec Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use crate::color::Rgb;
use crate::error::{Error, Result};

/// Receiver of decoded pixels.
///
/// The decoder calls `set_size` exactly once, before any pixel is written.
/// `set_comment` is called at most once, after the last pixel.
pub trait ImageSink {
    fn set_size(&mut self, width: usize, height: usize) -> Result<()>;
    fn set_pixel(&mut self, row: usize, col: usize, rgb: Rgb) -> Result<()>;
    fn set_comment(&mut self, comment: String);
}

/// A packed RGB image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Image {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
    comment: Option<String>,
}

impl Image {
    pub fn new(width: usize, height: usize) -> Result<Image> {
        let mut image = Image::default();
        image.set_size(width, height)?;
        Ok(image)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Returns `None` outside of the image.
    pub fn pixel(&self, row: usize, col: usize) -> Option<Rgb> {
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(self.pixels[row * self.width + col])
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Interleaved 8-bit RGB samples, row by row.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| [p.r, p.g, p.b]).collect()
    }
}

impl ImageSink for Image {
    fn set_size(&mut self, width: usize, height: usize) -> Result<()> {
        let num_pixels = width
            .checked_mul(height)
            .ok_or(Error::InvalidImageSize(width, height))?;
        let mut pixels = Vec::new();
        pixels.try_reserve_exact(num_pixels)?;
        pixels.resize(num_pixels, Rgb::BLACK);
        self.width = width;
        self.height = height;
        self.pixels = pixels;
        Ok(())
    }

    fn set_pixel(&mut self, row: usize, col: usize, rgb: Rgb) -> Result<()> {
        if row >= self.height || col >= self.width {
            return Err(Error::PixelOutOfBounds(row, col, self.width, self.height));
        }
        self.pixels[row * self.width + col] = rgb;
        Ok(())
    }

    fn set_comment(&mut self, comment: String) {
        self.comment = Some(comment);
    }
}

#[cfg(test)]
mod test {
    use test_log::test;

    use super::*;

    #[test]
    fn new_image_is_black() -> Result<()> {
        let image = Image::new(3, 2)?;
        assert_eq!(image.size(), (3, 2));
        assert_eq!(image.pixel(1, 2), Some(Rgb::BLACK));
        assert_eq!(image.pixel(2, 0), None);
        assert_eq!(image.to_rgb_bytes(), vec![0; 18]);
        assert_eq!(image.comment(), None);
        Ok(())
    }

    #[test]
    fn set_pixel_row_major() -> Result<()> {
        let mut image = Image::new(2, 2)?;
        image.set_pixel(1, 0, Rgb::new(1, 2, 3))?;
        assert_eq!(image.pixels()[2], Rgb::new(1, 2, 3));
        assert_eq!(image.to_rgb_bytes()[6..9], [1, 2, 3]);
        assert!(matches!(
            image.set_pixel(0, 2, Rgb::BLACK),
            Err(Error::PixelOutOfBounds(0, 2, 2, 2))
        ));
        Ok(())
    }

    #[test]
    fn comment_is_stored() {
        let mut image = Image::default();
        image.set_comment("made by hand".to_string());
        assert_eq!(image.comment(), Some("made by hand"));
    }

    #[test]
    fn huge_size_fails() {
        assert!(Image::new(usize::MAX, 2).is_err());
    }
}
