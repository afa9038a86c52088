// Copyright (c) the jpegdec Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::io::Write;

use color_eyre::eyre::Result;
use jpegdec::image::Image;

/// Writes `image` as an 8-bit sRGB PNG.
pub fn to_png<Writer: Write>(image: &Image, buf: &mut Writer) -> Result<()> {
    let mut info = png::Info::with_size(image.width() as u32, image.height() as u32);
    info.srgb = Some(png::SrgbRenderingIntent::Perceptual);
    let mut encoder = png::Encoder::with_info(buf, info)?;
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::Fast);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&image.to_rgb_bytes())?;
    writer.finish()?;
    Ok(())
}
