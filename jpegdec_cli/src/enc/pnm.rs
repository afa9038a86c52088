// Copyright (c) the jpegdec Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use jpegdec::image::Image;

/// Binary PPM with 8-bit samples.
pub fn to_ppm(image: &Image) -> Vec<u8> {
    let header = format!("P6\n{} {}\n255\n", image.width(), image.height());
    let mut ret = header.into_bytes();
    ret.extend_from_slice(&image.to_rgb_bytes());
    ret
}
