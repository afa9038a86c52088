// Copyright (c) the jpegdec Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::path::Path;

use color_eyre::eyre::{Result, eyre};
use jpegdec::image::Image;

pub mod png;
pub mod pnm;

/// Encodes `image` in the format named by the extension of `path`.
pub fn encode_for_path(image: &Image, path: &Path) -> Result<Vec<u8>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("png") => {
            let mut buf = vec![];
            png::to_png(image, &mut buf)?;
            Ok(buf)
        }
        Some("ppm") => Ok(pnm::to_ppm(image)),
        _ => Err(eyre!(
            "Unsupported output format for {}, use .png or .ppm",
            path.display()
        )),
    }
}
