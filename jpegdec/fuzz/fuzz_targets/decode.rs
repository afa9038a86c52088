// Copyright (c) the jpegdec Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.
#![no_main]

use jpegdec::decode::decode_with_limits;
use jpegdec::image::Image;
use jpegdec::limits::DecoderLimits;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _ = decode_with_limits(data, &mut Image::default(), DecoderLimits::restrictive());
});
