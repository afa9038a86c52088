// Copyright (c) the jpegdec Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Segments that carry no coding parameters: APPn, COM and DRI.

use crate::bit_reader::BitReader;
use crate::error::Result;
use crate::headers::Segment;

/// Skips the payload of an APPn segment.
pub fn skip_app(br: &mut BitReader) -> Result<()> {
    let segment = Segment::begin(br, "APPn")?;
    br.read_bytes(segment.declared())?;
    debug!(len = segment.declared(), "skipped APPn");
    segment.finish(br)
}

/// Reads the text of a COM segment. Invalid UTF-8 is replaced.
pub fn read_comment(br: &mut BitReader) -> Result<String> {
    let segment = Segment::begin(br, "COM")?;
    let text = String::from_utf8_lossy(br.read_bytes(segment.declared())?).into_owned();
    segment.finish(br)?;
    Ok(text)
}

/// Reads the restart interval of a DRI segment.
pub fn read_restart_interval(br: &mut BitReader) -> Result<u16> {
    let segment = Segment::begin(br, "DRI")?;
    let interval = br.read_u16()?;
    segment.finish(br)?;
    Ok(interval)
}

#[cfg(test)]
mod test {
    use test_log::test;

    use super::*;
    use crate::error::Error;

    #[test]
    fn skip_app_payload() -> Result<()> {
        let data = [0x00, 0x07, b'J', b'F', b'I', b'F', 0x00, 0xff];
        let mut br = BitReader::new(&data);
        skip_app(&mut br)?;
        assert_eq!(br.bytes_remaining(), 1);
        Ok(())
    }

    #[test]
    fn read_comment_text() -> Result<()> {
        let data = [0x00, 0x07, b'h', b'e', b'l', b'l', b'o'];
        assert_eq!(read_comment(&mut BitReader::new(&data))?, "hello");
        Ok(())
    }

    #[test]
    fn truncated_comment_fails() {
        let data = [0x00, 0x09, b'h', b'i'];
        assert!(matches!(
            read_comment(&mut BitReader::new(&data)),
            Err(Error::OutOfBounds(_))
        ));
        assert!(matches!(
            read_comment(&mut BitReader::new(&[0x00, 0x01])),
            Err(Error::InvalidSegmentLength("COM", 1))
        ));
    }

    #[test]
    fn restart_interval() -> Result<()> {
        let data = [0x00, 0x04, 0x01, 0x00];
        assert_eq!(read_restart_interval(&mut BitReader::new(&data))?, 256);
        let data = [0x00, 0x05, 0x01, 0x00, 0x00];
        assert!(read_restart_interval(&mut BitReader::new(&data)).is_err());
        Ok(())
    }
}
