// Copyright (c) the jpegdec Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Logging macros that compile to nothing unless the `tracing` feature is enabled.
//!
//! The macros live in textual scope (`#[macro_use]` on the module chain in
//! `lib.rs`), so call sites need no import. A path re-export would make
//! `warn` ambiguous with the built-in `#[warn]` attribute.

#[cfg(feature = "tracing")]
macro_rules! debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(feature = "tracing")]
macro_rules! trace {
    ($($arg:tt)*) => { tracing::trace!($($arg)*) };
}

#[cfg(feature = "tracing")]
macro_rules! warn {
    ($($arg:tt)*) => { tracing::warn!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
macro_rules! warn {
    ($($arg:tt)*) => {};
}

#[cfg(test)]
mod test {
    use test_log::test;

    #[derive(Debug)]
    struct Marker;

    #[test]
    fn macros_accept_tracing_syntax() {
        let marker = Marker;
        let len = 16usize;
        let missing = 3;
        debug!(?marker, pos = len + 1, "marker");
        debug!(len, "skipped APPn");
        trace!(mcu = len, "decoded MCU");
        warn!(missing, "scan ended early");
        warn!("end of image before any scan");
        // Arguments are not evaluated without the `tracing` feature.
        #[cfg(not(feature = "tracing"))]
        let _ = (marker, len, missing);
    }
}
