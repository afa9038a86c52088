// Copyright (c) the jpegdec Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Zigzag scan order of an 8x8 block.

use crate::BLOCK_SIZE;

/// `(row, col)` of the i-th coefficient in zigzag order.
#[rustfmt::skip]
pub const ZIGZAG: [(u8, u8); BLOCK_SIZE] = [
    (0, 0), (0, 1), (1, 0), (2, 0), (1, 1), (0, 2), (0, 3), (1, 2),
    (2, 1), (3, 0), (4, 0), (3, 1), (2, 2), (1, 3), (0, 4), (0, 5),
    (1, 4), (2, 3), (3, 2), (4, 1), (5, 0), (6, 0), (5, 1), (4, 2),
    (3, 3), (2, 4), (1, 5), (0, 6), (0, 7), (1, 6), (2, 5), (3, 4),
    (4, 3), (5, 2), (6, 1), (7, 0), (7, 1), (6, 2), (5, 3), (4, 4),
    (3, 5), (2, 6), (1, 7), (2, 7), (3, 6), (4, 5), (5, 4), (6, 3),
    (7, 2), (7, 3), (6, 4), (5, 5), (4, 6), (3, 7), (4, 7), (5, 6),
    (6, 5), (7, 4), (7, 5), (6, 6), (5, 7), (6, 7), (7, 6), (7, 7),
];

/// Row-major index of the i-th coefficient in zigzag order.
pub fn natural_index(zigzag_index: usize) -> usize {
    let (row, col) = ZIGZAG[zigzag_index];
    row as usize * 8 + col as usize
}

/// Moves a sequence stored in zigzag order into row-major order.
pub fn unzigzag<T: Copy + Default>(seq: &[T; BLOCK_SIZE]) -> [T; BLOCK_SIZE] {
    let mut out = [T::default(); BLOCK_SIZE];
    for (i, &value) in seq.iter().enumerate() {
        out[natural_index(i)] = value;
    }
    out
}

/// Flattens a row-major block back into zigzag order.
pub fn zigzag<T: Copy + Default>(block: &[T; BLOCK_SIZE]) -> [T; BLOCK_SIZE] {
    array_init::array_init(|i| block[natural_index(i)])
}

#[cfg(test)]
mod test {
    use test_log::test;

    use super::*;

    #[test]
    fn table_walks_anti_diagonals() {
        // Consecutive entries either stay on the same anti-diagonal or move to
        // the next one, alternating direction.
        for i in 1..BLOCK_SIZE {
            let (r0, c0) = ZIGZAG[i - 1];
            let (r1, c1) = ZIGZAG[i];
            let d0 = r0 + c0;
            let d1 = r1 + c1;
            assert!(d1 == d0 || d1 == d0 + 1, "{i}: {d0} -> {d1}");
            if d1 == d0 {
                if d0 % 2 == 0 {
                    assert_eq!((r1 + 1, c1), (r0, c0 + 1));
                } else {
                    assert_eq!((r1, c1 + 1), (r0 + 1, c0));
                }
            }
        }
    }

    #[test]
    fn table_is_permutation() {
        let mut seen = [false; BLOCK_SIZE];
        for i in 0..BLOCK_SIZE {
            let idx = natural_index(i);
            assert!(!seen[idx]);
            seen[idx] = true;
        }
    }

    #[test]
    fn unzigzag_known_positions() {
        let seq: [u8; BLOCK_SIZE] = array_init::array_init(|i| i as u8);
        let block = unzigzag(&seq);
        assert_eq!(block[0], 0);
        assert_eq!(block[1], 1);
        assert_eq!(block[8], 2);
        assert_eq!(block[16], 3);
        assert_eq!(block[9], 4);
        assert_eq!(block[63], 63);
        assert_eq!(block[7 * 8], 35);
    }

    #[test]
    fn zigzag_bijection() {
        arbtest::arbtest(|u| {
            let seq: [i32; BLOCK_SIZE] = u.arbitrary()?;
            assert_eq!(zigzag(&unzigzag(&seq)), seq);
            assert_eq!(unzigzag(&zigzag(&seq)), seq);
            Ok(())
        });
    }
}
