// Copyright (c) the jpegdec Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Canonical Huffman decoding trees as used by JPEG DHT segments.

use crate::bit_reader::BitReader;
use crate::error::{Error, Result};

pub const HUFFMAN_MAX_BITS: usize = 16;
const ROOT: usize = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Node {
    Internal { children: [Option<u32>; 2] },
    Leaf(u8),
}

/// Binary decoding tree stored in an arena; children are node indices.
#[derive(Debug, Clone)]
pub struct HuffmanTree {
    nodes: Vec<Node>,
}

impl HuffmanTree {
    /// Builds the tree for `counts[i]` codes of length `i + 1`, assigning
    /// `values` in order, shortest codes first and left to right within a
    /// length.
    pub fn build(counts: &[u8], values: &[u8]) -> Result<HuffmanTree> {
        if counts.len() > HUFFMAN_MAX_BITS {
            return Err(Error::HuffmanTooDeep(counts.len()));
        }
        let total: usize = counts.iter().map(|&c| c as usize).sum();
        if total != values.len() {
            return Err(Error::HuffmanCountMismatch(total, values.len()));
        }

        let mut nodes = vec![Node::Internal {
            children: [None, None],
        }];
        let mut next_value = values.iter();
        // Nodes at the current depth that are neither leaves nor expanded yet,
        // left to right.
        let mut pending = vec![ROOT];
        let mut remaining = total;
        for (depth, &count) in counts.iter().enumerate() {
            if remaining == 0 {
                break;
            }
            // Each node at the next depth holds at least one of the codes left
            // after this depth, so only the leftmost ones are needed.
            let mut next = Vec::with_capacity(remaining);
            for parent in pending {
                if next.len() >= remaining {
                    break;
                }
                let mut children = [None, None];
                for child in children.iter_mut() {
                    *child = Some(nodes.len() as u32);
                    next.push(nodes.len());
                    nodes.push(Node::Internal {
                        children: [None, None],
                    });
                }
                nodes[parent] = Node::Internal { children };
            }
            let count = count as usize;
            if count > next.len() {
                return Err(Error::HuffmanOverSubscribed(depth + 1));
            }
            for &leaf in &next[..count] {
                // Cannot fail: `total` matches `values.len()`.
                let value = *next_value.next().ok_or(Error::HuffmanCountMismatch(
                    total,
                    values.len(),
                ))?;
                nodes[leaf] = Node::Leaf(value);
            }
            remaining -= count;
            pending = next.split_off(count);
        }
        Ok(HuffmanTree { nodes })
    }

    /// Starts a traversal at the root.
    pub fn cursor(&self) -> HuffmanCursor<'_> {
        HuffmanCursor {
            tree: self,
            node: ROOT,
        }
    }

    /// Reads bits until a full code has been seen and returns its symbol.
    pub fn read_symbol(&self, br: &mut BitReader) -> Result<u8> {
        let mut cursor = self.cursor();
        loop {
            if let Some(symbol) = cursor.decode(br.read_bit()?)? {
                return Ok(symbol);
            }
        }
    }
}

/// Position inside a [`HuffmanTree`] while a code is being decoded.
#[derive(Debug, Clone)]
pub struct HuffmanCursor<'a> {
    tree: &'a HuffmanTree,
    node: usize,
}

impl HuffmanCursor<'_> {
    /// Follows one bit. Returns the symbol and goes back to the root when a
    /// leaf is reached, `None` when more bits are needed.
    pub fn decode(&mut self, bit: bool) -> Result<Option<u8>> {
        let next = match self.tree.nodes[self.node] {
            Node::Internal { children } => children[bit as usize],
            Node::Leaf(_) => None,
        };
        let next = next.ok_or(Error::InvalidHuffmanCode)? as usize;
        match self.tree.nodes.get(next) {
            Some(Node::Leaf(symbol)) => {
                self.node = ROOT;
                Ok(Some(*symbol))
            }
            Some(Node::Internal { .. }) => {
                self.node = next;
                Ok(None)
            }
            None => Err(Error::InvalidHuffmanCode),
        }
    }
}
