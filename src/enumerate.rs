//! Word enumeration
//!
//! Produces every word over an alphabet for each length in a range,
//! shortest first. Within one length the order is base-`a` counting over
//! symbol indices, leftmost position varying slowest.

use crate::charset::Alphabet;
use crate::estimate::LengthRange;
use std::iter::FusedIterator;

/// Lazy odometer over `alphabet^min ∪ ... ∪ alphabet^max`.
///
/// The iterator owns its cursor and cannot be rewound; build a new one to
/// enumerate again.
#[derive(Debug)]
pub struct Words {
    symbols: Vec<char>,
    indices: Vec<usize>,
    max: u32,
    done: bool,
}

impl Words {
    pub fn new(alphabet: &Alphabet, range: LengthRange) -> Self {
        Self {
            symbols: alphabet.symbols().to_vec(),
            indices: vec![0; range.min() as usize],
            max: range.max(),
            done: false,
        }
    }

    /// Length of the word the next call to `next` will produce
    pub fn current_length(&self) -> Option<u32> {
        (!self.done).then_some(self.indices.len() as u32)
    }

    /// Write the current word into `buf`, replacing its contents
    fn render(&self, buf: &mut String) {
        buf.clear();
        buf.extend(self.indices.iter().map(|&i| self.symbols[i]));
    }

    /// Step to the next word, growing the length when the current one is exhausted
    fn advance(&mut self) {
        let base = self.symbols.len();

        for slot in self.indices.iter_mut().rev() {
            *slot += 1;
            if *slot < base {
                return;
            }
            *slot = 0;
        }

        // Every position wrapped: all words of this length are done
        let next_len = self.indices.len() + 1;
        if next_len as u64 > self.max as u64 {
            self.done = true;
        } else {
            log::debug!("Starting words of length {}", next_len);
            self.indices.clear();
            self.indices.resize(next_len, 0);
        }
    }
}

impl Iterator for Words {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }

        let mut word = String::with_capacity(self.indices.len());
        self.render(&mut word);
        self.advance();
        Some(word)
    }
}

impl FusedIterator for Words {}
