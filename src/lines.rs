//! Line reassembly across chunk boundaries.
//!
//! A line counts as complete only once its terminating `\n` has been seen; the bytes
//! after the last `\n` of a chunk wait in the pending buffer for the next chunk.

use std::collections::VecDeque;

#[derive(Debug, Default)]
pub struct LineReassembler {
    pending: Vec<u8>,
}

impl LineReassembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `chunk` to the pending bytes and move every complete line into `out`,
    /// in arrival order, without the `\n`. Returns how many lines were emitted.
    pub fn feed(&mut self, chunk: &[u8], out: &mut VecDeque<Vec<u8>>) -> usize {
        let mut emitted = 0;
        let mut rest = chunk;
        while let Some(pos) = rest.iter().position(|&b| b == b'\n') {
            let line = if self.pending.is_empty() {
                rest[..pos].to_vec()
            } else {
                let mut line = std::mem::take(&mut self.pending);
                line.extend_from_slice(&rest[..pos]);
                line
            };
            out.push_back(line);
            emitted += 1;
            rest = &rest[pos + 1..];
        }
        self.pending.extend_from_slice(rest);
        emitted
    }

    /// Take whatever is pending as a final, unterminated line.
    pub fn flush(&mut self) -> Option<Vec<u8>> {
        if self.pending.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.pending))
        }
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
