//! Word-window chunking.
//!
//! Text is split on whitespace and cut into windows of `window_size` words.
//! Consecutive windows share `round(window_size * overlap_percent / 100)`
//! words, so a window starts every `step` words. The last window may be
//! shorter than the others; it is never dropped.

use ragent_core::error::KnowledgeError;
use ragent_core::knowledge::{Chunk, window_step};

/// Splits documents into overlapping word windows.
///
/// Window size and overlap are fixed at construction and validated there,
/// so a configuration that cannot advance is rejected before any text is
/// processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkingEngine {
    window_size: usize,
    step: usize,
}

impl ChunkingEngine {
    pub fn new(window_size: usize, overlap_percent: f64) -> Result<Self, KnowledgeError> {
        let step = window_step(window_size, overlap_percent)?;
        Ok(Self { window_size, step })
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Words between the starts of consecutive windows.
    pub fn step(&self) -> usize {
        self.step
    }

    /// Lazily chunk `text`.
    pub fn chunk<'a>(&self, text: &'a str) -> Chunks<'a> {
        let words: Vec<&'a str> = text.split_whitespace().collect();
        let next_start = if words.is_empty() { None } else { Some(0) };
        Chunks {
            words,
            window_size: self.window_size,
            step: self.step,
            next_start,
        }
    }
}

/// Iterator over the chunks of one document.
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    words: Vec<&'a str>,
    window_size: usize,
    step: usize,
    next_start: Option<usize>,
}

impl Iterator for Chunks<'_> {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        let start = self.next_start?;
        let end = (start + self.window_size).min(self.words.len());

        // The window that reaches the last word is the final one.
        self.next_start = if end == self.words.len() {
            None
        } else {
            Some(start + self.step)
        };

        Some(Chunk {
            content: self.words[start..end].join(" "),
        })
    }
}

impl std::iter::FusedIterator for Chunks<'_> {}
