//! Choosing which piece to evict under the three-piece cap.
//!
//! The engine asks an `EvictionSource` for a position within the mover's
//! inventory. Production rooms use a seeded `GameRng` (uniform choice);
//! tests inject `ScriptedEviction` to pin the exact cell removed.

use std::collections::VecDeque;

use crate::core::GameRng;

/// Source of eviction choices.
///
/// `pick` receives the mover's pieces (never empty) and returns a position
/// in that slice. Out-of-range answers are clamped by the engine.
pub trait EvictionSource: Send {
    fn pick(&mut self, pieces: &[u8]) -> usize;
}

impl EvictionSource for GameRng {
    fn pick(&mut self, pieces: &[u8]) -> usize {
        self.gen_range_usize(0..pieces.len())
    }
}

impl<E: EvictionSource + ?Sized> EvictionSource for Box<E> {
    fn pick(&mut self, pieces: &[u8]) -> usize {
        (**self).pick(pieces)
    }
}

/// Deterministic eviction for tests: evicts the scripted cells in order.
///
/// When the next scripted cell is not one of the mover's pieces, or the
/// script is exhausted, the oldest piece is evicted.
#[derive(Clone, Debug, Default)]
pub struct ScriptedEviction {
    script: VecDeque<u8>,
}

impl ScriptedEviction {
    pub fn new(cells: impl IntoIterator<Item = u8>) -> Self {
        Self {
            script: cells.into_iter().collect(),
        }
    }

    /// Scripted cells not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl EvictionSource for ScriptedEviction {
    fn pick(&mut self, pieces: &[u8]) -> usize {
        self.script
            .pop_front()
            .and_then(|cell| pieces.iter().position(|&p| p == cell))
            .unwrap_or(0)
    }
}
