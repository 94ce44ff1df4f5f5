// Copyright @yucwang 2026

use super::internals::{ DIFF_ALLOCATION_TABLE, VALUE_ALLOCATION_TABLE };
use crate::math::constants::Float;

/// The scratch buffers for one recursion level: raw half-cell estimates,
/// per-axis aggregated integrals, and per-axis relative differences.
#[derive(Debug, Default)]
pub struct LevelCache {
    pub values: Vec<Float>,
    pub integrals: Vec<Float>,
    pub diffs: Vec<Float>,
}

/// Per-recursion-level scratch memoization for the adaptive refinement.
/// Buffer sizes come from a precomputed allocation table indexed by the
/// dimensionality, covering the combinatorial fan-out of single-axis probing
/// plus a full split. Levels grow lazily and are reused in place, which keeps
/// deep recursion allocation-free after the first descent.
#[derive(Debug, Default)]
pub struct ResultCache {
    value_len: usize,
    diff_len: usize,
    levels: Vec<LevelCache>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_num_dims(&mut self, num_dims: usize) {
        debug_assert!((2..=9).contains(&num_dims));
        self.value_len = VALUE_ALLOCATION_TABLE[num_dims - 2];
        self.diff_len = DIFF_ALLOCATION_TABLE[num_dims - 2];
        self.levels.clear();
    }

    /// Lazily grows to `level` and returns that level's buffer triple.
    pub fn level_mut(&mut self, level: usize) -> &mut LevelCache {
        while self.levels.len() <= level {
            self.levels.push(LevelCache {
                values: vec![0.0; self.value_len],
                integrals: vec![0.0; self.diff_len],
                diffs: vec![0.0; self.diff_len],
            });
        }
        &mut self.levels[level]
    }

    pub fn level(&self, level: usize) -> &LevelCache {
        &self.levels[level]
    }
}

#[cfg(test)]
mod tests {
    use super::ResultCache;

    #[test]
    fn test_buffer_sizes_from_table() {
        let mut cache = ResultCache::new();
        cache.set_num_dims(4);
        let level = cache.level_mut(0);
        assert_eq!(level.values.len(), 32);
        assert_eq!(level.integrals.len(), 6);
        assert_eq!(level.diffs.len(), 6);
    }

    #[test]
    fn test_lazy_level_growth() {
        let mut cache = ResultCache::new();
        cache.set_num_dims(2);
        cache.level_mut(5).values[0] = 3.5;
        // earlier levels were allocated on the way down
        assert_eq!(cache.level(3).values[0], 0.0);
        assert_eq!(cache.level(5).values[0], 3.5);
    }
}
