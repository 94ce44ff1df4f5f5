// Copyright @yucwang 2026

use crate::math::constants::Float;

/// The bounds, widths, and centers of one axis-aligned parameter cell.
#[derive(Debug, Clone, Default)]
struct LevelBounds {
    lo: Vec<Float>,
    hi: Vec<Float>,
    widths: Vec<Float>,
    centers: Vec<Float>,
}

impl LevelBounds {
    fn zeroed(num_dims: usize) -> Self {
        Self {
            lo: vec![0.0; num_dims],
            hi: vec![0.0; num_dims],
            widths: vec![0.0; num_dims],
            centers: vec![0.0; num_dims],
        }
    }

    fn seed(lo: &[Float], hi: &[Float]) -> Self {
        let widths = lo.iter().zip(hi.iter()).map(|(l, h)| h - l).collect();
        let centers = lo.iter().zip(hi.iter()).map(|(l, h)| (h + l) / 2.0).collect();
        Self { lo: lo.to_vec(), hi: hi.to_vec(), widths, centers }
    }
}

/// Per-recursion-level cache of cell bounds produced by successive
/// bisections. Level -1 holds the original unsplit domain; level L >= 0 is
/// derived from level L-1 by bisecting a masked subset of axes. Levels are
/// allocated on first demand and overwritten in place on reuse: a depth-first
/// walk only ever has one live cell per level.
#[derive(Debug, Default)]
pub struct BoundsHandler {
    num_dims: usize,
    orig: LevelBounds,
    levels: Vec<LevelBounds>,
}

impl BoundsHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the level -1 domain.
    pub fn set_data(&mut self, orig_lo: &[Float], orig_hi: &[Float]) {
        debug_assert_eq!(orig_lo.len(), orig_hi.len());
        self.num_dims = orig_lo.len();
        self.orig = LevelBounds::seed(orig_lo, orig_hi);
        self.levels.clear();
    }

    /// Derives the bounds at `level + 1` from the cell cached at `level`
    /// (level -1 addresses the original domain). Every axis flagged in
    /// `dim_mask` is bisected; the corresponding bit of `split_ind` selects
    /// the upper (set) or lower (clear) half. Unflagged axes carry over
    /// unchanged.
    pub fn prep_bounds(&mut self, level: i32, dim_mask: u32, split_ind: u32) {
        let next = (level + 1) as usize;
        while self.levels.len() <= next {
            self.levels.push(LevelBounds::zeroed(self.num_dims));
        }

        // split the storage so the parent can be read while the child is
        // written
        let (parent, child): (&LevelBounds, &mut LevelBounds) = if level < 0 {
            (&self.orig, &mut self.levels[next])
        } else {
            let (head, tail) = self.levels.split_at_mut(next);
            (&head[level as usize], &mut tail[0])
        };

        let mut dim_count = 0;
        for j in 0..self.num_dims {
            if (dim_mask >> j) & 0x01 != 0 {
                let split_val = (parent.lo[j] + parent.hi[j]) / 2.0;
                if (split_ind >> dim_count) & 0x01 != 0 {
                    // upper half on axis j
                    child.lo[j] = split_val;
                    child.hi[j] = parent.hi[j];
                    child.widths[j] = parent.hi[j] - split_val;
                    child.centers[j] = (split_val + parent.hi[j]) / 2.0;
                } else {
                    // lower half on axis j
                    child.lo[j] = parent.lo[j];
                    child.hi[j] = split_val;
                    child.widths[j] = split_val - parent.lo[j];
                    child.centers[j] = (parent.lo[j] + split_val) / 2.0;
                }
                dim_count += 1;
            } else {
                child.lo[j] = parent.lo[j];
                child.hi[j] = parent.hi[j];
                child.widths[j] = parent.widths[j];
                child.centers[j] = parent.centers[j];
            }
        }
    }

    /// The cached midpoint parameter vector and cell widths for `level`.
    /// `prep_bounds` must already have generated that level.
    pub fn params_and_widths(&self, level: i32) -> (&[Float], &[Float]) {
        if level < 0 {
            (&self.orig.centers, &self.orig.widths)
        } else {
            let lvl = &self.levels[level as usize];
            (&lvl.centers, &lvl.widths)
        }
    }
}
