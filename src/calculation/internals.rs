// Copyright @yucwang 2026

use crate::math::constants::Float;

/// Convergence is never accepted before this recursion level, forcing a
/// minimum resolution of the full bisection tree.
pub const MIN_DEPTH: usize = 4;
/// Hard ceiling on the recursion level; a branch that has not converged here
/// returns its best available estimate.
pub const MAX_DEPTH: usize = 60;
/// Cap on consecutive single-axis recursions along one branch before the
/// refinement escalates to a full split.
pub const MAX_SPLITS: u32 = 16;
/// Maximum allowed relative disagreement between a cell estimate and its
/// bisected sub-estimate before another level of refinement is required.
pub const CONVERGENCE_LIMIT: Float = 1.0e-5;
/// Minimum integral magnitude below which a cell's contribution is treated
/// as negligible and never refined further on its own account.
pub const VALUE_LIMIT: Float = 1.0e-14;

// Indexes into these tables are numParams - 2. The tables top out at 9
// parameters, far beyond any sensible pairing: a 2-parameter detector with a
// 3-parameter volumetric source needs only 5, maybe 6 if someone builds a
// 3D detector.
pub const VALUE_ALLOCATION_TABLE: [usize; 8] = [4, 12, 32, 80, 240, 672, 1792, 5376];
pub const DIFF_ALLOCATION_TABLE: [usize; 8] = [2, 3, 6, 10, 20, 35, 70, 126];

/// Relative difference `|1 - value/guess|`, guarded so that near-zero guesses
/// do not blow the ratio up: below the value floor two negligible estimates
/// agree (0) and a negligible guess against a real value disagrees fully (1).
#[inline]
pub fn relative_diff(guess: Float, value: Float) -> Float {
    if guess.abs() < VALUE_LIMIT {
        if value.abs() < VALUE_LIMIT { 0.0 } else { 1.0 }
    } else {
        (1.0 - value / guess).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::{ relative_diff, VALUE_LIMIT };

    #[test]
    fn test_relative_diff_guard() {
        assert_eq!(relative_diff(0.0, 0.0), 0.0);
        assert_eq!(relative_diff(VALUE_LIMIT / 10.0, 1.0), 1.0);
        assert!((relative_diff(2.0, 1.0) - 0.5).abs() < 1e-12);
        assert!(relative_diff(1.0, 1.0) < 1e-12);
    }
}
