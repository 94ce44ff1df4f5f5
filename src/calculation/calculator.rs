// Copyright @yucwang 2026

use super::bounds_handler::BoundsHandler;
use super::internals::{ relative_diff, CONVERGENCE_LIMIT, MAX_DEPTH, MAX_SPLITS,
                        MIN_DEPTH, VALUE_LIMIT };
use super::result_cache::ResultCache;
use crate::core::detector::Detector;
use crate::core::shape::{ Source, SourceShape };
use crate::math::constants::{ Float, INV_FOUR_PI };

/// The integral estimate plus the diagnostic counters of one calculation.
/// `max_depth` and the counters are telemetry, not correctness: a caller that
/// needs a convergence guarantee checks `max_depth < MAX_DEPTH`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct IntegralResult {
    pub value: Float,
    pub max_depth: usize,
    pub single_axis_recursions: u64,
    pub full_recursions: u64,
    pub calls: u64,
}

/// Adaptive recursive integrator for the view-factor weight between one
/// detector panel and one extended source.
///
/// The joint parameter domain (detector axes first, source axes second) is
/// unconditionally bisected on every axis at depth 0; each child cell is then
/// refined by recursive bisection until every branch converges or hits the
/// depth ceiling. The per-level scratch state makes a `Calculator` cheap to
/// call repeatedly but non-reentrant: run independent instances on separate
/// threads, never one instance from two.
#[derive(Debug)]
pub struct Calculator {
    det: Detector,
    src: Source,
    det_params: usize,
    num_params: usize,
    num_segs: usize,
    attained_level: usize,
    single_axis_recurs: u64,
    full_recurs: u64,
    calls: u64,
    bounds: BoundsHandler,
    cache: ResultCache,
}

impl Calculator {
    /// Takes ownership of both geometry objects for the calculator's
    /// lifetime.
    pub fn new(det: Detector, src: Source) -> Self {
        Self {
            det,
            src,
            det_params: 0,
            num_params: 0,
            num_segs: 0,
            attained_level: 0,
            single_axis_recurs: 0,
            full_recurs: 0,
            calls: 0,
            bounds: BoundsHandler::new(),
            cache: ResultCache::new(),
        }
    }

    pub fn detector(&self) -> &Detector {
        &self.det
    }

    pub fn source(&self) -> &Source {
        &self.src
    }

    /// Computes the view-factor integral. Always performs a full split at
    /// depth 0, then refines each of the `2^numParams` children.
    pub fn calc_integral(&mut self) -> IntegralResult {
        self.obtain_bounds();
        self.attained_level = 0;
        self.single_axis_recurs = 0;
        self.full_recurs = 0;
        self.calls = 0;

        let mut integral_sum = 0.0;
        for i in 0..self.num_segs {
            // prepping bounds at level n generates the cell at level n+1, so
            // the depth-0 children come from a prep at level -1
            self.bounds.prep_bounds(-1, u32::MAX, i as u32);
            let guess = self.calc_integral_segment(0);
            integral_sum += self.recursive_refinement(0, guess, 0);
        }

        IntegralResult {
            value: integral_sum,
            max_depth: self.attained_level,
            single_axis_recursions: self.single_axis_recurs,
            full_recursions: self.full_recurs,
            calls: self.calls,
        }
    }

    /// Concatenates the detector bounds (first axes) and source bounds
    /// (remaining axes) into the level -1 record.
    fn obtain_bounds(&mut self) {
        self.det_params = self.det.num_params();
        self.num_params = self.det_params + self.src.num_params();
        self.num_segs = 1 << self.num_params;

        let mut lo = Vec::with_capacity(self.num_params);
        let mut hi = Vec::with_capacity(self.num_params);
        for &(l, h) in self.det.bounds() {
            lo.push(l);
            hi.push(h);
        }
        for &(l, h) in self.src.bounds() {
            lo.push(l);
            hi.push(h);
        }
        self.bounds.set_data(&lo, &hi);
        self.cache.set_num_dims(self.num_params);
    }

    /// Refines the cell cached at `level` whose midpoint estimate is
    /// `segment_guess`. `splits` counts the consecutive single-axis
    /// recursions along this branch.
    fn recursive_refinement(&mut self, level: usize, segment_guess: Float, splits: u32) -> Float {
        if level > self.attained_level {
            self.attained_level = level;
        }

        // probe each axis independently: bisect only that axis, sum the two
        // half-cells, and compare against the parent guess
        for i in 0..self.num_params {
            self.bounds.prep_bounds(level as i32, 0x01 << i, 0);
            let lo_half = self.calc_integral_segment(level + 1);
            self.bounds.prep_bounds(level as i32, 0x01 << i, 1);
            let hi_half = self.calc_integral_segment(level + 1);
            let cache = self.cache.level_mut(level);
            cache.values[2 * i] = lo_half;
            cache.values[2 * i + 1] = hi_half;
            cache.integrals[i] = lo_half + hi_half;
            cache.diffs[i] = relative_diff(segment_guess, lo_half + hi_half);
        }

        // axes whose integral sits below the value floor never trigger
        // refinement on their own
        let mut unresolved = 0;
        let mut worst_axis = 0;
        let mut worst_diff = 0.0;
        {
            let cache = self.cache.level(level);
            for i in 0..self.num_params {
                if cache.integrals[i] > VALUE_LIMIT {
                    if cache.diffs[i] > CONVERGENCE_LIMIT {
                        unresolved += 1;
                    }
                    if cache.diffs[i] > worst_diff {
                        worst_diff = cache.diffs[i];
                        worst_axis = i;
                    }
                }
            }
        }

        if unresolved > 0 {
            if level >= MAX_DEPTH {
                // force-return the best available estimate
                return self.cache.level(level).integrals[worst_axis];
            }
            if unresolved == 1 && splits < MAX_SPLITS {
                // a single disagreeing axis resolves with a cheap two-way
                // recursion instead of a 2^n-way one
                self.single_axis_recurs += 1;
                let (lo_guess, hi_guess) = {
                    let cache = self.cache.level(level);
                    (cache.values[2 * worst_axis], cache.values[2 * worst_axis + 1])
                };
                self.bounds.prep_bounds(level as i32, 0x01 << worst_axis, 0);
                let mut integral_sum = self.recursive_refinement(level + 1, lo_guess, splits + 1);
                self.bounds.prep_bounds(level as i32, 0x01 << worst_axis, 1);
                integral_sum += self.recursive_refinement(level + 1, hi_guess, splits + 1);
                return integral_sum;
            }
            // multiple axes disagree at once (or the single-axis budget ran
            // out): split every axis and recurse into all children
            self.full_split_guesses(level);
            return self.full_recursion(level);
        }

        // no single axis showed disagreement; verify with a full split
        let integral_sum = self.full_split_guesses(level);
        let diff = relative_diff(segment_guess, integral_sum);

        if level >= MAX_DEPTH
            || integral_sum < VALUE_LIMIT
            || (level > MIN_DEPTH && diff < CONVERGENCE_LIMIT)
        {
            // done: ceiling reached, contribution negligible, or converged
            // past the minimum depth
            return integral_sum;
        }
        self.full_recursion(level)
    }

    /// Evaluates the midpoint estimate of every full-split child of the cell
    /// at `level`, caching the per-child values, and returns their sum.
    fn full_split_guesses(&mut self, level: usize) -> Float {
        let mut integral_sum = 0.0;
        for i in 0..self.num_segs {
            self.bounds.prep_bounds(level as i32, u32::MAX, i as u32);
            let value = self.calc_integral_segment(level + 1);
            self.cache.level_mut(level).values[i] = value;
            integral_sum += value;
        }
        integral_sum
    }

    /// Recurses into all `2^numParams` children of the cell at `level`,
    /// seeding each child with the midpoint estimate cached by
    /// `full_split_guesses`.
    fn full_recursion(&mut self, level: usize) -> Float {
        self.full_recurs += 1;
        let mut integral_sum = 0.0;
        for i in 0..self.num_segs {
            let guess = self.cache.level(level).values[i];
            self.bounds.prep_bounds(level as i32, u32::MAX, i as u32);
            integral_sum += self.recursive_refinement(level + 1, guess, 0);
        }
        integral_sum
    }

    /// Midpoint-rule estimate of the integrand over the cell cached at
    /// `level`: the inverse-square kernel between detector and source
    /// positions if the source point is visible, scaled by both Jacobians.
    fn calc_integral_segment(&mut self, level: usize) -> Float {
        self.calls += 1;
        let (params, widths) = self.bounds.params_and_widths(level as i32);
        let (det_params, src_params) = params.split_at(self.det_params);
        let (det_widths, src_widths) = widths.split_at(self.det_params);

        let src_pos = self.src.position(src_params);
        if !self.det.has_line_of_sight(&src_pos) {
            return 0.0;
        }
        let det_pos = self.det.position(det_params);
        let dist_sq = (src_pos - det_pos).norm_squared();
        let kernel = INV_FOUR_PI / dist_sq;

        let vol_seg = self.det.surface_element(det_params, det_widths)
            * self.src.volume_element(src_params, src_widths);
        kernel * vol_seg
    }
}

#[cfg(test)]
mod tests {
    use super::{ Calculator, IntegralResult };
    use crate::calculation::internals::MAX_DEPTH;
    use crate::core::detector::Detector;
    use crate::core::shape::Source;
    use crate::math::constants::{ Float, INV_FOUR_PI, Vector3f };
    use crate::shapes::flat::CircleXY;
    use crate::shapes::low_dim::{ LineSource, PointSource };

    fn unit_square_detector() -> Detector {
        Detector::new(Vector3f::new(1.0, 0.0, 0.0),
                      Vector3f::new(0.0, 1.0, 0.0),
                      Vector3f::new(0.0, 0.0, 1.0))
    }

    // dense midpoint-rule reference for a point source at (0, 0, d) above
    // the unit square detector: (1/4pi) * Int dx dy / (x^2 + y^2 + d^2)
    fn point_above_square_reference(d: Float, n: usize) -> Float {
        let step = 2.0 / (n as Float);
        let mut sum = 0.0;
        for i in 0..n {
            let x = -1.0 + ((i as Float) + 0.5) * step;
            for j in 0..n {
                let y = -1.0 + ((j as Float) + 0.5) * step;
                sum += step * step / (x * x + y * y + d * d);
            }
        }
        INV_FOUR_PI * sum
    }

    fn run(det: Detector, src: Source) -> IntegralResult {
        let mut calc = Calculator::new(det, src);
        calc.calc_integral()
    }

    #[test]
    fn test_point_source_above_square() {
        let src = Source::Point(PointSource::new(Vector3f::new(0.0, 0.0, 10.0)));
        let result = run(unit_square_detector(), src);
        let reference = point_above_square_reference(10.0, 1000);
        assert!(result.value > 0.0);
        assert!(((result.value - reference) / reference).abs() < 1e-4,
                "got {} want {}", result.value, reference);
        assert!(result.max_depth <= MAX_DEPTH);
        assert!(result.calls > 0);
    }

    #[test]
    fn test_point_source_off_center() {
        let src = Source::Point(PointSource::new(Vector3f::new(0.7, -0.3, 2.0)));
        let result = run(unit_square_detector(), src);
        // brute-force reference with the offset baked in
        let n = 2000;
        let step = 2.0 / (n as Float);
        let mut reference = 0.0;
        for i in 0..n {
            let x = -1.0 + ((i as Float) + 0.5) * step - 0.7;
            for j in 0..n {
                let y = -1.0 + ((j as Float) + 0.5) * step + 0.3;
                reference += step * step / (x * x + y * y + 4.0);
            }
        }
        reference *= INV_FOUR_PI;
        assert!(((result.value - reference) / reference).abs() < 1e-4,
                "got {} want {}", result.value, reference);
    }

    #[test]
    fn test_source_behind_detector_is_exactly_zero() {
        let src = Source::Point(PointSource::new(Vector3f::new(0.0, 0.0, -10.0)));
        let result = run(unit_square_detector(), src);
        assert_eq!(result.value, 0.0);
        assert!(result.calls > 0);
    }

    #[test]
    fn test_source_on_detector_plane_is_exactly_zero() {
        let src = Source::Point(PointSource::new(Vector3f::new(5.0, 5.0, 0.0)));
        let result = run(unit_square_detector(), src);
        assert_eq!(result.value, 0.0);
    }

    #[test]
    fn test_negligible_cell_is_not_refined() {
        // a source this far away drops every cell below the value floor, so
        // the top-level children terminate without any recursion
        let src = Source::Point(PointSource::new(Vector3f::new(0.0, 0.0, 1.0e9)));
        let result = run(unit_square_detector(), src);
        assert!(result.value > 0.0);
        assert!(result.value < 1.0e-12);
        assert_eq!(result.max_depth, 0);
        assert_eq!(result.single_axis_recursions, 0);
        assert_eq!(result.full_recursions, 0);
    }

    #[test]
    fn test_short_line_scales_with_segment_length() {
        // the line measure is the physical segment length, so a segment short
        // enough that the kernel is constant across it integrates to
        // length * the unit-measure point value at its midpoint
        let length = 0.01;
        let point = Source::Point(PointSource::new(Vector3f::new(0.0, 0.0, 10.0)));
        let line = Source::Line(LineSource::new(Vector3f::new(-length / 2.0, 0.0, 10.0),
                                                Vector3f::new(length / 2.0, 0.0, 10.0)));
        let point_result = run(unit_square_detector(), point);
        let line_result = run(unit_square_detector(), line);
        let expected = point_result.value * length;
        let rel = ((line_result.value - expected) / expected).abs();
        assert!(rel < 1e-3, "relative deviation {}", rel);
        assert!(line_result.max_depth <= MAX_DEPTH);
    }

    #[test]
    fn test_far_disc_matches_far_field_estimate() {
        // far field: weight ~ det_area * src_area / (4 pi d^2); the leading
        // correction is O((r^2 + h^2) / d^2), well inside the tolerance here
        let radius = 0.5;
        let d = 50.0;
        let src = Source::CircleXY(CircleXY::new(Vector3f::new(0.0, 0.0, d), radius));
        let result = run(unit_square_detector(), src);
        let estimate = 4.0 * (std::f64::consts::PI * radius * radius)
            * INV_FOUR_PI / (d * d);
        assert!(((result.value - estimate) / estimate).abs() < 2e-3,
                "got {} want about {}", result.value, estimate);
    }

    #[test]
    fn test_repeat_calls_are_stateless() {
        let src = Source::Point(PointSource::new(Vector3f::new(0.2, 0.1, 5.0)));
        let mut calc = Calculator::new(unit_square_detector(), src);
        let first = calc.calc_integral();
        let second = calc.calc_integral();
        assert_eq!(first, second);
    }
}
