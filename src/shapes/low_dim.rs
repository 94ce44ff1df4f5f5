// Copyright @yucwang 2026

use crate::core::shape::SourceShape;
use crate::math::constants::{ Float, Vector3f };

static POINT_BOUNDS: [(Float, Float); 0] = [];
static LINE_BOUNDS: [(Float, Float); 1] = [(0.0, 1.0)];

/// A dimensionless source: contributes a single position with unit measure.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSource {
    pos: Vector3f,
}

impl PointSource {
    pub fn new(center: Vector3f) -> Self {
        Self { pos: center }
    }
}

impl SourceShape for PointSource {
    fn position(&self, _params: &[Float]) -> Vector3f {
        self.pos
    }

    fn volume_element(&self, _params: &[Float], _widths: &[Float]) -> Float {
        1.0
    }

    fn num_params(&self) -> usize {
        0
    }

    fn bounds(&self) -> &'static [(Float, Float)] {
        &POINT_BOUNDS
    }
}

/// A straight segment from `start` to `stop`, parameterized on `[0,1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSource {
    start: Vector3f,
    dir: Vector3f,
    mag: Float,
}

impl LineSource {
    pub fn new(start: Vector3f, stop: Vector3f) -> Self {
        let dir = stop - start;
        let mag = dir.norm();
        Self { start, dir, mag }
    }
}

impl SourceShape for LineSource {
    fn position(&self, params: &[Float]) -> Vector3f {
        self.start + params[0] * self.dir
    }

    fn volume_element(&self, _params: &[Float], widths: &[Float]) -> Float {
        self.mag * widths[0]
    }

    fn num_params(&self) -> usize {
        1
    }

    fn bounds(&self) -> &'static [(Float, Float)] {
        &LINE_BOUNDS
    }
}

#[cfg(test)]
mod tests {
    use super::{ LineSource, PointSource };
    use crate::core::shape::SourceShape;
    use crate::math::constants::Vector3f;

    #[test]
    fn test_point_source() {
        let src = PointSource::new(Vector3f::new(1.0, 2.0, 3.0));
        assert_eq!(src.num_params(), 0);
        assert!((src.position(&[]) - Vector3f::new(1.0, 2.0, 3.0)).norm() < 1e-12);
        assert_eq!(src.volume_element(&[], &[]), 1.0);
    }

    #[test]
    fn test_line_source_interpolation() {
        let src = LineSource::new(Vector3f::new(0.0, 0.0, 1.0),
                                  Vector3f::new(4.0, 0.0, 1.0));
        assert_eq!(src.num_params(), 1);
        let mid = src.position(&[0.5]);
        assert!((mid - Vector3f::new(2.0, 0.0, 1.0)).norm() < 1e-12);
        // the whole parameter interval has width 1, so the measure is the
        // segment length
        assert!((src.volume_element(&[0.5], &[1.0]) - 4.0).abs() < 1e-12);
    }
}
