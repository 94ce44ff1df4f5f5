// Copyright @yucwang 2026

use crate::math::constants::{ Float, Vector3f };

static DETECTOR_BOUNDS: [(Float, Float); 2] = [(-1.0, 1.0), (-1.0, 1.0)];

/// A bounded planar rectangle spanned by two edge vectors, with an outward
/// normal used for one-sided visibility testing. Positions are expressed
/// relative to the detector center, which sits at the origin of the panel's
/// own frame; callers bake the panel center into the source geometry instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Detector {
    vec1: Vector3f,
    vec2: Vector3f,
    norm: Vector3f,
    mag1: Float,
    mag2: Float,
}

impl Detector {
    pub fn new(vec1: Vector3f, vec2: Vector3f, norm: Vector3f) -> Self {
        let mag1 = vec1.norm();
        let mag2 = vec2.norm();
        Self { vec1, vec2, norm, mag1, mag2 }
    }

    /// Maps a point of the `[-1,1]^2` parameter box onto the panel.
    pub fn position(&self, params: &[Float]) -> Vector3f {
        params[0] * self.vec1 + params[1] * self.vec2
    }

    /// Differential area of a parameter cell of the given widths.
    pub fn surface_element(&self, _params: &[Float], widths: &[Float]) -> Float {
        (widths[0] * self.mag1 * widths[1] * self.mag2).abs()
    }

    /// One-sided visibility half-space test: a candidate source position is
    /// visible iff it lies strictly on the outward-normal side of the panel
    /// plane. No occlusion by other geometry is modeled.
    pub fn has_line_of_sight(&self, pos: &Vector3f) -> bool {
        pos.dot(&self.norm) > 0.0
    }

    pub fn num_params(&self) -> usize {
        2
    }

    pub fn bounds(&self) -> &'static [(Float, Float)] {
        &DETECTOR_BOUNDS
    }
}

#[cfg(test)]
mod tests {
    use super::Detector;
    use crate::math::constants::Vector3f;

    #[test]
    fn test_detector_position_and_element() {
        let det = Detector::new(Vector3f::new(2.0, 0.0, 0.0),
                                Vector3f::new(0.0, 3.0, 0.0),
                                Vector3f::new(0.0, 0.0, 1.0));
        let p = det.position(&[0.5, -1.0]);
        assert!((p - Vector3f::new(1.0, -3.0, 0.0)).norm() < 1e-12);

        // full parameter box has widths 2x2, so the area is |vec1 x vec2| * 4
        let area = det.surface_element(&[0.0, 0.0], &[2.0, 2.0]);
        assert!((area - 24.0).abs() < 1e-12);
    }

    #[test]
    fn test_line_of_sight_half_space() {
        let det = Detector::new(Vector3f::new(1.0, 0.0, 0.0),
                                Vector3f::new(0.0, 1.0, 0.0),
                                Vector3f::new(0.0, 0.0, 1.0));
        assert!(det.has_line_of_sight(&Vector3f::new(3.0, -2.0, 0.5)));
        assert!(!det.has_line_of_sight(&Vector3f::new(3.0, -2.0, -0.5)));
        // on the plane counts as not visible
        assert!(!det.has_line_of_sight(&Vector3f::new(3.0, -2.0, 0.0)));
    }
}
