// Copyright @yucwang 2026

use crate::core::shape::SourceShape;
use crate::math::constants::{ Float, Matrix3f, TWO_PI, Vector3f };

static SQUARE_BOUNDS: [(Float, Float); 2] = [(-1.0, 1.0), (-1.0, 1.0)];
static CIRCLE_BOUNDS: [(Float, Float); 2] = [(0.0, TWO_PI), (0.0, 1.0)];

/// Annular-sector area of a disc parameter cell. With `t = params[1]` the
/// normalized radius and `dt = widths[1]` its width, the exact area
/// `dtheta/2 * (r_max^2 - r_min^2)` collapses to `dtheta * t * dt * radius^2`
/// because `(r_max - r_min) * (r_max + r_min) = (radius*dt) * (2*radius*t)`.
/// Integrating over the whole box gives `pi * radius^2` back.
#[inline]
fn disc_element(radius: Float, params: &[Float], widths: &[Float]) -> Float {
    (params[1] * widths[1] * widths[0] * radius * radius).abs()
}

/// A planar parallelogram patch spanned by two edge vectors about a center.
#[derive(Debug, Clone, PartialEq)]
pub struct Square {
    center: Vector3f,
    vec1: Vector3f,
    vec2: Vector3f,
    mag1: Float,
    mag2: Float,
}

impl Square {
    pub fn new(center: Vector3f, vec1: Vector3f, vec2: Vector3f) -> Self {
        let mag1 = vec1.norm();
        let mag2 = vec2.norm();
        Self { center, vec1, vec2, mag1, mag2 }
    }
}

impl SourceShape for Square {
    fn position(&self, params: &[Float]) -> Vector3f {
        self.center + params[0] * self.vec1 + params[1] * self.vec2
    }

    fn volume_element(&self, _params: &[Float], widths: &[Float]) -> Float {
        (self.mag1 * widths[0] * self.mag2 * widths[1]).abs()
    }

    fn num_params(&self) -> usize {
        2
    }

    fn bounds(&self) -> &'static [(Float, Float)] {
        &SQUARE_BOUNDS
    }
}

/// A disc of arbitrary orientation: the local xy-plane disc is carried to
/// world space by a rotation matrix. Parameters are angle and normalized
/// radius.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    center: Vector3f,
    radius: Float,
    rmat: Matrix3f,
}

impl Circle {
    pub fn new(center: Vector3f, radius: Float, rmat: Matrix3f) -> Self {
        Self { center, radius, rmat }
    }
}

impl SourceShape for Circle {
    fn position(&self, params: &[Float]) -> Vector3f {
        let rim = Vector3f::new(self.radius * params[0].cos(),
                                self.radius * params[0].sin(),
                                0.0);
        self.center + params[1] * (self.rmat * rim)
    }

    fn volume_element(&self, params: &[Float], widths: &[Float]) -> Float {
        disc_element(self.radius, params, widths)
    }

    fn num_params(&self) -> usize {
        2
    }

    fn bounds(&self) -> &'static [(Float, Float)] {
        &CIRCLE_BOUNDS
    }
}

/// Axis-aligned disc in the xy-plane. The z component never moves, so it is
/// frozen at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleXY {
    center: Vector3f,
    radius: Float,
}

impl CircleXY {
    pub fn new(center: Vector3f, radius: Float) -> Self {
        Self { center, radius }
    }
}

impl SourceShape for CircleXY {
    fn position(&self, params: &[Float]) -> Vector3f {
        Vector3f::new(self.center.x + params[1] * (self.radius * params[0].cos()),
                      self.center.y + params[1] * (self.radius * params[0].sin()),
                      self.center.z)
    }

    fn volume_element(&self, params: &[Float], widths: &[Float]) -> Float {
        disc_element(self.radius, params, widths)
    }

    fn num_params(&self) -> usize {
        2
    }

    fn bounds(&self) -> &'static [(Float, Float)] {
        &CIRCLE_BOUNDS
    }
}

/// Axis-aligned disc in the xz-plane.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleXZ {
    center: Vector3f,
    radius: Float,
}

impl CircleXZ {
    pub fn new(center: Vector3f, radius: Float) -> Self {
        Self { center, radius }
    }
}

impl SourceShape for CircleXZ {
    fn position(&self, params: &[Float]) -> Vector3f {
        Vector3f::new(self.center.x + params[1] * (self.radius * params[0].cos()),
                      self.center.y,
                      self.center.z + params[1] * (self.radius * params[0].sin()))
    }

    fn volume_element(&self, params: &[Float], widths: &[Float]) -> Float {
        disc_element(self.radius, params, widths)
    }

    fn num_params(&self) -> usize {
        2
    }

    fn bounds(&self) -> &'static [(Float, Float)] {
        &CIRCLE_BOUNDS
    }
}

/// Axis-aligned disc in the yz-plane.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleYZ {
    center: Vector3f,
    radius: Float,
}

impl CircleYZ {
    pub fn new(center: Vector3f, radius: Float) -> Self {
        Self { center, radius }
    }
}

impl SourceShape for CircleYZ {
    fn position(&self, params: &[Float]) -> Vector3f {
        Vector3f::new(self.center.x,
                      self.center.y + params[1] * (self.radius * params[0].cos()),
                      self.center.z + params[1] * (self.radius * params[0].sin()))
    }

    fn volume_element(&self, params: &[Float], widths: &[Float]) -> Float {
        disc_element(self.radius, params, widths)
    }

    fn num_params(&self) -> usize {
        2
    }

    fn bounds(&self) -> &'static [(Float, Float)] {
        &CIRCLE_BOUNDS
    }
}
