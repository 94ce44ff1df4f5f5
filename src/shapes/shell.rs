// Copyright @yucwang 2026

use crate::core::shape::SourceShape;
use crate::math::constants::{ Float, TWO_PI, Vector3f };

static CYLINDER_BOUNDS: [(Float, Float); 2] = [(0.0, TWO_PI), (-1.0, 1.0)];

/// A cylindrical shell with its axis along x, parameterized by angle and a
/// normalized axial coordinate in `[-1,1]` (so `length` is the half-length).
#[derive(Debug, Clone, PartialEq)]
pub struct CylinderXaxis {
    center: Vector3f,
    radius: Float,
    length: Float,
    area_scale: Float,
}

impl CylinderXaxis {
    pub fn new(center: Vector3f, radius: Float, length: Float) -> Self {
        Self { center, radius, length, area_scale: (radius * length).abs() }
    }
}

impl SourceShape for CylinderXaxis {
    fn position(&self, params: &[Float]) -> Vector3f {
        Vector3f::new(self.center.x + params[1] * self.length,
                      self.center.y + self.radius * params[0].cos(),
                      self.center.z + self.radius * params[0].sin())
    }

    fn volume_element(&self, _params: &[Float], widths: &[Float]) -> Float {
        self.area_scale * widths[0] * widths[1]
    }

    fn num_params(&self) -> usize {
        2
    }

    fn bounds(&self) -> &'static [(Float, Float)] {
        &CYLINDER_BOUNDS
    }
}

/// A cylindrical shell with its axis along y.
#[derive(Debug, Clone, PartialEq)]
pub struct CylinderYaxis {
    center: Vector3f,
    radius: Float,
    length: Float,
    area_scale: Float,
}

impl CylinderYaxis {
    pub fn new(center: Vector3f, radius: Float, length: Float) -> Self {
        Self { center, radius, length, area_scale: (radius * length).abs() }
    }
}

impl SourceShape for CylinderYaxis {
    fn position(&self, params: &[Float]) -> Vector3f {
        Vector3f::new(self.center.x + self.radius * params[0].cos(),
                      self.center.y + params[1] * self.length,
                      self.center.z + self.radius * params[0].sin())
    }

    fn volume_element(&self, _params: &[Float], widths: &[Float]) -> Float {
        self.area_scale * widths[0] * widths[1]
    }

    fn num_params(&self) -> usize {
        2
    }

    fn bounds(&self) -> &'static [(Float, Float)] {
        &CYLINDER_BOUNDS
    }
}

/// A cylindrical shell with its axis along z (a vertical column).
#[derive(Debug, Clone, PartialEq)]
pub struct CylinderZaxis {
    center: Vector3f,
    radius: Float,
    length: Float,
    area_scale: Float,
}

impl CylinderZaxis {
    pub fn new(center: Vector3f, radius: Float, length: Float) -> Self {
        Self { center, radius, length, area_scale: (radius * length).abs() }
    }
}

impl SourceShape for CylinderZaxis {
    fn position(&self, params: &[Float]) -> Vector3f {
        Vector3f::new(self.center.x + self.radius * params[0].cos(),
                      self.center.y + self.radius * params[0].sin(),
                      self.center.z + params[1] * self.length)
    }

    fn volume_element(&self, _params: &[Float], widths: &[Float]) -> Float {
        self.area_scale * widths[0] * widths[1]
    }

    fn num_params(&self) -> usize {
        2
    }

    fn bounds(&self) -> &'static [(Float, Float)] {
        &CYLINDER_BOUNDS
    }
}

/// A cylindrical shell with its axis along x, rotated about the z axis by a
/// fixed angle. The sine and cosine of the rotation are frozen at
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub struct RotXaxisCylinder {
    center: Vector3f,
    radius: Float,
    length: Float,
    area_scale: Float,
    s_eval: Float,
    c_eval: Float,
}

impl RotXaxisCylinder {
    pub fn new(center: Vector3f, radius: Float, length: Float, angle: Float) -> Self {
        Self {
            center,
            radius,
            length,
            area_scale: (radius * length).abs(),
            s_eval: angle.sin(),
            c_eval: angle.cos(),
        }
    }
}

impl SourceShape for RotXaxisCylinder {
    fn position(&self, params: &[Float]) -> Vector3f {
        let x = self.center.x + params[1] * self.length;
        let y = self.center.y + self.radius * params[0].cos();
        Vector3f::new(self.c_eval * x - self.s_eval * y,
                      self.s_eval * x + self.c_eval * y,
                      self.center.z + self.radius * params[0].sin())
    }

    fn volume_element(&self, _params: &[Float], widths: &[Float]) -> Float {
        self.area_scale * widths[0] * widths[1]
    }

    fn num_params(&self) -> usize {
        2
    }

    fn bounds(&self) -> &'static [(Float, Float)] {
        &CYLINDER_BOUNDS
    }
}

#[cfg(test)]
mod tests {
    use super::{ CylinderXaxis, CylinderYaxis, CylinderZaxis, RotXaxisCylinder };
    use crate::core::shape::SourceShape;
    use crate::math::constants::{ PI, TWO_PI, Vector3f };

    #[test]
    fn test_z_cylinder_surface() {
        let cyl = CylinderZaxis::new(Vector3f::new(0.0, 0.0, 1.0), 2.0, 3.0);
        let p = cyl.position(&[0.0, 1.0]);
        assert!((p - Vector3f::new(2.0, 0.0, 4.0)).norm() < 1e-12);
        let p = cyl.position(&[PI / 2.0, -1.0]);
        assert!((p - Vector3f::new(0.0, 2.0, -2.0)).norm() < 1e-12);
        // whole box: widths (2*pi, 2) -> lateral area 2*pi*r * 2*halflength
        let area = cyl.volume_element(&[0.0, 0.0], &[TWO_PI, 2.0]);
        assert!((area - TWO_PI * 2.0 * 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_axial_cylinders_permute_axes() {
        let x_cyl = CylinderXaxis::new(Vector3f::zeros(), 1.0, 2.0);
        let y_cyl = CylinderYaxis::new(Vector3f::zeros(), 1.0, 2.0);
        let p = x_cyl.position(&[0.0, 0.5]);
        assert!((p - Vector3f::new(1.0, 1.0, 0.0)).norm() < 1e-12);
        let p = y_cyl.position(&[0.0, 0.5]);
        assert!((p - Vector3f::new(1.0, 1.0, 0.0)).norm() < 1e-12);
        let p = y_cyl.position(&[PI, -0.5]);
        assert!((p - Vector3f::new(-1.0, -1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_rotated_cylinder_zero_angle() {
        // with angle 0 the rotation is the identity and the axis runs along x
        let cyl = RotXaxisCylinder::new(Vector3f::zeros(), 1.0, 2.0, 0.0);
        let p = cyl.position(&[PI / 2.0, 0.5]);
        assert!((p - Vector3f::new(1.0, 0.0, 1.0)).norm() < 1e-12);
    }

    #[test]
    fn test_rotated_cylinder_quarter_turn() {
        // a quarter turn about z carries the x axis onto the y axis
        let cyl = RotXaxisCylinder::new(Vector3f::zeros(), 1.0, 2.0, PI / 2.0);
        let p = cyl.position(&[PI / 2.0, 1.0]);
        assert!((p - Vector3f::new(0.0, 2.0, 1.0)).norm() < 1e-12);
    }
}
