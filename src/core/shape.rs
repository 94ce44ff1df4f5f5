// Copyright @yucwang 2026

use crate::math::constants::{ Float, Vector3f };
use crate::shapes::flat::{ Circle, CircleXY, CircleXZ, CircleYZ, Square };
use crate::shapes::low_dim::{ LineSource, PointSource };
use crate::shapes::shell::{ CylinderXaxis, CylinderYaxis, CylinderZaxis, RotXaxisCylinder };

/// Capability contract shared by every source geometry: a pure mapping from
/// the shape's parameter box to 3-D space, the Jacobian of that mapping for a
/// parameter cell, and the fixed parameter count and bounds.
pub trait SourceShape {
    /// Cartesian position for a point of the parameter box.
    fn position(&self, params: &[Float]) -> Vector3f;
    /// Non-negative differential measure (length for 1-parameter shapes,
    /// area for 2-parameter shapes) of a cell of the given widths centered
    /// at `params`.
    fn volume_element(&self, params: &[Float], widths: &[Float]) -> Float;
    fn num_params(&self) -> usize;
    /// Fixed `[lo, hi]` interval per parameter axis.
    fn bounds(&self) -> &'static [(Float, Float)];
}

/// The closed set of source geometries. The shape kinds are fixed and small,
/// so dispatch goes through a tagged union instead of trait objects, keeping
/// the innermost integrand loop free of virtual calls.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Point(PointSource),
    Line(LineSource),
    Square(Square),
    Circle(Circle),
    CircleXY(CircleXY),
    CircleXZ(CircleXZ),
    CircleYZ(CircleYZ),
    CylinderXaxis(CylinderXaxis),
    CylinderYaxis(CylinderYaxis),
    CylinderZaxis(CylinderZaxis),
    RotXaxisCylinder(RotXaxisCylinder),
}

impl SourceShape for Source {
    fn position(&self, params: &[Float]) -> Vector3f {
        match self {
            Source::Point(s) => s.position(params),
            Source::Line(s) => s.position(params),
            Source::Square(s) => s.position(params),
            Source::Circle(s) => s.position(params),
            Source::CircleXY(s) => s.position(params),
            Source::CircleXZ(s) => s.position(params),
            Source::CircleYZ(s) => s.position(params),
            Source::CylinderXaxis(s) => s.position(params),
            Source::CylinderYaxis(s) => s.position(params),
            Source::CylinderZaxis(s) => s.position(params),
            Source::RotXaxisCylinder(s) => s.position(params),
        }
    }

    fn volume_element(&self, params: &[Float], widths: &[Float]) -> Float {
        match self {
            Source::Point(s) => s.volume_element(params, widths),
            Source::Line(s) => s.volume_element(params, widths),
            Source::Square(s) => s.volume_element(params, widths),
            Source::Circle(s) => s.volume_element(params, widths),
            Source::CircleXY(s) => s.volume_element(params, widths),
            Source::CircleXZ(s) => s.volume_element(params, widths),
            Source::CircleYZ(s) => s.volume_element(params, widths),
            Source::CylinderXaxis(s) => s.volume_element(params, widths),
            Source::CylinderYaxis(s) => s.volume_element(params, widths),
            Source::CylinderZaxis(s) => s.volume_element(params, widths),
            Source::RotXaxisCylinder(s) => s.volume_element(params, widths),
        }
    }

    fn num_params(&self) -> usize {
        match self {
            Source::Point(s) => s.num_params(),
            Source::Line(s) => s.num_params(),
            Source::Square(s) => s.num_params(),
            Source::Circle(s) => s.num_params(),
            Source::CircleXY(s) => s.num_params(),
            Source::CircleXZ(s) => s.num_params(),
            Source::CircleYZ(s) => s.num_params(),
            Source::CylinderXaxis(s) => s.num_params(),
            Source::CylinderYaxis(s) => s.num_params(),
            Source::CylinderZaxis(s) => s.num_params(),
            Source::RotXaxisCylinder(s) => s.num_params(),
        }
    }

    fn bounds(&self) -> &'static [(Float, Float)] {
        match self {
            Source::Point(s) => s.bounds(),
            Source::Line(s) => s.bounds(),
            Source::Square(s) => s.bounds(),
            Source::Circle(s) => s.bounds(),
            Source::CircleXY(s) => s.bounds(),
            Source::CircleXZ(s) => s.bounds(),
            Source::CircleYZ(s) => s.bounds(),
            Source::CylinderXaxis(s) => s.bounds(),
            Source::CylinderYaxis(s) => s.bounds(),
            Source::CylinderZaxis(s) => s.bounds(),
            Source::RotXaxisCylinder(s) => s.bounds(),
        }
    }
}
