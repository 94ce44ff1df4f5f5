// Copyright @yucwang 2026

//! Flat C ABI consumed by the Python analysis pipeline through `ctypes`.
//!
//! Every `make*` function returns an owning opaque handle. `makeCalculator`
//! takes ownership of the detector and source handles it is given, and
//! `freeCalculator` releases all three; no handle may be used after the
//! owning `freeCalculator` call. Input arrays are caller-owned fixed-length
//! buffers (3 for vectors, 9 for a row-major rotation matrix) and are copied,
//! never retained.

// the exported names are part of the historical C surface
#![allow(non_snake_case)]

use crate::calculation::calculator::Calculator;
use crate::core::detector::Detector;
use crate::core::shape::Source;
use crate::math::constants::{ Float, Matrix3f, Vector3f };
use crate::shapes::flat::{ Circle, CircleXY, CircleXZ, CircleYZ, Square };
use crate::shapes::low_dim::{ LineSource, PointSource };
use crate::shapes::shell::{ CylinderZaxis, RotXaxisCylinder };

unsafe fn read_vec3(ptr: *const Float) -> Vector3f {
    let data = std::slice::from_raw_parts(ptr, 3);
    Vector3f::new(data[0], data[1], data[2])
}

unsafe fn read_mat3(ptr: *const Float) -> Matrix3f {
    Matrix3f::from_row_slice(std::slice::from_raw_parts(ptr, 9))
}

fn source_handle(src: Source) -> *mut Source {
    Box::into_raw(Box::new(src))
}

/// # Safety
/// `vec1`, `vec2`, and `norm` must point to 3 readable doubles each.
#[no_mangle]
pub unsafe extern "C" fn makeDetector(vec1: *const Float, vec2: *const Float,
                                      norm: *const Float) -> *mut Detector {
    Box::into_raw(Box::new(Detector::new(read_vec3(vec1), read_vec3(vec2),
                                         read_vec3(norm))))
}

/// # Safety
/// `cent` must point to 3 readable doubles.
#[no_mangle]
pub unsafe extern "C" fn makePoint(cent: *const Float) -> *mut Source {
    source_handle(Source::Point(PointSource::new(read_vec3(cent))))
}

/// # Safety
/// `start` and `stop` must point to 3 readable doubles each.
#[no_mangle]
pub unsafe extern "C" fn makeLine(start: *const Float, stop: *const Float) -> *mut Source {
    source_handle(Source::Line(LineSource::new(read_vec3(start), read_vec3(stop))))
}

/// # Safety
/// `cent`, `vec1`, and `vec2` must point to 3 readable doubles each.
#[no_mangle]
pub unsafe extern "C" fn makeSquare(cent: *const Float, vec1: *const Float,
                                    vec2: *const Float) -> *mut Source {
    source_handle(Source::Square(Square::new(read_vec3(cent), read_vec3(vec1),
                                             read_vec3(vec2))))
}

/// # Safety
/// `cent` must point to 3 readable doubles and `rot` to 9 (row-major 3x3).
#[no_mangle]
pub unsafe extern "C" fn makeCircle(cent: *const Float, radius: Float,
                                    rot: *const Float) -> *mut Source {
    source_handle(Source::Circle(Circle::new(read_vec3(cent), radius, read_mat3(rot))))
}

/// # Safety
/// `cent` must point to 3 readable doubles.
#[no_mangle]
pub unsafe extern "C" fn makeCircleXY(cent: *const Float, radius: Float) -> *mut Source {
    source_handle(Source::CircleXY(CircleXY::new(read_vec3(cent), radius)))
}

/// # Safety
/// `cent` must point to 3 readable doubles.
#[no_mangle]
pub unsafe extern "C" fn makeCircleXZ(cent: *const Float, radius: Float) -> *mut Source {
    source_handle(Source::CircleXZ(CircleXZ::new(read_vec3(cent), radius)))
}

/// # Safety
/// `cent` must point to 3 readable doubles.
#[no_mangle]
pub unsafe extern "C" fn makeCircleYZ(cent: *const Float, radius: Float) -> *mut Source {
    source_handle(Source::CircleYZ(CircleYZ::new(read_vec3(cent), radius)))
}

/// # Safety
/// `cent` must point to 3 readable doubles.
#[no_mangle]
pub unsafe extern "C" fn makeVertCylinder(cent: *const Float, radius: Float,
                                          len: Float) -> *mut Source {
    // a vertical cylinder is the z-axis shell under its historical C name
    source_handle(Source::CylinderZaxis(CylinderZaxis::new(read_vec3(cent), radius, len)))
}

/// # Safety
/// `cent` must point to 3 readable doubles.
#[no_mangle]
pub unsafe extern "C" fn makeRotXaxisCylinder(cent: *const Float, radius: Float,
                                              len: Float, angle: Float) -> *mut Source {
    source_handle(Source::RotXaxisCylinder(RotXaxisCylinder::new(read_vec3(cent),
                                                                 radius, len, angle)))
}

/// # Safety
/// Both handles must come from the matching `make*` functions and must not
/// be used again afterwards: the calculator takes ownership of them.
#[no_mangle]
pub unsafe extern "C" fn makeCalculator(detector: *mut Detector,
                                        source: *mut Source) -> *mut Calculator {
    let det = *Box::from_raw(detector);
    let src = *Box::from_raw(source);
    Box::into_raw(Box::new(Calculator::new(det, src)))
}

/// # Safety
/// `calc_object` must come from `makeCalculator` and `out_params` must point
/// to at least 3 writable doubles; they receive the integral value, the
/// maximum recursion level attained, and the integrand call count.
#[no_mangle]
pub unsafe extern "C" fn calcIntegral(calc_object: *mut Calculator,
                                      out_params: *mut Float) {
    let calc = &mut *calc_object;
    let result = calc.calc_integral();
    let out = std::slice::from_raw_parts_mut(out_params, 3);
    out[0] = result.value;
    out[1] = result.max_depth as Float;
    out[2] = result.calls as Float;
}

/// # Safety
/// `calc_object` must come from `makeCalculator` and must not be used again;
/// the owned detector and source are released along with the calculator.
#[no_mangle]
pub unsafe extern "C" fn freeCalculator(calc_object: *mut Calculator) {
    drop(Box::from_raw(calc_object));
}
