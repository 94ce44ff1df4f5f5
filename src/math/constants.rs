/* Copyright 2026 @Yuchen Wong */

pub type Float = f64;

pub type Vector3f = nalgebra::Vector3<Float>;
pub type Matrix3f = nalgebra::Matrix3<Float>;

pub const PI: Float = 3.14159265358979323846264338327950288;
pub const TWO_PI: Float = 6.28318530717958647692528676655900577;
pub const INV_FOUR_PI: Float = 0.079577471545947667884441881686257181;
