// Copyright @yucwang 2026

#![allow(dead_code)]

pub mod calculation;
pub mod core;
pub mod ffi;
pub mod math;
pub mod shapes;
pub mod sweep;
