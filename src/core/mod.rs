// Copyright @yucwang 2026

pub mod detector;
pub mod shape;
