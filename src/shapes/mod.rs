// Copyright @yucwang 2026

pub mod flat;
pub mod low_dim;
pub mod shell;
