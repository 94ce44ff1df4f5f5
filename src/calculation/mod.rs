// Copyright @yucwang 2026

pub mod bounds_handler;
pub mod calculator;
pub mod internals;
pub mod result_cache;
