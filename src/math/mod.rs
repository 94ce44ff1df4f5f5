// Copyright 2026 @TwoCookingMice

pub mod constants;
