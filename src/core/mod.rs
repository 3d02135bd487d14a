// Core utilities with no engine or game knowledge

pub mod math;
