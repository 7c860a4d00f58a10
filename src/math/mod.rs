// Copyright @yucwang 2026

pub mod aabb;
pub mod constants;
pub mod frame;
pub mod ray;
pub mod transform;
pub mod triangle;
pub mod warp;
