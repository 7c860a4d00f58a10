// Copyright @yucwang 2026

pub mod mesh;
pub mod object;
pub mod ray_caster;
pub mod rng;
