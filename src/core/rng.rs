// Copyright @yucwang 2026

use crate::math::constants::{ Float, Vector2f };

pub struct LcgRng {
    state: u64,
}

impl LcgRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }

    pub fn next_f32(&mut self) -> Float {
        (self.next_u32() as Float) / (u32::MAX as Float)
    }

    pub fn next_2d(&mut self) -> Vector2f {
        let x = self.next_f32();
        let y = self.next_f32();
        Vector2f::new(x, y)
    }

    pub fn next_range(&mut self, min: Float, max: Float) -> Float {
        min + (max - min) * self.next_f32()
    }

    // Uniform index in [0, count). count must be positive.
    pub fn next_index(&mut self, count: usize) -> usize {
        let idx = (self.next_f32() * count as Float) as usize;
        idx.min(count - 1)
    }
}
