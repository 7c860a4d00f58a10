// Copyright @yucwang 2026

use super::constants::{ Float, PI, Vector2f, Vector3f };

pub fn spherical_direction(inclination: Float, azimuth: Float) -> Vector3f {
    let (sin_theta, cos_theta) = inclination.sin_cos();
    let (sin_phi, cos_phi) = azimuth.sin_cos();

    Vector3f::new(sin_theta * cos_phi, sin_theta * sin_phi, cos_theta)
}

// Uniform direction over the full sphere: inclination acos(1 - 2u).
pub fn square_to_uniform_sphere(u: &Vector2f) -> Vector3f {
    let inclination = (1.0 - 2.0 * u.x).acos();
    let azimuth = 2.0 * PI * u.y;

    spherical_direction(inclination, azimuth)
}

// Cosine-weighted hemisphere above +z: inclination acos(sqrt(u)).
pub fn square_to_cosine_hemisphere(u: &Vector2f) -> Vector3f {
    let inclination = u.x.sqrt().acos();
    let azimuth = 2.0 * PI * u.y;

    spherical_direction(inclination, azimuth)
}

// Box-Muller: two independent zero-mean gaussian offsets.
pub fn square_to_gaussian_2d(u: &Vector2f, stddev: Float) -> Vector2f {
    let u1 = u.x.max(1e-7);
    let r = stddev * (-2.0 * u1.ln()).sqrt();
    let phi = 2.0 * PI * u.y;
    let (sin_phi, cos_phi) = phi.sin_cos();

    Vector2f::new(r * cos_phi, r * sin_phi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::LcgRng;

    #[test]
    fn test_uniform_sphere_is_unit() {
        let mut rng = LcgRng::new(7);
        for _ in 0..256 {
            let u = Vector2f::new(rng.next_f32(), rng.next_f32());
            let d = square_to_uniform_sphere(&u);
            assert!((d.norm() - 1.0).abs() < 1e-4);
            assert!(d.x.is_finite() && d.y.is_finite() && d.z.is_finite());
        }
    }

    #[test]
    fn test_uniform_sphere_covers_both_hemispheres() {
        let mut rng = LcgRng::new(11);
        let mut above = 0;
        let mut below = 0;
        for _ in 0..1024 {
            let u = Vector2f::new(rng.next_f32(), rng.next_f32());
            let d = square_to_uniform_sphere(&u);
            if d.z > 0.0 { above += 1; } else { below += 1; }
        }
        assert!(above > 300 && below > 300);
    }

    #[test]
    fn test_cosine_hemisphere_is_upper() {
        let mut rng = LcgRng::new(13);
        for _ in 0..256 {
            let u = Vector2f::new(rng.next_f32(), rng.next_f32());
            let d = square_to_cosine_hemisphere(&u);
            assert!((d.norm() - 1.0).abs() < 1e-4);
            assert!(d.z >= -1e-4);
        }
    }

    #[test]
    fn test_gaussian_2d_spread() {
        let mut rng = LcgRng::new(17);
        let stddev = 2.0;
        let n = 4096;
        let mut sum = Vector2f::new(0.0, 0.0);
        let mut sum_sq = 0.0;
        for _ in 0..n {
            let u = Vector2f::new(rng.next_f32(), rng.next_f32());
            let g = square_to_gaussian_2d(&u, stddev);
            assert!(g.x.is_finite() && g.y.is_finite());
            sum += g;
            sum_sq += g.x * g.x;
        }
        let mean = sum / (n as Float);
        assert!(mean.norm() < 0.2);
        let variance = sum_sq / (n as Float);
        assert!((variance - stddev * stddev).abs() < 1.0);
    }
}
