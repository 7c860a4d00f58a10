// Copyright @yucwang 2026

use super::constants::Vector3f;

// Returns a unit vector orthogonal to n. n must be normalized.
pub fn create_orthogonal(n: &Vector3f) -> Vector3f {
    let up = if n.z.abs() < 0.999 {
        Vector3f::new(0.0, 0.0, 1.0)
    } else {
        Vector3f::new(1.0, 0.0, 0.0)
    };
    n.cross(&up).normalize()
}

#[derive(Debug, Copy, Clone)]
pub struct Frame {
    pub t: Vector3f,
    pub b: Vector3f,
    pub n: Vector3f
}

impl Frame {
    pub fn from_normal(n: &Vector3f) -> Frame {
        let t = create_orthogonal(n);
        let b = n.cross(&t).normalize();
        Frame { t, b, n: *n }
    }

    // Gram-Schmidt: keeps the tangent in the plane spanned with the normal.
    pub fn from_tangent_normal(tangent: &Vector3f, n: &Vector3f) -> Frame {
        let projected = tangent - n * tangent.dot(n);
        let t = if projected.norm() < 1e-8 {
            create_orthogonal(n)
        } else {
            projected.normalize()
        };
        let b = n.cross(&t).normalize();
        Frame { t, b, n: *n }
    }

    pub fn to_local(&self, v: &Vector3f) -> Vector3f {
        Vector3f::new(v.dot(&self.t), v.dot(&self.b), v.dot(&self.n))
    }

    pub fn from_local(&self, v: &Vector3f) -> Vector3f {
        self.t * v.x + self.b * v.y + self.n * v.z
    }
}
