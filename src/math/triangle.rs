// Copyright @yucwang 2026

use super::constants::{ EPSILON, Float, Vector3f };
use super::ray::Ray3f;
use super::transform::Transform;

#[derive(Debug, Copy, Clone)]
pub struct Triangle {
    p0: Vector3f,
    p1: Vector3f,
    p2: Vector3f
}

impl Triangle {
    pub fn new(new_p0: Vector3f, new_p1: Vector3f, new_p2: Vector3f) -> Self {
        Triangle {
            p0: new_p0,
            p1: new_p1,
            p2: new_p2,
        }
    }

    pub fn vertices(&self) -> (Vector3f, Vector3f, Vector3f) {
        (self.p0, self.p1, self.p2)
    }

    pub fn edge_ab(&self) -> Vector3f {
        self.p1 - self.p0
    }

    pub fn geometric_normal(&self) -> Vector3f {
        let edge0 = self.p1 - self.p0;
        let edge1 = self.p2 - self.p0;
        edge0.cross(&edge1).normalize()
    }

    pub fn surface_area(&self) -> Float {
        0.5 * ((self.p1 - self.p0).cross(&(self.p2 - self.p0))).norm()
    }

    pub fn is_degenerate(&self) -> bool {
        self.surface_area() < 1e-12
    }

    // Barycentric point: (1 - u - v) * p0 + u * p1 + v * p2.
    pub fn point_at(&self, u: Float, v: Float) -> Vector3f {
        self.p0 * (1.0 - u - v) + self.p1 * u + self.p2 * v
    }

    pub fn transformed(&self, transform: &Transform) -> Triangle {
        Triangle {
            p0: transform.apply_point(self.p0),
            p1: transform.apply_point(self.p1),
            p2: transform.apply_point(self.p2),
        }
    }

    pub fn ray_intersection(&self, ray: &Ray3f) -> Option<Float> {
        let edge0 = self.p1 - self.p0;
        let edge1 = self.p2 - self.p0;
        let geo_normal = edge0.cross(&edge1).normalize();

        let n_dot_dir = geo_normal.dot(&ray.dir());

        if n_dot_dir > -EPSILON && n_dot_dir < EPSILON {
            return None;
        }

        let plane_d = geo_normal.dot(&self.p0);
        let t = (plane_d - geo_normal.dot(&ray.origin())) / n_dot_dir;

        if !ray.test_segment(t) {
            return None;
        }

        let intersection_p = ray.at(t);
        if self.is_in_triangle(&intersection_p) {
            Some(t)
        } else {
            None
        }
    }

    pub fn ray_intersection_t(&self, ray: &Ray3f) -> bool {
        self.ray_intersection(ray).is_some()
    }

    fn is_in_triangle(&self, p: &Vector3f) -> bool {
        let edge0 = self.p1 - self.p0;
        let edge1 = self.p2 - self.p0;
        let geo_normal = edge0.cross(&edge1);

        let n0 = (self.p1 - self.p0).cross(&(p - self.p0));
        let n1 = (self.p2 - self.p1).cross(&(p - self.p1));
        let n2 = (self.p0 - self.p2).cross(&(p - self.p2));

        (n0.dot(&geo_normal) >= 0.0) && (n1.dot(&geo_normal) >= 0.0) && (n2.dot(&geo_normal) >= 0.0)
    }
}
