// Copyright @yucwang 2026

use super::object::VisibilityObject;
use crate::io::obj_utils;
use crate::io::obj_utils::ObjLoadError;
use crate::math::aabb::AABB;
use crate::math::constants::{ UInt, Vector3f };
use crate::math::transform::Transform;
use crate::math::triangle::Triangle;

use std::path::Path;

// Default VisibilityObject implementation: a list of local-space triangles
// with one local-to-world transform.
pub struct TriangleMeshObject {
    triangles: Vec<Triangle>,
    transform: Transform,
    world_bounds: AABB,
}

impl TriangleMeshObject {
    pub fn from_triangles(triangles: Vec<Triangle>, transform: Transform) -> Self {
        let mut world_bounds = AABB::default();
        for tri in &triangles {
            let world_tri = tri.transformed(&transform);
            let (p0, p1, p2) = world_tri.vertices();
            world_bounds.expand_by_point(&p0);
            world_bounds.expand_by_point(&p1);
            world_bounds.expand_by_point(&p2);
        }

        Self { triangles, transform, world_bounds }
    }

    pub fn from_obj<P: AsRef<Path>>(path: P, transform: Transform) -> Result<Self, ObjLoadError> {
        let triangles = obj_utils::load_triangles_from_file(path)?;
        Ok(Self::from_triangles(triangles, transform))
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }
}

impl VisibilityObject for TriangleMeshObject {
    fn triangle_count(&self) -> UInt {
        self.triangles.len() as UInt
    }

    fn triangle(&self, index: UInt) -> Triangle {
        self.triangles[index as usize]
    }

    fn world_bounds(&self) -> AABB {
        self.world_bounds
    }

    fn local_to_world_point(&self, p: Vector3f) -> Vector3f {
        self.transform.apply_point(p)
    }

    fn local_to_world_dir(&self, d: Vector3f) -> Vector3f {
        self.transform.apply_vector(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_quad() -> Vec<Triangle> {
        let p0 = Vector3f::new(0.0, 0.0, 0.0);
        let p1 = Vector3f::new(1.0, 0.0, 0.0);
        let p2 = Vector3f::new(1.0, 1.0, 0.0);
        let p3 = Vector3f::new(0.0, 1.0, 0.0);
        vec![Triangle::new(p0, p1, p2), Triangle::new(p0, p2, p3)]
    }

    #[test]
    fn test_world_bounds_with_transform() {
        let transform = Transform::from_scale_translate(
            &Vector3f::new(2.0, 2.0, 1.0),
            &Vector3f::new(-1.0, 0.0, 3.0));
        let mesh = TriangleMeshObject::from_triangles(unit_quad(), transform);

        assert_eq!(mesh.triangle_count(), 2);
        let bounds = mesh.world_bounds();
        assert!((bounds.p_min - Vector3f::new(-1.0, 0.0, 3.0)).norm() < 1e-5);
        assert!((bounds.p_max - Vector3f::new(1.0, 2.0, 3.0)).norm() < 1e-5);
    }

    #[test]
    fn test_local_to_world() {
        let transform = Transform::from_scale_translate(
            &Vector3f::new(1.0, 1.0, 1.0),
            &Vector3f::new(5.0, 0.0, 0.0));
        let mesh = TriangleMeshObject::from_triangles(unit_quad(), transform);

        let p = mesh.local_to_world_point(Vector3f::new(0.5, 0.5, 0.0));
        assert!((p - Vector3f::new(5.5, 0.5, 0.0)).norm() < 1e-5);
        let d = mesh.local_to_world_dir(Vector3f::new(0.0, 1.0, 0.0));
        assert!((d - Vector3f::new(0.0, 1.0, 0.0)).norm() < 1e-5);
    }
}
