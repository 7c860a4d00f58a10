// Copyright @yucwang 2026

use crate::math::aabb::AABB;
use crate::math::constants::{ UInt, Vector3f };
use crate::math::triangle::Triangle;

use std::sync::Arc;

// Narrow capability surface of a scene object: the sampler only needs
// triangle access, world bounds and the local-to-world mapping.
pub trait VisibilityObject: Send + Sync {
    fn triangle_count(&self) -> UInt;
    fn triangle(&self, index: UInt) -> Triangle;
    fn world_bounds(&self) -> AABB;
    fn local_to_world_point(&self, p: Vector3f) -> Vector3f;
    fn local_to_world_dir(&self, d: Vector3f) -> Vector3f;
}

pub type ObjectRef = Arc<dyn VisibilityObject>;

pub fn same_object(a: &ObjectRef, b: &ObjectRef) -> bool {
    Arc::ptr_eq(a, b)
}

// Scene enumeration collaborator: whatever owns the scene hands the
// sampler a flat object list.
pub trait SceneQuery {
    fn collect_objects(&self) -> Vec<ObjectRef>;
}

impl SceneQuery for Vec<ObjectRef> {
    fn collect_objects(&self) -> Vec<ObjectRef> {
        self.clone()
    }
}
