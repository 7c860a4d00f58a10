// Copyright @yucwang 2026

use super::object::ObjectRef;
use crate::math::constants::{ Float, UInt };
use crate::math::ray::Ray3f;
use crate::math::triangle::Triangle;

pub fn world_triangle(object: &ObjectRef, index: UInt) -> Triangle {
    let (p0, p1, p2) = object.triangle(index).vertices();
    Triangle::new(
        object.local_to_world_point(p0),
        object.local_to_world_point(p1),
        object.local_to_world_point(p2))
}

// Ray casting collaborator. For each ray, the first object hit or None.
// The silhouette mutation only ever casts against a single target object.
pub trait RayCaster: Send + Sync {
    fn cast_rays(&self, target: &ObjectRef, rays: &[Ray3f]) -> Vec<Option<ObjectRef>>;
}

// Walks every world-space triangle of the target. No acceleration
// structure; intended for tests and small driver scenes.
pub struct BruteForceRayCaster;

impl BruteForceRayCaster {
    pub fn new() -> Self {
        Self
    }

    pub fn closest_hit(&self, target: &ObjectRef, ray: &Ray3f) -> Option<Float> {
        let mut closest_t: Option<Float> = None;
        for index in 0..target.triangle_count() {
            let world_tri = world_triangle(target, index);
            if let Some(t) = world_tri.ray_intersection(ray) {
                if closest_t.map_or(true, |best| t < best) {
                    closest_t = Some(t);
                }
            }
        }
        closest_t
    }
}

impl RayCaster for BruteForceRayCaster {
    fn cast_rays(&self, target: &ObjectRef, rays: &[Ray3f]) -> Vec<Option<ObjectRef>> {
        rays.iter()
            .map(|ray| self.closest_hit(target, ray).map(|_| target.clone()))
            .collect()
    }
}
