// Copyright @yucwang 2026

use crate::core::object::ObjectRef;
use crate::math::constants::{ Float, UInt, Vector3f };
use crate::math::ray::Ray3f;

// An object touched by a cast sample, with the hit distance along the
// cast direction.
#[derive(Clone)]
pub struct SurfaceHit {
    pub object: ObjectRef,
    pub t: Float,
}

// A generated ray plus provenance. The distribution id is tagged right
// after generation; the forward/backward cast results are recorded by the
// external evaluator before the sample is reported back.
#[derive(Clone)]
pub struct Sample {
    ray: Ray3f,
    distribution_id: u8,
    forward: Option<SurfaceHit>,
    backward: Option<SurfaceHit>,
}

impl Sample {
    pub fn new(ray: Ray3f) -> Self {
        Self {
            ray,
            distribution_id: 0,
            forward: None,
            backward: None,
        }
    }

    pub fn ray(&self) -> &Ray3f {
        &self.ray
    }

    pub fn origin(&self) -> Vector3f {
        self.ray.origin()
    }

    pub fn dir(&self) -> Vector3f {
        self.ray.dir()
    }

    pub fn distribution_id(&self) -> u8 {
        self.distribution_id
    }

    pub(crate) fn set_distribution_id(&mut self, id: u8) {
        self.distribution_id = id;
    }

    pub fn forward_hit(&self) -> Option<&SurfaceHit> {
        self.forward.as_ref()
    }

    pub fn backward_hit(&self) -> Option<&SurfaceHit> {
        self.backward.as_ref()
    }

    // First hit along the ray direction, at distance t from the origin.
    pub fn set_forward_hit(&mut self, object: ObjectRef, t: Float) {
        self.forward = Some(SurfaceHit { object, t });
    }

    // First hit against the ray direction, at distance t behind the origin.
    pub fn set_backward_hit(&mut self, object: ObjectRef, t: Float) {
        self.backward = Some(SurfaceHit { object, t });
    }

    pub fn forward_point(&self) -> Option<Vector3f> {
        self.forward.as_ref().map(|hit| self.ray.at(hit.t))
    }

    pub fn backward_point(&self) -> Option<Vector3f> {
        self.backward.as_ref().map(|hit| self.ray.at(-hit.t))
    }
}

// Externally computed payoff of one sample. The forward and backward parts
// count new visibility found in each cast direction; num_contributing flags
// whether the sample contributed at all to the reference estimate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Contribution {
    pub forward: UInt,
    pub backward: UInt,
    pub num_contributing: UInt,
}

impl Contribution {
    pub fn new(forward: UInt, backward: UInt, num_contributing: UInt) -> Self {
        Self { forward, backward, num_contributing }
    }

    pub fn sum(&self) -> UInt {
        self.forward + self.backward
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mesh::TriangleMeshObject;
    use crate::math::transform::Transform;
    use crate::math::triangle::Triangle;
    use std::sync::Arc;

    fn dummy_object() -> ObjectRef {
        let triangle = Triangle::new(Vector3f::new(0.0, 0.0, 0.0),
                                     Vector3f::new(1.0, 0.0, 0.0),
                                     Vector3f::new(0.0, 1.0, 0.0));
        Arc::new(TriangleMeshObject::from_triangles(vec![triangle], Transform::default()))
    }

    #[test]
    fn test_hit_points() {
        let ray = Ray3f::new(Vector3f::new(0.0, 0.0, 0.0),
                             Vector3f::new(0.0, 0.0, 1.0), None, None);
        let mut sample = Sample::new(ray);
        assert!(sample.forward_point().is_none());

        sample.set_forward_hit(dummy_object(), 3.0);
        sample.set_backward_hit(dummy_object(), 2.0);

        let forward = sample.forward_point().unwrap();
        assert!((forward - Vector3f::new(0.0, 0.0, 3.0)).norm() < 1e-5);
        let backward = sample.backward_point().unwrap();
        assert!((backward - Vector3f::new(0.0, 0.0, -2.0)).norm() < 1e-5);
    }

    #[test]
    fn test_contribution_sum() {
        let contribution = Contribution::new(2, 3, 1);
        assert_eq!(contribution.sum(), 5);
        assert_eq!(Contribution::default().sum(), 0);
    }
}
