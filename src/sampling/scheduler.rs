// Copyright @yucwang 2026

use super::distribution::{ DiscreteDistribution, DistributionKind, SampleDistribution,
                           NUM_DISTRIBUTIONS };
use super::mutation::{ MutationCandidate, MutationCandidatePool, ViewCellId };
use super::sample::{ Contribution, Sample };
use crate::core::object::{ same_object, ObjectRef };
use crate::core::ray_caster::RayCaster;
use crate::core::rng::LcgRng;
use crate::math::aabb::AABB;
use crate::math::constants::{ Float, Vector3f, FLOAT_MAX };
use crate::math::frame::{ create_orthogonal, Frame };
use crate::math::ray::Ray3f;
use crate::math::triangle::Triangle;
use crate::math::warp::{ square_to_cosine_hemisphere, square_to_gaussian_2d,
                         square_to_uniform_sphere };

use log::debug;
use std::sync::Arc;
use std::time::Instant;

// Sample count of a calibration pass, as suggested in the article.
pub const CALIBRATION_SAMPLES: u32 = 100_000;
// The article suggests a fresh calibration pass after 100M samples.
const RECALIBRATION_THRESHOLD: u64 = 100_000_000;
const MUTATION_POOL_CAPACITY: usize = 10_000;
// Spread of the silhouette discovery plane, in world units.
const SILHOUETTE_PLANE_SPREAD: Float = 1000.0;

// Owns the five strategies, their statistics and the selection
// probabilities, and reallocates sampling effort toward the strategies
// with the best contribution per unit time.
pub struct DistributionScheduler {
    rng: LcgRng,
    bounds: AABB,
    objects: Vec<ObjectRef>,
    ray_caster: Arc<dyn RayCaster>,
    dists: [SampleDistribution; NUM_DISTRIBUTIONS],
    select: DiscreteDistribution,
    pool: MutationCandidatePool,
}

impl DistributionScheduler {
    // The object list must contain at least one object with a
    // non-degenerate triangle; surface sampling retries until it finds one.
    pub fn new(bounds: AABB,
               objects: Vec<ObjectRef>,
               ray_caster: Arc<dyn RayCaster>,
               seed: u64) -> Self {
        assert!(!objects.is_empty(), "scheduler needs at least one scene object");

        let mut scheduler = Self {
            rng: LcgRng::new(seed),
            bounds,
            objects,
            ray_caster,
            dists: [
                SampleDistribution::new(DistributionKind::ViewSpaceDirection),
                SampleDistribution::new(DistributionKind::ObjectDirection),
                SampleDistribution::new(DistributionKind::TwoPoint),
                SampleDistribution::new(DistributionKind::TwoPointMutation),
                SampleDistribution::new(DistributionKind::SilhouetteMutation),
            ],
            select: DiscreteDistribution::from_weights(&[0.0; NUM_DISTRIBUTIONS]),
            pool: MutationCandidatePool::new(MUTATION_POOL_CAPACITY),
        };

        scheduler.calibration_pass();
        scheduler.update_probabilities();
        scheduler
    }

    // Measure the per-sample wall-clock cost of every eligible strategy.
    // Mutation strategies without candidates get an effectively infinite
    // average time so their selection weight stays at zero.
    pub fn calibration_pass(&mut self) {
        for index in 0..NUM_DISTRIBUTIONS {
            let kind = DistributionKind::from_index(index);
            if kind.is_mutation_based() && self.pool.is_empty() {
                self.dists[index].set_average_time(FLOAT_MAX);
                continue;
            }

            let timer = Instant::now();
            for _ in 0..CALIBRATION_SAMPLES {
                self.generate(kind);
            }
            let elapsed = timer.elapsed().as_nanos() as Float;
            let average = elapsed / CALIBRATION_SAMPLES as Float;
            self.dists[index].set_average_time(average);
            debug!("calibrated {:?}: {} ns per sample", kind, average);
        }
    }

    // Rebuild the selection probabilities from the empirical weights.
    // After a very large sample volume the per-sample costs are measured
    // again and the per-session counters start over.
    pub fn update_probabilities(&mut self) {
        let num_new_samples: u64 = self.dists.iter()
            .map(|dist| dist.num_samples() as u64)
            .sum();
        let recalibrate = num_new_samples > RECALIBRATION_THRESHOLD;
        if recalibrate {
            self.calibration_pass();
        }

        let mut weights: Vec<Float> = self.dists.iter().map(|dist| dist.weight()).collect();
        // A dry spell with no contributions zeroes every eligible weight.
        // Fall back to a uniform draw over the calibrated strategies only;
        // strategies carrying the ineligibility sentinel stay at zero.
        if weights.iter().all(|w| *w <= 0.0) {
            for (weight, dist) in weights.iter_mut().zip(self.dists.iter()) {
                if dist.average_time() > 0.0 && dist.average_time() < FLOAT_MAX {
                    *weight = 1.0;
                }
            }
        }
        self.select = DiscreteDistribution::from_weights(&weights);

        if recalibrate {
            for dist in self.dists.iter_mut() {
                dist.clear();
            }
        }
    }

    pub fn generate_sample(&mut self) -> Sample {
        let index = self.select.sample(&mut self.rng);
        let mut sample = self.generate(DistributionKind::from_index(index));
        self.dists[index].record_sample();
        sample.set_distribution_id(index as u8);
        sample
    }

    pub fn update_with_sample(&mut self,
                              sample: &Sample,
                              contribution: &Contribution,
                              view_cell: ViewCellId) {
        let index = sample.distribution_id() as usize;
        let contribution_sum = contribution.sum();
        if contribution_sum > 0 {
            self.dists[index].add_contribution(contribution_sum);
            match MutationCandidate::from_sample(sample, view_cell) {
                Some(candidate) => self.pool.insert(candidate),
                None => debug_assert!(false, "positive contribution without a forward hit"),
            }
        }
        if contribution.num_contributing > 0 {
            self.dists[index].record_contributing_sample();
        }
    }

    // The view space-direction strategy; unbiased, so it drives the
    // termination estimate.
    pub fn reference_distribution(&self) -> &SampleDistribution {
        &self.dists[0]
    }

    pub fn distribution(&self, index: usize) -> &SampleDistribution {
        &self.dists[index]
    }

    pub fn probabilities(&self) -> &[Float] {
        self.select.probabilities()
    }

    pub fn num_mutation_candidates(&self) -> usize {
        self.pool.len()
    }

    fn generate(&mut self, kind: DistributionKind) -> Sample {
        match kind {
            DistributionKind::ViewSpaceDirection => self.generate_view_space_direction_sample(),
            DistributionKind::ObjectDirection => self.generate_object_direction_sample(),
            DistributionKind::TwoPoint => self.generate_two_point_sample(),
            DistributionKind::TwoPointMutation => self.generate_two_point_mutation_sample(),
            DistributionKind::SilhouetteMutation => self.generate_silhouette_mutation_sample(),
        }
    }

    fn random_view_space_point(&mut self) -> Vector3f {
        let x = self.rng.next_range(self.bounds.p_min[0], self.bounds.p_max[0]);
        let y = self.rng.next_range(self.bounds.p_min[1], self.bounds.p_max[1]);
        let z = self.rng.next_range(self.bounds.p_min[2], self.bounds.p_max[2]);
        Vector3f::new(x, y, z)
    }

    // Ignore objects without triangles.
    fn random_object(&mut self) -> ObjectRef {
        loop {
            let object = self.objects[self.rng.next_index(self.objects.len())].clone();
            if object.triangle_count() > 0 {
                return object;
            }
        }
    }

    // Skip degenerate triangles.
    fn random_triangle(&mut self, object: &ObjectRef) -> Triangle {
        let triangle_count = object.triangle_count();
        loop {
            let index = self.rng.next_index(triangle_count as usize);
            let triangle = object.triangle(index as u32);
            if !triangle.is_degenerate() {
                return triangle;
            }
        }
    }

    // Uniform barycentric point: u in [0,1], v in [0, 1-u].
    fn random_surface_point(&mut self, triangle: &Triangle) -> Vector3f {
        let u = self.rng.next_f32();
        let v = self.rng.next_range(0.0, 1.0 - u);
        triangle.point_at(u, v)
    }

    fn random_point_on_plane(&mut self,
                             origin: Vector3f,
                             normal: Vector3f,
                             standard_deviation: Float) -> Vector3f {
        let unit_s = create_orthogonal(&normal);
        let unit_t = normal.cross(&unit_s);
        let offsets = square_to_gaussian_2d(&self.rng.next_2d(), standard_deviation);
        origin + unit_s * offsets.x + unit_t * offsets.y
    }

    // Random point in view space, random direction over the full sphere.
    fn generate_view_space_direction_sample(&mut self) -> Sample {
        let origin = self.random_view_space_point();
        let direction = square_to_uniform_sphere(&self.rng.next_2d());
        Sample::new(Ray3f::new(origin, direction, None, None))
    }

    // Random surface point on a random object; direction drawn from the
    // cosine-weighted hemisphere above the tangent plane at that point.
    fn generate_object_direction_sample(&mut self) -> Sample {
        let object = self.random_object();
        let triangle = self.random_triangle(&object);

        let origin = object.local_to_world_point(self.random_surface_point(&triangle));

        let frame = Frame::from_tangent_normal(&triangle.edge_ab(),
                                               &triangle.geometric_normal());
        let local_direction = frame.from_local(&square_to_cosine_hemisphere(&self.rng.next_2d()));
        let world_direction = object.local_to_world_dir(local_direction).normalize();

        let mut sample = Sample::new(Ray3f::new(origin, world_direction, None, None));
        sample.set_backward_hit(object, 0.0);
        sample
    }

    // Random point in view space aimed at a random surface point.
    fn generate_two_point_sample(&mut self) -> Sample {
        let object = self.random_object();
        let triangle = self.random_triangle(&object);
        let object_point = object.local_to_world_point(self.random_surface_point(&triangle));

        let view_space_point = self.random_view_space_point();

        let direction = (object_point - view_space_point).normalize();
        Sample::new(Ray3f::new(view_space_point, direction, None, None))
    }

    // Perturb both endpoints of a candidate with plane gaussians scaled by
    // the owning objects' bounding sphere radii.
    fn generate_two_point_mutation_sample(&mut self) -> Sample {
        let cand = self.pool.pick(&mut self.rng).clone();
        let direction = (cand.termination - cand.origin).normalize();

        let radius_termination = cand.termination_object.world_bounds().bounding_sphere_radius();
        let mutated_termination = self.random_point_on_plane(cand.termination,
                                                             -direction,
                                                             radius_termination);

        let radius_origin = match &cand.origin_object {
            Some(object) => object.world_bounds().bounding_sphere_radius(),
            None => radius_termination,
        };
        let mutated_origin = self.random_point_on_plane(cand.origin,
                                                        direction,
                                                        radius_origin);

        let ray_origin = (mutated_origin + mutated_termination) * 0.5;
        let ray_direction = (mutated_termination - mutated_origin).normalize();
        Sample::new(Ray3f::new(ray_origin, ray_direction, None, None))
    }

    // Pick a silhouette direction at the candidate's termination, then
    // search the segment for the innermost discovery ray that misses the
    // termination object.
    fn generate_silhouette_mutation_sample(&mut self) -> Sample {
        let cand = self.pool.pick(&mut self.rng).clone();
        let direction = (cand.termination - cand.origin).normalize();

        let radius = cand.termination_object.world_bounds().bounding_sphere_radius();
        let random_plane_point = self.random_point_on_plane(cand.termination,
                                                            -direction,
                                                            SILHOUETTE_PLANE_SPREAD);
        let random_direction = (random_plane_point - cand.termination).normalize();

        // Search on the segment in random_direction. In contrast to the
        // article, the interval spans two times the radius.
        let mut search_begin: Float = 0.0;
        let mut search_end: Float = 2.0 * radius;

        let segment_end = cand.termination + random_direction * search_end;
        let mut nearest_no_hit = Ray3f::new(cand.origin,
                                            segment_end - cand.origin,
                                            None, None);

        // Quaternary search, depth 3.
        for _ in 0..3 {
            let search_incr = (search_end - search_begin) / 4.0;
            let search_pos = [search_begin + search_incr,
                              search_begin + 2.0 * search_incr,
                              search_begin + 3.0 * search_incr];
            let rays: Vec<Ray3f> = search_pos.iter().map(|s| {
                let discovery_pos = cand.termination + random_direction * *s;
                Ray3f::new(cand.origin, discovery_pos - cand.origin, None, None)
            }).collect();

            let results = self.ray_caster.cast_rays(&cand.termination_object, &rays);
            let hit = |i: usize| results[i].as_ref()
                .map_or(false, |object| same_object(object, &cand.termination_object));

            // The innermost miss wins and narrows the interval around it.
            if !hit(0) {
                search_end = search_pos[0];
                nearest_no_hit = rays[0].clone();
            } else if !hit(1) {
                search_begin = search_pos[0];
                search_end = search_pos[1];
                nearest_no_hit = rays[1].clone();
            } else if !hit(2) {
                search_begin = search_pos[1];
                search_end = search_pos[2];
                nearest_no_hit = rays[2].clone();
            } else {
                search_begin = search_pos[2];
            }
        }

        Sample::new(nearest_no_hit)
    }
}
