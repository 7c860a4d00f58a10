// Copyright @yucwang 2026

#![allow(dead_code)]

mod core;
mod io;
mod math;
mod sampling;

use crate::core::mesh::TriangleMeshObject;
use crate::core::object::ObjectRef;
use crate::core::ray_caster::{ BruteForceRayCaster, RayCaster };
use crate::math::aabb::AABB;
use crate::math::constants::{ Float, Vector3f };
use crate::math::ray::Ray3f;
use crate::math::transform::Transform;
use crate::math::triangle::Triangle;
use crate::sampling::distribution::NUM_DISTRIBUTIONS;
use crate::sampling::{ Contribution, SampleDistributions };

use indicatif::{ ProgressBar, ProgressStyle };
use log::info;
use std::collections::HashSet;
use std::env;
use std::sync::Arc;

fn box_triangles(min: Vector3f, max: Vector3f) -> Vec<Triangle> {
    let corners = [
        Vector3f::new(min.x, min.y, min.z),
        Vector3f::new(max.x, min.y, min.z),
        Vector3f::new(max.x, max.y, min.z),
        Vector3f::new(min.x, max.y, min.z),
        Vector3f::new(min.x, min.y, max.z),
        Vector3f::new(max.x, min.y, max.z),
        Vector3f::new(max.x, max.y, max.z),
        Vector3f::new(min.x, max.y, max.z),
    ];
    let faces: [[usize; 4]; 6] = [
        [0, 1, 2, 3],
        [4, 5, 6, 7],
        [0, 1, 5, 4],
        [2, 3, 7, 6],
        [0, 3, 7, 4],
        [1, 2, 6, 5],
    ];

    let mut triangles = Vec::with_capacity(12);
    for face in faces.iter() {
        triangles.push(Triangle::new(corners[face[0]], corners[face[1]], corners[face[2]]));
        triangles.push(Triangle::new(corners[face[0]], corners[face[2]], corners[face[3]]));
    }
    triangles
}

// A walled room with two occluder boxes.
fn build_default_scene() -> Vec<ObjectRef> {
    let room: ObjectRef = Arc::new(TriangleMeshObject::from_triangles(
        box_triangles(Vector3f::new(-10.0, -10.0, -10.0), Vector3f::new(10.0, 10.0, 10.0)),
        Transform::default()));
    let occluder_a: ObjectRef = Arc::new(TriangleMeshObject::from_triangles(
        box_triangles(Vector3f::new(-6.0, -2.0, 3.0), Vector3f::new(-3.0, 2.0, 6.0)),
        Transform::default()));
    let occluder_b: ObjectRef = Arc::new(TriangleMeshObject::from_triangles(
        box_triangles(Vector3f::new(2.0, -4.0, -7.0), Vector3f::new(6.0, 3.0, -4.0)),
        Transform::default()));
    vec![room, occluder_a, occluder_b]
}

fn closest_hit_in_scene(caster: &BruteForceRayCaster,
                        objects: &[ObjectRef],
                        ray: &Ray3f) -> Option<(usize, Float)> {
    let mut closest: Option<(usize, Float)> = None;
    for (index, object) in objects.iter().enumerate() {
        if let Some(t) = caster.closest_hit(object, ray) {
            if closest.map_or(true, |(_, best)| t < best) {
                closest = Some((index, t));
            }
        }
    }
    closest
}

fn main() {
    env::set_var("RUST_LOG", "info");
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut num_samples: u64 = 1_000_000;
    let mut seed: u64 = 42;
    let mut batch: u64 = 65_536;
    let mut obj_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--samples" => {
                i += 1;
                num_samples = args.get(i).and_then(|v| v.parse::<u64>().ok()).unwrap_or(num_samples);
            }
            "--seed" => {
                i += 1;
                seed = args.get(i).and_then(|v| v.parse::<u64>().ok()).unwrap_or(seed);
            }
            "--batch" => {
                i += 1;
                batch = args.get(i).and_then(|v| v.parse::<u64>().ok()).unwrap_or(batch);
            }
            "--obj" => {
                i += 1;
                obj_path = args.get(i).cloned();
            }
            _ => {
                eprintln!("Usage: {} [--samples N] [--seed N] [--batch N] [--obj scene.obj]", args[0]);
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let objects = match obj_path {
        Some(path) => {
            let mesh = TriangleMeshObject::from_obj(&path, Transform::default())
                .expect("failed to load obj scene");
            vec![Arc::new(mesh) as ObjectRef]
        }
        None => build_default_scene(),
    };

    let mut scene_bounds = AABB::default();
    for object in &objects {
        scene_bounds.expand_by_aabb(&object.world_bounds());
    }
    // View space: a box around the scene center, a quarter of each extent.
    let center = scene_bounds.center();
    let half = scene_bounds.diagnal() * 0.125;
    let view_space_bounds = AABB::new(center - half, center + half);

    info!("scene: {} objects, view space {:?} .. {:?}",
          objects.len(), view_space_bounds.p_min, view_space_bounds.p_max);

    let caster = Arc::new(BruteForceRayCaster::new());
    let mut session = SampleDistributions::new(view_space_bounds,
                                               objects.clone(),
                                               caster.clone(),
                                               seed);

    let progress = ProgressBar::new(num_samples);
    progress.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} samples")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    // The single view cell of this driver; visibility evidence is a newly
    // discovered object per cast direction.
    let view_cell = 0;
    let mut discovered: HashSet<usize> = HashSet::new();
    let mut drawn: u64 = 0;

    while drawn < num_samples {
        let mut sample = session.generate_sample();

        let forward_ray = Ray3f::new(sample.origin(), sample.dir(), Some(1e-3), None);
        let backward_ray = Ray3f::new(sample.origin(), -sample.dir(), Some(1e-3), None);

        let mut forward = 0;
        if let Some((index, t)) = closest_hit_in_scene(&caster, &objects, &forward_ray) {
            sample.set_forward_hit(objects[index].clone(), t);
            if discovered.insert(index) {
                forward = 1;
            }
        }
        let mut backward = 0;
        if sample.backward_hit().is_none() {
            if let Some((index, t)) = closest_hit_in_scene(&caster, &objects, &backward_ray) {
                sample.set_backward_hit(objects[index].clone(), t);
                if discovered.insert(index) {
                    backward = 1;
                }
            }
        }

        let num_contributing = if forward + backward > 0 { 1 } else { 0 };
        session.update_with_sample(&sample,
                                   &Contribution::new(forward, backward, num_contributing),
                                   view_cell);

        drawn += 1;
        progress.inc(1);

        if drawn % batch == 0 {
            session.calculate_distribution_probabilities();
            if session.terminate() {
                info!("converged after {} samples", drawn);
                break;
            }
        }
    }
    progress.finish_and_clear();

    let scheduler = session.scheduler();
    for index in 0..NUM_DISTRIBUTIONS {
        let dist = scheduler.distribution(index);
        info!("{:?}: p={:.4} samples={} contribution={} contributing={}",
              dist.kind(),
              scheduler.probabilities()[index],
              dist.num_samples(),
              dist.contribution(),
              dist.num_contributing_samples());
    }
    info!("mutation candidates: {}", scheduler.num_mutation_candidates());
    info!("objects discovered: {} / {}", discovered.len(), objects.len());
    info!("terminated: {}", session.terminate());
}
