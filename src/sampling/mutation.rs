// Copyright @yucwang 2026

use super::sample::Sample;
use crate::core::object::ObjectRef;
use crate::core::rng::LcgRng;
use crate::math::constants::Vector3f;

// Opaque identifier of the view cell a contribution was found for.
pub type ViewCellId = u32;

// Endpoints of a prior high-payoff sample, kept to seed local perturbation.
// origin_object is absent when the sample did not start on a surface; the
// mutation strategies fall back to the termination object's radius then.
#[derive(Clone)]
pub struct MutationCandidate {
    pub origin: Vector3f,
    pub termination: Vector3f,
    pub termination_object: ObjectRef,
    pub origin_object: Option<ObjectRef>,
    pub view_cell: ViewCellId,
}

impl MutationCandidate {
    // None when the sample carries no forward hit; a candidate without a
    // termination object cannot seed a mutation.
    pub fn from_sample(sample: &Sample, view_cell: ViewCellId) -> Option<Self> {
        let forward = sample.forward_hit()?;
        let termination = sample.ray().at(forward.t);
        let (origin, origin_object) = match sample.backward_hit() {
            Some(backward) => (sample.ray().at(-backward.t), Some(backward.object.clone())),
            None => (sample.origin(), None),
        };

        Some(Self {
            origin,
            termination,
            termination_object: forward.object.clone(),
            origin_object,
            view_cell,
        })
    }
}

// Bounded ring buffer of candidates. Inserts overwrite the oldest entry
// under capacity pressure; picks are uniform random and non-consuming.
pub struct MutationCandidatePool {
    candidates: Vec<MutationCandidate>,
    capacity: usize,
    next_slot: usize,
}

impl MutationCandidatePool {
    pub fn new(capacity: usize) -> Self {
        Self {
            candidates: Vec::new(),
            capacity,
            next_slot: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn insert(&mut self, candidate: MutationCandidate) {
        if self.candidates.len() < self.capacity {
            self.candidates.push(candidate);
        } else {
            self.candidates[self.next_slot] = candidate;
            self.next_slot = (self.next_slot + 1) % self.capacity;
        }
    }

    // The scheduler keeps mutation strategies unselectable while the pool
    // is empty; calling this on an empty pool is a programming error.
    pub fn pick(&self, rng: &mut LcgRng) -> &MutationCandidate {
        assert!(!self.candidates.is_empty(),
                "mutation candidate pool queried while empty");
        &self.candidates[rng.next_index(self.candidates.len())]
    }
}
