// Copyright @yucwang 2026

use crate::core::rng::LcgRng;
use crate::math::constants::{ Float, UInt, FLOAT_MAX };

pub const NUM_DISTRIBUTIONS: usize = 5;

// The five sampling strategies, in selection order. The index doubles as
// the distribution id tagged onto generated samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistributionKind {
    ViewSpaceDirection,
    ObjectDirection,
    TwoPoint,
    TwoPointMutation,
    SilhouetteMutation,
}

impl DistributionKind {
    pub const ALL: [DistributionKind; NUM_DISTRIBUTIONS] = [
        DistributionKind::ViewSpaceDirection,
        DistributionKind::ObjectDirection,
        DistributionKind::TwoPoint,
        DistributionKind::TwoPointMutation,
        DistributionKind::SilhouetteMutation,
    ];

    pub fn index(self) -> usize {
        match self {
            DistributionKind::ViewSpaceDirection => 0,
            DistributionKind::ObjectDirection => 1,
            DistributionKind::TwoPoint => 2,
            DistributionKind::TwoPointMutation => 3,
            DistributionKind::SilhouetteMutation => 4,
        }
    }

    pub fn from_index(index: usize) -> DistributionKind {
        DistributionKind::ALL[index]
    }

    // Mutation-based strategies need a non-empty candidate pool.
    pub fn is_mutation_based(self) -> bool {
        match self {
            DistributionKind::TwoPointMutation | DistributionKind::SilhouetteMutation => true,
            _ => false,
        }
    }
}

// Running aggregate of one strategy. Counters are reset after a
// recalibration; the measured average time survives the reset.
pub struct SampleDistribution {
    kind: DistributionKind,
    average_time: Float,
    num_samples: UInt,
    contribution: UInt,
    num_contributing_samples: UInt,
}

impl SampleDistribution {
    pub fn new(kind: DistributionKind) -> Self {
        Self {
            kind,
            average_time: 0.0,
            num_samples: 0,
            contribution: 0,
            num_contributing_samples: 0,
        }
    }

    pub fn kind(&self) -> DistributionKind {
        self.kind
    }

    pub fn average_time(&self) -> Float {
        self.average_time
    }

    pub fn set_average_time(&mut self, nanoseconds: Float) {
        self.average_time = nanoseconds;
    }

    pub fn num_samples(&self) -> UInt {
        self.num_samples
    }

    pub fn contribution(&self) -> UInt {
        self.contribution
    }

    pub fn num_contributing_samples(&self) -> UInt {
        self.num_contributing_samples
    }

    pub fn record_sample(&mut self) {
        self.num_samples += 1;
    }

    pub fn add_contribution(&mut self, amount: UInt) {
        self.contribution += amount;
    }

    pub fn record_contributing_sample(&mut self) {
        self.num_contributing_samples += 1;
    }

    // Defaults to 1.0 before any sample has been drawn.
    pub fn average_contribution(&self) -> Float {
        if self.num_samples == 0 {
            return 1.0;
        }
        self.contribution as Float / self.num_samples as Float
    }

    // Contribution per unit time. Zero when the strategy has not been
    // calibrated yet or carries the ineligibility sentinel, so such a
    // strategy is never selected.
    pub fn weight(&self) -> Float {
        if self.average_time <= 0.0 || self.average_time >= FLOAT_MAX {
            return 0.0;
        }
        self.average_contribution() / self.average_time
    }

    pub fn clear(&mut self) {
        self.num_samples = 0;
        self.contribution = 0;
        self.num_contributing_samples = 0;
    }
}

// Discrete probability distribution over strategy indices, rebuilt from
// the empirical weights on every probability update.
pub struct DiscreteDistribution {
    probabilities: Vec<Float>,
    cdf: Vec<Float>,
}

impl DiscreteDistribution {
    pub fn from_weights(weights: &[Float]) -> Self {
        let sanitized: Vec<Float> = weights.iter()
            .map(|w| if w.is_finite() && *w > 0.0 { *w } else { 0.0 })
            .collect();
        let total: Float = sanitized.iter().sum();

        let probabilities: Vec<Float> = if total > 0.0 {
            sanitized.iter().map(|w| w / total).collect()
        } else {
            // All strategies unusable; fall back to a uniform draw.
            vec![1.0 / weights.len() as Float; weights.len()]
        };

        let mut cdf = Vec::with_capacity(probabilities.len());
        let mut accum = 0.0;
        for p in &probabilities {
            accum += *p;
            cdf.push(accum);
        }
        if let Some(last) = cdf.last_mut() {
            *last = 1.0;
        }

        Self { probabilities, cdf }
    }

    // Never returns a zero-probability index, even at u == 0.
    pub fn sample(&self, rng: &mut LcgRng) -> usize {
        let u = rng.next_f32();
        let mut fallback = 0;
        for (index, bound) in self.cdf.iter().enumerate() {
            if self.probabilities[index] <= 0.0 {
                continue;
            }
            fallback = index;
            if u <= *bound {
                return index;
            }
        }
        fallback
    }

    pub fn probability(&self, index: usize) -> Float {
        self.probabilities[index]
    }

    pub fn probabilities(&self) -> &[Float] {
        &self.probabilities
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        for kind in DistributionKind::ALL.iter() {
            assert_eq!(DistributionKind::from_index(kind.index()), *kind);
        }
        assert!(!DistributionKind::ViewSpaceDirection.is_mutation_based());
        assert!(DistributionKind::TwoPointMutation.is_mutation_based());
        assert!(DistributionKind::SilhouetteMutation.is_mutation_based());
    }

    #[test]
    fn test_default_average_contribution() {
        let mut dist = SampleDistribution::new(DistributionKind::ViewSpaceDirection);
        assert_eq!(dist.average_contribution(), 1.0);

        dist.record_sample();
        dist.record_sample();
        dist.add_contribution(3);
        assert!((dist.average_contribution() - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_weight_guards() {
        let mut dist = SampleDistribution::new(DistributionKind::TwoPoint);
        // Uncalibrated: weight must be zero, not infinity.
        assert_eq!(dist.weight(), 0.0);

        dist.set_average_time(100.0);
        assert!((dist.weight() - 0.01).abs() < 1e-6);

        // Ineligibility sentinel: exactly zero, never a denormal residue.
        dist.set_average_time(std::f32::MAX);
        assert_eq!(dist.weight(), 0.0);
    }

    #[test]
    fn test_clear_preserves_average_time() {
        let mut dist = SampleDistribution::new(DistributionKind::TwoPoint);
        dist.set_average_time(42.0);
        dist.record_sample();
        dist.add_contribution(5);
        dist.record_contributing_sample();
        dist.clear();
        assert_eq!(dist.num_samples(), 0);
        assert_eq!(dist.contribution(), 0);
        assert_eq!(dist.num_contributing_samples(), 0);
        assert_eq!(dist.average_time(), 42.0);
    }

    #[test]
    fn test_discrete_distribution_normalizes() {
        let dist = DiscreteDistribution::from_weights(&[1.0, 3.0, 0.0, 4.0]);
        let total: Float = dist.probabilities().iter().sum();
        assert!((total - 1.0).abs() < 1e-5);
        assert!(dist.probabilities().iter().all(|p| *p >= 0.0));
        assert!((dist.probability(1) - 0.375).abs() < 1e-5);
        assert_eq!(dist.probability(2), 0.0);
    }

    #[test]
    fn test_discrete_distribution_rejects_bad_weights() {
        let dist = DiscreteDistribution::from_weights(
            &[1.0, std::f32::INFINITY, std::f32::NAN, -2.0]);
        let total: Float = dist.probabilities().iter().sum();
        assert!((total - 1.0).abs() < 1e-5);
        assert_eq!(dist.probability(0), 1.0);
        assert_eq!(dist.probability(3), 0.0);
    }

    #[test]
    fn test_discrete_distribution_sampling_respects_zeros() {
        let dist = DiscreteDistribution::from_weights(&[0.0, 1.0, 0.0]);
        let mut rng = LcgRng::new(23);
        for _ in 0..128 {
            assert_eq!(dist.sample(&mut rng), 1);
        }
    }

    #[test]
    fn test_discrete_distribution_uniform_fallback() {
        let dist = DiscreteDistribution::from_weights(&[0.0, 0.0]);
        assert!((dist.probability(0) - 0.5).abs() < 1e-6);
        assert!((dist.probability(1) - 0.5).abs() < 1e-6);
    }
}
