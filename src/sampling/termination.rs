// Copyright @yucwang 2026

use crate::math::constants::Float;

use log::debug;

// Relative half-width of the confidence interval (called k).
pub const RELATIVE_HALF_WIDTH: Float = 0.5;
// Confidence level (called P).
pub const CONFIDENCE: Float = 0.9;
// One pixel per 1024 * 1024 pixels image.
const RESOLUTION: Float = 1024.0 * 1024.0;
const PIXEL_ERROR_LIMIT: Float = 100.0;

// Statistical stopping rule driven by the unbiased reference strategy.
// epsilon is its empirical hit probability; sampling may stop when the
// projected per-megapixel error is small and the drawn-sample count
// exceeds the Chernoff-style bound. Noisy in epsilon, so callers must
// re-check on every poll instead of caching the result.
pub fn should_terminate(num_contributing_samples: u32, num_samples: u32) -> bool {
    if num_samples == 0 {
        return false;
    }

    let epsilon = num_contributing_samples as Float / num_samples as Float;
    let k = RELATIVE_HALF_WIDTH;
    let num_samples_required = (1.0 - epsilon) / (k * k * epsilon * (1.0 - CONFIDENCE));
    let pixel_error = RESOLUTION * epsilon;

    debug!("termination check: pixel_error={} epsilon={} num_samples={} required={}",
           pixel_error, epsilon, num_samples, num_samples_required);

    pixel_error < PIXEL_ERROR_LIMIT && (num_samples as Float) > num_samples_required
}
