//! Procedural color-mix animation.
//!
//! Three free-running sine oscillators weight a blend across three fixed
//! anchor colors; the blend is renormalized so blue stays pinned at full
//! brightness, then nudged through an empirical red correction. The phase
//! increments are chosen so the oscillators do not short-cycle against each
//! other, which keeps the mix from visibly repeating.

use libm::sinf;
use palette::Srgb;

const TWO_PI: f32 = core::f32::consts::TAU;

/// Per-tick phase increments, in radians.
const PHASE_STEPS: [f32; 3] = [0.02, 0.025, 0.03];

/// Anchor colors of the gradient, as float RGB channels:
/// #3B20FF, #FF1CFF, #665AFF.
const ANCHORS: [[f32; 3]; 3] = [
    [59.0, 32.0, 255.0],
    [255.0, 28.0, 255.0],
    [102.0, 90.0, 255.0],
];

/// Smallest denominator accepted by the blue-pinned normalization. All three
/// oscillators bottoming out at once would otherwise divide by zero and turn
/// the frame into NaN garbage.
const BLUE_FLOOR: f32 = 1e-3;

/// Owns the continuous phase state of the color-mix oscillators.
///
/// [`advance`](AnimationEngine::advance) is meant to be called once per
/// scheduler tick while animation mode is active. Phase state persists when
/// the controller leaves animation mode, so re-entering resumes the mix
/// where it left off instead of snapping back to the seed color.
pub struct AnimationEngine {
    phases: [f32; 3],
}

impl AnimationEngine {
    /// Creates an engine with all phases at zero.
    pub fn new() -> Self {
        Self { phases: [0.0; 3] }
    }

    /// Creates an engine resuming from explicit phase values.
    pub fn with_phases(phases: [f32; 3]) -> Self {
        Self { phases }
    }

    /// Current phase accumulators, each in `[0, 2π)`.
    pub fn phases(&self) -> [f32; 3] {
        self.phases
    }

    /// Computes the mixed color for this tick, then advances the phases.
    ///
    /// The color is derived from the phases as they were *before* the
    /// advance, so the first tick after construction reflects the zero-phase
    /// seed state. Each phase wraps back into `[0, 2π)` afterwards.
    pub fn advance(&mut self) -> Srgb<u8> {
        // Sine values mapped from [-1, 1] to [0, 1], used as blend weights
        let weights = [
            (sinf(self.phases[0]) + 1.0) / 2.0,
            (sinf(self.phases[1]) + 1.0) / 2.0,
            (sinf(self.phases[2]) + 1.0) / 2.0,
        ];

        let mut r = 0.0f32;
        let mut g = 0.0f32;
        let mut b = 0.0f32;
        for (anchor, weight) in ANCHORS.iter().zip(weights) {
            r += anchor[0] * weight;
            g += anchor[1] * weight;
            b += anchor[2] * weight;
        }

        // Normalize so blue is pinned to 255. The floor keeps the factor
        // finite when every oscillator is at its minimum.
        let denominator = if b < BLUE_FLOOR { BLUE_FLOOR } else { b };
        let norm = 255.0 / denominator;
        r *= norm;
        g *= norm;
        b *= norm;

        // Empirical tone correction: lift red by half its deficit from full,
        // then pull it back by a flat amount. No physical derivation; tuned
        // by eye against the real strip.
        let deficit = 255.0 - r;
        r += deficit * 0.5;
        r -= 20.0;

        for (phase, step) in self.phases.iter_mut().zip(PHASE_STEPS) {
            *phase += step;
            if *phase >= TWO_PI {
                *phase -= TWO_PI;
            }
        }

        Srgb::new(truncate(r), truncate(g), truncate(b))
    }
}

impl Default for AnimationEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Output conversion truncates rather than rounds.
#[inline]
fn truncate(value: f32) -> u8 {
    value.clamp(0.0, 255.0) as u8
}
