//! Seed generation.
//!
//! A question's text is folded into a 32-bit rolling hash, normalized to a
//! float in [0, 1), and then pushed through a linear congruential generator
//! to derive independent "variation channels". Nothing here is
//! cryptographic; it only needs to be stable and visually varied.
//!
//! The hash and LCG constants are fixed.

use rx_color::Rgb;
use serde::{Deserialize, Serialize};

use crate::classify::{EmotionalTone, Subspecialty, TextAnalysis, TreatmentContext};
use crate::element::MIN_OPACITY;

// ---------------------------------------------------------------------------
// LCG
// ---------------------------------------------------------------------------

/// LCG multiplier (Numerical Recipes).
pub const LCG_A: u64 = 1_664_525;
/// LCG increment.
pub const LCG_C: u64 = 1_013_904_223;
/// LCG modulus, 2^32.
pub const LCG_M: u64 = 1 << 32;

/// Stride between element-level sub-seeds.
const SUB_SEED_STRIDE: u64 = 137;

/// One LCG step, returned as a float in [0, 1).
#[must_use]
pub fn lcg(seed: u64) -> f64 {
    let next = (LCG_A * (seed % LCG_M) + LCG_C) % LCG_M;
    next as f64 / LCG_M as f64
}

/// `value` scaled to the integer domain the LCG is seeded from.
#[allow(clippy::cast_sign_loss)]
fn scaled(value: f64) -> u64 {
    (value.clamp(0.0, 1.0) * 1_000_000.0).floor() as u64
}

/// `n` element-level sub-seeds derived from `base`, each in [0, 1).
#[must_use]
pub fn sub_seeds(base: f64, n: usize) -> Vec<f64> {
    let root = scaled(base);
    (0..n as u64).map(|i| lcg(root + i * SUB_SEED_STRIDE)).collect()
}

// ---------------------------------------------------------------------------
// Text hash
// ---------------------------------------------------------------------------

/// 32-bit rolling hash (`h = h * 31 + unit`) over UTF-16 code units,
/// absolute value, lower-case hex.
#[must_use]
pub fn hash_text(text: &str) -> String {
    let h = text
        .encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)));
    format!("{:x}", i64::from(h).abs())
}

/// Normalize the first 8 hex digits of `hash` by the largest 32-bit value.
fn hash_to_unit(hash: &str) -> f64 {
    let digits = &hash[..hash.len().min(8)];
    let n = u64::from_str_radix(digits, 16).unwrap_or(0);
    (n as f64 / f64::from(u32::MAX)).min(1.0 - f64::EPSILON)
}

// ---------------------------------------------------------------------------
// Seed
// ---------------------------------------------------------------------------

/// Per-channel primes; channels are distinct transforms of one root seed.
const POSITION_PRIME: u64 = 2;
const ROTATION_PRIME: u64 = 3;
const SCALE_PRIME: u64 = 5;
const DENSITY_PRIME: u64 = 7;
const COMPLEXITY_PRIME: u64 = 11;

/// Pseudo-random channels derived from the seed value.
///
/// `density` and `complexity` are additionally scaled by
/// `complexity_level / 10`, so simple questions produce sparse artwork.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Variations {
    pub position: f64,
    pub rotation: f64,
    pub scale: f64,
    pub density: f64,
    pub complexity: f64,
}

/// Deterministic seed for one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seed {
    /// Root value in [0, 1).
    pub value: f64,
    /// Hex rolling hash of the (possibly salted) text.
    pub hash: String,
    pub variations: Variations,
}

impl Seed {
    /// Generate the seed for `text`. Identical inputs always give a
    /// bit-identical seed.
    #[must_use]
    pub fn generate(text: &str, analysis: &TextAnalysis) -> Self {
        let hash = hash_text(text);
        let value = hash_to_unit(&hash);
        let root = scaled(value);
        let weight = analysis.complexity_fraction();

        let variations = Variations {
            position: lcg(root * POSITION_PRIME),
            rotation: lcg(root * ROTATION_PRIME),
            scale: lcg(root * SCALE_PRIME),
            density: lcg(root * DENSITY_PRIME) * weight,
            complexity: lcg(root * COMPLEXITY_PRIME) * weight,
        };

        Self { value, hash, variations }
    }

    /// `n` sub-seeds for element placement.
    #[must_use]
    pub fn sub_seeds(&self, n: usize) -> Vec<f64> {
        sub_seeds(self.value, n)
    }

    /// Sub-seeds rooted at an offset of the seed value, so different motifs
    /// in the same artwork don't reuse the same sequence.
    #[must_use]
    pub fn sub_seeds_at(&self, offset: f64, n: usize) -> Vec<f64> {
        sub_seeds((self.value + offset).fract(), n)
    }
}

// ---------------------------------------------------------------------------
// Derived helpers
// ---------------------------------------------------------------------------

/// Closed numeric interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Map `t` in [0, 1] into the range.
    #[must_use]
    pub fn lerp(self, t: f64) -> f64 {
        (self.max - self.min).mul_add(t.clamp(0.0, 1.0), self.min)
    }

    #[must_use]
    pub fn contains(self, v: f64) -> bool {
        (self.min..=self.max).contains(&v)
    }
}

/// How element positions are spread over the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PositionDistribution {
    /// Clustered toward the center (Gaussian-like).
    Centered,
    /// Uniform over the canvas.
    Spread,
    /// A narrow vertical band with two clusters (upper and lower).
    Linear,
}

impl PositionDistribution {
    #[must_use]
    pub const fn for_subspecialty(subspecialty: Subspecialty) -> Self {
        match subspecialty {
            Subspecialty::SportsMedicine | Subspecialty::HandFoot => Self::Spread,
            Subspecialty::Spine => Self::Linear,
            Subspecialty::JointReplacement | Subspecialty::Trauma | Subspecialty::General => {
                Self::Centered
            }
        }
    }

    /// Map two uniform samples to an `(x, y)` position, both in [0, 1].
    #[must_use]
    pub fn sample(self, u: f64, v: f64) -> (f64, f64) {
        let u = u.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);
        match self {
            Self::Spread => (u, v),
            Self::Centered => (center_weighted(u), center_weighted(v)),
            Self::Linear => {
                let x = (u - 0.5).mul_add(0.2, 0.5);
                let y = if v < 0.5 {
                    (v - 0.25).mul_add(0.4, 0.25)
                } else {
                    (v - 0.75).mul_add(0.4, 0.75)
                };
                (x, y)
            }
        }
    }
}

/// Inverse CDF of the mean of two uniforms (triangular, mode 0.5).
fn center_weighted(t: f64) -> f64 {
    if t < 0.5 { (t / 2.0).sqrt() } else { 1.0 - ((1.0 - t) / 2.0).sqrt() }
}

/// Element scale multipliers for a stage of care.
#[must_use]
pub const fn scale_range(context: TreatmentContext) -> ValueRange {
    match context {
        TreatmentContext::Acute => ValueRange::new(0.8, 1.4),
        TreatmentContext::Chronic => ValueRange::new(0.6, 1.0),
        TreatmentContext::PostSurgical => ValueRange::new(0.7, 1.1),
        TreatmentContext::Rehabilitation => ValueRange::new(0.5, 1.2),
        TreatmentContext::Prevention => ValueRange::new(0.9, 1.1),
        TreatmentContext::General => ValueRange::new(0.7, 1.3),
    }
}

/// Rotation jitter in degrees for a tone.
#[must_use]
pub const fn rotation_range(tone: EmotionalTone) -> ValueRange {
    match tone {
        EmotionalTone::Concern => ValueRange::new(-10.0, 10.0),
        EmotionalTone::Hope => ValueRange::new(-30.0, 30.0),
        EmotionalTone::Frustration => ValueRange::new(-60.0, 60.0),
        EmotionalTone::Confidence => ValueRange::new(-5.0, 5.0),
        EmotionalTone::Uncertainty => ValueRange::new(-45.0, 45.0),
        EmotionalTone::Neutral => ValueRange::new(-20.0, 20.0),
    }
}

/// Opacity band for a complexity level; always inside [0.2, 1.0].
#[must_use]
pub fn opacity_range(complexity_level: u8) -> ValueRange {
    let c = f64::from(complexity_level);
    ValueRange::new(
        c.mul_add(0.04, 0.3).clamp(MIN_OPACITY, 1.0),
        c.mul_add(0.04, 0.6).clamp(MIN_OPACITY, 1.0),
    )
}

/// Small HSL offsets for per-artwork color variety.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorJitter {
    /// Hue offset in degrees, ±10.
    pub hue: f64,
    /// Saturation offset, ±0.05.
    pub saturation: f64,
    /// Lightness offset, ±0.05.
    pub lightness: f64,
}

impl ColorJitter {
    #[must_use]
    pub fn from_variations(v: &Variations) -> Self {
        Self {
            hue: (v.rotation - 0.5) * 20.0,
            saturation: (v.scale - 0.5) * 0.1,
            lightness: (v.position - 0.5) * 0.1,
        }
    }

    #[must_use]
    pub fn apply(self, color: Rgb) -> Rgb {
        color
            .shift_hue(self.hue)
            .saturate(self.saturation)
            .lighten(self.lightness)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn seed_for(text: &str) -> Seed {
        Seed::generate(text, &classify(text))
    }

    #[test]
    fn hash_of_empty_is_zero() {
        assert_eq!(hash_text(""), "0");
        assert_eq!(seed_for("").value, 0.0);
    }

    #[test]
    fn hash_matches_java_string_hash() {
        // "a" = 97, "ab" = 97*31 + 98 = 3105.
        assert_eq!(hash_text("a"), "61");
        assert_eq!(hash_text("ab"), format!("{:x}", 3105));
    }

    #[test]
    fn hash_takes_absolute_value() {
        // "polygenelubricants" hashes to i32::MIN in the 31-multiplier scheme.
        assert_eq!(hash_text("polygenelubricants"), "80000000");
    }

    #[test]
    fn lcg_known_values() {
        assert!((lcg(0) - LCG_C as f64 / LCG_M as f64).abs() < 1e-15);
        // Wraps modulo 2^32.
        assert_eq!(lcg(LCG_M).to_bits(), lcg(0).to_bits());
    }

    #[test]
    fn seed_is_bit_identical() {
        let a = seed_for("My knee hurts after running");
        let b = seed_for("My knee hurts after running");
        assert_eq!(a.hash, b.hash);
        assert_eq!(a.value.to_bits(), b.value.to_bits());
        assert_eq!(a.variations.density.to_bits(), b.variations.density.to_bits());
        assert_eq!(a, b);
    }

    #[test]
    fn different_text_different_hash() {
        assert_ne!(seed_for("knee pain").hash, seed_for("hip pain").hash);
    }

    #[test]
    fn density_scales_with_complexity() {
        let text = "knee";
        let mut low = classify(text);
        low.complexity_level = 1;
        let mut high = low.clone();
        high.complexity_level = 10;

        let a = Seed::generate(text, &low);
        let b = Seed::generate(text, &high);
        assert_eq!(a.hash, b.hash);
        assert!((a.variations.density * 10.0 - b.variations.density).abs() < 1e-12);
        assert!((a.variations.position - b.variations.position).abs() < f64::EPSILON);
    }

    #[test]
    fn sub_seeds_are_deterministic() {
        let s = seed_for("shoulder");
        assert_eq!(s.sub_seeds(6), s.sub_seeds(6));
        assert_eq!(s.sub_seeds(6).len(), 6);
        assert_eq!(sub_seeds(0.5, 3)[..2], sub_seeds(0.5, 2)[..]);
    }

    #[test]
    fn sub_seeds_vary() {
        let s = sub_seeds(0.25, 8);
        for w in s.windows(2) {
            assert_ne!(w[0].to_bits(), w[1].to_bits());
        }
    }

    #[test]
    fn distributions_stay_in_unit_square() {
        for dist in [
            PositionDistribution::Centered,
            PositionDistribution::Spread,
            PositionDistribution::Linear,
        ] {
            for u in [0.0, 0.1, 0.5, 0.9, 1.0] {
                for v in [0.0, 0.3, 0.5, 0.7, 1.0] {
                    let (x, y) = dist.sample(u, v);
                    assert!((0.0..=1.0).contains(&x), "{dist:?} x={x}");
                    assert!((0.0..=1.0).contains(&y), "{dist:?} y={y}");
                }
            }
        }
    }

    #[test]
    fn centered_pulls_inward() {
        let (x, _) = PositionDistribution::Centered.sample(0.9, 0.5);
        assert!(x < 0.9 && x > 0.5);
    }

    #[test]
    fn linear_is_bimodal() {
        let (_, upper) = PositionDistribution::Linear.sample(0.5, 0.1);
        let (_, lower) = PositionDistribution::Linear.sample(0.5, 0.9);
        assert!(upper < 0.5 && lower > 0.5);
    }

    #[test]
    fn distribution_for_subspecialty() {
        assert_eq!(
            PositionDistribution::for_subspecialty(Subspecialty::Spine),
            PositionDistribution::Linear
        );
        assert_eq!(
            PositionDistribution::for_subspecialty(Subspecialty::HandFoot),
            PositionDistribution::Spread
        );
        assert_eq!(
            PositionDistribution::for_subspecialty(Subspecialty::General),
            PositionDistribution::Centered
        );
    }

    #[test]
    fn opacity_is_clamped() {
        for level in 0..=20 {
            let r = opacity_range(level);
            assert!(r.min >= 0.2 && r.max <= 1.0 && r.min <= r.max, "{level}: {r:?}");
        }
    }

    #[test]
    fn value_range_lerp() {
        let r = ValueRange::new(-10.0, 10.0);
        assert!((r.lerp(0.5)).abs() < f64::EPSILON);
        assert!((r.lerp(2.0) - 10.0).abs() < f64::EPSILON);
        assert!(rotation_range(EmotionalTone::Confidence).contains(0.0));
        assert!(scale_range(TreatmentContext::Acute).max > scale_range(TreatmentContext::Chronic).max);
    }

    #[test]
    fn jitter_is_bounded() {
        let v = seed_for("ankle").variations;
        let j = ColorJitter::from_variations(&v);
        assert!(j.hue.abs() <= 10.0);
        assert!(j.saturation.abs() <= 0.05);
        assert!(j.lightness.abs() <= 0.05);
        let base = Rgb::new(42, 157, 143);
        assert_eq!(j.apply(base), j.apply(base));
    }

    proptest! {
        #[test]
        fn seed_value_in_unit_interval(text in ".{0,200}") {
            let s = seed_for(&text);
            prop_assert!((0.0..1.0).contains(&s.value));
            for ch in [s.variations.position, s.variations.rotation, s.variations.scale,
                       s.variations.density, s.variations.complexity] {
                prop_assert!((0.0..1.0).contains(&ch));
            }
        }
    }
}
