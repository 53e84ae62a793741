//! Rarity tiers and the collectible identifier/verification token.
//!
//! The tier is a pure function of `(confidence, complexity_level)` through a
//! [`RarityPolicy`]: a weighted score compared against three ascending
//! thresholds. Non-negative weights keep the tier monotonic non-decreasing in
//! both inputs. The identifier and verification hash are SHA-256 digests
//! over the seed hash and the same inputs, so they are stable for a given
//! artwork and differ between artworks.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{EngineError, EngineResult};

/// Four ordered collectible tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RarityTier {
    #[default]
    Common,
    Uncommon,
    Rare,
    UltraRare,
}

impl RarityTier {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Uncommon => "uncommon",
            Self::Rare => "rare",
            Self::UltraRare => "ultra-rare",
        }
    }

    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::Common, Self::Uncommon, Self::Rare, Self::UltraRare]
    }
}

impl std::fmt::Display for RarityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Scoring weights and tier cut-offs.
///
/// `score = confidence_weight * confidence + complexity_weight * complexity / 10`,
/// then the highest threshold the score reaches picks the tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RarityPolicy {
    pub confidence_weight: f64,
    pub complexity_weight: f64,
    pub uncommon: f64,
    pub rare: f64,
    pub ultra_rare: f64,
}

impl Default for RarityPolicy {
    fn default() -> Self {
        Self {
            confidence_weight: 0.7,
            complexity_weight: 0.3,
            uncommon: 0.55,
            rare: 0.75,
            ultra_rare: 0.9,
        }
    }
}

impl RarityPolicy {
    /// Reject policies that would break monotonicity or tier ordering.
    pub fn validate(&self) -> EngineResult<()> {
        let values = [
            self.confidence_weight,
            self.complexity_weight,
            self.uncommon,
            self.rare,
            self.ultra_rare,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(EngineError::InvalidRarityPolicy("values must be finite".into()));
        }
        if self.confidence_weight < 0.0 || self.complexity_weight < 0.0 {
            return Err(EngineError::InvalidRarityPolicy("weights must be non-negative".into()));
        }
        if !(self.uncommon <= self.rare && self.rare <= self.ultra_rare) {
            return Err(EngineError::InvalidRarityPolicy(format!(
                "thresholds must ascend: uncommon {} <= rare {} <= ultra-rare {}",
                self.uncommon, self.rare, self.ultra_rare
            )));
        }
        Ok(())
    }

    /// Weighted score; inputs are clamped to their valid ranges first.
    #[must_use]
    pub fn score(&self, confidence: f64, complexity_level: u8) -> f64 {
        let confidence = if confidence.is_nan() { 0.0 } else { confidence.clamp(0.0, 1.0) };
        let complexity = f64::from(complexity_level.clamp(1, 10)) / 10.0;
        self.confidence_weight
            .mul_add(confidence, self.complexity_weight * complexity)
    }

    #[must_use]
    pub fn tier(&self, confidence: f64, complexity_level: u8) -> RarityTier {
        let score = self.score(confidence, complexity_level);
        if score >= self.ultra_rare {
            RarityTier::UltraRare
        } else if score >= self.rare {
            RarityTier::Rare
        } else if score >= self.uncommon {
            RarityTier::Uncommon
        } else {
            RarityTier::Common
        }
    }
}

/// Tier plus the identifier and token displayed on the badge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RarityRecord {
    /// `RX-` followed by 8 upper-case hex digits.
    pub id: String,
    pub tier: RarityTier,
    /// 12 upper-case hex digits.
    pub verification_hash: String,
}

impl RarityRecord {
    /// Classify one artwork. `seed_hash` ties the id to the artwork's seed.
    #[must_use]
    pub fn classify(policy: &RarityPolicy, confidence: f64, complexity_level: u8, seed_hash: &str) -> Self {
        let tier = policy.tier(confidence, complexity_level);
        let confidence_bits = if confidence.is_nan() { 0.0f64 } else { confidence }.to_bits();

        let digest = |domain: &[u8]| {
            let mut hasher = Sha256::new();
            hasher.update(domain);
            hasher.update(seed_hash.as_bytes());
            hasher.update([0]);
            hasher.update(tier.name().as_bytes());
            hasher.update(confidence_bits.to_be_bytes());
            hasher.update([complexity_level]);
            hex::encode_upper(hasher.finalize())
        };

        Self {
            id: format!("RX-{}", &digest(b"rx-id:")[..8]),
            tier,
            verification_hash: digest(b"rx-verify:")[..12].to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
