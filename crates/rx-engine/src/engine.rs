//! The engine facade: request validation, the pipeline, and memoization.

use std::borrow::Cow;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, trace, warn};

use crate::builtin::{ThemeOverride, builtin_theme};
use crate::cache::LruCache;
use crate::classify::{TextAnalysis, classify};
use crate::composition::LayeredComposition;
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::palette::ColorPalette;
use crate::rarity::{RarityPolicy, RarityRecord};
use crate::seed::{ColorJitter, Seed};
use crate::svg;

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// One render request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArtworkRequest {
    pub question: String,
    /// Upstream confidence score in [0, 1].
    pub confidence: f64,
    /// Canvas edge; `None` uses the configured default.
    pub size: Option<u32>,
    /// Appended to the question before hashing only.
    pub salt: Option<String>,
    /// Builtin preset name.
    pub theme: Option<String>,
    /// Shift palette saturation by the question's time context.
    pub adapt_time: bool,
    /// Apply the seed-derived color jitter to the palette.
    pub jitter: bool,
}

impl ArtworkRequest {
    #[must_use]
    pub fn new(question: impl Into<String>, confidence: f64) -> Self {
        Self { question: question.into(), confidence, ..Self::default() }
    }

    #[must_use]
    pub const fn with_size(mut self, size: u32) -> Self {
        self.size = Some(size);
        self
    }

    #[must_use]
    pub fn with_salt(mut self, salt: impl Into<String>) -> Self {
        self.salt = Some(salt.into());
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    #[must_use]
    pub const fn with_time_adaptation(mut self, on: bool) -> Self {
        self.adapt_time = on;
        self
    }

    #[must_use]
    pub const fn with_jitter(mut self, on: bool) -> Self {
        self.jitter = on;
        self
    }

    /// Text fed to the seed hash.
    fn hashed_text(&self) -> Cow<'_, str> {
        match &self.salt {
            Some(salt) => Cow::Owned(format!("{}{salt}", self.question)),
            None => Cow::Borrowed(&self.question),
        }
    }

    fn cache_key(&self, size: u32) -> CacheKey {
        let mut hasher = Sha256::new();
        hasher.update(self.question.as_bytes());
        hasher.update([0]);
        match &self.salt {
            Some(salt) => {
                hasher.update([1]);
                hasher.update(salt.as_bytes());
            }
            None => hasher.update([0]),
        }
        hasher.update([0]);
        hasher.update(self.confidence.to_bits().to_be_bytes());
        hasher.update(size.to_be_bytes());
        hasher.update(self.theme.as_deref().unwrap_or_default().as_bytes());
        hasher.update([0, u8::from(self.adapt_time), u8::from(self.jitter)]);
        CacheKey(hasher.finalize().into())
    }
}

/// SHA-256 of every request field that affects the artwork.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey([u8; 32]);

impl CacheKey {
    fn short(&self) -> String {
        hex::encode(&self.0[..6])
    }
}

// ---------------------------------------------------------------------------
// Artwork
// ---------------------------------------------------------------------------

/// Everything the pipeline produces for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Artwork {
    pub analysis: TextAnalysis,
    pub seed: Seed,
    pub palette: ColorPalette,
    pub composition: LayeredComposition,
    pub rarity: RarityRecord,
}

/// The metadata panel document: everything except the geometry.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Metadata<'a> {
    size: u32,
    analysis: &'a TextAnalysis,
    seed: &'a Seed,
    palette: &'a ColorPalette,
    rarity: &'a RarityRecord,
    element_count: usize,
}

impl Artwork {
    /// Run the full pipeline. Never fails; inputs must already be validated.
    #[must_use]
    pub fn generate(
        request: &ArtworkRequest,
        theme: ThemeOverride,
        size: u32,
        policy: &RarityPolicy,
    ) -> Self {
        let analysis = theme.apply(&classify(&request.question));
        let seed = Seed::generate(&request.hashed_text(), &analysis);

        let mut palette = ColorPalette::generate(&analysis);
        if request.adapt_time {
            palette = palette.adapt_for_time_context(analysis.time_context);
        }
        if request.jitter {
            palette = palette.with_jitter(ColorJitter::from_variations(&seed.variations));
        }

        let composition = LayeredComposition::generate(&analysis, &palette, &seed, size);
        let rarity = RarityRecord::classify(policy, request.confidence, analysis.complexity_level, &seed.hash);

        Self { analysis, seed, palette, composition, rarity }
    }

    #[must_use]
    pub fn to_svg(&self) -> String {
        svg::to_svg(&self.composition)
    }

    /// Pretty-printed JSON metadata (analysis, seed, palette, rarity).
    pub fn metadata_json(&self) -> EngineResult<String> {
        let doc = Metadata {
            size: self.composition.size,
            analysis: &self.analysis,
            seed: &self.seed,
            palette: &self.palette,
            rarity: &self.rarity,
            element_count: self.composition.element_count(),
        };
        Ok(serde_json::to_string_pretty(&doc)?)
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Validating, memoizing front end to the pipeline. `&Engine` is shareable
/// across threads.
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    cache: Mutex<LruCache<CacheKey, Arc<Artwork>>>,
}

impl Engine {
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        debug!(cache_capacity = config.cache_capacity, "engine ready");
        let cache = Mutex::new(LruCache::new(config.cache_capacity));
        Ok(Self { config, cache })
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Render a request, returning the memoized artwork when one exists.
    pub fn render(&self, request: &ArtworkRequest) -> EngineResult<Arc<Artwork>> {
        let size = self.validate(request)?;
        let key = request.cache_key(size);

        if let Some(hit) = self.lock().get(&key) {
            trace!(key = %key.short(), "artwork cache hit");
            return Ok(hit);
        }

        let theme = match request.theme.as_deref() {
            None => ThemeOverride::default(),
            Some(name) => builtin_theme(name).unwrap_or_else(|| {
                warn!(theme = name, "unknown theme preset, using classified values");
                ThemeOverride::default()
            }),
        };

        let artwork = Arc::new(Artwork::generate(request, theme, size, &self.config.rarity));
        debug!(
            key = %key.short(),
            size,
            subspecialty = artwork.analysis.subspecialty.name(),
            complexity = artwork.analysis.complexity_level,
            tier = %artwork.rarity.tier,
            elements = artwork.composition.element_count(),
            "rendered artwork"
        );

        self.lock().insert(key, Arc::clone(&artwork));
        Ok(artwork)
    }

    /// `(hits, misses)` of the artwork cache.
    #[must_use]
    pub fn cache_stats(&self) -> (u64, u64) {
        self.lock().stats()
    }

    fn validate(&self, request: &ArtworkRequest) -> EngineResult<u32> {
        if !request.confidence.is_finite() || !(0.0..=1.0).contains(&request.confidence) {
            return Err(EngineError::InvalidConfidence(request.confidence));
        }
        let size = request.size.unwrap_or(self.config.default_size);
        if size == 0 || size > self.config.max_size {
            return Err(EngineError::InvalidCanvasSize { size, max: self.config.max_size });
        }
        Ok(size)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LruCache<CacheKey, Arc<Artwork>>> {
        // The cache holds only finished artworks, so a poisoned lock is still consistent.
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
