//! # rx-engine — Deterministic Prescription Artwork
//!
//! Turns a free-text medical question plus an upstream confidence score into
//! a reproducible layered vector composition and a collectible rarity
//! record. The same question always yields the same picture; different
//! questions diverge through a text-derived seed.
//!
//! # Architecture
//!
//! ```text
//! question text (+ optional salt)          confidence
//!     │                                        │
//!     ▼                                        │
//! classify.rs:    keyword tables → TextAnalysis│
//!     │          (builtin.rs presets may force │
//!     │           subspecialty / tone)         │
//!     ▼                                        │
//! seed.rs:        rolling hash → LCG channels  │
//!     │                                        │
//!     ▼                                        │
//! palette.rs:     tone palette blended toward  │
//!     │           subspecialty palette         │
//!     ▼                                        ▼
//! composition.rs: four element layers    rarity.rs: tier + id + token
//!     │
//!     ▼
//! svg.rs:         SVG document
//! ```
//!
//! [`Engine`] wraps the pipeline with request validation, configuration,
//! and a bounded LRU memo table.
//!
//! # Determinism
//!
//! Nothing in the pipeline reads the clock, the environment, or an RNG.
//! The hash and LCG constants are fixed so artworks issued earlier render
//! identically today.

// Single-char geometry variables (x, y, r, c, s) are standard.
#![allow(clippy::many_single_char_names)]
// Loop indices and counts are cast to f64 for geometry.
#![allow(clippy::cast_precision_loss)]
// rx/ry, x1/x2 and friends are inherently similar.
#![allow(clippy::similar_names)]
// Motif generators read best as one function per motif.
#![allow(clippy::too_many_lines)]
// `rarity::RarityRecord`, `palette::ColorPalette` and similar read naturally.
#![allow(clippy::module_name_repetitions)]

pub mod builtin;
pub mod cache;
pub mod classify;
pub mod composition;
pub mod config;
pub mod element;
pub mod engine;
pub mod error;
pub mod palette;
pub mod rarity;
pub mod seed;
pub mod svg;

pub use builtin::{ThemeOverride, builtin_names, builtin_theme};
pub use classify::{BodyParts, Conditions, EmotionalTone, Subspecialty, TextAnalysis, TimeContext, TreatmentContext, classify};
pub use composition::{Layer, LayeredComposition};
pub use config::EngineConfig;
pub use element::{Paint, Shape, Style, VisualElement};
pub use engine::{Artwork, ArtworkRequest, Engine};
pub use error::{EngineError, EngineResult};
pub use palette::ColorPalette;
pub use rarity::{RarityPolicy, RarityRecord, RarityTier};
pub use seed::Seed;
