//! Palette generation: tone colors pulled toward a subspecialty identity.
//!
//! Two fixed tables feed the blend: one palette per emotional tone and a
//! pair of palettes per subspecialty (only the first of the pair is
//! blended). The weight of the pull grows with question complexity and is
//! capped so the tone always stays visible:
//!
//! ```text
//! w = clamp(complexity / 10, 0, 0.7)
//!
//! primary, secondary   ← mix(tone, subspecialty, w)
//! accent               ← mix(tone, subspecialty, w / 2)
//! background           ← mix(tone, subspecialty, 0.3 w)
//! gradient_stops[i]    ← mix(tone[i], subspecialty[i], w)
//! ```

use rx_color::{Rgb, adjust_hex_saturation, mix_hex};
use serde::{Deserialize, Serialize};

use crate::classify::{EmotionalTone, Subspecialty, TextAnalysis, TimeContext};
use crate::seed::ColorJitter;

/// Upper bound of the blend weight.
pub const MAX_BLEND: f64 = 0.7;

/// Saturation shift applied by [`ColorPalette::adapt_for_time_context`].
const TIME_SATURATION_SHIFT: f64 = 0.15;

// ---------------------------------------------------------------------------
// Source tables
// ---------------------------------------------------------------------------

/// A fixed palette from one of the lookup tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourcePalette {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub background: &'static str,
    pub gradient_stops: [&'static str; 3],
}

/// The two palettes associated with a subspecialty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubspecialtyPalettes {
    pub primary: SourcePalette,
    pub secondary: SourcePalette,
}

/// Base palette for a tone.
#[must_use]
pub const fn tone_palette(tone: EmotionalTone) -> SourcePalette {
    match tone {
        EmotionalTone::Concern => SourcePalette {
            primary: "#d97706",
            secondary: "#f59e0b",
            accent: "#b45309",
            background: "#fff7ed",
            gradient_stops: ["#fde68a", "#f59e0b", "#b45309"],
        },
        EmotionalTone::Hope => SourcePalette {
            primary: "#10b981",
            secondary: "#34d399",
            accent: "#059669",
            background: "#ecfdf5",
            gradient_stops: ["#a7f3d0", "#34d399", "#047857"],
        },
        EmotionalTone::Frustration => SourcePalette {
            primary: "#dc2626",
            secondary: "#f87171",
            accent: "#991b1b",
            background: "#fef2f2",
            gradient_stops: ["#fecaca", "#f87171", "#b91c1c"],
        },
        EmotionalTone::Confidence => SourcePalette {
            primary: "#2563eb",
            secondary: "#60a5fa",
            accent: "#1d4ed8",
            background: "#eff6ff",
            gradient_stops: ["#bfdbfe", "#60a5fa", "#1e40af"],
        },
        EmotionalTone::Uncertainty => SourcePalette {
            primary: "#7c3aed",
            secondary: "#a78bfa",
            accent: "#6d28d9",
            background: "#f5f3ff",
            gradient_stops: ["#ddd6fe", "#a78bfa", "#5b21b6"],
        },
        EmotionalTone::Neutral => SourcePalette {
            primary: "#475569",
            secondary: "#94a3b8",
            accent: "#0ea5e9",
            background: "#f8fafc",
            gradient_stops: ["#e2e8f0", "#94a3b8", "#334155"],
        },
    }
}

/// Palette pair for a subspecialty.
#[must_use]
pub const fn subspecialty_palettes(subspecialty: Subspecialty) -> SubspecialtyPalettes {
    match subspecialty {
        Subspecialty::SportsMedicine => SubspecialtyPalettes {
            primary: SourcePalette {
                primary: "#f97316",
                secondary: "#fb923c",
                accent: "#ea580c",
                background: "#fff7ed",
                gradient_stops: ["#fed7aa", "#fb923c", "#c2410c"],
            },
            secondary: SourcePalette {
                primary: "#22c55e",
                secondary: "#4ade80",
                accent: "#16a34a",
                background: "#f0fdf4",
                gradient_stops: ["#bbf7d0", "#4ade80", "#15803d"],
            },
        },
        Subspecialty::JointReplacement => SubspecialtyPalettes {
            primary: SourcePalette {
                primary: "#0891b2",
                secondary: "#22d3ee",
                accent: "#0e7490",
                background: "#ecfeff",
                gradient_stops: ["#a5f3fc", "#22d3ee", "#155e75"],
            },
            secondary: SourcePalette {
                primary: "#64748b",
                secondary: "#cbd5e1",
                accent: "#475569",
                background: "#f1f5f9",
                gradient_stops: ["#e2e8f0", "#cbd5e1", "#334155"],
            },
        },
        Subspecialty::Trauma => SubspecialtyPalettes {
            primary: SourcePalette {
                primary: "#e11d48",
                secondary: "#fb7185",
                accent: "#be123c",
                background: "#fff1f2",
                gradient_stops: ["#fecdd3", "#fb7185", "#9f1239"],
            },
            secondary: SourcePalette {
                primary: "#f59e0b",
                secondary: "#fcd34d",
                accent: "#d97706",
                background: "#fffbeb",
                gradient_stops: ["#fde68a", "#fcd34d", "#b45309"],
            },
        },
        Subspecialty::Spine => SubspecialtyPalettes {
            primary: SourcePalette {
                primary: "#4f46e5",
                secondary: "#818cf8",
                accent: "#4338ca",
                background: "#eef2ff",
                gradient_stops: ["#c7d2fe", "#818cf8", "#3730a3"],
            },
            secondary: SourcePalette {
                primary: "#0284c7",
                secondary: "#38bdf8",
                accent: "#0369a1",
                background: "#f0f9ff",
                gradient_stops: ["#bae6fd", "#38bdf8", "#075985"],
            },
        },
        Subspecialty::HandFoot => SubspecialtyPalettes {
            primary: SourcePalette {
                primary: "#0d9488",
                secondary: "#2dd4bf",
                accent: "#0f766e",
                background: "#f0fdfa",
                gradient_stops: ["#99f6e4", "#2dd4bf", "#115e59"],
            },
            secondary: SourcePalette {
                primary: "#db2777",
                secondary: "#f472b6",
                accent: "#be185d",
                background: "#fdf2f8",
                gradient_stops: ["#fbcfe8", "#f472b6", "#9d174d"],
            },
        },
        Subspecialty::General => SubspecialtyPalettes {
            primary: SourcePalette {
                primary: "#15803d",
                secondary: "#4ade80",
                accent: "#166534",
                background: "#f0fdf4",
                gradient_stops: ["#bbf7d0", "#4ade80", "#14532d"],
            },
            secondary: SourcePalette {
                primary: "#a16207",
                secondary: "#facc15",
                accent: "#854d0e",
                background: "#fefce8",
                gradient_stops: ["#fef08a", "#facc15", "#713f12"],
            },
        },
    }
}

// ---------------------------------------------------------------------------
// ColorPalette
// ---------------------------------------------------------------------------

/// Blend weight for a complexity level, always in [0, 0.7].
#[must_use]
pub fn blend_factor(complexity_level: u8) -> f64 {
    (f64::from(complexity_level) / 10.0).clamp(0.0, MAX_BLEND)
}

/// The final palette of one artwork. Every field is `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorPalette {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub gradient_stops: [String; 3],
}

impl From<SourcePalette> for ColorPalette {
    fn from(p: SourcePalette) -> Self {
        Self {
            primary: p.primary.to_string(),
            secondary: p.secondary.to_string(),
            accent: p.accent.to_string(),
            background: p.background.to_string(),
            gradient_stops: p.gradient_stops.map(str::to_string),
        }
    }
}

impl ColorPalette {
    /// Palette for an analysis.
    #[must_use]
    pub fn generate(analysis: &TextAnalysis) -> Self {
        Self::generate_for(analysis.emotional_tone, analysis.subspecialty, analysis.complexity_level)
    }

    /// Palette for explicit categories (used when a theme override replaces
    /// the analysed tone or subspecialty).
    #[must_use]
    pub fn generate_for(tone: EmotionalTone, subspecialty: Subspecialty, complexity_level: u8) -> Self {
        Self::blend(
            &tone_palette(tone),
            &subspecialty_palettes(subspecialty).primary,
            blend_factor(complexity_level),
        )
    }

    /// Blend `base` toward `target` with weight `w` (clamped to [0, 0.7]).
    #[must_use]
    pub fn blend(base: &SourcePalette, target: &SourcePalette, w: f64) -> Self {
        let w = w.clamp(0.0, MAX_BLEND);
        Self {
            primary: mix_hex(base.primary, target.primary, w),
            secondary: mix_hex(base.secondary, target.secondary, w),
            accent: mix_hex(base.accent, target.accent, w * 0.5),
            background: mix_hex(base.background, target.background, w * 0.3),
            gradient_stops: std::array::from_fn(|i| {
                mix_hex(base.gradient_stops[i], target.gradient_stops[i], w)
            }),
        }
    }

    /// Apply `f` to every swatch.
    fn map(&self, f: impl Fn(&str) -> String) -> Self {
        Self {
            primary: f(&self.primary),
            secondary: f(&self.secondary),
            accent: f(&self.accent),
            background: f(&self.background),
            gradient_stops: std::array::from_fn(|i| f(&self.gradient_stops[i])),
        }
    }

    /// Shift the saturation of every swatch. Malformed swatches pass through.
    #[must_use]
    pub fn adjust_saturation(&self, amount: f64) -> Self {
        self.map(|hex| adjust_hex_saturation(hex, amount))
    }

    /// Acute complaints read more saturated, chronic ones more muted.
    #[must_use]
    pub fn adapt_for_time_context(&self, time: TimeContext) -> Self {
        match time {
            TimeContext::Acute => self.adjust_saturation(TIME_SATURATION_SHIFT),
            TimeContext::Chronic => self.adjust_saturation(-TIME_SATURATION_SHIFT),
            TimeContext::Recent | TimeContext::Ongoing | TimeContext::None => self.clone(),
        }
    }

    /// Apply a per-artwork color jitter. Malformed swatches pass through.
    #[must_use]
    pub fn with_jitter(&self, jitter: ColorJitter) -> Self {
        self.map(|hex| Rgb::hex(hex).map_or_else(|| hex.to_string(), |c| jitter.apply(c).to_hex()))
    }

    /// Named swatches for the metadata panel, in display order.
    #[must_use]
    pub fn swatches(&self) -> [(&'static str, &str); 7] {
        [
            ("primary", self.primary.as_str()),
            ("secondary", self.secondary.as_str()),
            ("accent", self.accent.as_str()),
            ("background", self.background.as_str()),
            ("gradient-start", self.gradient_stops[0].as_str()),
            ("gradient-mid", self.gradient_stops[1].as_str()),
            ("gradient-end", self.gradient_stops[2].as_str()),
        ]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
