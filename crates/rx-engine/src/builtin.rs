//! Named theme presets — explicit overrides of the classified motif or mood.
//!
//! A preset forces the subspecialty (which picks the structural motif and
//! the palette blend target) and/or the emotional tone (which picks the base
//! palette). Everything else still comes from the question text.

use serde::{Deserialize, Serialize};

use crate::classify::{EmotionalTone, Subspecialty, TextAnalysis};

/// Fields a preset forces; `None` keeps the classified value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ThemeOverride {
    pub subspecialty: Option<Subspecialty>,
    pub tone: Option<EmotionalTone>,
}

impl ThemeOverride {
    const fn motif(subspecialty: Subspecialty) -> Self {
        Self { subspecialty: Some(subspecialty), tone: None }
    }

    const fn mood(tone: EmotionalTone) -> Self {
        Self { subspecialty: None, tone: Some(tone) }
    }

    /// The analysis with the forced fields replaced.
    #[must_use]
    pub fn apply(&self, analysis: &TextAnalysis) -> TextAnalysis {
        let mut out = analysis.clone();
        if let Some(subspecialty) = self.subspecialty {
            out.subspecialty = subspecialty;
        }
        if let Some(tone) = self.tone {
            out.emotional_tone = tone;
        }
        out
    }
}

/// Look up a preset by name.
///
/// Returns `None` if the name is not recognized.
#[must_use]
pub fn builtin_theme(name: &str) -> Option<ThemeOverride> {
    Some(match name {
        "spine" => ThemeOverride::motif(Subspecialty::Spine),
        "sports" => ThemeOverride::motif(Subspecialty::SportsMedicine),
        "joint" => ThemeOverride::motif(Subspecialty::JointReplacement),
        "trauma" => ThemeOverride::motif(Subspecialty::Trauma),
        "hand-foot" => ThemeOverride::motif(Subspecialty::HandFoot),
        "andry" => ThemeOverride::motif(Subspecialty::General),
        "calm" => ThemeOverride::mood(EmotionalTone::Confidence),
        "vivid" => ThemeOverride::mood(EmotionalTone::Hope),
        _ => return None,
    })
}

/// List all preset names.
#[must_use]
pub const fn builtin_names() -> &'static [&'static str] {
    &["spine", "sports", "joint", "trauma", "hand-foot", "andry", "calm", "vivid"]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
