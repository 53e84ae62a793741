//! Text classifier — surface features of a medical question.
//!
//! Scans the question with fixed keyword tables and produces a
//! [`TextAnalysis`]. No medical reasoning happens here: a category is
//! "present" when one of its word-bounded, case-insensitive patterns matches.
//!
//! Selection policy per family:
//!
//! | Family            | Policy                                   | Default   |
//! |-------------------|------------------------------------------|-----------|
//! | body parts        | every matching flag                      | empty     |
//! | conditions        | every matching flag                      | empty     |
//! | treatment context | first match in declaration order         | `general` |
//! | subspecialty      | first match in declaration order         | `general` |
//! | time context      | first match in declaration order         | `none`    |
//! | emotional tone    | highest match count, earliest on a tie   | `neutral` |

use std::sync::LazyLock;

use bitflags::bitflags;
use regex::Regex;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Flag sets
// ---------------------------------------------------------------------------

bitflags! {
    /// Anatomical regions mentioned in the question.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct BodyParts: u16 {
        const KNEE = 1 << 0;
        const HIP = 1 << 1;
        const SHOULDER = 1 << 2;
        const SPINE = 1 << 3;
        const NECK = 1 << 4;
        const ELBOW = 1 << 5;
        const WRIST = 1 << 6;
        const HAND = 1 << 7;
        const ANKLE = 1 << 8;
        const FOOT = 1 << 9;
    }
}

bitflags! {
    /// Conditions mentioned in the question.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Conditions: u16 {
        const PAIN = 1 << 0;
        const FRACTURE = 1 << 1;
        const ARTHRITIS = 1 << 2;
        const SPRAIN = 1 << 3;
        const INFLAMMATION = 1 << 4;
        const TEAR = 1 << 5;
        const DISLOCATION = 1 << 6;
        const STIFFNESS = 1 << 7;
        const HERNIATION = 1 << 8;
        const NUMBNESS = 1 << 9;

        /// Conditions drawn as radiating pain rings.
        const PAIN_TYPE = Self::PAIN.bits();
        /// Conditions drawn as a soft glow.
        const INFLAMMATION_TYPE = Self::INFLAMMATION.bits() | Self::ARTHRITIS.bits();
        /// Conditions drawn as dashed fracture lines.
        const FRACTURE_TYPE = Self::FRACTURE.bits();
    }
}

const BODY_PART_NAMES: &[(BodyParts, &str)] = &[
    (BodyParts::KNEE, "knee"),
    (BodyParts::HIP, "hip"),
    (BodyParts::SHOULDER, "shoulder"),
    (BodyParts::SPINE, "spine"),
    (BodyParts::NECK, "neck"),
    (BodyParts::ELBOW, "elbow"),
    (BodyParts::WRIST, "wrist"),
    (BodyParts::HAND, "hand"),
    (BodyParts::ANKLE, "ankle"),
    (BodyParts::FOOT, "foot"),
];

const CONDITION_NAMES: &[(Conditions, &str)] = &[
    (Conditions::PAIN, "pain"),
    (Conditions::FRACTURE, "fracture"),
    (Conditions::ARTHRITIS, "arthritis"),
    (Conditions::SPRAIN, "sprain"),
    (Conditions::INFLAMMATION, "inflammation"),
    (Conditions::TEAR, "tear"),
    (Conditions::DISLOCATION, "dislocation"),
    (Conditions::STIFFNESS, "stiffness"),
    (Conditions::HERNIATION, "herniation"),
    (Conditions::NUMBNESS, "numbness"),
];

impl BodyParts {
    /// Number of distinct regions.
    #[must_use]
    pub const fn count(self) -> usize {
        self.bits().count_ones() as usize
    }

    /// Display names of the regions present, in declaration order.
    #[must_use]
    pub fn names(self) -> Vec<&'static str> {
        BODY_PART_NAMES.iter().filter(|(f, _)| self.contains(*f)).map(|(_, n)| *n).collect()
    }
}

impl Conditions {
    /// Number of distinct conditions.
    #[must_use]
    pub const fn count(self) -> usize {
        self.bits().count_ones() as usize
    }

    /// Display names of the conditions present, in declaration order.
    #[must_use]
    pub fn names(self) -> Vec<&'static str> {
        CONDITION_NAMES.iter().filter(|(f, _)| self.contains(*f)).map(|(_, n)| *n).collect()
    }
}

/// Flag sets serialize as the list of their names, e.g. `["knee", "ankle"]`.
macro_rules! named_flags_serde {
    ($flags:ty, $table:ident, $what:literal) => {
        impl Serialize for $flags {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_seq(self.names())
            }
        }

        impl<'de> Deserialize<'de> for $flags {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let names = Vec::<String>::deserialize(deserializer)?;
                names.iter().try_fold(Self::empty(), |acc, name| {
                    $table
                        .iter()
                        .find(|(_, n)| *n == name.as_str())
                        .map(|(flag, _)| acc | *flag)
                        .ok_or_else(|| serde::de::Error::custom(format!(concat!("unknown ", $what, " `{}`"), name)))
                })
            }
        }
    };
}

named_flags_serde!(BodyParts, BODY_PART_NAMES, "body part");
named_flags_serde!(Conditions, CONDITION_NAMES, "condition");

// ---------------------------------------------------------------------------
// Category enums
// ---------------------------------------------------------------------------

/// Inferred stage of care.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TreatmentContext {
    Prevention,
    Acute,
    Chronic,
    PostSurgical,
    Rehabilitation,
    #[default]
    General,
}

/// Dominant emotional register of the question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmotionalTone {
    Concern,
    Hope,
    Frustration,
    Confidence,
    Uncertainty,
    #[default]
    Neutral,
}

/// Coarse medical-domain tag driving the structural motif.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Subspecialty {
    SportsMedicine,
    JointReplacement,
    Trauma,
    Spine,
    HandFoot,
    #[default]
    General,
}

/// When the complaint started, as far as the wording tells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeContext {
    Acute,
    Chronic,
    Recent,
    Ongoing,
    #[default]
    None,
}

impl TreatmentContext {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Prevention => "prevention",
            Self::Acute => "acute",
            Self::Chronic => "chronic",
            Self::PostSurgical => "post-surgical",
            Self::Rehabilitation => "rehabilitation",
            Self::General => "general",
        }
    }
}

impl EmotionalTone {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Concern => "concern",
            Self::Hope => "hope",
            Self::Frustration => "frustration",
            Self::Confidence => "confidence",
            Self::Uncertainty => "uncertainty",
            Self::Neutral => "neutral",
        }
    }

    /// All tones, in tie-break order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Concern, Self::Hope, Self::Frustration,
            Self::Confidence, Self::Uncertainty, Self::Neutral,
        ]
    }
}

impl Subspecialty {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SportsMedicine => "sports-medicine",
            Self::JointReplacement => "joint-replacement",
            Self::Trauma => "trauma",
            Self::Spine => "spine",
            Self::HandFoot => "hand-foot",
            Self::General => "general",
        }
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::SportsMedicine, Self::JointReplacement, Self::Trauma,
            Self::Spine, Self::HandFoot, Self::General,
        ]
    }
}

impl TimeContext {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Acute => "acute",
            Self::Chronic => "chronic",
            Self::Recent => "recent",
            Self::Ongoing => "ongoing",
            Self::None => "none",
        }
    }
}

// ---------------------------------------------------------------------------
// Pattern tables
// ---------------------------------------------------------------------------
//
// Each entry is a regex alternation; it is wrapped in `(?i)\b(?:...)\b`.
// Order matters for the first-match families.

const BODY_PART_PATTERNS: &[(BodyParts, &str)] = &[
    (BodyParts::KNEE, r"knees?|kneecaps?|patella|acl|mcl|meniscus"),
    (BodyParts::HIP, r"hips?|pelvis|pelvic"),
    (BodyParts::SHOULDER, r"shoulders?|rotator cuff"),
    (BodyParts::SPINE, r"spine|spinal|vertebrae?|discs?|disks?|lumbar|thoracic|back"),
    (BodyParts::NECK, r"neck|cervical"),
    (BodyParts::ELBOW, r"elbows?"),
    (BodyParts::WRIST, r"wrists?|carpal"),
    (BodyParts::HAND, r"hands?|fingers?|thumbs?|palms?"),
    (BodyParts::ANKLE, r"ankles?|achilles"),
    (BodyParts::FOOT, r"foot|feet|toes?|heels?|plantar"),
];

const CONDITION_PATTERNS: &[(Conditions, &str)] = &[
    (Conditions::PAIN, r"pain|painful|aches?|aching|hurts?|hurting|sore|soreness"),
    (Conditions::FRACTURE, r"fractur(?:e|es|ed)|broken|break|broke|crack(?:ed)?"),
    (Conditions::ARTHRITIS, r"arthritis|osteoarthritis|arthritic"),
    (Conditions::SPRAIN, r"sprain(?:s|ed)?|strain(?:s|ed)?|twist(?:ed)?"),
    (Conditions::INFLAMMATION, r"inflammation|inflamed|swelling|swollen|tendin(?:i|o)tis|bursitis"),
    (Conditions::TEAR, r"tear|torn|ruptured?"),
    (Conditions::DISLOCATION, r"dislocat(?:ion|ed)"),
    (Conditions::STIFFNESS, r"stiff|stiffness"),
    (Conditions::HERNIATION, r"herniat(?:ed|ion)|bulging|sciatica"),
    (Conditions::NUMBNESS, r"numb|numbness|tingling"),
];

const TREATMENT_PATTERNS: &[(TreatmentContext, &str)] = &[
    (TreatmentContext::PostSurgical, r"surgery|surgical|post-op|postoperative|operation|operated"),
    (
        TreatmentContext::Rehabilitation,
        r"rehab|rehabilitation|physical therapy|physiotherapy|physio|recovery|recovering|strengthening",
    ),
    (TreatmentContext::Acute, r"sudden|suddenly|acute|emergency|severe|just injured"),
    (TreatmentContext::Chronic, r"chronic|long-term|persistent|recurring|for years|for months"),
    (TreatmentContext::Prevention, r"prevent|prevention|preventing|avoid|reduce (?:the )?risk|protect"),
];

const TONE_PATTERNS: &[(EmotionalTone, &str)] = &[
    (EmotionalTone::Concern, r"worried|worry|worrying|concerned|scared|afraid|anxious|nervous|fear"),
    (EmotionalTone::Hope, r"hope|hoping|hopeful|optimistic|looking forward|better|improve|improving"),
    (EmotionalTone::Frustration, r"frustrated|frustrating|annoyed|fed up|tired of|nothing works|again"),
    (EmotionalTone::Confidence, r"confident|ready|determined|certain|sure that"),
    (EmotionalTone::Uncertainty, r"not sure|unsure|uncertain|confused|maybe|wonder|wondering|should i"),
];

const SUBSPECIALTY_PATTERNS: &[(Subspecialty, &str)] = &[
    (
        Subspecialty::Spine,
        r"spine|spinal|back pain|lower back|vertebrae?|discs?|disks?|herniated|sciatica|scoliosis|lumbar|cervical|neck",
    ),
    (
        Subspecialty::JointReplacement,
        r"replacement|arthroplasty|prosthe(?:sis|tic)|implant|artificial joint|osteoarthritis",
    ),
    (
        Subspecialty::Trauma,
        r"trauma|fractur(?:e|es|ed)|broken|accident|crash|fall|fell|dislocat(?:ion|ed)",
    ),
    (
        Subspecialty::SportsMedicine,
        r"sports?|athletes?|athletic|running|runner|acl|meniscus|rotator cuff|tennis elbow|workout|training",
    ),
    (
        Subspecialty::HandFoot,
        r"hands?|wrists?|fingers?|thumbs?|carpal|foot|feet|ankles?|toes?|heels?|plantar|bunions?",
    ),
];

const TIME_PATTERNS: &[(TimeContext, &str)] = &[
    (TimeContext::Acute, r"yesterday|today|this morning|last night|just now|hours? ago|suddenly"),
    (TimeContext::Chronic, r"chronic|years|long time|long-standing"),
    (TimeContext::Recent, r"recently|last week|few days|lately|couple of weeks|this week"),
    (TimeContext::Ongoing, r"ongoing|still|keeps|constant|constantly|always|continues"),
];

/// Clinical vocabulary beyond body parts and conditions, used for term density.
const CLINICAL_VOCABULARY: &str = r"treatments?|therapy|surgery|surgeon|doctor|diagnosis|mri|x-ray|xray|scan|injections?|medications?|ligaments?|tendons?|cartilage|bones?|joints?|muscles?|nerves?|brace|cast|physio";

static BODY_PART_RES: LazyLock<Vec<(BodyParts, Regex)>> = LazyLock::new(|| compile(BODY_PART_PATTERNS));
static CONDITION_RES: LazyLock<Vec<(Conditions, Regex)>> = LazyLock::new(|| compile(CONDITION_PATTERNS));
static TREATMENT_RES: LazyLock<Vec<(TreatmentContext, Regex)>> = LazyLock::new(|| compile(TREATMENT_PATTERNS));
static TONE_RES: LazyLock<Vec<(EmotionalTone, Regex)>> = LazyLock::new(|| compile(TONE_PATTERNS));
static SUBSPECIALTY_RES: LazyLock<Vec<(Subspecialty, Regex)>> = LazyLock::new(|| compile(SUBSPECIALTY_PATTERNS));
static TIME_RES: LazyLock<Vec<(TimeContext, Regex)>> = LazyLock::new(|| compile(TIME_PATTERNS));

static MEDICAL_TERM_RE: LazyLock<Regex> = LazyLock::new(|| {
    let mut alternation: Vec<&str> = BODY_PART_PATTERNS.iter().map(|(_, p)| *p).collect();
    alternation.extend(CONDITION_PATTERNS.iter().map(|(_, p)| *p));
    alternation.push(CLINICAL_VOCABULARY);
    word_regex(&alternation.join("|"))
});

fn word_regex(alternation: &str) -> Regex {
    Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).expect("built-in pattern tables are valid regexes")
}

fn compile<T: Copy>(table: &[(T, &str)]) -> Vec<(T, Regex)> {
    table.iter().map(|&(category, pattern)| (category, word_regex(pattern))).collect()
}

fn first_match<T: Copy>(table: &[(T, Regex)], text: &str) -> Option<T> {
    table.iter().find(|(_, re)| re.is_match(text)).map(|(category, _)| *category)
}

// ---------------------------------------------------------------------------
// TextAnalysis
// ---------------------------------------------------------------------------

/// Structured surface analysis of one question.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAnalysis {
    pub body_parts: BodyParts,
    pub conditions: Conditions,
    pub treatment_context: TreatmentContext,
    pub emotional_tone: EmotionalTone,
    pub subspecialty: Subspecialty,
    /// Always in 1..=10.
    pub complexity_level: u8,
    /// Length in UTF-16 code units.
    pub question_length: usize,
    pub medical_term_count: usize,
    pub time_context: TimeContext,
}

impl TextAnalysis {
    /// Complexity as a 0.1–1.0 fraction.
    #[must_use]
    pub fn complexity_fraction(&self) -> f64 {
        f64::from(self.complexity_level) / 10.0
    }
}

/// Classify a question. Never fails; unseen or empty text yields the defaults.
#[must_use]
pub fn classify(text: &str) -> TextAnalysis {
    let body_parts = BODY_PART_RES
        .iter()
        .filter(|(_, re)| re.is_match(text))
        .fold(BodyParts::empty(), |acc, (flag, _)| acc | *flag);

    let conditions = CONDITION_RES
        .iter()
        .filter(|(_, re)| re.is_match(text))
        .fold(Conditions::empty(), |acc, (flag, _)| acc | *flag);

    let treatment_context = first_match(&TREATMENT_RES, text).unwrap_or_default();
    let subspecialty = first_match(&SUBSPECIALTY_RES, text).unwrap_or_default();
    let time_context = first_match(&TIME_RES, text).unwrap_or_default();
    let emotional_tone = score_tone(text);

    let question_length = text.encode_utf16().count();
    let medical_term_count = MEDICAL_TERM_RE.find_iter(text).count();
    let question_marks = text.matches('?').count();

    let complexity_level = complexity(
        question_length,
        medical_term_count,
        body_parts.count(),
        conditions.count(),
        question_marks,
    );

    TextAnalysis {
        body_parts,
        conditions,
        treatment_context,
        emotional_tone,
        subspecialty,
        complexity_level,
        question_length,
        medical_term_count,
        time_context,
    }
}

/// Highest match count wins; earlier tones win ties; all-zero is neutral.
fn score_tone(text: &str) -> EmotionalTone {
    let mut best = EmotionalTone::Neutral;
    let mut best_score = 0;
    for (tone, re) in TONE_RES.iter() {
        let score = re.find_iter(text).count();
        if score > best_score {
            best = *tone;
            best_score = score;
        }
    }
    best
}

fn complexity(
    length: usize,
    term_count: usize,
    body_parts: usize,
    conditions: usize,
    question_marks: usize,
) -> u8 {
    let mut level: usize = 1;

    if length > 100 {
        level += 2;
    } else if length > 50 {
        level += 1;
    }

    level += term_count.min(4);

    if body_parts > 1 {
        level += body_parts - 1;
    }
    if conditions > 1 {
        level += conditions - 1;
    }
    if question_marks > 1 {
        level += 1;
    }

    level.clamp(1, 10) as u8
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn ankle_sprain_question() {
        let a = classify("What is the best treatment for a mild ankle sprain?");
        assert!(a.conditions.contains(Conditions::SPRAIN));
        assert!(a.body_parts.contains(BodyParts::ANKLE));
        assert_eq!(a.subspecialty, Subspecialty::HandFoot);
        assert_eq!(a.treatment_context, TreatmentContext::General);
        assert_eq!(a.emotional_tone, EmotionalTone::Neutral);
        assert_eq!(a.time_context, TimeContext::None);
    }

    #[test]
    fn empty_text_is_all_defaults() {
        let a = classify("");
        assert_eq!(
            a,
            TextAnalysis {
                body_parts: BodyParts::empty(),
                conditions: Conditions::empty(),
                treatment_context: TreatmentContext::General,
                emotional_tone: EmotionalTone::Neutral,
                subspecialty: Subspecialty::General,
                complexity_level: 1,
                question_length: 0,
                medical_term_count: 0,
                time_context: TimeContext::None,
            }
        );
    }

    #[test]
    fn non_medical_text_is_defaults() {
        let a = classify("The quick brown fox jumps over the lazy dog");
        assert_eq!(a.subspecialty, Subspecialty::General);
        assert_eq!(a.emotional_tone, EmotionalTone::Neutral);
        assert_eq!(a.medical_term_count, 0);
        assert_eq!(a.complexity_level, 1);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let a = classify("MY KNEE HURTS");
        assert!(a.body_parts.contains(BodyParts::KNEE));
        assert!(a.conditions.contains(Conditions::PAIN));
    }

    #[test]
    fn patterns_are_word_bounded() {
        // "hip" inside "ship".
        let a = classify("The ship sailed on");
        assert!(a.body_parts.is_empty());
    }

    #[test]
    fn subspecialty_first_match_wins() {
        // Trauma is declared before hand-foot.
        let a = classify("I fractured my wrist in a car accident");
        assert_eq!(a.subspecialty, Subspecialty::Trauma);
        assert!(a.conditions.contains(Conditions::FRACTURE));
        assert!(a.body_parts.contains(BodyParts::WRIST));
    }

    #[test]
    fn spine_beats_everything() {
        let a = classify("Lower back pain after a fall while running");
        assert_eq!(a.subspecialty, Subspecialty::Spine);
    }

    #[test]
    fn treatment_context_priority() {
        let a = classify("Rehab exercises after knee surgery");
        assert_eq!(a.treatment_context, TreatmentContext::PostSurgical);
        let b = classify("How long does rehab take?");
        assert_eq!(b.treatment_context, TreatmentContext::Rehabilitation);
        let c = classify("How can I prevent shin splints?");
        assert_eq!(c.treatment_context, TreatmentContext::Prevention);
    }

    #[test]
    fn tone_picks_highest_score() {
        let a = classify("I'm worried. I hope it heals, I hope it gets better.");
        assert_eq!(a.emotional_tone, EmotionalTone::Hope);
    }

    #[test]
    fn tone_tie_goes_to_earlier_declaration() {
        let a = classify("I'm worried but hopeful");
        assert_eq!(a.emotional_tone, EmotionalTone::Concern);
    }

    #[test]
    fn time_context_detection() {
        assert_eq!(classify("It started yesterday").time_context, TimeContext::Acute);
        assert_eq!(classify("I've had this for years").time_context, TimeContext::Chronic);
        assert_eq!(classify("It began recently").time_context, TimeContext::Recent);
        assert_eq!(classify("It still bothers me").time_context, TimeContext::Ongoing);
    }

    #[test]
    fn complexity_accumulates() {
        // length 19 (+0), terms knee/hip/pain (+3), two body parts (+1), two '?' (+1).
        let a = classify("Knee and hip pain??");
        assert_eq!(a.medical_term_count, 3);
        assert_eq!(a.complexity_level, 6);
    }

    #[test]
    fn complexity_clamps_at_ten() {
        let text = "Chronic knee, hip, shoulder, neck, wrist and ankle pain with swelling, \
                    stiffness, numbness, a torn ligament and a fracture. Should I get an MRI? \
                    Or an x-ray? Or surgery?";
        let a = classify(text);
        assert_eq!(a.complexity_level, 10);
    }

    #[test]
    fn question_length_counts_utf16_units() {
        assert_eq!(classify("é").question_length, 1);
        assert_eq!(classify("😀").question_length, 2);
    }

    #[test]
    fn flag_names() {
        let a = classify("My knee and ankle are swollen and painful");
        assert_eq!(a.body_parts.names(), vec!["knee", "ankle"]);
        assert_eq!(a.conditions.names(), vec!["pain", "inflammation"]);
    }

    #[test]
    fn enum_names_match_serde() {
        for s in Subspecialty::all() {
            let json = serde_json::to_string(s).unwrap();
            assert_eq!(json, format!("\"{}\"", s.name()));
        }
        let json = serde_json::to_string(&TreatmentContext::PostSurgical).unwrap();
        assert_eq!(json, "\"post-surgical\"");
    }

    #[test]
    fn flag_sets_serialize_as_names() {
        let a = classify("My knee and ankle are swollen and painful");
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["bodyParts"], serde_json::json!(["knee", "ankle"]));
        assert_eq!(json["conditions"], serde_json::json!(["pain", "inflammation"]));
        assert_eq!(serde_json::to_string(&BodyParts::empty()).unwrap(), "[]");

        let back: TextAnalysis = serde_json::from_value(json).unwrap();
        assert_eq!(back, a);
    }

    #[test]
    fn unknown_flag_name_rejected() {
        let err = serde_json::from_str::<Conditions>(r#"["pain", "gout"]"#).unwrap_err();
        assert!(err.to_string().contains("unknown condition `gout`"), "{err}");
        let parts: BodyParts = serde_json::from_str(r#"["hip", "neck"]"#).unwrap();
        assert_eq!(parts, BodyParts::HIP | BodyParts::NECK);
    }

    proptest! {
        #[test]
        fn classify_is_deterministic_and_bounded(text in ".{0,300}") {
            let a = classify(&text);
            let b = classify(&text);
            prop_assert_eq!(&a, &b);
            prop_assert!((1..=10).contains(&a.complexity_level));
        }
    }
}
