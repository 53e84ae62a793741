//! Composition generation — four painted layers of visual primitives.
//!
//! ```text
//! background   gradient card + texture dots          (always)
//! structural   subspecialty motif                     (one of six)
//! detail       pain rings / inflammation glow         (condition-gated)
//! overlay      healing arc (post-op, rehab) + pulse   (pulse always)
//! ```
//!
//! Every length is a fraction of the canvas edge, so the same analysis,
//! palette, and seed at a different `size` produce the same picture scaled.

use std::f64::consts::{PI, TAU};

use serde::Serialize;

use crate::classify::{Conditions, Subspecialty, TextAnalysis, TreatmentContext};
use crate::element::{MIN_OPACITY, Paint, PathCommand, Point, Shape, Style, VisualElement};
use crate::palette::ColorPalette;
use crate::seed::{PositionDistribution, Seed, ValueRange, opacity_range, rotation_range, scale_range};

/// Id of the background gradient referenced by the card.
pub const BACKGROUND_GRADIENT_ID: &str = "rx-background";

/// Offset step between consecutive texture dots.
const DOT_STEP: f64 = 0.137;

/// Samples along the pulse line.
const PULSE_SAMPLES: usize = 48;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The four paint layers, in paint order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layer {
    Background,
    Structural,
    Detail,
    Overlay,
}

impl Layer {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Structural => "structural",
            Self::Detail => "detail",
            Self::Overlay => "overlay",
        }
    }
}

/// One gradient stop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradientStop {
    /// 0.0 to 1.0 along the gradient vector.
    pub offset: f64,
    pub color: String,
}

/// Diagonal (top-left → bottom-right) linear gradient.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinearGradient {
    pub id: &'static str,
    pub stops: [GradientStop; 3],
}

/// The generated picture.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayeredComposition {
    /// Canvas edge length in pixels.
    pub size: u32,
    pub gradient: LinearGradient,
    pub background: Vec<VisualElement>,
    pub structural: Vec<VisualElement>,
    pub detail: Vec<VisualElement>,
    pub overlay: Vec<VisualElement>,
}

impl LayeredComposition {
    /// Build the composition. Pure: identical inputs give identical output.
    #[must_use]
    pub fn generate(analysis: &TextAnalysis, palette: &ColorPalette, seed: &Seed, size: u32) -> Self {
        let canvas = Canvas { size: f64::from(size) };

        Self {
            size,
            gradient: LinearGradient {
                id: BACKGROUND_GRADIENT_ID,
                stops: std::array::from_fn(|i| GradientStop {
                    offset: i as f64 / 2.0,
                    color: palette.gradient_stops[i].clone(),
                }),
            },
            background: background_layer(&canvas, analysis, palette, seed),
            structural: structural_layer(&canvas, analysis, palette, seed),
            detail: detail_layer(&canvas, analysis, palette, seed),
            overlay: overlay_layer(&canvas, analysis, palette, seed),
        }
    }

    /// Layers in paint order.
    #[must_use]
    pub fn layers(&self) -> [(Layer, &[VisualElement]); 4] {
        [
            (Layer::Background, self.background.as_slice()),
            (Layer::Structural, self.structural.as_slice()),
            (Layer::Detail, self.detail.as_slice()),
            (Layer::Overlay, self.overlay.as_slice()),
        ]
    }

    /// All elements in paint order.
    pub fn elements(&self) -> impl Iterator<Item = &VisualElement> {
        self.background
            .iter()
            .chain(&self.structural)
            .chain(&self.detail)
            .chain(&self.overlay)
    }

    #[must_use]
    pub fn element_count(&self) -> usize {
        self.background.len() + self.structural.len() + self.detail.len() + self.overlay.len()
    }
}

// ---------------------------------------------------------------------------
// Canvas helpers
// ---------------------------------------------------------------------------

/// Converts canvas fractions to canvas units.
struct Canvas {
    size: f64,
}

impl Canvas {
    fn len(&self, fraction: f64) -> f64 {
        fraction * self.size
    }

    fn at(&self, fx: f64, fy: f64) -> Point {
        Point::new(fx * self.size, fy * self.size)
    }

    fn center(&self) -> Point {
        self.at(0.5, 0.5)
    }

    fn circle(&self, fx: f64, fy: f64, fr: f64, style: Style) -> VisualElement {
        VisualElement::new(
            Shape::Circle { cx: self.len(fx), cy: self.len(fy), r: self.len(fr) },
            style,
        )
    }

    fn line(&self, from: (f64, f64), to: (f64, f64), style: Style) -> VisualElement {
        VisualElement::new(
            Shape::Line {
                x1: self.len(from.0),
                y1: self.len(from.1),
                x2: self.len(to.0),
                y2: self.len(to.1),
            },
            style,
        )
    }
}

/// Point at `distance` from `(x, y)` along `angle` (radians), in fractions.
fn polar(x: f64, y: f64, angle: f64, distance: f64) -> (f64, f64) {
    (angle.cos().mul_add(distance, x), angle.sin().mul_add(distance, y))
}

// ---------------------------------------------------------------------------
// Background
// ---------------------------------------------------------------------------

fn background_layer(
    c: &Canvas,
    analysis: &TextAnalysis,
    palette: &ColorPalette,
    seed: &Seed,
) -> Vec<VisualElement> {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let dots = (seed.variations.density * 20.0).floor() as usize + 5;
    let mut out = Vec::with_capacity(dots + 1);

    out.push(
        VisualElement::new(
            Shape::Rect { x: 0.0, y: 0.0, width: c.len(1.0), height: c.len(1.0), rx: c.len(0.08) },
            Style::filled(Paint::Gradient(BACKGROUND_GRADIENT_ID), 1.0),
        )
        .with_class("card"),
    );

    let opacity = opacity_range(analysis.complexity_level);
    for i in 0..dots {
        let t = (i as f64).mul_add(DOT_STEP, seed.value).fract();
        let fx = 0.9f64.mul_add(t, 0.05);
        let fy = 0.9f64.mul_add(t.mul_add(7.3, 0.5).fract(), 0.05);
        let fr = 0.008f64.mul_add((t * 13.0).fract(), 0.004);
        // Texture sits below the structural opacity band.
        let alpha = ValueRange::new(MIN_OPACITY, opacity.min).lerp((t * 5.0).fract());
        out.push(c.circle(fx, fy, fr, Style::filled(Paint::color(&palette.secondary), alpha)).with_class("texture-dot"));
    }

    out
}

// ---------------------------------------------------------------------------
// Structural
// ---------------------------------------------------------------------------

fn structural_layer(
    c: &Canvas,
    analysis: &TextAnalysis,
    palette: &ColorPalette,
    seed: &Seed,
) -> Vec<VisualElement> {
    match analysis.subspecialty {
        Subspecialty::Spine => spine(c, analysis, palette, seed),
        Subspecialty::SportsMedicine => sports_medicine(c, analysis, palette, seed),
        Subspecialty::JointReplacement => joint_replacement(c, palette, seed),
        Subspecialty::Trauma => trauma(c, analysis, palette, seed),
        Subspecialty::HandFoot => hand_foot(c, analysis, palette, seed),
        Subspecialty::General => andry_tree(c, analysis, palette, seed),
    }
}

/// Vertebral column: evenly spaced ellipses with a sinusoidal sway.
fn spine(c: &Canvas, analysis: &TextAnalysis, palette: &ColorPalette, seed: &Seed) -> Vec<VisualElement> {
    let level = usize::from(analysis.complexity_level);
    let count = (5 + level * 7 / 10).clamp(5, 12);
    let (top, bottom) = (0.15, 0.85);
    let step = (bottom - top) / (count - 1) as f64;
    let sway = seed.variations.position * 0.06;
    let opacity = opacity_range(analysis.complexity_level);

    let centers: Vec<(f64, f64)> = (0..count)
        .map(|i| {
            let i = i as f64;
            ((i * 0.9).sin().mul_add(sway, 0.5), i.mul_add(step, top))
        })
        .collect();

    let mut out = Vec::with_capacity(1 + count * 3);

    // Cord first so the vertebrae paint over it.
    let mut commands = vec![PathCommand::MoveTo(c.at(centers[0].0, centers[0].1))];
    for pair in centers.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        commands.push(PathCommand::QuadTo {
            control: c.at((x0 - x1).mul_add(0.5, x0), (y0 + y1) / 2.0),
            to: c.at(x1, y1),
        });
    }
    out.push(
        VisualElement::new(
            Shape::Path { commands },
            Style::stroked(Paint::color(&palette.secondary), c.len(0.008), 0.8),
        )
        .with_class("spinal-cord"),
    );

    for (i, &(x, y)) in centers.iter().enumerate() {
        // Lumbar vertebrae are wider than cervical ones.
        let frx = (i as f64 / (count - 1) as f64).mul_add(0.03, 0.06);
        let fry = step * 0.35;
        let mut style = Style::filled(Paint::color(&palette.primary), opacity.lerp(seed.variations.scale));
        style.stroke = Paint::color(&palette.accent);
        style.stroke_width = c.len(0.004);
        out.push(
            VisualElement::new(
                Shape::Ellipse { cx: c.len(x), cy: c.len(y), rx: c.len(frx), ry: c.len(fry) },
                style,
            )
            .with_class("vertebra"),
        );

        if analysis.complexity_level > 3 {
            for side in [-1.0f64, 1.0] {
                out.push(
                    c.circle(
                        side.mul_add(frx + 0.02, x),
                        y,
                        0.012,
                        Style::filled(Paint::color(&palette.secondary), opacity.max),
                    )
                    .with_class("vertebral-process"),
                );
            }
        }
    }

    out
}

/// Directional flow lines plus concentric energy bursts.
fn sports_medicine(
    c: &Canvas,
    analysis: &TextAnalysis,
    palette: &ColorPalette,
    seed: &Seed,
) -> Vec<VisualElement> {
    let level = usize::from(analysis.complexity_level);
    let lines = (level + 2).min(8);
    let bursts = (level / 3).max(1);
    let tilt = rotation_range(analysis.emotional_tone).lerp(seed.variations.rotation);
    let line_seeds = seed.sub_seeds(lines);
    let burst_seeds = seed.sub_seeds_at(0.31, bursts * 2);
    let dist = PositionDistribution::for_subspecialty(Subspecialty::SportsMedicine);
    let scale = scale_range(analysis.treatment_context).lerp(seed.variations.scale);

    let mut out = Vec::with_capacity(lines + bursts * 3);

    for (i, inset) in line_seeds.iter().enumerate() {
        let fy = (i as f64 / (lines - 1) as f64).mul_add(0.6, 0.2);
        let inset = inset * 0.08;
        out.push(
            c.line(
                (0.1 + inset, fy),
                (0.9 - inset, fy),
                Style::stroked(Paint::color(&palette.primary), c.len(0.006), 0.65)
                    .rotated(tilt, c.center()),
            )
            .with_class("flow-line"),
        );
    }

    for pair in burst_seeds.chunks_exact(2) {
        let (u, v) = dist.sample(pair[0], pair[1]);
        let (fx, fy) = (0.6f64.mul_add(u, 0.2), 0.6f64.mul_add(v, 0.2));
        let base = 0.04 * scale;
        for ring in 1..=3 {
            let k = f64::from(ring);
            out.push(
                c.circle(
                    fx,
                    fy,
                    base * k,
                    Style::stroked(Paint::color(&palette.accent), c.len(0.004), 0.8 / k),
                )
                .with_class("energy-burst"),
            );
        }
    }

    out
}

/// Socket, offset ball, and a hexagonal stability outline.
fn joint_replacement(c: &Canvas, palette: &ColorPalette, seed: &Seed) -> Vec<VisualElement> {
    let offset = (seed.variations.position - 0.5) * 0.1;

    let hexagon: Vec<Point> = (0..6)
        .map(|k| {
            let angle = f64::from(k).mul_add(PI / 3.0, PI / 6.0);
            let (x, y) = polar(0.5, 0.5, angle, 0.38);
            c.at(x, y)
        })
        .collect();

    vec![
        c.circle(0.5, 0.5, 0.28, Style::stroked(Paint::color(&palette.primary), c.len(0.02), 0.9))
            .with_class("socket"),
        c.circle(
            0.5 + offset,
            0.46,
            0.18,
            Style::filled(Paint::color(&palette.secondary), 0.85),
        )
        .with_class("ball"),
        VisualElement::new(
            Shape::Polygon { points: hexagon },
            Style::stroked(Paint::color(&palette.accent), c.len(0.006), 0.7),
        )
        .with_class("stability-ring"),
    ]
}

/// Radial impact lines; dashed fracture lines when a fracture is mentioned.
fn trauma(c: &Canvas, analysis: &TextAnalysis, palette: &ColorPalette, seed: &Seed) -> Vec<VisualElement> {
    let impacts = usize::from(analysis.complexity_level).min(5);
    let subs = seed.sub_seeds(impacts * 2);
    let (angles, lengths) = subs.split_at(impacts);

    let mut out = Vec::new();
    out.push(
        c.circle(0.5, 0.5, 0.03, Style::filled(Paint::color(&palette.accent), 0.9))
            .with_class("impact-core"),
    );

    for (angle, length) in angles.iter().zip(lengths) {
        let to = polar(0.5, 0.5, angle * TAU, length.mul_add(0.2, 0.2));
        out.push(
            c.line((0.5, 0.5), to, Style::stroked(Paint::color(&palette.primary), c.len(0.008), 0.85))
                .with_class("impact-line"),
        );
    }

    if analysis.conditions.intersects(Conditions::FRACTURE_TYPE) {
        let fs = seed.sub_seeds_at(0.5, 1 + 5 * 4);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let count = (2 + (fs[0] * 4.0).floor() as usize).min(5);
        for params in fs[1..].chunks_exact(4).take(count) {
            let (fx, fy) = (0.6f64.mul_add(params[0], 0.2), 0.6f64.mul_add(params[1], 0.2));
            let angle = params[2] * PI;
            let half = params[3].mul_add(0.15, 0.1) / 2.0;
            let from = polar(fx, fy, angle + PI, half);
            let to = polar(fx, fy, angle, half);
            let style = Style::stroked(Paint::color(&palette.accent), c.len(0.006), 0.9)
                .dashed(c.len(0.02), c.len(0.012));
            out.push(c.line(from, to, style).with_class("fracture-line"));
        }
    }

    out
}

/// Scattered detail dots, two per complexity level.
fn hand_foot(c: &Canvas, analysis: &TextAnalysis, palette: &ColorPalette, seed: &Seed) -> Vec<VisualElement> {
    let count = usize::from(analysis.complexity_level) * 2;
    let subs = seed.sub_seeds_at(0.73, count * 3);
    let dist = PositionDistribution::for_subspecialty(Subspecialty::HandFoot);
    let scale = scale_range(analysis.treatment_context);
    let opacity = opacity_range(analysis.complexity_level);

    subs.chunks_exact(3)
        .enumerate()
        .map(|(i, s)| {
            let (u, v) = dist.sample(s[0], s[1]);
            let fill = if i % 2 == 0 { &palette.primary } else { &palette.secondary };
            c.circle(
                0.7f64.mul_add(u, 0.15),
                0.7f64.mul_add(v, 0.15),
                0.016 * scale.lerp(s[2]),
                Style::filled(Paint::color(fill), opacity.lerp(s[2])),
            )
            .with_class("detail-dot")
        })
        .collect()
}

/// The Andry tree: a trunk, radiating branches, and roots per medical term.
fn andry_tree(c: &Canvas, analysis: &TextAnalysis, palette: &ColorPalette, seed: &Seed) -> Vec<VisualElement> {
    let branches = usize::from(analysis.complexity_level).min(6);
    let roots = analysis.medical_term_count.min(8);
    let subs = seed.sub_seeds(branches + roots);
    let (branch_seeds, root_seeds) = subs.split_at(branches);
    let lean = rotation_range(analysis.emotional_tone).lerp(seed.variations.rotation).to_radians() * 0.25;

    let mut out = Vec::with_capacity(1 + branches + roots);
    out.push(
        VisualElement::new(
            Shape::Rect { x: c.len(0.47), y: c.len(0.42), width: c.len(0.06), height: c.len(0.4), rx: c.len(0.01) },
            Style::filled(Paint::color(&palette.primary), 0.95),
        )
        .with_class("trunk"),
    );

    // Branches fan upward between -150° and -30°.
    for (i, s) in branch_seeds.iter().enumerate() {
        let t = if branches > 1 { i as f64 / (branches - 1) as f64 } else { 0.5 };
        let angle = t.mul_add(120.0, -150.0).to_radians() + lean;
        let to = polar(0.5, 0.45, angle, s.mul_add(0.06, 0.22));
        out.push(
            c.line((0.5, 0.45), to, Style::stroked(Paint::color(&palette.secondary), c.len(0.012), 0.9))
                .with_class("branch"),
        );
    }

    // Roots fan downward between 30° and 150°.
    for (i, s) in root_seeds.iter().enumerate() {
        let t = if roots > 1 { i as f64 / (roots - 1) as f64 } else { 0.5 };
        let angle = t.mul_add(120.0, 30.0).to_radians();
        let to = polar(0.5, 0.82, angle, s.mul_add(0.04, 0.08));
        out.push(
            c.line((0.5, 0.82), to, Style::stroked(Paint::color(&palette.accent), c.len(0.008), 0.8))
                .with_class("root"),
        );
    }

    out
}

// ---------------------------------------------------------------------------
// Detail
// ---------------------------------------------------------------------------

fn detail_layer(
    c: &Canvas,
    analysis: &TextAnalysis,
    palette: &ColorPalette,
    seed: &Seed,
) -> Vec<VisualElement> {
    let mut out = Vec::new();
    let focus = seed.sub_seeds_at(0.59, 2);
    let (u, v) = PositionDistribution::Centered.sample(focus[0], focus[1]);
    let (fx, fy) = (0.4f64.mul_add(u, 0.3), 0.4f64.mul_add(v, 0.3));

    if analysis.conditions.intersects(Conditions::INFLAMMATION_TYPE) {
        out.push(
            c.circle(fx, fy, 0.3, Style::filled(Paint::color(&palette.accent), MIN_OPACITY))
                .with_class("inflammation-glow"),
        );
    }

    if analysis.conditions.intersects(Conditions::PAIN_TYPE) {
        for ring in 0..3 {
            let k = f64::from(ring);
            out.push(
                c.circle(
                    fx,
                    fy,
                    k.mul_add(0.07, 0.12),
                    Style::stroked(Paint::color(&palette.accent), c.len(0.004), k.mul_add(-0.15, 0.6))
                        .dashed(c.len(0.015), c.len(0.01)),
                )
                .with_class("pain-ring"),
            );
        }
    }

    out
}

// ---------------------------------------------------------------------------
// Overlay
// ---------------------------------------------------------------------------

fn overlay_layer(
    c: &Canvas,
    analysis: &TextAnalysis,
    palette: &ColorPalette,
    seed: &Seed,
) -> Vec<VisualElement> {
    let mut out = Vec::with_capacity(2);

    if matches!(
        analysis.treatment_context,
        TreatmentContext::PostSurgical | TreatmentContext::Rehabilitation
    ) {
        let r = c.len(0.42);
        let circumference = TAU * r;
        let progress = seed.variations.complexity.clamp(0.0, 1.0) * circumference;
        out.push(
            c.circle(
                0.5,
                0.5,
                0.42,
                Style::stroked(Paint::color(&palette.primary), c.len(0.012), 0.9)
                    .dashed(progress, circumference)
                    .rotated(-90.0, c.center()),
            )
            .with_class("healing-progress"),
        );
    }

    let amplitude = seed.variations.density.mul_add(0.04, 0.01);
    let commands = (0..=PULSE_SAMPLES)
        .map(|i| {
            let t = i as f64 / PULSE_SAMPLES as f64;
            let p = c.at(0.9f64.mul_add(t, 0.05), (t * 4.0 * PI).sin().mul_add(amplitude, 0.9));
            if i == 0 { PathCommand::MoveTo(p) } else { PathCommand::LineTo(p) }
        })
        .collect();
    out.push(
        VisualElement::new(
            Shape::Path { commands },
            Style::stroked(Paint::color(&palette.accent), c.len(0.005), 0.7),
        )
        .with_class("pulse"),
    );

    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify;
    use pretty_assertions::assert_eq;

    fn compose(text: &str, size: u32) -> LayeredComposition {
        let analysis = classify(text);
        let palette = ColorPalette::generate(&analysis);
        let seed = Seed::generate(text, &analysis);
        LayeredComposition::generate(&analysis, &palette, &seed, size)
    }

    fn with_class<'a>(elements: &'a [VisualElement], class: &str) -> Vec<&'a VisualElement> {
        elements.iter().filter(|e| e.class == Some(class)).collect()
    }

    fn assert_scaled(small: &LayeredComposition, large: &LayeredComposition, factor: f64) {
        assert_eq!(small.element_count(), large.element_count());
        for (a, b) in small.elements().zip(large.elements()) {
            assert_eq!(a.tag(), b.tag());
            assert_eq!(a.class, b.class);
            let (ga, gb) = (a.geometry(), b.geometry());
            assert_eq!(ga.len(), gb.len());
            for (x, y) in ga.iter().zip(&gb) {
                assert!((x * factor - y).abs() < 1e-9 * y.abs().max(1.0), "{x} * {factor} != {y} in {:?}", a.class);
            }
            assert!((a.style.opacity - b.style.opacity).abs() < 1e-12);
        }
    }

    #[test]
    fn generation_is_idempotent() {
        let text = "Chronic lower back pain with swelling, should I worry?";
        assert_eq!(compose(text, 200), compose(text, 200));
    }

    #[test]
    fn geometry_scales_with_size() {
        for text in [
            "What is the best treatment for a mild ankle sprain?",
            "Herniated disc in my lower back, is surgery needed?",
            "Broken wrist after a fall, the pain is bad",
            "Knee replacement recovery with physical therapy",
            "Training for a marathon, how do I avoid running injuries?",
            "",
        ] {
            assert_scaled(&compose(text, 100), &compose(text, 200), 2.0);
        }
    }

    #[test]
    fn background_dot_count_follows_density() {
        let text = "My shoulder aches";
        let analysis = classify(text);
        let seed = Seed::generate(text, &analysis);
        let comp = compose(text, 200);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let expected = (seed.variations.density * 20.0).floor() as usize + 5;
        assert_eq!(with_class(&comp.background, "texture-dot").len(), expected);
        assert_eq!(comp.background[0].class, Some("card"));
        assert_eq!(comp.background[0].style.fill, Paint::Gradient(BACKGROUND_GRADIENT_ID));
    }

    #[test]
    fn gradient_uses_palette_stops() {
        let text = "hip pain";
        let analysis = classify(text);
        let palette = ColorPalette::generate(&analysis);
        let comp = compose(text, 200);
        let colors: Vec<_> = comp.gradient.stops.iter().map(|s| s.color.clone()).collect();
        assert_eq!(colors, palette.gradient_stops.to_vec());
    }

    #[test]
    fn spine_motif() {
        let comp = compose("Herniated disc in my lower back, is surgery needed?", 200);
        let vertebrae = with_class(&comp.structural, "vertebra");
        assert!((5..=12).contains(&vertebrae.len()), "{}", vertebrae.len());
        assert!(vertebrae.iter().all(|e| e.tag() == "ellipse"));
        assert_eq!(with_class(&comp.structural, "spinal-cord").len(), 1);
    }

    #[test]
    fn spine_processes_only_above_complexity_three() {
        let text = "neck";
        let mut analysis = classify(text);
        assert_eq!(analysis.subspecialty, Subspecialty::Spine);
        let palette = ColorPalette::generate(&analysis);
        let seed = Seed::generate(text, &analysis);

        analysis.complexity_level = 3;
        let low = LayeredComposition::generate(&analysis, &palette, &seed, 200);
        assert!(with_class(&low.structural, "vertebral-process").is_empty());

        analysis.complexity_level = 4;
        let high = LayeredComposition::generate(&analysis, &palette, &seed, 200);
        let vertebrae = with_class(&high.structural, "vertebra").len();
        assert_eq!(with_class(&high.structural, "vertebral-process").len(), vertebrae * 2);
    }

    #[test]
    fn sports_motif_counts() {
        let text = "Training for a marathon, how do I avoid running injuries?";
        let analysis = classify(text);
        assert_eq!(analysis.subspecialty, Subspecialty::SportsMedicine);
        let comp = compose(text, 200);
        let level = usize::from(analysis.complexity_level);
        assert_eq!(with_class(&comp.structural, "flow-line").len(), (level + 2).min(8));
        assert_eq!(with_class(&comp.structural, "energy-burst").len(), (level / 3).max(1) * 3);
    }

    #[test]
    fn joint_motif() {
        let comp = compose("Knee replacement recovery with physical therapy", 200);
        assert_eq!(with_class(&comp.structural, "socket").len(), 1);
        assert_eq!(with_class(&comp.structural, "ball").len(), 1);
        let hex = with_class(&comp.structural, "stability-ring");
        assert_eq!(hex.len(), 1);
        match &hex[0].shape {
            Shape::Polygon { points } => assert_eq!(points.len(), 6),
            other => panic!("expected polygon, got {other:?}"),
        }
    }

    #[test]
    fn trauma_with_fracture_has_dashed_lines() {
        let text = "I fractured my wrist in a car accident";
        let analysis = classify(text);
        assert_eq!(analysis.subspecialty, Subspecialty::Trauma);
        let comp = compose(text, 200);
        let fractures = with_class(&comp.structural, "fracture-line");
        assert!((2..=5).contains(&fractures.len()), "{}", fractures.len());
        assert!(fractures.iter().all(|e| e.style.dash_array.is_some()));
        assert_eq!(
            with_class(&comp.structural, "impact-line").len(),
            usize::from(analysis.complexity_level).min(5)
        );
    }

    #[test]
    fn trauma_without_fracture_has_no_dashed_lines() {
        let text = "I was in a car accident";
        assert_eq!(classify(text).subspecialty, Subspecialty::Trauma);
        let comp = compose(text, 200);
        assert!(with_class(&comp.structural, "fracture-line").is_empty());
    }

    #[test]
    fn hand_foot_dot_count() {
        let text = "What is the best treatment for a mild ankle sprain?";
        let analysis = classify(text);
        let comp = compose(text, 200);
        assert_eq!(
            with_class(&comp.structural, "detail-dot").len(),
            usize::from(analysis.complexity_level) * 2
        );
    }

    #[test]
    fn andry_tree_counts() {
        let text = "Should I see a doctor about my bones and muscles?";
        let analysis = classify(text);
        assert_eq!(analysis.subspecialty, Subspecialty::General);
        let comp = compose(text, 200);
        assert_eq!(with_class(&comp.structural, "trunk").len(), 1);
        assert_eq!(
            with_class(&comp.structural, "branch").len(),
            usize::from(analysis.complexity_level).min(6)
        );
        assert_eq!(with_class(&comp.structural, "root").len(), analysis.medical_term_count.min(8));
    }

    #[test]
    fn detail_layer_is_condition_gated() {
        assert!(compose("hip", 200).detail.is_empty());

        let pain = compose("hip pain", 200);
        assert_eq!(with_class(&pain.detail, "pain-ring").len(), 3);
        assert!(with_class(&pain.detail, "inflammation-glow").is_empty());

        let swollen = compose("swollen hip", 200);
        assert_eq!(with_class(&swollen.detail, "inflammation-glow").len(), 1);
    }

    #[test]
    fn healing_arc_only_after_surgery_or_rehab() {
        let post_op = compose("Recovering after shoulder surgery", 200);
        let arcs = with_class(&post_op.overlay, "healing-progress");
        assert_eq!(arcs.len(), 1);
        let (progress, circumference) = arcs[0].style.dash_array.unwrap_or_default();
        assert!(progress >= 0.0 && progress <= circumference);

        let plain = compose("shoulder", 200);
        assert!(with_class(&plain.overlay, "healing-progress").is_empty());
        assert_eq!(with_class(&plain.overlay, "pulse").len(), 1);
    }

    #[test]
    fn pulse_stays_near_bottom_edge() {
        let comp = compose("anything at all", 200);
        let pulse = with_class(&comp.overlay, "pulse");
        let Shape::Path { commands } = &pulse[0].shape else {
            panic!("pulse is not a path");
        };
        assert_eq!(commands.len(), PULSE_SAMPLES + 1);
        for cmd in commands {
            if let PathCommand::MoveTo(p) | PathCommand::LineTo(p) = cmd {
                assert!(p.y > 160.0 && p.y < 200.0, "y = {}", p.y);
            }
        }
    }

    #[test]
    fn opacities_are_valid() {
        for text in [
            "",
            "Broken wrist after a fall, the pain is bad",
            "chronic stiff swollen knee",
            "My knee and ankle are swollen and painful",
        ] {
            for e in compose(text, 200).elements() {
                assert!((MIN_OPACITY..=1.0).contains(&e.style.opacity), "{:?} {}", e.class, e.style.opacity);
            }
        }
    }
}
