//! Visual primitives, the intermediate representation of a composition.
//!
//! A [`VisualElement`] is one of six closed shape kinds plus a style block.
//! Backends match exhaustively on [`Shape`]; the flat [`VisualElement::attributes`]
//! view exists for writers that only need `name="value"` pairs (SVG).
//!
//! All coordinates are canvas units (pixels of the requested `size`).

use std::fmt::Write as _;

use serde::Serialize;

/// A point in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One segment of a path outline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    /// Quadratic Bézier through `control` ending at `to`.
    QuadTo { control: Point, to: Point },
    Close,
}

/// Geometry of an element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Shape {
    Circle { cx: f64, cy: f64, r: f64 },
    Ellipse { cx: f64, cy: f64, rx: f64, ry: f64 },
    Rect { x: f64, y: f64, width: f64, height: f64, rx: f64 },
    Path { commands: Vec<PathCommand> },
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },
    Polygon { points: Vec<Point> },
}

impl Shape {
    /// SVG tag name for this shape.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Circle { .. } => "circle",
            Self::Ellipse { .. } => "ellipse",
            Self::Rect { .. } => "rect",
            Self::Path { .. } => "path",
            Self::Line { .. } => "line",
            Self::Polygon { .. } => "polygon",
        }
    }
}

/// Fill or stroke source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Paint {
    None,
    /// `#rrggbb` swatch.
    Color(String),
    /// Reference to a gradient defined by the composition.
    Gradient(&'static str),
}

impl Paint {
    #[must_use]
    pub fn color(hex: &str) -> Self {
        Self::Color(hex.to_string())
    }

    fn to_attr(&self) -> String {
        match self {
            Self::None => "none".to_string(),
            Self::Color(hex) => hex.clone(),
            Self::Gradient(id) => format!("url(#{id})"),
        }
    }
}

/// Faintest opacity any element is drawn with.
pub const MIN_OPACITY: f64 = 0.2;

/// Presentation of an element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Style {
    pub fill: Paint,
    pub stroke: Paint,
    pub stroke_width: f64,
    /// Always in [`MIN_OPACITY`, 1].
    pub opacity: f64,
    /// `(dash, gap)` in canvas units.
    pub dash_array: Option<(f64, f64)>,
    /// Rotation in degrees about a point.
    pub rotate: Option<(f64, Point)>,
}

impl Style {
    /// Filled shape, no outline.
    #[must_use]
    pub fn filled(fill: Paint, opacity: f64) -> Self {
        Self {
            fill,
            stroke: Paint::None,
            stroke_width: 0.0,
            opacity: opacity.clamp(MIN_OPACITY, 1.0),
            dash_array: None,
            rotate: None,
        }
    }

    /// Outline only.
    #[must_use]
    pub fn stroked(stroke: Paint, stroke_width: f64, opacity: f64) -> Self {
        Self {
            fill: Paint::None,
            stroke,
            stroke_width,
            opacity: opacity.clamp(MIN_OPACITY, 1.0),
            dash_array: None,
            rotate: None,
        }
    }

    #[must_use]
    pub fn dashed(mut self, dash: f64, gap: f64) -> Self {
        self.dash_array = Some((dash, gap));
        self
    }

    #[must_use]
    pub fn rotated(mut self, degrees: f64, about: Point) -> Self {
        self.rotate = Some((degrees, about));
        self
    }
}

/// A flat attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Number(f64),
    Text(String),
}

impl AttrValue {
    /// Render for markup.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Number(v) => fmt_num(*v),
            Self::Text(s) => s.clone(),
        }
    }
}

/// One drawable primitive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualElement {
    pub shape: Shape,
    pub style: Style,
    pub class: Option<&'static str>,
}

impl VisualElement {
    #[must_use]
    pub const fn new(shape: Shape, style: Style) -> Self {
        Self { shape, style, class: None }
    }

    #[must_use]
    pub fn with_class(mut self, class: &'static str) -> Self {
        self.class = Some(class);
        self
    }

    #[must_use]
    pub const fn tag(&self) -> &'static str {
        self.shape.tag()
    }

    /// Geometry followed by style, as flat `name → value` pairs.
    #[must_use]
    pub fn attributes(&self) -> Vec<(&'static str, AttrValue)> {
        use AttrValue::{Number, Text};

        let mut attrs = match &self.shape {
            Shape::Circle { cx, cy, r } => vec![("cx", Number(*cx)), ("cy", Number(*cy)), ("r", Number(*r))],
            Shape::Ellipse { cx, cy, rx, ry } => vec![
                ("cx", Number(*cx)),
                ("cy", Number(*cy)),
                ("rx", Number(*rx)),
                ("ry", Number(*ry)),
            ],
            Shape::Rect { x, y, width, height, rx } => vec![
                ("x", Number(*x)),
                ("y", Number(*y)),
                ("width", Number(*width)),
                ("height", Number(*height)),
                ("rx", Number(*rx)),
            ],
            Shape::Path { commands } => vec![("d", Text(path_data(commands)))],
            Shape::Line { x1, y1, x2, y2 } => vec![
                ("x1", Number(*x1)),
                ("y1", Number(*y1)),
                ("x2", Number(*x2)),
                ("y2", Number(*y2)),
            ],
            Shape::Polygon { points } => vec![("points", Text(point_list(points)))],
        };

        let style = &self.style;
        attrs.push(("fill", Text(style.fill.to_attr())));
        if style.stroke != Paint::None {
            attrs.push(("stroke", Text(style.stroke.to_attr())));
            attrs.push(("stroke-width", Number(style.stroke_width)));
        }
        if style.opacity < 1.0 {
            attrs.push(("opacity", Number(style.opacity)));
        }
        if let Some((dash, gap)) = style.dash_array {
            attrs.push(("stroke-dasharray", Text(format!("{} {}", fmt_num(dash), fmt_num(gap)))));
        }
        if let Some((degrees, about)) = style.rotate {
            attrs.push((
                "transform",
                Text(format!("rotate({} {} {})", fmt_num(degrees), fmt_num(about.x), fmt_num(about.y))),
            ));
        }
        if let Some(class) = self.class {
            attrs.push(("class", Text(class.to_string())));
        }
        attrs
    }

    /// Every length/coordinate of the element, in a fixed order. Opacity and
    /// rotation angles are excluded since they don't scale with the canvas.
    #[cfg(test)]
    pub(crate) fn geometry(&self) -> Vec<f64> {
        let mut out = match &self.shape {
            Shape::Circle { cx, cy, r } => vec![*cx, *cy, *r],
            Shape::Ellipse { cx, cy, rx, ry } => vec![*cx, *cy, *rx, *ry],
            Shape::Rect { x, y, width, height, rx } => vec![*x, *y, *width, *height, *rx],
            Shape::Path { commands } => commands
                .iter()
                .flat_map(|c| match c {
                    PathCommand::MoveTo(p) | PathCommand::LineTo(p) => vec![p.x, p.y],
                    PathCommand::QuadTo { control, to } => vec![control.x, control.y, to.x, to.y],
                    PathCommand::Close => vec![],
                })
                .collect(),
            Shape::Line { x1, y1, x2, y2 } => vec![*x1, *y1, *x2, *y2],
            Shape::Polygon { points } => points.iter().flat_map(|p| [p.x, p.y]).collect(),
        };
        out.push(self.style.stroke_width);
        if let Some((dash, gap)) = self.style.dash_array {
            out.extend([dash, gap]);
        }
        if let Some((_, about)) = self.style.rotate {
            out.extend([about.x, about.y]);
        }
        out
    }
}

/// Format a number with at most three decimals and no trailing zeros.
#[must_use]
pub fn fmt_num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" || s.is_empty() { "0".to_string() } else { s.to_string() }
}

fn path_data(commands: &[PathCommand]) -> String {
    let mut d = String::new();
    for (i, cmd) in commands.iter().enumerate() {
        if i > 0 {
            d.push(' ');
        }
        // Writing to a String cannot fail.
        let _ = match cmd {
            PathCommand::MoveTo(p) => write!(d, "M {} {}", fmt_num(p.x), fmt_num(p.y)),
            PathCommand::LineTo(p) => write!(d, "L {} {}", fmt_num(p.x), fmt_num(p.y)),
            PathCommand::QuadTo { control, to } => write!(
                d,
                "Q {} {} {} {}",
                fmt_num(control.x),
                fmt_num(control.y),
                fmt_num(to.x),
                fmt_num(to.y)
            ),
            PathCommand::Close => write!(d, "Z"),
        };
    }
    d
}

fn point_list(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", fmt_num(p.x), fmt_num(p.y)))
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
