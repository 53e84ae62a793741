// SPDX-License-Identifier: MIT
//
// rx-color color system — 8-bit sRGB swatches with HSL adjustment.
//
// Single-character variable names (r, g, b, h, s, l, t) are the standard
// mathematical convention in color science.
#![allow(clippy::many_single_char_names)]
//
// Conversion pipeline:
//
//   "#rrggbb" ↔ Rgb (u8 channels) ↔ sRGB floats (0.0–1.0) ↔ HSL
//
// Mixing happens per channel directly on sRGB values. This is not
// perceptually uniform, but it is what the palette tables were tuned
// against, so blends must stay in this space to look the same.

use std::fmt;

use serde::{Deserialize, Serialize};

// ─── Rgb ─────────────────────────────────────────────────────────────────────

/// An opaque 8-bit sRGB color.
///
/// # Examples
///
/// ```
/// use rx_color::Rgb;
///
/// let teal = Rgb::hex("#2a9d8f").unwrap();
/// assert_eq!(teal.to_hex(), "#2a9d8f");
///
/// // Linear channel interpolation
/// let halfway = teal.mix(Rgb::WHITE, 0.5);
///
/// // HSL adjustments
/// let vivid = teal.saturate(0.2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    // ─── Constructors ────────────────────────────────────────────────────

    /// Create a color from 8-bit channels.
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from sRGB floats (0.0 to 1.0, clamped).
    #[must_use]
    pub fn srgb(r: f64, g: f64, b: f64) -> Self {
        Self { r: to_u8(r), g: to_u8(g), b: to_u8(b) }
    }

    /// Parse a hex string.
    ///
    /// Supports `#RGB` and `#RRGGBB` (with or without `#`). Returns `None`
    /// for anything else, including alpha forms.
    #[must_use]
    pub fn hex(s: &str) -> Option<Self> {
        parse_hex(s)
    }

    /// Pure black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Pure white.
    pub const WHITE: Self = Self::new(255, 255, 255);

    // ─── Conversion ──────────────────────────────────────────────────────

    /// Channels as sRGB floats in 0.0–1.0.
    #[must_use]
    pub fn to_srgb(self) -> (f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }

    /// Lower-case `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Convert to HSL.
    #[must_use]
    pub fn to_hsl(self) -> Hsl {
        let (r, g, b) = self.to_srgb();
        Hsl::from_srgb(r, g, b)
    }

    // ─── Operations ──────────────────────────────────────────────────────

    /// Linear per-channel interpolation toward `other`.
    ///
    /// `t` is clamped to 0.0–1.0; `t = 0.0` returns `self`, `t = 1.0`
    /// returns `other`.
    #[must_use]
    pub fn mix(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| {
            let a = f64::from(a);
            let b = f64::from(b);
            (b - a).mul_add(t, a) / 255.0
        };
        Self::srgb(lerp(self.r, other.r), lerp(self.g, other.g), lerp(self.b, other.b))
    }

    /// Shift HSL saturation by `amount` (positive = more vivid), clamped to 0.0–1.0.
    #[must_use]
    pub fn saturate(self, amount: f64) -> Self {
        let hsl = self.to_hsl();
        Hsl { s: (hsl.s + amount).clamp(0.0, 1.0), ..hsl }.to_rgb()
    }

    /// Shift HSL lightness by `amount`, clamped to 0.0–1.0.
    #[must_use]
    pub fn lighten(self, amount: f64) -> Self {
        let hsl = self.to_hsl();
        Hsl { l: (hsl.l + amount).clamp(0.0, 1.0), ..hsl }.to_rgb()
    }

    /// Rotate the hue by `degrees`.
    #[must_use]
    pub fn shift_hue(self, degrees: f64) -> Self {
        let hsl = self.to_hsl();
        Hsl { h: normalize_hue(hsl.h + degrees), ..hsl }.to_rgb()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Self::BLACK
    }
}

// ─── Hsl ─────────────────────────────────────────────────────────────────────

/// A color in HSL space.
///
/// - `h`: hue in degrees, 0.0 to 360.0
/// - `s`: saturation, 0.0 to 1.0
/// - `l`: lightness, 0.0 to 1.0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    #[inline]
    #[must_use]
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Convert sRGB floats (0.0–1.0) to HSL.
    #[must_use]
    pub fn from_srgb(r: f64, g: f64, b: f64) -> Self {
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;
        let d = max - min;

        if d.abs() < f64::EPSILON {
            return Self { h: 0.0, s: 0.0, l };
        }

        let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };

        // `max` is one of the channels exactly, so float equality is sound.
        #[allow(clippy::float_cmp)]
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Self { h: normalize_hue(h * 60.0), s, l }
    }

    /// Convert to sRGB floats (0.0–1.0), without quantization.
    #[must_use]
    pub fn to_srgb(self) -> (f64, f64, f64) {
        let s = self.s.clamp(0.0, 1.0);
        let l = self.l.clamp(0.0, 1.0);
        if s <= 0.0 {
            return (l, l, l);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l.mul_add(-s, l + s) };
        let p = 2.0f64.mul_add(l, -q);
        let h = normalize_hue(self.h) / 360.0;

        (
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
        )
    }

    /// Convert to an 8-bit color.
    #[must_use]
    pub fn to_rgb(self) -> Rgb {
        let (r, g, b) = self.to_srgb();
        Rgb::srgb(r, g, b)
    }
}

/// Evaluate one RGB channel from the HSL intermediate values.
fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t > 1.0 {
        t - 1.0
    } else {
        t
    };

    if t < 1.0 / 6.0 {
        ((q - p) * 6.0).mul_add(t, p)
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        ((q - p) * (2.0 / 3.0 - t)).mul_add(6.0, p)
    } else {
        p
    }
}

/// Normalize a hue angle to the range [0, 360).
#[inline]
fn normalize_hue(h: f64) -> f64 {
    let h = h % 360.0;
    if h < 0.0 { h + 360.0 } else { h }
}

// ─── Hex helpers ─────────────────────────────────────────────────────────────

/// Mix two hex swatches. Fails closed: if either side does not parse,
/// `from` is returned unchanged.
#[must_use]
pub fn mix_hex(from: &str, to: &str, t: f64) -> String {
    match (Rgb::hex(from), Rgb::hex(to)) {
        (Some(a), Some(b)) => a.mix(b, t).to_hex(),
        _ => from.to_string(),
    }
}

/// Shift the saturation of a hex swatch. Fails closed: malformed input is
/// returned unchanged.
#[must_use]
pub fn adjust_hex_saturation(hex: &str, amount: f64) -> String {
    Rgb::hex(hex).map_or_else(|| hex.to_string(), |c| c.saturate(amount).to_hex())
}

/// Parse a hex color string into an `Rgb`.
fn parse_hex(s: &str) -> Option<Rgb> {
    let s = s.strip_prefix('#').unwrap_or(s);
    let bytes = s.as_bytes();

    match bytes.len() {
        // #RGB
        3 => {
            let r = parse_hex_digit(bytes[0])?;
            let g = parse_hex_digit(bytes[1])?;
            let b = parse_hex_digit(bytes[2])?;
            Some(Rgb::new(r << 4 | r, g << 4 | g, b << 4 | b))
        }
        // #RRGGBB
        6 => {
            let r = parse_hex_byte(&bytes[0..2])?;
            let g = parse_hex_byte(&bytes[2..4])?;
            let b = parse_hex_byte(&bytes[4..6])?;
            Some(Rgb::new(r, g, b))
        }
        _ => None,
    }
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

/// Convert a float (0.0–1.0) to a u8 (0–255) with correct rounding.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(v: f64) -> u8 {
    // Safe: clamp guarantees 0.0 <= value <= 255.0 before truncation.
    v.mul_add(255.0, 0.5).clamp(0.0, 255.0) as u8
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    // ── Hex ──────────────────────────────────────────────────────────────

    #[test]
    fn parse_long_hex() {
        assert_eq!(Rgb::hex("#ff8000"), Some(Rgb::new(255, 128, 0)));
        assert_eq!(Rgb::hex("FF8000"), Some(Rgb::new(255, 128, 0)));
    }

    #[test]
    fn parse_short_hex() {
        assert_eq!(Rgb::hex("#f80"), Some(Rgb::new(255, 136, 0)));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert_eq!(Rgb::hex(""), None);
        assert_eq!(Rgb::hex("#12345"), None);
        assert_eq!(Rgb::hex("#gg0000"), None);
        assert_eq!(Rgb::hex("#ff000080"), None);
    }

    #[test]
    fn hex_roundtrip_is_lowercase() {
        assert_eq!(Rgb::hex("#2A9D8F").map(Rgb::to_hex).as_deref(), Some("#2a9d8f"));
    }

    #[test]
    fn display_matches_to_hex() {
        let c = Rgb::new(1, 2, 3);
        assert_eq!(c.to_string(), c.to_hex());
    }

    // ── Mixing ───────────────────────────────────────────────────────────

    #[test]
    fn mix_endpoints() {
        let a = Rgb::new(10, 20, 30);
        let b = Rgb::new(200, 100, 0);
        assert_eq!(a.mix(b, 0.0), a);
        assert_eq!(a.mix(b, 1.0), b);
    }

    #[test]
    fn mix_midpoint() {
        assert_eq!(Rgb::BLACK.mix(Rgb::WHITE, 0.5), Rgb::new(128, 128, 128));
    }

    #[test]
    fn mix_clamps_factor() {
        let a = Rgb::new(10, 20, 30);
        let b = Rgb::new(200, 100, 0);
        assert_eq!(a.mix(b, 2.0), b);
        assert_eq!(a.mix(b, -1.0), a);
    }

    #[test]
    fn mix_hex_fails_closed() {
        assert_eq!(mix_hex("not-a-color", "#ffffff", 0.5), "not-a-color");
        assert_eq!(mix_hex("#000000", "nope", 0.5), "#000000");
    }

    // ── HSL ──────────────────────────────────────────────────────────────

    #[test]
    fn primaries_to_hsl() {
        let red = Rgb::new(255, 0, 0).to_hsl();
        assert!(approx_eq(red.h, 0.0, 1e-9) && approx_eq(red.s, 1.0, 1e-9) && approx_eq(red.l, 0.5, 1e-9));

        let green = Rgb::new(0, 255, 0).to_hsl();
        assert!(approx_eq(green.h, 120.0, 1e-9));

        let blue = Rgb::new(0, 0, 255).to_hsl();
        assert!(approx_eq(blue.h, 240.0, 1e-9));
    }

    #[test]
    fn gray_has_zero_saturation() {
        let gray = Rgb::new(128, 128, 128).to_hsl();
        assert!(approx_eq(gray.s, 0.0, 1e-9));
        assert_eq!(gray.to_rgb(), Rgb::new(128, 128, 128));
    }

    #[test]
    fn rgb_hsl_rgb_roundtrip() {
        for c in [
            Rgb::new(42, 157, 143),
            Rgb::new(233, 196, 106),
            Rgb::new(231, 111, 81),
            Rgb::new(38, 70, 83),
            Rgb::WHITE,
            Rgb::BLACK,
        ] {
            assert_eq!(c.to_hsl().to_rgb(), c, "roundtrip failed for {c}");
        }
    }

    #[test]
    fn saturate_increases_saturation() {
        let c = Rgb::new(120, 140, 160);
        let before = c.to_hsl().s;
        let after = c.saturate(0.2).to_hsl().s;
        assert!(after > before, "{after} <= {before}");
    }

    #[test]
    fn desaturate_to_gray() {
        let c = Rgb::new(200, 40, 40).saturate(-1.0);
        assert_eq!(c.r, c.g);
        assert_eq!(c.g, c.b);
    }

    #[test]
    fn adjust_hex_saturation_fails_closed() {
        assert_eq!(adjust_hex_saturation("#zzzzzz", 0.3), "#zzzzzz");
        assert_eq!(adjust_hex_saturation("", 0.3), "");
    }

    #[test]
    fn shift_hue_full_turn_is_identity() {
        let c = Rgb::new(42, 157, 143);
        assert_eq!(c.shift_hue(360.0), c);
    }

    proptest! {
        #[test]
        fn hsl_srgb_hsl_roundtrip(h in 0.0f64..360.0, s in 0.05f64..1.0, l in 0.05f64..0.95) {
            let (r, g, b) = Hsl::new(h, s, l).to_srgb();
            let back = Hsl::from_srgb(r, g, b);
            prop_assert!(approx_eq(back.s, s, 1e-6), "s {} vs {}", back.s, s);
            prop_assert!(approx_eq(back.l, l, 1e-6), "l {} vs {}", back.l, l);
            let dh = (back.h - h).abs();
            prop_assert!(dh < 1e-6 || (360.0 - dh) < 1e-6, "h {} vs {}", back.h, h);
        }

        #[test]
        fn to_hex_is_always_seven_chars(r: u8, g: u8, b: u8) {
            let hex = Rgb::new(r, g, b).to_hex();
            prop_assert_eq!(hex.len(), 7);
            prop_assert_eq!(Rgb::hex(&hex), Some(Rgb::new(r, g, b)));
        }
    }
}
