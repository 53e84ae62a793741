// SPDX-License-Identifier: MIT
//
// rx-color — color math for rx-art.
//
// Palettes in rx-art are plain sRGB hex swatches: they are surfaced directly
// in the metadata panel and written verbatim into SVG attributes. This crate
// owns the one place where those swatches are parsed, mixed, and pushed
// through HSL for saturation/lightness adjustments, so every other crate can
// treat colors as opaque `#rrggbb` values.

pub mod color;

pub use color::{Hsl, Rgb, adjust_hex_saturation, mix_hex};
