//! SVG serialization of a [`LayeredComposition`].

use std::fmt::Write as _;

use crate::composition::LayeredComposition;
use crate::element::{VisualElement, fmt_num};

/// Render the composition as a standalone SVG document.
#[must_use]
pub fn to_svg(composition: &LayeredComposition) -> String {
    let size = composition.size;
    let mut out = String::with_capacity(256 + composition.element_count() * 96);

    // Writing to a String cannot fail.
    let _ = writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">"#
    );

    let gradient = &composition.gradient;
    out.push_str("  <defs>\n");
    let _ = writeln!(
        out,
        r#"    <linearGradient id="{}" x1="0%" y1="0%" x2="100%" y2="100%">"#,
        escape(gradient.id)
    );
    for stop in &gradient.stops {
        let _ = writeln!(
            out,
            r#"      <stop offset="{}%" stop-color="{}"/>"#,
            fmt_num(stop.offset * 100.0),
            escape(&stop.color)
        );
    }
    out.push_str("    </linearGradient>\n  </defs>\n");

    for (layer, elements) in composition.layers() {
        let _ = writeln!(out, r#"  <g class="layer-{}">"#, layer.name());
        for element in elements {
            out.push_str("    ");
            write_element(&mut out, element);
            out.push('\n');
        }
        out.push_str("  </g>\n");
    }

    out.push_str("</svg>\n");
    out
}

fn write_element(out: &mut String, element: &VisualElement) {
    out.push('<');
    out.push_str(element.tag());
    for (name, value) in element.attributes() {
        let _ = write!(out, r#" {name}="{}""#, escape(&value.render()));
    }
    out.push_str("/>");
}

/// Escape the five XML special characters.
#[must_use]
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}
