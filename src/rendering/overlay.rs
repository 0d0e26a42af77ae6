//! Builds the SVG text overlay that gets composited onto the template.

use std::fmt::Write;

use crate::fonts::FontLibrary;
use crate::rendering::layout::{Fill, FontChoice, OVERLAY_LAYOUT};
use crate::CertificateRequest;

// Defined once per document; the headline fill references it.
const GOLD_GRADIENT_DEFS: &str = r##"  <defs>
    <linearGradient id="gold-gradient" x1="0%" y1="0%" x2="100%" y2="0%">
      <stop offset="0%" stop-color="#B8860B"/>
      <stop offset="50%" stop-color="#DAA520"/>
      <stop offset="100%" stop-color="#B8860B"/>
    </linearGradient>
  </defs>
"##;

/// Escape text for insertion into SVG content or attribute values.
///
/// User text goes into the overlay verbatim otherwise, so every character
/// with markup meaning must be entity-encoded here.
pub fn escape_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Build the overlay document for `request`, sized to the template's pixel
/// dimensions so the composite aligns at the origin.
pub fn build_overlay(
    request: &CertificateRequest,
    fonts: &FontLibrary,
    width: u32,
    height: u32,
) -> String {
    let mut svg = String::with_capacity(2048);
    // Writing into a String cannot fail.
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}">"#,
        width, height
    );
    svg.push_str(GOLD_GRADIENT_DEFS);

    for placement in OVERLAY_LAYOUT {
        let family = match placement.font {
            FontChoice::Role(role) => match fonts.family_for(role) {
                Some(resolved) => format!("'{}', {}", escape_text(resolved), role.fallback_family()),
                None => role.fallback_family().to_string(),
            },
            FontChoice::SansSerif => "sans-serif".to_string(),
        };
        let fill = match placement.fill {
            Fill::Solid(color) => color.to_string(),
            Fill::GoldGradient => "url(#gold-gradient)".to_string(),
        };
        let weight = if placement.bold { r#" font-weight="bold""# } else { "" };
        let stroke = match placement.stroke {
            Some(s) => format!(r#" stroke="{}" stroke-width="{}""#, s.color, s.width),
            None => String::new(),
        };

        let _ = writeln!(
            svg,
            r#"  <text x="{}" y="{}" font-family="{}" font-size="{}"{} text-anchor="middle" fill="{}"{}>{}</text>"#,
            placement.x,
            placement.y,
            family,
            placement.size,
            weight,
            fill,
            stroke,
            escape_text(placement.field.text(request)),
        );
    }

    svg.push_str("</svg>\n");
    svg
}
