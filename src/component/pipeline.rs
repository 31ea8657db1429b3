//! Pure mappings from attribute values to the component's private view tree.

use crate::component::attributes::{AttrName, AttributeStore};
use crate::foundation::math::{format_css_number, parse_leading_f64};

/// One of the two image layers (sharp or glass).
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct ImageLayer {
    /// Source locator; empty when no image is set.
    pub src: String,
    /// `object-fit` keyword, passed through verbatim.
    pub object_fit: String,
    /// CSS-style filter string; only the glass layer carries one.
    pub filter: Option<String>,
}

/// Glyph geometry and style, the text shape used as the glass clip.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct GlyphStyle {
    /// Anchor x, number or percentage.
    pub x: String,
    /// Anchor y, number or percentage.
    pub y: String,
    /// Font size, a CSS length.
    pub font_size: String,
    /// Font weight, number or keyword.
    pub font_weight: String,
    /// Font family list.
    pub font_family: String,
}

/// The text clip: style plus the mirrored content.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct Glyph {
    /// Position and font style.
    pub style: GlyphStyle,
    /// Trimmed nested text content.
    pub text: String,
}

/// Style overrides on the host box, used for the padding-based aspect reservation.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct HostStyle {
    /// `height` override, `"0"` while an aspect box is reserved.
    pub height: Option<String>,
    /// `padding-top` override, `"<ratio*100>%"` while reserved.
    pub padding_top: Option<String>,
}

/// The component's private view tree.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct GlassView {
    /// Unfiltered image layer, visible outside the glyph.
    pub sharp: ImageLayer,
    /// Blurred/brightened image layer, visible inside the glyph.
    pub glass: ImageLayer,
    /// The text clip.
    pub glyph: Glyph,
    /// Host box overrides.
    pub host: HostStyle,
    /// Aspect ratio (`height / width`) behind the current reservation.
    pub aspect_ratio: Option<f64>,
}

/// Resolve the blur radius in px.
///
/// The leading number of the value is used; absent, empty, unparsable, negative or non-finite
/// values yield the default `10`.
pub fn resolve_blur(raw: Option<&str>) -> f64 {
    let default = default_number(AttrName::Blur);
    raw.and_then(parse_leading_f64)
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(default)
}

/// Resolve the brightness token, used verbatim unless absent or empty.
pub fn resolve_brightness(raw: Option<&str>) -> &str {
    match raw {
        Some(v) if !v.trim().is_empty() => v,
        _ => AttrName::Brightness.default_value().unwrap_or("0.8"),
    }
}

/// Build the glass-layer filter string `blur(<b>px) brightness(<v>)`.
pub fn filter_string(blur: Option<&str>, brightness: Option<&str>) -> String {
    format!(
        "blur({}px) brightness({})",
        format_css_number(resolve_blur(blur)),
        resolve_brightness(brightness)
    )
}

/// Filter string for the current attribute values.
pub fn filter_for(attrs: &AttributeStore) -> String {
    filter_string(
        attrs.get_attr(AttrName::Blur),
        attrs.get_attr(AttrName::Brightness),
    )
}

/// `object-fit` keyword for the current attribute values.
pub fn fit_for(attrs: &AttributeStore) -> String {
    attrs
        .get_or_default(AttrName::ObjectFit)
        .unwrap_or("cover")
        .to_string()
}

/// Glyph position and font style for the current attribute values.
pub fn glyph_style_for(attrs: &AttributeStore) -> GlyphStyle {
    let get = |name: AttrName| attrs.get_or_default(name).unwrap_or_default().to_string();
    GlyphStyle {
        x: get(AttrName::TextX),
        y: get(AttrName::TextY),
        font_size: get(AttrName::FontSize),
        font_weight: get(AttrName::FontWeight),
        font_family: get(AttrName::FontFamily),
    }
}

/// Glyph text for a raw nested text content.
pub fn glyph_text(text_content: &str) -> String {
    text_content.trim().to_string()
}

/// Host overrides reserving a box of the given aspect ratio.
pub fn reserved_host_style(aspect_ratio: f64) -> HostStyle {
    HostStyle {
        height: Some("0".to_string()),
        padding_top: Some(format!("{}%", format_css_number(aspect_ratio * 100.0))),
    }
}

fn default_number(name: AttrName) -> f64 {
    name.default_value()
        .and_then(parse_leading_f64)
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "../../tests/unit/component/pipeline.rs"]
mod tests;
