//! Equivalent `<glass-text>` markup for a configured component.

use crate::component::GlassText;
use crate::component::attributes::{AttrName, AttributeStore};

/// Attribute order in generated markup.
const SNIPPET_ORDER: [AttrName; 9] = [
    AttrName::ImageSrc,
    AttrName::Blur,
    AttrName::Brightness,
    AttrName::FontSize,
    AttrName::FontWeight,
    AttrName::FontFamily,
    AttrName::TextX,
    AttrName::TextY,
    AttrName::ObjectFit,
];

/// Placeholder shown for inline `data:` sources.
pub const UPLOADED_IMAGE_NAME: &str = "uploaded-image.jpg";

/// How an `image-src` value is shown: the last path segment, or a placeholder for data URIs.
pub fn display_image_src(src: &str) -> &str {
    if src.starts_with("data:") {
        return UPLOADED_IMAGE_NAME;
    }
    src.rsplit('/').next().unwrap_or(src)
}

/// Markup reproducing `attrs` and `text`.
///
/// Only attributes the host assigned and whose value differs from the default are listed, one
/// per line. Without any, the opening tag stays on one line.
pub fn snippet(attrs: &AttributeStore, text: &str) -> String {
    let lines: Vec<String> = SNIPPET_ORDER
        .into_iter()
        .filter_map(|name| {
            let value = attrs.get_attr(name)?;
            let shown = match name {
                AttrName::ImageSrc => display_image_src(value),
                _ => value,
            };
            if shown.is_empty() || name.default_value() == Some(value) {
                return None;
            }
            Some(format!("{name}=\"{shown}\""))
        })
        .collect();

    if lines.is_empty() {
        format!("<glass-text>\n  {text}\n</glass-text>")
    } else {
        format!(
            "<glass-text\n  {}\n>\n  {text}\n</glass-text>",
            lines.join("\n  ")
        )
    }
}

/// Markup for a component's current attributes and text content.
pub fn for_component(component: &GlassText) -> String {
    snippet(component.attributes(), &component.text_content())
}

#[cfg(test)]
#[path = "../tests/unit/markup.rs"]
mod tests;
