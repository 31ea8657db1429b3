//! JSON configuration for a component: the attribute values plus the text content.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::component::GlassText;
use crate::component::attributes::AttrName;
use crate::foundation::error::{GlassError, GlassResult};

/// Declarative settings for one `<glass-text>`.
///
/// Keys are the kebab-case attribute names plus `text`. Absent keys leave the component's
/// attribute unassigned so the defaults table applies.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct GlassConfig {
    /// `image-src`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_src: Option<String>,
    /// `blur`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blur: Option<String>,
    /// `brightness`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brightness: Option<String>,
    /// `text-x`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_x: Option<String>,
    /// `text-y`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_y: Option<String>,
    /// `font-size`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    /// `font-weight`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    /// `font-family`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// `object-fit`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_fit: Option<String>,
    /// Nested text content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl GlassConfig {
    /// Parse from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> GlassResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| GlassError::serde(format!("parse glass-text config JSON: {e}")))
    }

    /// Parse from a JSON string.
    pub fn from_json(s: &str) -> GlassResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Parse from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> GlassResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            GlassError::validation(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Pretty-printed JSON.
    pub fn to_json_pretty(&self) -> GlassResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| GlassError::serde(format!("serialize glass-text config: {e}")))
    }

    /// Value for an attribute.
    pub fn get(&self, name: AttrName) -> Option<&str> {
        self.slot(name).as_deref()
    }

    /// Assign or clear an attribute.
    pub fn set(&mut self, name: AttrName, value: Option<String>) {
        *self.slot_mut(name) = value;
    }

    /// Overlay `other` on top of `self`: every value present in `other` wins.
    pub fn merged_with(mut self, other: GlassConfig) -> Self {
        for name in AttrName::ALL {
            if let Some(v) = other.get(name) {
                self.set(name, Some(v.to_string()));
            }
        }
        if other.text.is_some() {
            self.text = other.text;
        }
        self
    }

    /// Snapshot of a component's assigned attributes and raw text content.
    pub fn from_component(component: &GlassText) -> Self {
        let mut out = Self::default();
        for (name, value) in component.attributes().iter() {
            out.set(name, Some(value.to_string()));
        }
        let text = component.text_content();
        if !text.is_empty() {
            out.text = Some(text);
        }
        out
    }

    /// Assign every present value on `component`. Absent keys are left untouched.
    pub fn apply_to(&self, component: &mut GlassText) {
        for name in AttrName::ALL {
            if let Some(v) = self.get(name) {
                component.set_attribute(name.as_str(), v);
            }
        }
        if let Some(text) = &self.text {
            component.set_text_content(text.clone());
        }
    }

    fn slot(&self, name: AttrName) -> &Option<String> {
        match name {
            AttrName::ImageSrc => &self.image_src,
            AttrName::Blur => &self.blur,
            AttrName::Brightness => &self.brightness,
            AttrName::TextX => &self.text_x,
            AttrName::TextY => &self.text_y,
            AttrName::FontSize => &self.font_size,
            AttrName::FontWeight => &self.font_weight,
            AttrName::FontFamily => &self.font_family,
            AttrName::ObjectFit => &self.object_fit,
        }
    }

    fn slot_mut(&mut self, name: AttrName) -> &mut Option<String> {
        match name {
            AttrName::ImageSrc => &mut self.image_src,
            AttrName::Blur => &mut self.blur,
            AttrName::Brightness => &mut self.brightness,
            AttrName::TextX => &mut self.text_x,
            AttrName::TextY => &mut self.text_y,
            AttrName::FontSize => &mut self.font_size,
            AttrName::FontWeight => &mut self.font_weight,
            AttrName::FontFamily => &mut self.font_family,
            AttrName::ObjectFit => &mut self.object_fit,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
