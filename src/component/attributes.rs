use std::collections::BTreeMap;
use std::fmt;

/// The closed set of attributes the component observes.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum AttrName {
    /// Source locator shared by both image layers.
    ImageSrc,
    /// Glass-layer blur radius in px.
    Blur,
    /// Glass-layer brightness multiplier.
    Brightness,
    /// Horizontal glyph anchor.
    TextX,
    /// Vertical glyph anchor.
    TextY,
    /// Glyph font size.
    FontSize,
    /// Glyph font weight.
    FontWeight,
    /// Glyph font family.
    FontFamily,
    /// Fit mode shared by both image layers.
    ObjectFit,
}

/// Which sub-pipeline an attribute change is routed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttrCategory {
    /// Layer source plus aspect synchronization.
    Image,
    /// Glass-layer filter.
    Filter,
    /// Layer fit mode.
    Fit,
    /// Glyph geometry and font style.
    TextStyle,
}

impl AttrName {
    /// Every observed attribute, in declaration order.
    pub const ALL: [AttrName; 9] = [
        AttrName::ImageSrc,
        AttrName::Blur,
        AttrName::Brightness,
        AttrName::TextX,
        AttrName::TextY,
        AttrName::FontSize,
        AttrName::FontWeight,
        AttrName::FontFamily,
        AttrName::ObjectFit,
    ];

    /// Markup name of the attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            AttrName::ImageSrc => "image-src",
            AttrName::Blur => "blur",
            AttrName::Brightness => "brightness",
            AttrName::TextX => "text-x",
            AttrName::TextY => "text-y",
            AttrName::FontSize => "font-size",
            AttrName::FontWeight => "font-weight",
            AttrName::FontFamily => "font-family",
            AttrName::ObjectFit => "object-fit",
        }
    }

    /// Look up an observed attribute by markup name. Names are case-insensitive.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|a| a.as_str() == name)
    }

    /// The single defaults table. `None` means the attribute has no default (`image-src`).
    pub fn default_value(self) -> Option<&'static str> {
        match self {
            AttrName::ImageSrc => None,
            AttrName::Blur => Some("10"),
            AttrName::Brightness => Some("0.8"),
            AttrName::TextX | AttrName::TextY => Some("50%"),
            AttrName::FontSize => Some("100px"),
            AttrName::FontWeight => Some("700"),
            AttrName::FontFamily => Some("sans-serif"),
            AttrName::ObjectFit => Some("cover"),
        }
    }

    /// Dispatch category for change notifications.
    pub fn category(self) -> AttrCategory {
        match self {
            AttrName::ImageSrc => AttrCategory::Image,
            AttrName::Blur | AttrName::Brightness => AttrCategory::Filter,
            AttrName::ObjectFit => AttrCategory::Fit,
            AttrName::TextX
            | AttrName::TextY
            | AttrName::FontSize
            | AttrName::FontWeight
            | AttrName::FontFamily => AttrCategory::TextStyle,
        }
    }
}

impl fmt::Display for AttrName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single observed attribute transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeChange {
    /// Attribute that changed.
    pub name: AttrName,
    /// Previous value, `None` when it was unset.
    pub old: Option<String>,
    /// New value, `None` when it was removed.
    pub new: Option<String>,
}

/// Attribute values assigned by the host.
///
/// Observed attributes are keyed by [`AttrName`]; anything else is kept verbatim so it can be
/// read back, but never produces a change notification.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributeStore {
    observed: BTreeMap<AttrName, String>,
    other: BTreeMap<String, String>,
}

impl AttributeStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value as assigned, by markup name.
    pub fn get(&self, name: &str) -> Option<&str> {
        match AttrName::parse(name) {
            Some(attr) => self.get_attr(attr),
            None => self.other.get(name).map(String::as_str),
        }
    }

    /// Raw value of an observed attribute.
    pub fn get_attr(&self, name: AttrName) -> Option<&str> {
        self.observed.get(&name).map(String::as_str)
    }

    /// Value of an observed attribute with the defaults table applied.
    ///
    /// Empty strings count as absent, matching how the component reads every attribute.
    pub fn get_or_default(&self, name: AttrName) -> Option<&str> {
        match self.get_attr(name) {
            Some(v) if !v.is_empty() => Some(v),
            _ => name.default_value(),
        }
    }

    /// Assign a value by markup name.
    ///
    /// Returns the change to dispatch, or `None` when the name is not observed or the value is
    /// string-identical to the current one.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Option<AttributeChange> {
        match AttrName::parse(name) {
            Some(attr) => self.set_attr(attr, value),
            None => {
                self.other.insert(name.to_string(), value.into());
                None
            }
        }
    }

    /// Assign an observed attribute.
    pub fn set_attr(&mut self, name: AttrName, value: impl Into<String>) -> Option<AttributeChange> {
        let value = value.into();
        if self.get_attr(name) == Some(value.as_str()) {
            return None;
        }
        let old = self.observed.insert(name, value.clone());
        Some(AttributeChange {
            name,
            old,
            new: Some(value),
        })
    }

    /// Remove a value by markup name.
    pub fn remove(&mut self, name: &str) -> Option<AttributeChange> {
        match AttrName::parse(name) {
            Some(attr) => self.remove_attr(attr),
            None => {
                self.other.remove(name);
                None
            }
        }
    }

    /// Remove an observed attribute; no change when it was already unset.
    pub fn remove_attr(&mut self, name: AttrName) -> Option<AttributeChange> {
        let old = self.observed.remove(&name)?;
        Some(AttributeChange {
            name,
            old: Some(old),
            new: None,
        })
    }

    /// Explicitly assigned observed attributes in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (AttrName, &str)> {
        self.observed.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/component/attributes.rs"]
mod tests;
