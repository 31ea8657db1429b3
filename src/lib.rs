//! Frosted-glass text over images.
//!
//! A [`GlassText`] component takes declarative attributes (image source, blur, brightness, glyph
//! position and font) plus nested text content, and keeps a private [`GlassView`] in sync:
//!
//! - Attribute changes recompute only the affected part of the view
//! - Image sources are probed asynchronously to reserve the host box's aspect ratio
//! - Nested content mutations are mirrored into the glyph
//!
//! [`CpuRenderer`] rasterizes a view into a [`FrameRGBA`].
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub mod assets;
pub mod component;
pub mod config;
pub mod markup;
pub mod render;

pub use crate::assets::decode::{PreparedImage, decode_image, probe_dimensions};
pub use crate::assets::probe::{
    Generation, ImageProber, ManualProber, ProbeOutcome, ProbeReply, ThreadedProber,
};
pub use crate::assets::source::ImageSource;
pub use crate::component::attributes::{AttrCategory, AttrName, AttributeChange, AttributeStore};
pub use crate::component::content::{ContentNode, ContentTree, MutationKind, MutationRecord};
pub use crate::component::pipeline::{GlassView, Glyph, GlyphStyle, HostStyle, ImageLayer};
pub use crate::component::{GlassText, Lifecycle, RenderStats};
pub use crate::config::GlassConfig;
pub use crate::foundation::core::{Affine, PixelSize, Rect, Rgba8Premul};
pub use crate::foundation::error::{GlassError, GlassResult};
pub use crate::render::fit::ObjectFit;
pub use crate::render::{CpuRenderer, FrameOpts, FrameRGBA};
