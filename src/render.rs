//! CPU rasterization of a [`GlassView`]: the sharp layer over the host background, then the
//! blurred and brightened glass layer clipped to the glyph.

/// Separable Gaussian blur on premultiplied RGBA8.
pub mod blur;
/// Color matrices.
pub mod color;
/// Source-over compositing and fills.
pub mod composite;
/// Parsing of the glass layer's CSS filter string.
pub mod filter;
/// `object-fit` modes.
pub mod fit;
pub mod mask;

use std::path::Path;
use std::sync::Arc;

use crate::assets::decode::PreparedImage;
use crate::component::pipeline::GlassView;
use crate::foundation::core::{Affine, PixelSize, Rgba8Premul};
use crate::foundation::error::{GlassError, GlassResult};
use crate::render::blur::css_blur_rgba8_premul;
use crate::render::color::brightness_in_place;
use crate::render::composite::{fill_rgba8, over_in_place};
use crate::render::filter::GlassFilter;
use crate::render::fit::{ObjectFit, fit_transform};
use crate::render::mask::{build_fontdb, mask_apply_rgba8_premul, rasterize_glyph_mask};

/// Default host background, `#111111`.
pub const DEFAULT_BACKGROUND: [u8; 4] = [0x11, 0x11, 0x11, 0xff];

/// A rendered frame in RGBA8 format.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Straight-alpha copy of the pixel data, suitable for image encoders.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        if !self.premultiplied {
            return out;
        }
        for px in out.chunks_exact_mut(4) {
            let a = u32::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }

    /// The premultiplied pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Frame geometry and background.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameOpts {
    /// Host box width in pixels.
    pub width: u32,
    /// Box height used when no aspect box is reserved.
    pub height: Option<u32>,
    /// Straight-alpha background color behind both layers.
    pub background_rgba: [u8; 4],
}

impl Default for FrameOpts {
    fn default() -> Self {
        Self {
            width: 800,
            height: None,
            background_rgba: DEFAULT_BACKGROUND,
        }
    }
}

impl FrameOpts {
    /// Options for a box `width` pixels wide.
    pub fn new(width: u32) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    /// Set the fallback height.
    pub fn with_height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }

    /// Resolve the box size for `view`.
    ///
    /// A reserved aspect box wins (`height = round(width * ratio)`); otherwise the explicit
    /// height is used. Without either the box has collapsed to zero height.
    pub fn frame_size(&self, view: &GlassView) -> GlassResult<PixelSize> {
        if self.width == 0 {
            return Err(GlassError::validation("frame width must be > 0"));
        }
        let height = match (view.aspect_ratio, self.height) {
            (Some(ratio), _) if ratio.is_finite() && ratio > 0.0 => {
                (f64::from(self.width) * ratio).round().max(1.0) as u32
            }
            (_, Some(h)) => h,
            _ => {
                return Err(GlassError::validation(
                    "host box has no reserved aspect and no explicit height",
                ));
            }
        };
        let size = PixelSize::new(self.width, height)?;
        if size.width > u32::from(u16::MAX) || size.height > u32::from(u16::MAX) {
            return Err(GlassError::validation(format!(
                "frame size {}x{} exceeds {}",
                size.width,
                size.height,
                u16::MAX
            )));
        }
        Ok(size)
    }
}

/// Renders glass-text views on the CPU.
///
/// Holds the font database used for glyph masks and a reusable `vello_cpu` context for the image
/// layers.
pub struct CpuRenderer {
    fontdb: Arc<usvg::fontdb::Database>,
    ctx: Option<vello_cpu::RenderContext>,
}

impl std::fmt::Debug for CpuRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuRenderer")
            .field("font_faces", &self.fontdb.len())
            .finish_non_exhaustive()
    }
}

impl Default for CpuRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl CpuRenderer {
    /// Renderer using the system fonts.
    pub fn new() -> Self {
        Self::with_font_dirs(&[])
    }

    /// Renderer using the system fonts plus font files found in `dirs` (and their `fonts/`).
    pub fn with_font_dirs(dirs: &[&Path]) -> Self {
        Self::with_fontdb(build_fontdb(dirs))
    }

    /// Renderer sharing an existing font database.
    pub fn with_fontdb(fontdb: Arc<usvg::fontdb::Database>) -> Self {
        Self { fontdb, ctx: None }
    }

    /// Whether any font face is available for glyph masks.
    pub fn has_fonts(&self) -> bool {
        self.fontdb.len() > 0
    }

    /// Render `view` with `image` as the source of both layers.
    ///
    /// `image` is `None` when the view has no source; the frame is then just the background.
    #[tracing::instrument(skip_all, fields(width = opts.width, text = %view.glyph.text))]
    pub fn render(
        &mut self,
        view: &GlassView,
        image: Option<&PreparedImage>,
        opts: &FrameOpts,
    ) -> GlassResult<FrameRGBA> {
        let size = opts.frame_size(view)?;
        let mut data = vec![0u8; size.rgba8_len()?];
        let [r, g, b, a] = opts.background_rgba;
        fill_rgba8(&mut data, Rgba8Premul::from_straight_rgba(r, g, b, a));

        let Some(image) = image else {
            return Ok(FrameRGBA {
                width: size.width,
                height: size.height,
                data,
                premultiplied: true,
            });
        };

        let sharp_fit = ObjectFit::parse(&view.sharp.object_fit);
        let sharp = self.draw_layer(image, sharp_fit, size)?;
        over_in_place(&mut data, &sharp, 1.0)?;

        let mask = rasterize_glyph_mask(&view.glyph, size, &self.fontdb)?;
        if mask.is_empty() {
            tracing::debug!("glyph mask is empty; skipping glass layer");
        } else {
            let glass_fit = ObjectFit::parse(&view.glass.object_fit);
            let glass = if glass_fit == sharp_fit {
                sharp
            } else {
                self.draw_layer(image, glass_fit, size)?
            };
            let filter = view
                .glass
                .filter
                .as_deref()
                .map(GlassFilter::parse)
                .unwrap_or_else(GlassFilter::identity);

            let mut glass = css_blur_rgba8_premul(&glass, size, filter.blur_px)?;
            brightness_in_place(&mut glass, filter.brightness);

            let mut clipped = vec![0u8; glass.len()];
            mask_apply_rgba8_premul(&glass, &mask.alpha, &mut clipped)?;
            over_in_place(&mut data, &clipped, 1.0)?;
        }

        Ok(FrameRGBA {
            width: size.width,
            height: size.height,
            data,
            premultiplied: true,
        })
    }

    fn draw_layer(
        &mut self,
        image: &PreparedImage,
        fit: ObjectFit,
        size: PixelSize,
    ) -> GlassResult<Vec<u8>> {
        let (w, h) = to_u16_size(size)?;
        let pixmap = pixmap_from_premul_bytes(&image.rgba8_premul, image.width, image.height)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        let tr = fit_transform(
            image.size(),
            f64::from(size.width),
            f64::from(size.height),
            fit,
        );

        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == w && ctx.height() == h => ctx,
            _ => vello_cpu::RenderContext::new(w, h),
        };
        ctx.reset();
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(affine_to_cpu(tr));
        ctx.set_paint(paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(image.width),
            f64::from(image.height),
        ));
        ctx.flush();

        let mut target = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut target);
        self.ctx = Some(ctx);
        Ok(target.data_as_u8_slice().to_vec())
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn to_u16_size(size: PixelSize) -> GlassResult<(u16, u16)> {
    let w: u16 = size
        .width
        .try_into()
        .map_err(|_| GlassError::render("pixmap width exceeds u16"))?;
    let h: u16 = size
        .height
        .try_into()
        .map_err(|_| GlassError::render("pixmap height exceeds u16"))?;
    Ok((w, h))
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> GlassResult<vello_cpu::Pixmap> {
    let (w, h) = to_u16_size(PixelSize { width, height })?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(GlassError::render("pixmap byte len mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect::<Vec<_>>();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

#[cfg(test)]
#[path = "../tests/unit/render/frame.rs"]
mod tests;
