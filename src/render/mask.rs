//! Glyph masks: the glass layer's text clip, rasterized from an SVG `<text>` element.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::component::pipeline::Glyph;
use crate::foundation::core::PixelSize;
use crate::foundation::error::{GlassError, GlassResult};
use crate::foundation::math::mul_div255_u8;

/// An 8-bit coverage mask, one byte per pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphMask {
    /// Mask dimensions.
    pub size: PixelSize,
    /// Coverage, row-major, `size.width * size.height` bytes.
    pub alpha: Vec<u8>,
}

impl GlyphMask {
    /// Whether every pixel is fully transparent.
    pub fn is_empty(&self) -> bool {
        self.alpha.iter().all(|&a| a == 0)
    }

    /// Number of pixels with non-zero coverage.
    pub fn coverage(&self) -> usize {
        self.alpha.iter().filter(|&&a| a != 0).count()
    }
}

/// Build the SVG document for a glyph drawn centered at its anchor on a `size` viewport.
pub fn glyph_svg(glyph: &Glyph, size: PixelSize) -> String {
    let s = &glyph.style;
    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            r#"<text x="{x}" y="{y}" font-size="{fs}" font-weight="{fw}" font-family="{ff}" "#,
            r##"text-anchor="middle" dominant-baseline="middle" fill="#ffffff">{text}</text>"##,
            "</svg>"
        ),
        w = size.width,
        h = size.height,
        x = xml_escape(&s.x),
        y = xml_escape(&s.y),
        fs = xml_escape(&s.font_size),
        fw = xml_escape(&s.font_weight),
        ff = xml_escape(&s.font_family),
        text = xml_escape(&glyph.text),
    )
}

/// Rasterize the glyph's coverage at `size`. Empty text yields an empty mask without touching
/// the font database.
#[tracing::instrument(skip(glyph, fontdb), fields(text = %glyph.text))]
pub fn rasterize_glyph_mask(
    glyph: &Glyph,
    size: PixelSize,
    fontdb: &Arc<usvg::fontdb::Database>,
) -> GlassResult<GlyphMask> {
    let pixels = (size.width as usize) * (size.height as usize);
    if glyph.text.is_empty() {
        return Ok(GlyphMask {
            size,
            alpha: vec![0u8; pixels],
        });
    }

    let svg = glyph_svg(glyph, size);
    let opts = usvg::Options {
        fontdb: Arc::clone(fontdb),
        font_resolver: make_font_resolver(),
        ..Default::default()
    };
    let tree = usvg::Tree::from_str(&svg, &opts)
        .context("parse glyph svg")
        .map_err(GlassError::from)?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width, size.height)
        .ok_or_else(|| GlassError::render("failed to allocate glyph pixmap"))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    );

    let alpha = pixmap.data().chunks_exact(4).map(|px| px[3]).collect();
    Ok(GlyphMask { size, alpha })
}

/// Scale every premultiplied pixel of `src` by the mask coverage, writing into `dst`.
pub fn mask_apply_rgba8_premul(src: &[u8], mask: &[u8], dst: &mut [u8]) -> GlassResult<()> {
    if src.len() != dst.len() || src.len() != mask.len() * 4 {
        return Err(GlassError::render(
            "mask_apply expects rgba8 buffers matching the mask pixel count",
        ));
    }
    for ((s, &m), d) in src.chunks_exact(4).zip(mask).zip(dst.chunks_exact_mut(4)) {
        let w16 = u16::from(m);
        d[0] = mul_div255_u8(u16::from(s[0]), w16);
        d[1] = mul_div255_u8(u16::from(s[1]), w16);
        d[2] = mul_div255_u8(u16::from(s[2]), w16);
        d[3] = mul_div255_u8(u16::from(s[3]), w16);
    }
    Ok(())
}

/// System fonts plus any `.ttf`/`.otf`/`.ttc` files found in `extra_dirs`.
pub fn build_fontdb(extra_dirs: &[&Path]) -> Arc<usvg::fontdb::Database> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    for dir in extra_dirs {
        load_fonts_from_dir(&mut db, dir);
        load_fonts_from_dir(&mut db, &dir.join("fonts"));
    }
    tracing::debug!(faces = db.len(), "font database loaded");
    Arc::new(db)
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::debug!(path = %path.display(), error = %e, "skipping unreadable font");
        }
    }
}

// Like usvg's default resolver, but falls back to any installed face so a missing family never
// drops the glyph entirely.
fn make_font_resolver() -> usvg::FontResolver<'static> {
    use usvg::FontResolver;

    FontResolver {
        select_font: Box::new(|font, fontdb| {
            let mut families = Vec::<usvg::fontdb::Family<'_>>::new();
            for family in font.families() {
                families.push(match family {
                    usvg::FontFamily::Serif => usvg::fontdb::Family::Serif,
                    usvg::FontFamily::SansSerif => usvg::fontdb::Family::SansSerif,
                    usvg::FontFamily::Cursive => usvg::fontdb::Family::Cursive,
                    usvg::FontFamily::Fantasy => usvg::fontdb::Family::Fantasy,
                    usvg::FontFamily::Monospace => usvg::fontdb::Family::Monospace,
                    usvg::FontFamily::Named(s) => usvg::fontdb::Family::Name(s),
                });
            }
            families.push(usvg::fontdb::Family::SansSerif);

            let style = match font.style() {
                usvg::FontStyle::Normal => usvg::fontdb::Style::Normal,
                usvg::FontStyle::Italic => usvg::fontdb::Style::Italic,
                usvg::FontStyle::Oblique => usvg::fontdb::Style::Oblique,
            };

            let query = usvg::fontdb::Query {
                families: &families,
                weight: usvg::fontdb::Weight(font.weight()),
                stretch: usvg::fontdb::Stretch::Normal,
                style,
            };

            if let Some(id) = fontdb.query(&query) {
                return Some(id);
            }
            fontdb.faces().next().map(|f| f.id)
        }),
        select_fallback: FontResolver::default_fallback_selector(),
    }
}

/// Escape markup characters and drop those XML 1.0 forbids outright (C0 controls other than tab,
/// newline and carriage return, U+FFFE and U+FFFF).
fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\t' | '\n' | '\r' => out.push(c),
            '\u{0}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}' => {}
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

#[cfg(test)]
#[path = "../../tests/unit/render/mask.rs"]
mod tests;
