use crate::foundation::core::{Affine, PixelSize};

/// How an image layer fills its box (CSS `object-fit`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObjectFit {
    /// Scale to cover the box, cropping overflow. Keeps aspect ratio.
    #[default]
    Cover,
    /// Scale to fit inside the box, letterboxing. Keeps aspect ratio.
    Contain,
    /// Stretch to the box.
    Fill,
    /// Natural size, centered.
    None,
    /// Like `Contain`, but never scales up.
    ScaleDown,
}

impl ObjectFit {
    /// Parse a keyword; anything unrecognized falls back to `Cover`, the component's base style.
    pub fn parse(keyword: &str) -> Self {
        match keyword.trim().to_ascii_lowercase().as_str() {
            "contain" => Self::Contain,
            "fill" => Self::Fill,
            "none" => Self::None,
            "scale-down" => Self::ScaleDown,
            _ => Self::Cover,
        }
    }
}

/// Transform mapping image pixel space into a `box_width x box_height` box, centered.
///
/// Overflow (for `Cover` and `None`) is left to the surface bounds to clip.
pub fn fit_transform(image: PixelSize, box_width: f64, box_height: f64, fit: ObjectFit) -> Affine {
    let iw = f64::from(image.width);
    let ih = f64::from(image.height);
    let (sx, sy) = match fit {
        ObjectFit::Fill => (box_width / iw, box_height / ih),
        ObjectFit::Contain => {
            let s = (box_width / iw).min(box_height / ih);
            (s, s)
        }
        ObjectFit::Cover => {
            let s = (box_width / iw).max(box_height / ih);
            (s, s)
        }
        ObjectFit::None => (1.0, 1.0),
        ObjectFit::ScaleDown => {
            let s = (box_width / iw).min(box_height / ih).min(1.0);
            (s, s)
        }
    };

    let dx = (box_width - iw * sx) * 0.5;
    let dy = (box_height - ih * sy) * 0.5;
    Affine::translate((dx, dy)) * Affine::scale_non_uniform(sx, sy)
}

#[cfg(test)]
#[path = "../../tests/unit/render/fit.rs"]
mod tests;
