use crate::foundation::math::parse_leading_f64;

const DEFAULT_BLUR_PX: f64 = 10.0;
const DEFAULT_BRIGHTNESS: f32 = 0.8;

/// Typed form of the glass layer's `blur(..) brightness(..)` filter string.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlassFilter {
    /// Blur length in px, used as the Gaussian standard deviation.
    pub blur_px: f64,
    /// Brightness multiplier, `1.0` is unchanged.
    pub brightness: f32,
}

impl GlassFilter {
    /// No blur, unchanged brightness.
    pub fn identity() -> Self {
        Self {
            blur_px: 0.0,
            brightness: 1.0,
        }
    }

    /// Parse a filter string such as `blur(5px) brightness(150%)`.
    ///
    /// Functions other than `blur` and `brightness` are ignored. A function that is present but
    /// malformed takes its default.
    pub fn parse(filter: &str) -> Self {
        let mut out = Self::identity();
        for (name, arg) in filter_functions(filter) {
            match name.to_ascii_lowercase().as_str() {
                "blur" => out.blur_px = parse_blur_px(arg),
                "brightness" => out.brightness = parse_brightness_factor(arg),
                other => tracing::trace!(function = other, "ignoring filter function"),
            }
        }
        out
    }
}

/// Blur length from a `blur()` argument; `0` is valid.
pub fn parse_blur_px(arg: &str) -> f64 {
    let arg = arg.trim();
    if arg.is_empty() {
        return 0.0;
    }
    parse_leading_f64(arg)
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(DEFAULT_BLUR_PX)
}

/// Brightness factor from a bare number or a percentage; malformed or negative input yields `0.8`.
pub fn parse_brightness_factor(arg: &str) -> f32 {
    let arg = arg.trim();
    let (num, scale) = match arg.strip_suffix('%') {
        Some(n) => (n.trim_end(), 0.01),
        None => (arg, 1.0),
    };
    match num.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => (v * scale) as f32,
        _ => DEFAULT_BRIGHTNESS,
    }
}

fn filter_functions(filter: &str) -> impl Iterator<Item = (&str, &str)> {
    let mut rest = filter;
    std::iter::from_fn(move || {
        let open = rest.find('(')?;
        let close = open + rest[open..].find(')')?;
        let name = rest[..open].trim();
        let arg = &rest[open + 1..close];
        rest = &rest[close + 1..];
        Some((name, arg))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/filter.rs"]
mod tests;
