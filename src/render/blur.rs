use crate::foundation::core::PixelSize;
use crate::foundation::error::{GlassError, GlassResult};

/// Largest kernel radius the CPU blur accepts.
pub const MAX_BLUR_RADIUS: u32 = 256;

const Q16_ONE: u32 = 1 << 16;

/// Kernel parameters for a CSS `blur(<px>)`: the length is the standard deviation.
///
/// Returns `(radius, sigma)`; a zero radius means no blur.
pub fn css_blur_params(blur_px: f64) -> (u32, f32) {
    if !blur_px.is_finite() || blur_px <= 0.0 {
        return (0, 0.0);
    }
    let sigma = blur_px as f32;
    let radius = ((blur_px * 3.0).ceil() as u32).clamp(1, MAX_BLUR_RADIUS);
    (radius, sigma)
}

/// Normalized 1-D Gaussian with 16.16 fixed-point taps summing to exactly one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlurKernel {
    taps: Vec<u32>,
}

impl BlurKernel {
    /// Kernel for a CSS blur length, or `None` when the length means no blur.
    pub fn for_css_length(blur_px: f64) -> Option<Self> {
        let (radius, sigma) = css_blur_params(blur_px);
        (radius > 0).then(|| Self::gaussian(radius, f64::from(sigma)))
    }

    fn gaussian(radius: u32, sigma: f64) -> Self {
        let r = i64::from(radius);
        let two_var = 2.0 * sigma * sigma;
        let raw: Vec<f64> = (-r..=r)
            .map(|i| {
                let x = i as f64;
                (-(x * x) / two_var).exp()
            })
            .collect();
        // The center weight is exp(0) = 1, so the total is never zero.
        let total: f64 = raw.iter().sum();
        let mut taps: Vec<u32> = raw
            .iter()
            .map(|w| (w / total * f64::from(Q16_ONE)).round() as u32)
            .collect();
        let sum: u32 = taps.iter().sum();
        let mid = taps.len() / 2;
        taps[mid] = (taps[mid] + Q16_ONE).saturating_sub(sum);
        Self { taps }
    }

    /// Taps on either side of the center.
    pub fn radius(&self) -> u32 {
        (self.taps.len() / 2) as u32
    }

    /// Fixed-point taps, `2 * radius + 1` of them.
    pub fn taps(&self) -> &[u32] {
        &self.taps
    }
}

/// Apply CSS `blur(blur_px)` to a premultiplied RGBA8 buffer. Edge pixels extend outward.
pub fn css_blur_rgba8_premul(src: &[u8], size: PixelSize, blur_px: f64) -> GlassResult<Vec<u8>> {
    let len = size.rgba8_len()?;
    if src.len() != len {
        return Err(GlassError::render(format!(
            "blur source is {} bytes, expected {len} for {}x{}",
            src.len(),
            size.width,
            size.height
        )));
    }
    let Some(kernel) = BlurKernel::for_css_length(blur_px) else {
        return Ok(src.to_vec());
    };

    let (w, h) = (size.width as usize, size.height as usize);
    let mut rows = vec![0u8; len];
    convolve_lines(
        src,
        &mut rows,
        Lines {
            count: h,
            len: w,
            step: 4,
            line_step: w * 4,
        },
        kernel.taps(),
    );
    let mut out = vec![0u8; len];
    convolve_lines(
        &rows,
        &mut out,
        Lines {
            count: w,
            len: h,
            step: w * 4,
            line_step: 4,
        },
        kernel.taps(),
    );
    Ok(out)
}

/// Layout of the 1-D lines one blur pass walks, in bytes.
#[derive(Clone, Copy)]
struct Lines {
    count: usize,
    len: usize,
    step: usize,
    line_step: usize,
}

fn convolve_lines(src: &[u8], dst: &mut [u8], lines: Lines, taps: &[u32]) {
    let r = taps.len() / 2;
    let last = lines.len - 1;
    for line in 0..lines.count {
        let base = line * lines.line_step;
        for i in 0..lines.len {
            let mut acc = [0u64; 4];
            for (k, &weight) in taps.iter().enumerate() {
                let at = base + (i + k).saturating_sub(r).min(last) * lines.step;
                for (a, &v) in acc.iter_mut().zip(&src[at..at + 4]) {
                    *a += u64::from(weight) * u64::from(v);
                }
            }
            let at = base + i * lines.step;
            for (d, a) in dst[at..at + 4].iter_mut().zip(acc) {
                *d = ((a + u64::from(Q16_ONE / 2)) >> 16).min(255) as u8;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/blur.rs"]
mod tests;
