/// Apply a 4x5 color matrix (row-major, offsets in the last column) to premultiplied RGBA8.
///
/// The matrix operates on straight-alpha values in `0..=1`.
pub fn color_matrix_rgba8_premul(src: &[u8], dst: &mut [u8], m: [f32; 20]) {
    debug_assert_eq!(src.len(), dst.len());
    for (s, d) in src.chunks_exact(4).zip(dst.chunks_exact_mut(4)) {
        let pr = f32::from(s[0]) / 255.0;
        let pg = f32::from(s[1]) / 255.0;
        let pb = f32::from(s[2]) / 255.0;
        let pa = f32::from(s[3]) / 255.0;

        let inv_a = if pa > 0.0 { 1.0 / pa } else { 0.0 };
        let r = pr * inv_a;
        let g = pg * inv_a;
        let b = pb * inv_a;
        let a = pa;

        let out_r = (m[0] * r + m[1] * g + m[2] * b + m[3] * a + m[4]).clamp(0.0, 1.0);
        let out_g = (m[5] * r + m[6] * g + m[7] * b + m[8] * a + m[9]).clamp(0.0, 1.0);
        let out_b = (m[10] * r + m[11] * g + m[12] * b + m[13] * a + m[14]).clamp(0.0, 1.0);
        let out_a = (m[15] * r + m[16] * g + m[17] * b + m[18] * a + m[19]).clamp(0.0, 1.0);

        d[0] = unit_to_u8(out_r * out_a);
        d[1] = unit_to_u8(out_g * out_a);
        d[2] = unit_to_u8(out_b * out_a);
        d[3] = unit_to_u8(out_a);
    }
}

/// CSS `brightness(v)`: scales the color channels, alpha untouched.
pub fn brightness_matrix(v: f32) -> [f32; 20] {
    [
        v, 0.0, 0.0, 0.0, 0.0, //
        0.0, v, 0.0, 0.0, 0.0, //
        0.0, 0.0, v, 0.0, 0.0, //
        0.0, 0.0, 0.0, 1.0, 0.0,
    ]
}

/// Apply `brightness(factor)` in place. A factor of exactly `1.0` is a no-op.
pub fn brightness_in_place(buf: &mut [u8], factor: f32) {
    if factor == 1.0 {
        return;
    }
    let src = buf.to_vec();
    color_matrix_rgba8_premul(&src, buf, brightness_matrix(factor));
}

fn unit_to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/color.rs"]
mod tests;
