use super::*;

fn size(width: u32, height: u32) -> PixelSize {
    PixelSize::new(width, height).unwrap()
}

#[test]
fn css_params_use_blur_length_as_sigma() {
    assert_eq!(css_blur_params(0.0), (0, 0.0));
    assert_eq!(css_blur_params(-1.0), (0, 0.0));
    assert_eq!(css_blur_params(f64::NAN), (0, 0.0));
    assert_eq!(css_blur_params(10.0), (30, 10.0));
    assert_eq!(css_blur_params(0.2), (1, 0.2));
    assert_eq!(css_blur_params(1000.0).0, MAX_BLUR_RADIUS);
}

#[test]
fn kernel_is_normalized_and_symmetric() {
    for px in [0.2, 1.5, 5.0, 10.0] {
        let k = BlurKernel::for_css_length(px).unwrap();
        assert_eq!(k.taps().len(), 2 * k.radius() as usize + 1, "blur({px}px)");
        assert_eq!(k.taps().iter().sum::<u32>(), Q16_ONE, "blur({px}px)");
        let rev: Vec<u32> = k.taps().iter().rev().copied().collect();
        assert_eq!(k.taps(), rev.as_slice(), "blur({px}px)");
    }
    assert_eq!(BlurKernel::for_css_length(10.0).unwrap().radius(), 30);
}

#[test]
fn zero_length_has_no_kernel_and_copies_the_layer() {
    assert!(BlurKernel::for_css_length(0.0).is_none());
    let src: Vec<u8> = (0..24).collect();
    assert_eq!(css_blur_rgba8_premul(&src, size(3, 2), 0.0).unwrap(), src);
}

#[test]
fn solid_glass_stays_solid() {
    let px = [60u8, 40, 20, 200];
    let src = px.repeat(6 * 4);
    let out = css_blur_rgba8_premul(&src, size(6, 4), 5.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn vertical_edge_softens_only_horizontally() {
    let (w, h) = (8u32, 3u32);
    let mut src = Vec::new();
    for _ in 0..h {
        for x in 0..w {
            let v = if x < w / 2 { 0 } else { 255 };
            src.extend_from_slice(&[v, v, v, 255]);
        }
    }
    let out = css_blur_rgba8_premul(&src, size(w, h), 1.5).unwrap();

    let row = |y: u32| -> Vec<u8> {
        (0..w)
            .map(|x| out[((y * w + x) * 4) as usize])
            .collect()
    };
    let first = row(0);
    assert!(first.windows(2).all(|p| p[0] <= p[1]));
    assert!(first[3] > 0 && first[4] < 255);
    for y in 1..h {
        assert_eq!(row(y), first);
    }
    assert!(out.chunks_exact(4).all(|p| p[3] == 255));
}

#[test]
fn output_stays_premultiplied() {
    let mut src = Vec::new();
    for i in 0..25u32 {
        let a = ((i * 37) % 256) as u8;
        let c = a / 2;
        src.extend_from_slice(&[a, c, c / 3, a]);
    }
    let out = css_blur_rgba8_premul(&src, size(5, 5), 2.0).unwrap();
    for p in out.chunks_exact(4) {
        assert!(p[0] <= p[3] && p[1] <= p[3] && p[2] <= p[3], "{p:?}");
    }
}

#[test]
fn mismatched_buffer_is_a_render_error() {
    let err = css_blur_rgba8_premul(&[0u8; 7], size(1, 2), 1.0).unwrap_err();
    assert!(matches!(err, GlassError::Render(_)));
}
